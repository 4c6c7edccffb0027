// ==========================================
// 测试辅助函数
// ==========================================
// 共享夹具: 测定记录/规格行/系数索引构建器
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use rr_capability::domain::coefficient::CoefficientStore;
use rr_capability::domain::measurement::MeasurementRecord;
use rr_capability::domain::specification::SpecificationRow;
use rr_capability::domain::types::TestScope;
use rr_capability::RunParams;

/// 创建测试用的测定记录
pub fn make_record(
    plant: &str,
    product_code: &str,
    sample_date: NaiveDate,
    method: &str,
    position: &str,
    raw_value: f64,
) -> MeasurementRecord {
    MeasurementRecord {
        plant: plant.to_string(),
        product_code: product_code.to_string(),
        sample_date,
        test_method_name: method.to_string(),
        position: position.to_string(),
        warm_load: Some(400.0),
        raw_value,
        corrected_result_hint: None,
        judgement: Some("OK".to_string()),
        raw_test_value: Some(raw_value),
        test_sequence: Some(1),
    }
}

/// 创建测试用的规格行
pub fn make_spec(
    plant: &str,
    product_code: &str,
    spec_max: Option<f64>,
    spec_min: f64,
    rr_index: f64,
) -> SpecificationRow {
    SpecificationRow {
        plant: plant.to_string(),
        product_code: product_code.to_string(),
        spec_max,
        spec_min,
        rr_index,
    }
}

/// 创建测试用的系数索引
///
/// - 本地: (DJ, FL) A=1.02 B=-0.10 / (DJ, RR) A=1.00 B=0.00
/// - 参照: ISO28580 C=1.0 D=0.0 / ISO18164 C=0.98 D=0.05
/// - SVP: (KM, FL, SVP) A=1.10 B=0.20
pub fn make_store() -> CoefficientStore {
    let mut store = CoefficientStore::new();
    store.insert_local("DJ", "FL", 1.02, -0.10);
    store.insert_local("DJ", "RR", 1.00, 0.00);
    store.insert_reference("ISO28580", 1.0, 0.0);
    store.insert_reference("ISO18164", 0.98, 0.05);
    store.insert_svp("KM", "FL", "SVP", 1.10, 0.20);
    store
}

/// 创建默认运行入参 (2024-03 全月, OE 范围)
pub fn make_params(break_date: Option<NaiveDate>) -> RunParams {
    RunParams {
        date_from: day(1),
        date_to: day(31),
        scope: TestScope::Oe,
        break_date,
        method_filter: None,
        product_filter: None,
    }
}

/// 2024 年 3 月第 d 日
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}
