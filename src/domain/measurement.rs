// ==========================================
// RR 检测补正系统 - 测定记录实体
// ==========================================
// 输入: 数据仓库镜像抽取的原始检测行
// 红线: 记录一经分类即不可变; 补正值以 Option 显式表达"未定义"
// ==========================================

use crate::domain::types::{MethodFamily, PeriodTag};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MeasurementRecord - 原始测定记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// 工厂代码
    pub plant: String,
    /// 产品规格代码 (M_CODE)
    pub product_code: String,
    /// 采样日期
    pub sample_date: NaiveDate,
    /// 测试方法名 (原始字符串, 分类前)
    pub test_method_name: String,
    /// 测试工位
    pub position: String,
    /// 暖机载荷 (kgf), HKMC 换算时必需
    pub warm_load: Option<f64>,
    /// 旧协议测定结果 (补正输入)
    pub raw_value: f64,
    /// 仓库侧预补正提示值 (仅保留供核查, 引擎不使用)
    pub corrected_result_hint: Option<f64>,
    /// 判定结果 (合格/不合格原始标记)
    pub judgement: Option<String>,
    /// 原始试验值
    pub raw_test_value: Option<f64>,
    /// 试验序号
    pub test_sequence: Option<i64>,
}

// ==========================================
// ClassifiedRecord - 已分类记录
// ==========================================
// 方法族在分类阶段一次性确定, 下游不再做字符串判断
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub record: MeasurementRecord,
    pub family: MethodFamily,
}

// ==========================================
// CorrectedRecord - 已补正记录
// ==========================================
// corrected == None 表示补正未定义 (缺失系数/载荷等),
// 该记录保留在明细输出中但不参与统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectedRecord {
    pub record: MeasurementRecord,
    pub family: MethodFamily,
    pub corrected: Option<f64>,
    pub period_tag: Option<PeriodTag>,
}

impl CorrectedRecord {
    /// 分组键: (工厂, 产品代码, 期间标签)
    pub fn group_key(&self) -> (String, String, Option<PeriodTag>) {
        (
            self.record.plant.clone(),
            self.record.product_code.clone(),
            self.period_tag,
        )
    }
}
