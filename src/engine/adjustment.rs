// ==========================================
// RR 检测补正系统 - 产品/方法修正引擎
// ==========================================
// 职责: 在补正值之上叠加两项有序修正
//   1) 产品修正系数 (枚举式 4 码小表, 乘法)
//   2) HKMC 单位换算再标定 (仅指定方法, 公式内嵌两常数标定)
// 红线: corrected 为 None 时跳过, 不得凭空造值
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::coefficient::normalize_method;
use crate::domain::measurement::CorrectedRecord;
use tracing::debug;

// ==========================================
// ProductFactorAdjuster - 产品/方法修正引擎
// ==========================================
pub struct ProductFactorAdjuster {
    // 无状态引擎, 标定配置按次注入
}

impl ProductFactorAdjuster {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 就地应用两项修正 (顺序敏感: 先产品系数, 后 HKMC 换算)
    ///
    /// # 参数
    /// - `records`: 已补正记录 (全族合并后)
    /// - `config`: 引擎标定配置
    pub fn apply(&self, records: &mut [CorrectedRecord], config: &EngineConfig) {
        for record in records.iter_mut() {
            // 1) 产品修正系数: 仅匹配产品生效
            if let Some(factor) = config.factor_for(&record.record.product_code) {
                record.corrected = record.corrected.map(|v| v * factor);
            }

            // 2) HKMC 换算: 仅原始方法名为指定方法的记录
            if normalize_method(&record.record.test_method_name)
                == normalize_method(&config.hkmc_method_name)
            {
                record.corrected = record
                    .corrected
                    .and_then(|v| self.hkmc_recalibrate(v, record.record.warm_load, config));
                if record.corrected.is_none() {
                    debug!(
                        plant = %record.record.plant,
                        product = %record.record.product_code,
                        "HKMC 换算缺少有效暖机载荷, 补正值未定义"
                    );
                }
            }
        }
    }

    /// HKMC 单位换算再标定
    ///
    /// 换算链: RRC -> 力单位 (warm_load * 载荷系数) -> 线性再标定 -> 除同一载荷常数还原
    ///
    /// # 返回
    /// 载荷缺失或非正时返回 None (未定义)
    fn hkmc_recalibrate(
        &self,
        value: f64,
        warm_load: Option<f64>,
        config: &EngineConfig,
    ) -> Option<f64> {
        let load = warm_load.filter(|l| l.is_finite() && *l > 0.0)?;
        let load_term = load * config.hkmc_load_factor;
        let force = value * load_term;
        let recalibrated = force * config.hkmc_slope + config.hkmc_intercept;
        Some(recalibrated / load_term)
    }
}

impl Default for ProductFactorAdjuster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::measurement::MeasurementRecord;
    use crate::domain::types::MethodFamily;
    use chrono::NaiveDate;

    fn corrected_record(
        product_code: &str,
        method: &str,
        warm_load: Option<f64>,
        corrected: Option<f64>,
    ) -> CorrectedRecord {
        CorrectedRecord {
            record: MeasurementRecord {
                plant: "DJ".to_string(),
                product_code: product_code.to_string(),
                sample_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                test_method_name: method.to_string(),
                position: "FL".to_string(),
                warm_load,
                raw_value: corrected.unwrap_or(0.0),
                corrected_result_hint: None,
                judgement: None,
                raw_test_value: None,
                test_sequence: None,
            },
            family: MethodFamily::Sae,
            corrected,
            period_tag: None,
        }
    }

    #[test]
    fn test_product_factor_applied_to_listed_code() {
        // 场景: 4 码表内 factor=0.9055, 补正值 10.0 => 9.055
        let adjuster = ProductFactorAdjuster::new();
        let config = EngineConfig::default();
        let mut records = vec![corrected_record("1012934", "SAEJ1269", None, Some(10.0))];
        adjuster.apply(&mut records, &config);
        assert!((records[0].corrected.unwrap() - 9.055).abs() < 1e-9);
    }

    #[test]
    fn test_unlisted_product_code_unchanged() {
        let adjuster = ProductFactorAdjuster::new();
        let config = EngineConfig::default();
        let mut records = vec![corrected_record("9999999", "SAEJ1269", None, Some(10.0))];
        adjuster.apply(&mut records, &config);
        assert!((records[0].corrected.unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_hkmc_recalibration_round_trip() {
        let adjuster = ProductFactorAdjuster::new();
        let config = EngineConfig::default();
        let mut records = vec![corrected_record("9999999", "HKMC", Some(400.0), Some(8.0))];
        adjuster.apply(&mut records, &config);

        // 手算: load_term = 400 * 0.00980665; f = 8 * load_term
        // f' = f * 0.9682 + 0.0554; v' = f' / load_term
        let load_term = 400.0 * 0.009_806_65;
        let expected = (8.0 * load_term * 0.9682 + 0.0554) / load_term;
        assert!((records[0].corrected.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_hkmc_without_warm_load_yields_none() {
        let adjuster = ProductFactorAdjuster::new();
        let config = EngineConfig::default();
        let mut records = vec![corrected_record("9999999", "HKMC", None, Some(8.0))];
        adjuster.apply(&mut records, &config);
        assert!(records[0].corrected.is_none());
    }

    #[test]
    fn test_factor_then_hkmc_order() {
        // 产品系数先于 HKMC 换算
        let adjuster = ProductFactorAdjuster::new();
        let config = EngineConfig::default();
        let mut records = vec![corrected_record("1012934", "HKMC", Some(400.0), Some(10.0))];
        adjuster.apply(&mut records, &config);

        let load_term = 400.0 * 0.009_806_65;
        let after_factor = 10.0 * 0.9055;
        let expected = (after_factor * load_term * 0.9682 + 0.0554) / load_term;
        assert!((records[0].corrected.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_corrected_stays_undefined() {
        let adjuster = ProductFactorAdjuster::new();
        let config = EngineConfig::default();
        let mut records = vec![corrected_record("1012934", "SAEJ1269", None, None)];
        adjuster.apply(&mut records, &config);
        assert!(records[0].corrected.is_none());
    }
}
