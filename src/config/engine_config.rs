// ==========================================
// RR 检测补正系统 - 引擎标定配置
// ==========================================
// 职责: 集中管理域内标定常数, 禁止散落在公式里的魔法数
// 生命周期: 每次运行装载一次, 运行期间只读
// ==========================================
// 说明: 单侧容差带与 HKMC 换算常数来自工程标定源,
// 默认值对齐现行标定版本, 可经 serde 覆写
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ProductFactor - 产品修正系数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFactor {
    pub product_code: String,
    pub factor: f64,
}

// ==========================================
// EngineConfig - 引擎标定配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 单侧上限规格的对称容差带半宽 (围绕 rr_index)
    pub one_sided_tolerance: f64,

    // ===== HKMC 单位换算再标定 =====
    /// 指定换算方法名 (归一化比较)
    pub hkmc_method_name: String,
    /// 载荷换算系数: kgf -> kN
    pub hkmc_load_factor: f64,
    /// 力单位域再标定斜率
    pub hkmc_slope: f64,
    /// 力单位域再标定截距
    pub hkmc_intercept: f64,

    /// 产品修正系数表 (枚举式小表, 仅匹配产品生效)
    pub product_factors: Vec<ProductFactor>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            one_sided_tolerance: 0.3,
            hkmc_method_name: "HKMC".to_string(),
            hkmc_load_factor: 0.009_806_65,
            hkmc_slope: 0.9682,
            hkmc_intercept: 0.0554,
            product_factors: vec![
                ProductFactor {
                    product_code: "1012934".to_string(),
                    factor: 0.9055,
                },
                ProductFactor {
                    product_code: "1015675".to_string(),
                    factor: 0.9271,
                },
                ProductFactor {
                    product_code: "1019127".to_string(),
                    factor: 0.9444,
                },
                ProductFactor {
                    product_code: "1023581".to_string(),
                    factor: 0.9685,
                },
            ],
        }
    }
}

impl EngineConfig {
    /// 查产品修正系数; 未登录的产品返回 None (不修正)
    pub fn factor_for(&self, product_code: &str) -> Option<f64> {
        self.product_factors
            .iter()
            .find(|pf| pf.product_code == product_code)
            .map(|pf| pf.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_four_product_factors() {
        let config = EngineConfig::default();
        assert_eq!(config.product_factors.len(), 4);
        assert_eq!(config.factor_for("1012934"), Some(0.9055));
        assert_eq!(config.factor_for("9999999"), None);
    }

    #[test]
    fn test_config_serde_override() {
        let json = r#"{
            "one_sided_tolerance": 0.25,
            "hkmc_method_name": "HKMC",
            "hkmc_load_factor": 0.00980665,
            "hkmc_slope": 1.0,
            "hkmc_intercept": 0.0,
            "product_factors": []
        }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert!((config.one_sided_tolerance - 0.25).abs() < 1e-12);
        assert!(config.product_factors.is_empty());
    }
}
