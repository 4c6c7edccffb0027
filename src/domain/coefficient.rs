// ==========================================
// RR 检测补正系统 - 补正系数参照实体
// ==========================================
// 来源: 外部维护的参照表 (非仓库查询), 每次运行装载一次
// 生命周期: 运行期间只读, 可跨并发调用共享
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// LinearCalibration - 线性标定常数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCalibration {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearCalibration {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// 应用线性变换: value * slope + intercept
    pub fn apply(&self, value: f64) -> f64 {
        value * self.slope + self.intercept
    }
}

// ==========================================
// CorrectionCoefficient - 补正系数行
// ==========================================
// 参照表的装载中间形态; 查询用索引见 CoefficientStore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionCoefficient {
    pub plant: String,
    pub position: String,
    pub method_name: String,
    pub reference_method_name: Option<String>,
    pub slope: f64,
    pub intercept: f64,
}

// ==========================================
// CoefficientStore - 补正系数索引
// ==========================================
// 三个逻辑子表:
// - local:     (plant, position) 键, 方法无关 (ISO 第一段)
// - reference: (method_name) 键, 工位无关 (ISO 第二段)
// - svp:       (plant, POSITION 大写, method_name) 键 (SVP 单段)
#[derive(Debug, Clone, Default)]
pub struct CoefficientStore {
    local: HashMap<(String, String), LinearCalibration>,
    reference: HashMap<String, LinearCalibration>,
    svp: HashMap<(String, String, String), LinearCalibration>,
}

impl CoefficientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从三个子表行集合构建索引 (测试夹具与装载器共用入口)
    ///
    /// # 参数
    /// - `local_rows`: 本地标定行 (plant+position, 方法无关)
    /// - `reference_rows`: 方法参照标定行 (method_name, 工位无关)
    /// - `svp_rows`: SVP 专用标定行 (plant+position+method)
    pub fn from_rows(
        local_rows: &[CorrectionCoefficient],
        reference_rows: &[CorrectionCoefficient],
        svp_rows: &[CorrectionCoefficient],
    ) -> Self {
        let mut store = Self::new();
        for row in local_rows {
            store.insert_local(&row.plant, &row.position, row.slope, row.intercept);
        }
        for row in reference_rows {
            store.insert_reference(&row.method_name, row.slope, row.intercept);
        }
        for row in svp_rows {
            store.insert_svp(
                &row.plant,
                &row.position,
                &row.method_name,
                row.slope,
                row.intercept,
            );
        }
        store
    }

    pub fn insert_local(&mut self, plant: &str, position: &str, slope: f64, intercept: f64) {
        self.local.insert(
            (plant.trim().to_string(), position.trim().to_string()),
            LinearCalibration::new(slope, intercept),
        );
    }

    pub fn insert_reference(&mut self, method_name: &str, slope: f64, intercept: f64) {
        self.reference.insert(
            normalize_method(method_name),
            LinearCalibration::new(slope, intercept),
        );
    }

    pub fn insert_svp(
        &mut self,
        plant: &str,
        position: &str,
        method_name: &str,
        slope: f64,
        intercept: f64,
    ) {
        // 工位大写化: 规避大小写不一致导致的联接丢失
        self.svp.insert(
            (
                plant.trim().to_string(),
                position.trim().to_uppercase(),
                normalize_method(method_name),
            ),
            LinearCalibration::new(slope, intercept),
        );
    }

    /// 本地标定联接: (plant, position)
    pub fn local_for(&self, plant: &str, position: &str) -> Option<LinearCalibration> {
        self.local
            .get(&(plant.trim().to_string(), position.trim().to_string()))
            .copied()
    }

    /// 方法参照标定联接: (method_name)
    pub fn reference_for(&self, method_name: &str) -> Option<LinearCalibration> {
        self.reference.get(&normalize_method(method_name)).copied()
    }

    /// SVP 标定联接: (plant, POSITION 大写, method_name)
    pub fn svp_for(
        &self,
        plant: &str,
        position: &str,
        method_name: &str,
    ) -> Option<LinearCalibration> {
        self.svp
            .get(&(
                plant.trim().to_string(),
                position.trim().to_uppercase(),
                normalize_method(method_name),
            ))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.reference.is_empty() && self.svp.is_empty()
    }
}

/// 方法名归一化: 去空白 + 大写
///
/// 仓库侧方法名存在 "ISO 28580" / "iso28580" 等混写, 联接前统一
pub fn normalize_method(method_name: &str) -> String {
    method_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method(" iso 28580 "), "ISO28580");
        assert_eq!(normalize_method("SAE J1269"), "SAEJ1269");
    }

    #[test]
    fn test_svp_lookup_is_case_insensitive_on_position() {
        let mut store = CoefficientStore::new();
        store.insert_svp("P1", "fl", "SVP", 1.1, 0.2);
        assert!(store.svp_for("P1", "FL", "SVP").is_some());
        assert!(store.svp_for("P1", "fl", "svp").is_some());
        assert!(store.svp_for("P2", "FL", "SVP").is_none());
    }

    #[test]
    fn test_linear_calibration_apply() {
        let cal = LinearCalibration::new(1.02, -0.10);
        assert!((cal.apply(7.50) - 7.55).abs() < 1e-12);
    }
}
