// ==========================================
// RR 检测补正系统 - 方法分类引擎
// ==========================================
// 职责: 原始方法名 -> 方法族, 分类一次供全下游分发
// 输入: 原始测定记录
// 输出: 已分类记录 (未知方法记录被剔除并告警)
// ==========================================

use crate::domain::coefficient::normalize_method;
use crate::domain::measurement::{ClassifiedRecord, MeasurementRecord};
use crate::domain::types::MethodFamily;
use std::collections::HashMap;
use tracing::warn;

// ===== 方法族固定名单 (归一化形态: 去空白大写) =====

/// ISO 系方法
pub const ISO_METHOD_NAMES: &[&str] = &["ISO28580", "ISO18164", "ISO8767"];

/// SVP 试验台方法
pub const SVP_METHOD_NAMES: &[&str] = &["SVP", "SVP-2000", "SVP-4000"];

/// SAE 系方法 (HKMC 换算方法归属本族)
pub const SAE_METHOD_NAMES: &[&str] = &["SAEJ1269", "SAEJ2452", "HKMC"];

// ==========================================
// MethodClassifier - 方法分类引擎
// ==========================================
pub struct MethodClassifier {
    // 无状态引擎,不需要注入依赖
}

impl MethodClassifier {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 单个方法名分类
    ///
    /// # 返回
    /// 命中名单时返回方法族; 未知方法返回 None
    pub fn classify_name(&self, method_name: &str) -> Option<MethodFamily> {
        let normalized = normalize_method(method_name);
        if ISO_METHOD_NAMES.contains(&normalized.as_str()) {
            Some(MethodFamily::Iso)
        } else if SVP_METHOD_NAMES.contains(&normalized.as_str()) {
            Some(MethodFamily::Svp)
        } else if SAE_METHOD_NAMES.contains(&normalized.as_str()) {
            Some(MethodFamily::Sae)
        } else {
            None
        }
    }

    /// 批量分类
    ///
    /// # 参数
    /// - `records`: 原始测定记录
    ///
    /// # 返回
    /// 已分类记录; 未知方法记录被剔除, 按方法名汇总告警
    pub fn classify(&self, records: Vec<MeasurementRecord>) -> Vec<ClassifiedRecord> {
        let mut classified = Vec::with_capacity(records.len());
        let mut unknown: HashMap<String, usize> = HashMap::new();

        for record in records {
            match self.classify_name(&record.test_method_name) {
                Some(family) => classified.push(ClassifiedRecord { record, family }),
                None => {
                    *unknown
                        .entry(record.test_method_name.clone())
                        .or_insert(0) += 1;
                }
            }
        }

        for (method_name, count) in &unknown {
            warn!(
                method_name = %method_name,
                count = *count,
                "未知测试方法, 记录已从全部下游阶段剔除"
            );
        }

        classified
    }
}

impl Default for MethodClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record_with_method(method: &str) -> MeasurementRecord {
        MeasurementRecord {
            plant: "DJ".to_string(),
            product_code: "1012934".to_string(),
            sample_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            test_method_name: method.to_string(),
            position: "FL".to_string(),
            warm_load: Some(400.0),
            raw_value: 8.0,
            corrected_result_hint: None,
            judgement: None,
            raw_test_value: None,
            test_sequence: None,
        }
    }

    #[test]
    fn test_classify_name_families() {
        let classifier = MethodClassifier::new();
        assert_eq!(classifier.classify_name("ISO 28580"), Some(MethodFamily::Iso));
        assert_eq!(classifier.classify_name("svp-2000"), Some(MethodFamily::Svp));
        assert_eq!(classifier.classify_name("SAE J1269"), Some(MethodFamily::Sae));
        assert_eq!(classifier.classify_name("HKMC"), Some(MethodFamily::Sae));
        assert_eq!(classifier.classify_name("UNKNOWN_METHOD"), None);
    }

    #[test]
    fn test_unknown_method_is_dropped() {
        let classifier = MethodClassifier::new();
        let records = vec![
            record_with_method("ISO28580"),
            record_with_method("UNKNOWN_METHOD"),
            record_with_method("SVP"),
        ];
        let classified = classifier.classify(records);
        assert_eq!(classified.len(), 2);
        assert!(classified
            .iter()
            .all(|c| c.record.test_method_name != "UNKNOWN_METHOD"));
    }
}
