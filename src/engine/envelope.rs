// ==========================================
// RR 检测补正系统 - 工程限窗口解析引擎
// ==========================================
// 职责: 规格参照行 -> (工程下限, 工程上限, 中心线)
// 输入: 规格参照行 + 标定配置 (单侧容差带)
// 输出: 按 (plant, product_code) 索引的工程限窗口
// ==========================================
// 规则:
// - spec_min == 0 (单侧上限): eng_max = min(spec_max, rr_index + tol),
//   eng_min = rr_index - tol
// - 其余 (名义双侧): 直接使用 spec_min / spec_max
// - spec_max 缺失的行无法评分, 丢弃并告警
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::specification::{SpecificationEnvelope, SpecificationRow};
use crate::domain::types::LimitKind;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// SpecEnvelopeResolver - 工程限窗口解析引擎
// ==========================================
pub struct SpecEnvelopeResolver {
    // 无状态引擎, 与测定数据无关, 每次运行预解析一次即可复用
}

impl SpecEnvelopeResolver {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 解析单行规格
    ///
    /// # 返回
    /// spec_max 缺失时返回 None (丢弃)
    pub fn resolve_row(
        &self,
        row: &SpecificationRow,
        config: &EngineConfig,
    ) -> Option<SpecificationEnvelope> {
        let spec_max = match row.spec_max {
            Some(v) if v.is_finite() => v,
            _ => {
                warn!(
                    plant = %row.plant,
                    product = %row.product_code,
                    "规格上限缺失, 该产品无法评分, 已丢弃"
                );
                return None;
            }
        };

        let tol = config.one_sided_tolerance;
        let (limit_kind, engineering_min, engineering_max) = if row.spec_min == 0.0 {
            // 单侧上限规格: 围绕 rr_index 取对称容差带, 上限不得超过 spec_max
            (
                LimitKind::UslOnly,
                row.rr_index - tol,
                spec_max.min(row.rr_index + tol),
            )
        } else {
            (LimitKind::Nominal, row.spec_min, spec_max)
        };

        Some(SpecificationEnvelope {
            plant: row.plant.clone(),
            product_code: row.product_code.clone(),
            limit_kind,
            engineering_min,
            engineering_max,
            center_line: (engineering_max + engineering_min) / 2.0,
        })
    }

    /// 批量解析并建立 (plant, product_code) 索引
    pub fn resolve(
        &self,
        rows: &[SpecificationRow],
        config: &EngineConfig,
    ) -> HashMap<(String, String), SpecificationEnvelope> {
        let mut envelopes = HashMap::with_capacity(rows.len());
        for row in rows {
            if let Some(envelope) = self.resolve_row(row, config) {
                envelopes.insert(
                    (envelope.plant.clone(), envelope.product_code.clone()),
                    envelope,
                );
            }
        }
        envelopes
    }
}

impl Default for SpecEnvelopeResolver {
    fn default() -> Self {
        Self::new()
    }
}
