// ==========================================
// RR 检测补正系统 - 能力评估引擎
// ==========================================
// 职责: 分组统计 × 工程限窗口 -> Offset / CP / EPass / 分档
// 输入: AggregateStatistic + SpecificationEnvelope 索引
// 输出: CapabilityResult (终端输出, 无副作用)
// ==========================================
// 红线:
// - epass 用分组自身 (mean, std) 参数化的正态分布求窗口内概率质量,
//   不是规格中心 —— 回答的是"本测定总体落窗比例"
// - std 为 0/NaN/缺失 => epass/cp 保持 None, 禁止折算为 0 或 1
// ==========================================

use crate::domain::capability::{AggregateStatistic, CapabilityResult};
use crate::domain::specification::SpecificationEnvelope;
use crate::domain::types::EpassCategory;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// CapabilityEstimator - 能力评估引擎
// ==========================================
pub struct CapabilityEstimator {
    // 无状态引擎,不需要注入依赖
}

impl CapabilityEstimator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 批量评估
    ///
    /// # 参数
    /// - `stats`: 分组统计
    /// - `envelopes`: (plant, product_code) -> 工程限窗口
    ///
    /// # 返回
    /// 每个可联接到工程限窗口的分组一行; 无规格的分组丢弃并告警
    pub fn estimate(
        &self,
        stats: Vec<AggregateStatistic>,
        envelopes: &HashMap<(String, String), SpecificationEnvelope>,
    ) -> Vec<CapabilityResult> {
        let mut results = Vec::with_capacity(stats.len());

        for stat in stats {
            let key = (stat.plant.clone(), stat.product_code.clone());
            let Some(envelope) = envelopes.get(&key) else {
                warn!(
                    plant = %stat.plant,
                    product = %stat.product_code,
                    "无可用规格, 分组未进入能力评分"
                );
                continue;
            };
            results.push(self.estimate_group(stat, envelope));
        }

        results
    }

    /// 单分组评估
    pub fn estimate_group(
        &self,
        stat: AggregateStatistic,
        envelope: &SpecificationEnvelope,
    ) -> CapabilityResult {
        let center_line = envelope.center_line;
        let tolerance = envelope.engineering_max - envelope.engineering_min;

        // 偏移量: (mean - CL) / CL; 中心线为 0 时无定义
        let offset = stat
            .mean
            .filter(|m| m.is_finite() && center_line != 0.0)
            .map(|m| (m - center_line) / center_line);

        // 有效标准差: 0 / NaN / 缺失皆视为退化分布
        let valid_std = stat.std_dev.filter(|s| s.is_finite() && *s > 0.0);

        // 能力指数: 工程容差 / 6σ
        let cp = valid_std.map(|s| tolerance / (s * 6.0));

        // 期待合格率: Φ(max; mean, std) - Φ(min; mean, std)
        let epass = match (stat.mean, valid_std) {
            (Some(mean), Some(std)) if mean.is_finite() => {
                let p = normal_cdf_between(
                    envelope.engineering_min,
                    envelope.engineering_max,
                    mean,
                    std,
                );
                Some(p.clamp(0.0, 1.0))
            }
            _ => None,
        };

        let epass_category = epass.map(EpassCategory::from_epass);

        CapabilityResult {
            plant: stat.plant,
            product_code: stat.product_code,
            period_tag: stat.period_tag,
            count: stat.count,
            mean: stat.mean,
            std_dev: stat.std_dev,
            center_line,
            engineering_min: envelope.engineering_min,
            engineering_max: envelope.engineering_max,
            offset,
            cp,
            epass,
            epass_category,
            epass_color: epass_category.map(|c| c.color().to_string()),
        }
    }
}

impl Default for CapabilityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// 正态分布在 [lower, upper] 的概率质量
fn normal_cdf_between(lower: f64, upper: f64, mean: f64, std: f64) -> f64 {
    standard_normal_cdf((upper - mean) / std) - standard_normal_cdf((lower - mean) / std)
}

/// 标准正态分布累积分布函数 Φ(z)
///
/// Hastings 近似 (Abramowitz & Stegun 26.2.17), 误差 < 7.5e-8
fn standard_normal_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return 0.5;
    }
    if z >= 8.0 {
        return 1.0;
    }
    if z <= -8.0 {
        return 0.0;
    }

    // 负半轴用对称性: Φ(-z) = 1 - Φ(z)
    let (z_abs, negate) = if z < 0.0 { (-z, true) } else { (z, false) };

    const B0: f64 = 0.231_641_9;
    const B1: f64 = 0.319_381_530;
    const B2: f64 = -0.356_563_782;
    const B3: f64 = 1.781_477_937;
    const B4: f64 = -1.821_255_978;
    const B5: f64 = 1.330_274_429;

    let t = 1.0 / (1.0 + B0 * z_abs);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let pdf = (-0.5 * z_abs * z_abs).exp() / (2.0 * std::f64::consts::PI).sqrt();
    let cdf = 1.0 - pdf * (B1 * t + B2 * t2 + B3 * t3 + B4 * t4 + B5 * t5);

    if negate {
        1.0 - cdf
    } else {
        cdf
    }
}
