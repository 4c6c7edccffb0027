// ==========================================
// RR 检测补正系统 - 分组统计引擎
// ==========================================
// 职责: 期间打标 + 按 (工厂, 产品代码[, 期间]) 分组求 count/mean/std
// 红线: 未定义补正值不计入统计 (不得以 0 填充); 一条记录最多进一个分组
// ==========================================

use crate::domain::capability::AggregateStatistic;
use crate::domain::measurement::CorrectedRecord;
use crate::domain::types::PeriodTag;
use chrono::NaiveDate;
use std::collections::HashMap;

// ==========================================
// Aggregator - 分组统计引擎
// ==========================================
pub struct Aggregator {
    // 无状态引擎,不需要注入依赖
}

impl Aggregator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 期间打标
    ///
    /// # 规则
    /// sample_date < break_date => PRE, 否则 POST; 未提供分界日期时不打标
    pub fn tag_periods(&self, records: &mut [CorrectedRecord], break_date: Option<NaiveDate>) {
        let Some(break_date) = break_date else {
            return;
        };
        for record in records.iter_mut() {
            record.period_tag = Some(if record.record.sample_date < break_date {
                PeriodTag::Pre
            } else {
                PeriodTag::Post
            });
        }
    }

    /// 分组统计
    ///
    /// # 参数
    /// - `records`: 已补正 (含修正) 记录
    ///
    /// # 返回
    /// 每 (plant, product_code, period_tag) 一行, 按键排序保证输出确定性;
    /// count/mean/std 仅统计已定义补正值
    pub fn aggregate(&self, records: &[CorrectedRecord]) -> Vec<AggregateStatistic> {
        let mut groups: HashMap<(String, String, Option<PeriodTag>), Vec<f64>> = HashMap::new();

        for record in records {
            let values = groups.entry(record.group_key()).or_default();
            if let Some(v) = record.corrected {
                if v.is_finite() {
                    values.push(v);
                }
            }
        }

        let mut stats: Vec<AggregateStatistic> = groups
            .into_iter()
            .map(|((plant, product_code, period_tag), values)| {
                let (mean, std_dev) = mean_and_sample_std(&values);
                AggregateStatistic {
                    plant,
                    product_code,
                    period_tag,
                    count: values.len(),
                    mean,
                    std_dev,
                }
            })
            .collect();

        stats.sort_by(|a, b| {
            (&a.plant, &a.product_code, a.period_tag).cmp(&(&b.plant, &b.product_code, b.period_tag))
        });
        stats
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// 均值与样本标准差 (n-1)
///
/// # 返回
/// - 空集: (None, None)
/// - 单点: (Some(mean), None)
fn mean_and_sample_std(values: &[f64]) -> (Option<f64>, Option<f64>) {
    if values.is_empty() {
        return (None, None);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (Some(mean), None);
    }
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (Some(mean), Some((ss / (n - 1.0)).sqrt()))
}
