// ==========================================
// RR 检测补正系统 - 运行编排引擎
// ==========================================
// 职责: 分类 -> 补正 -> 修正 -> 打标 -> 聚合 -> 窗口解析 -> 能力评估
// 模式: 单线程拉式批处理, 纯函数 (同输入同输出, 幂等)
// 红线: 记录级/分组级失败以未定义值容忍, 不中止批次
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::capability::{CapabilityRun, RunParams};
use crate::domain::coefficient::CoefficientStore;
use crate::domain::measurement::MeasurementRecord;
use crate::domain::specification::SpecificationRow;
use crate::engine::adjustment::ProductFactorAdjuster;
use crate::engine::aggregate::Aggregator;
use crate::engine::capability::CapabilityEstimator;
use crate::engine::classifier::MethodClassifier;
use crate::engine::correction::CorrectionPipeline;
use crate::engine::envelope::SpecEnvelopeResolver;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

// ==========================================
// CapabilityOrchestrator - 运行编排引擎
// ==========================================
pub struct CapabilityOrchestrator {
    classifier: MethodClassifier,
    pipeline: CorrectionPipeline,
    adjuster: ProductFactorAdjuster,
    resolver: SpecEnvelopeResolver,
    aggregator: Aggregator,
    estimator: CapabilityEstimator,
}

impl CapabilityOrchestrator {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            classifier: MethodClassifier::new(),
            pipeline: CorrectionPipeline::new(),
            adjuster: ProductFactorAdjuster::new(),
            resolver: SpecEnvelopeResolver::new(),
            aggregator: Aggregator::new(),
            estimator: CapabilityEstimator::new(),
        }
    }

    /// 执行一次完整运行
    ///
    /// # 参数
    /// - `records`: 抽取的原始测定记录
    /// - `store`: 补正系数索引 (运行期间只读)
    /// - `spec_rows`: 规格参照行
    /// - `config`: 引擎标定配置
    /// - `params`: 运行入参 (含可选分界日期)
    ///
    /// # 返回
    /// CapabilityRun: 明细输出 + 分组能力输出
    pub fn run(
        &self,
        records: Vec<MeasurementRecord>,
        store: &CoefficientStore,
        spec_rows: &[SpecificationRow],
        config: &EngineConfig,
        params: RunParams,
    ) -> CapabilityRun {
        let extracted = records.len();

        // 1. 方法分类 (未知方法剔除)
        let classified = self.classifier.classify(records);
        let classified_count = classified.len();

        // 2. 族内线性补正
        let mut corrected = self.pipeline.apply(classified, store);

        // 3. 产品/方法修正 (顺序敏感)
        self.adjuster.apply(&mut corrected, config);

        // 4. 期间打标
        self.aggregator.tag_periods(&mut corrected, params.break_date);

        // 5. 分组统计
        let stats = self.aggregator.aggregate(&corrected);

        // 6. 工程限窗口解析 (与测定数据无关, 每次运行一次)
        let envelopes = self.resolver.resolve(spec_rows, config);

        // 7. 能力评估
        let mut groups = self.estimator.estimate(stats, &envelopes);
        groups.sort_by(|a, b| {
            (&a.plant, &a.product_code, a.period_tag).cmp(&(&b.plant, &b.product_code, b.period_tag))
        });

        let defined = corrected.iter().filter(|r| r.corrected.is_some()).count();
        info!(
            extracted,
            classified = classified_count,
            dropped = extracted - classified_count,
            defined,
            undefined = corrected.len() - defined,
            groups = groups.len(),
            "能力评估运行完成"
        );

        CapabilityRun {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            params,
            records: corrected,
            groups,
        }
    }
}

impl Default for CapabilityOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
