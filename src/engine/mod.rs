// ==========================================
// RR 检测补正系统 - 引擎层
// ==========================================
// 职责: 实现补正/聚合/能力评估规则, 不拼 SQL
// 红线: Engine 不拼 SQL; 未定义值显式为 Option, 不得隐式 NaN 贯穿
// ==========================================

pub mod adjustment;
pub mod aggregate;
pub mod capability;
pub mod classifier;
pub mod correction;
pub mod envelope;
pub mod orchestrator;

// 重导出核心引擎
pub use adjustment::ProductFactorAdjuster;
pub use aggregate::Aggregator;
pub use capability::CapabilityEstimator;
pub use classifier::MethodClassifier;
pub use correction::{
    CorrectionPipeline, CorrectionStrategy, IsoCorrection, SaeCorrection, SvpCorrection,
};
pub use envelope::SpecEnvelopeResolver;
pub use orchestrator::CapabilityOrchestrator;
