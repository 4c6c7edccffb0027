// ==========================================
// RR 检测补正系统 - 领域层
// ==========================================
// 职责: 实体与值类型定义, 不含业务规则
// ==========================================

pub mod capability;
pub mod coefficient;
pub mod measurement;
pub mod specification;
pub mod types;

// 重导出核心实体
pub use capability::{AggregateStatistic, CapabilityResult, CapabilityRun, RunParams};
pub use coefficient::{
    normalize_method, CoefficientStore, CorrectionCoefficient, LinearCalibration,
};
pub use measurement::{ClassifiedRecord, CorrectedRecord, MeasurementRecord};
pub use specification::{SpecificationEnvelope, SpecificationRow};
