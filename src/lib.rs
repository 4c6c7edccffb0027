// ==========================================
// RR 检测补正与过程能力评估系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (数据仓库镜像)
// 系统定位: 质量风险分级的决策支持核心 (纯批处理, 无状态)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据抽取
pub mod repository;

// 引擎层 - 补正/聚合/能力评估规则
pub mod engine;

// 配置层 - 标定常数与系数参照表装载
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EpassCategory, LimitKind, MethodFamily, PeriodTag, TestScope};

// 领域实体
pub use domain::{
    AggregateStatistic, CapabilityResult, CapabilityRun, ClassifiedRecord, CoefficientStore,
    CorrectedRecord, CorrectionCoefficient, MeasurementRecord, RunParams, SpecificationEnvelope,
    SpecificationRow,
};

// 引擎
pub use engine::{
    Aggregator, CapabilityEstimator, CapabilityOrchestrator, CorrectionPipeline, MethodClassifier,
    ProductFactorAdjuster, SpecEnvelopeResolver,
};

// 配置
pub use config::{CoefficientLoader, EngineConfig, ProductFactor};

// API
pub use api::{ApiError, ApiResult, CapabilityApi, RetryPolicy};
