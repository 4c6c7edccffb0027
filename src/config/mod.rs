// ==========================================
// RR 检测补正系统 - 配置层
// ==========================================
// 职责: 标定常数管理 + 外部系数参照表装载
// 红线: 参照数据以显式对象注入引擎, 不做模块级全局装载
// ==========================================

pub mod coefficient_loader;
pub mod engine_config;

pub use coefficient_loader::{CoefficientLoader, ConfigError, ConfigResult};
pub use engine_config::{EngineConfig, ProductFactor};
