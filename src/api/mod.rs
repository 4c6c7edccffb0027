// ==========================================
// RR 检测补正系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供外部看板/报表协作方调用
// ==========================================

pub mod capability_api;
pub mod error;

// 重导出核心类型
pub use capability_api::{CapabilityApi, RetryPolicy};
pub use error::{ApiError, ApiResult};
