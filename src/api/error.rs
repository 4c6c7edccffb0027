// ==========================================
// RR 检测补正系统 - API 层错误类型
// ==========================================
// 职责: 定义 API 层错误类型, 转换仓储/配置错误为用户可读的错误消息
// ==========================================

use crate::config::coefficient_loader::ConfigError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 抽取失败 (有界重试耗尽后原样上抛, 中止本次运行)
    #[error("数据抽取失败: {0}")]
    Extraction(#[from] RepositoryError),

    #[error("参照数据装载失败: {0}")]
    Config(#[from] ConfigError),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
