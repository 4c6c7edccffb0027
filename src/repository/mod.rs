// ==========================================
// RR 检测补正系统 - 仓储层
// ==========================================
// 职责: 仓库镜像数据访问
// 红线: 仓储不做计算, 引擎不拼 SQL
// ==========================================

pub mod error;
pub mod measurement_repo;
pub mod specification_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use measurement_repo::MeasurementRepository;
pub use specification_repo::SpecificationRepository;
