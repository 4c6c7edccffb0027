// ==========================================
// RR 检测补正系统 - 能力评估 API
// ==========================================
// 职责: 抽取 -> 引擎运行的同步入口; 供外部看板协作方调用
// 说明: 结果记忆化由外部缓存协作方负责 (以 RunParams 为键, TTL 失效),
// 本层不做缓存
// ==========================================
// 重试边界: 仅抽取段做有界指数退避重试; 确定性的补正/评估段从不重试
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::engine_config::EngineConfig;
use crate::domain::capability::{CapabilityRun, RunParams};
use crate::domain::coefficient::{normalize_method, CoefficientStore};
use crate::domain::measurement::{CorrectedRecord, MeasurementRecord};
use crate::engine::orchestrator::CapabilityOrchestrator;
use crate::repository::error::RepositoryResult;
use crate::repository::{MeasurementRepository, SpecificationRepository};
use std::collections::HashSet;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

// ==========================================
// RetryPolicy - 抽取重试策略
// ==========================================
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

// ==========================================
// CapabilityApi - 能力评估 API
// ==========================================
pub struct CapabilityApi {
    measurement_repo: MeasurementRepository,
    specification_repo: SpecificationRepository,
    store: CoefficientStore,
    config: EngineConfig,
    orchestrator: CapabilityOrchestrator,
    retry: RetryPolicy,
}

impl CapabilityApi {
    /// 创建 API 实例
    ///
    /// # 参数
    /// - `db_path`: 仓库镜像数据库路径
    /// - `store`: 已装载的补正系数索引
    /// - `config`: 引擎标定配置
    pub fn new(db_path: &str, store: CoefficientStore, config: EngineConfig) -> ApiResult<Self> {
        Ok(Self {
            measurement_repo: MeasurementRepository::new(db_path)?,
            specification_repo: SpecificationRepository::new(db_path)?,
            store,
            config,
            orchestrator: CapabilityOrchestrator::new(),
            retry: RetryPolicy::default(),
        })
    }

    /// 覆写重试策略
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// 执行一次能力评估运行
    ///
    /// # 参数
    /// - `params`: 日期区间 / 测试范围 / 可选分界日期与过滤
    ///
    /// # 返回
    /// CapabilityRun: 补正明细 + 分组能力结果
    pub fn capability_run(&self, params: &RunParams) -> ApiResult<CapabilityRun> {
        if params.date_from > params.date_to {
            return Err(ApiError::InvalidInput(format!(
                "日期区间无效: {} > {}",
                params.date_from, params.date_to
            )));
        }

        // 抽取段: 有界重试
        let records = retry_extraction(&self.retry, "rr_inspection_result", || {
            self.measurement_repo
                .fetch_by_range(params.date_from, params.date_to, params.scope)
        })?;
        let specs = retry_extraction(&self.retry, "rr_specification", || {
            self.specification_repo.fetch_by_scope(params.scope)
        })?;

        // 入参过滤 (内存中, 保持仓储查询语句固定)
        let records = apply_filters(records, params);

        info!(
            date_from = %params.date_from,
            date_to = %params.date_to,
            scope = %params.scope,
            records = records.len(),
            specs = specs.len(),
            "抽取完成, 进入引擎"
        );

        // 确定性段: 不重试
        Ok(self
            .orchestrator
            .run(records, &self.store, &specs, &self.config, params.clone()))
    }

    /// 补正明细便捷入口 (输出 (a): 全量补正记录表)
    pub fn corrected_records(&self, params: &RunParams) -> ApiResult<Vec<CorrectedRecord>> {
        Ok(self.capability_run(params)?.records)
    }
}

/// 方法名/产品代码入参过滤
fn apply_filters(records: Vec<MeasurementRecord>, params: &RunParams) -> Vec<MeasurementRecord> {
    let method_set: Option<HashSet<String>> = params
        .method_filter
        .as_ref()
        .map(|names| names.iter().map(|n| normalize_method(n)).collect());
    let product_set: Option<HashSet<&str>> = params
        .product_filter
        .as_ref()
        .map(|codes| codes.iter().map(|c| c.as_str()).collect());

    records
        .into_iter()
        .filter(|r| {
            if let Some(methods) = &method_set {
                if !methods.contains(&normalize_method(&r.test_method_name)) {
                    return false;
                }
            }
            if let Some(products) = &product_set {
                if !products.contains(r.product_code.as_str()) {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// 抽取段有界指数退避重试
///
/// # 说明
/// 上游数据源慢/故障会阻塞调用方; 重试耗尽后最后一次错误原样上抛
fn retry_extraction<T>(
    policy: &RetryPolicy,
    source: &str,
    mut fetch: impl FnMut() -> RepositoryResult<T>,
) -> ApiResult<T> {
    let attempts = policy.max_attempts.max(1);
    let mut delay = policy.base_delay;

    for attempt in 1..=attempts {
        match fetch() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                warn!(
                    source,
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "抽取失败, 退避后重试"
                );
                thread::sleep(delay);
                delay *= 2;
            }
            Err(err) => return Err(err.into()),
        }
    }
    unreachable!("retry loop always returns")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::error::RepositoryError;

    #[test]
    fn test_retry_succeeds_after_transient_failures() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        };
        let mut calls = 0;
        let result = retry_extraction(&policy, "test", || {
            calls += 1;
            if calls < 3 {
                Err(RepositoryError::DatabaseConnectionError("transient".into()))
            } else {
                Ok(42)
            }
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_retry_gives_up_and_surfaces_last_error() {
        let policy = RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
        };
        let mut calls = 0;
        let result: ApiResult<i32> = retry_extraction(&policy, "test", || {
            calls += 1;
            Err(RepositoryError::DatabaseConnectionError("down".into()))
        });
        assert_eq!(calls, 2);
        assert!(matches!(result, Err(ApiError::Extraction(_))));
    }
}
