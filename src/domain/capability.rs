// ==========================================
// RR 检测补正系统 - 聚合统计与能力评估实体
// ==========================================
// 派生实体: 每次运行重算, 永不落库
// 红线: 退化分布 (std 为 0/缺失) 时 epass/cp 保持 None, 禁止伪造数值
// ==========================================

use crate::domain::measurement::CorrectedRecord;
use crate::domain::types::{EpassCategory, PeriodTag, TestScope};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// AggregateStatistic - 分组统计
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStatistic {
    pub plant: String,
    pub product_code: String,
    pub period_tag: Option<PeriodTag>,
    /// 有效 (已定义补正值) 记录数; 未定义值不计入
    pub count: usize,
    pub mean: Option<f64>,
    /// 样本标准差 (n-1); count < 2 时为 None
    pub std_dev: Option<f64>,
}

// ==========================================
// CapabilityResult - 能力评估结果 (终端输出)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityResult {
    pub plant: String,
    pub product_code: String,
    pub period_tag: Option<PeriodTag>,
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    // ===== 工程限窗口 =====
    pub center_line: f64,
    pub engineering_min: f64,
    pub engineering_max: f64,
    // ===== 能力指标 =====
    /// 偏移量: (mean - CL) / CL
    pub offset: Option<f64>,
    /// 能力指数: 工程容差 / 6σ
    pub cp: Option<f64>,
    /// 期待合格率: 分组自身分布落在工程限窗口内的概率质量
    pub epass: Option<f64>,
    pub epass_category: Option<EpassCategory>,
    /// 档位颜色令牌 (供可视化协作方)
    pub epass_color: Option<String>,
}

// ==========================================
// RunParams - 运行入参
// ==========================================
// 外部缓存协作方以此为记忆化键 (TTL 失效, 非事件驱动)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub scope: TestScope,
    /// 分界日期: 提供时明细与分组额外按 PRE/POST 切分
    pub break_date: Option<NaiveDate>,
    /// 方法名过滤 (原始方法名, 归一化后匹配)
    pub method_filter: Option<Vec<String>>,
    /// 产品代码过滤
    pub product_filter: Option<Vec<String>>,
}

// ==========================================
// CapabilityRun - 单次运行结果集
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityRun {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub params: RunParams,
    /// 明细输出: 全部已分类记录 (含补正未定义者, 供核查)
    pub records: Vec<CorrectedRecord>,
    /// 分组输出: 每 (工厂, 产品代码[, 期间]) 一行
    pub groups: Vec<CapabilityResult>,
}
