// ==========================================
// RR 检测补正系统 - 规格参照实体
// ==========================================
// 来源: 规格参照协作方 (仓库镜像表 rr_specification)
// ==========================================

use crate::domain::types::LimitKind;
use serde::{Deserialize, Serialize};

// ==========================================
// SpecificationRow - 规格参照行 (原始)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecificationRow {
    pub plant: String,
    /// 产品规格代码 (M_CODE)
    pub product_code: String,
    /// 规格上限; 缺失则该行无法评分, 解析时丢弃
    pub spec_max: Option<f64>,
    /// 规格下限; 0 表示单侧上限规格
    pub spec_min: f64,
    /// RR 指标目标值 (单侧规格的容差带中心)
    pub rr_index: f64,
}

// ==========================================
// SpecificationEnvelope - 工程限窗口 (派生)
// ==========================================
// 由 SpecEnvelopeResolver 解析产生; 与测定数据无关, 每次运行预解析一次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecificationEnvelope {
    pub plant: String,
    pub product_code: String,
    pub limit_kind: LimitKind,
    pub engineering_min: f64,
    pub engineering_max: f64,
    /// 中心线: 工程限窗口中点, 偏移量的基准
    pub center_line: f64,
}
