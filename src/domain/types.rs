// ==========================================
// RR 检测补正系统 - 领域类型定义
// ==========================================
// 红线: 分支逻辑一律走显式枚举,不做散落的字符串包含判断
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 测试方法族 (Method Family)
// ==========================================
// 分类一次, 下游按变体分发补正策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodFamily {
    Iso, // ISO 系方法: 两段线性补正
    Svp, // SVP 试验台方法: 单段线性补正
    Sae, // SAE 系方法: 恒等补正 + 产品/方法修正
}

impl fmt::Display for MethodFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodFamily::Iso => write!(f, "ISO"),
            MethodFamily::Svp => write!(f, "SVP"),
            MethodFamily::Sae => write!(f, "SAE"),
        }
    }
}

// ==========================================
// 规格限类型 (Limit Kind)
// ==========================================
// 派生字段, 不入库: spec_min == 0 即为单侧上限规格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitKind {
    /// 名义双侧规格: 直接使用 spec_min / spec_max
    Nominal,
    /// 单侧上限规格: 围绕 rr_index 取对称容差带
    UslOnly,
}

// ==========================================
// 期间标签 (Period Tag)
// ==========================================
// 仅当调用方提供分界日期时产生
// 序列化格式: SCREAMING_SNAKE_CASE (与报表输出一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PeriodTag {
    #[serde(rename = "PRE")]
    Pre,
    #[serde(rename = "POST")]
    Post,
}

impl fmt::Display for PeriodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodTag::Pre => write!(f, "PRE"),
            PeriodTag::Post => write!(f, "POST"),
        }
    }
}

// ==========================================
// 测试范围 (Test Scope)
// ==========================================
// OE: 主机厂配套件; NonOe: 其余 (补修市场等)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestScope {
    Oe,
    NonOe,
}

impl fmt::Display for TestScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestScope::Oe => write!(f, "OE"),
            TestScope::NonOe => write!(f, "NON-OE"),
        }
    }
}

// ==========================================
// 期待合格率分档 (EPass Category)
// ==========================================
// 分档边界: [0, 0.5, 0.7, 0.8, 0.9, 0.95, 1]
// 边界规则(已定): 右闭分箱 —— epass 恰好等于上边界时落入下方档位,
// 即 epass == 0.95 => Below95, 不是 Above95
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EpassCategory {
    #[serde(rename = "<50%")]
    Below50,
    #[serde(rename = "<70%")]
    Below70,
    #[serde(rename = "<80%")]
    Below80,
    #[serde(rename = "<90%")]
    Below90,
    #[serde(rename = "<95%")]
    Below95,
    #[serde(rename = "Above 95%")]
    Above95,
}

impl EpassCategory {
    /// 由期待合格率分档
    ///
    /// # 参数
    /// - `epass`: 期待合格率, 调用方保证为有限值 (NaN 在上游以 None 拦截)
    ///
    /// # 返回
    /// 对应档位 (右闭分箱)
    pub fn from_epass(epass: f64) -> Self {
        if epass <= 0.5 {
            EpassCategory::Below50
        } else if epass <= 0.7 {
            EpassCategory::Below70
        } else if epass <= 0.8 {
            EpassCategory::Below80
        } else if epass <= 0.9 {
            EpassCategory::Below90
        } else if epass <= 0.95 {
            EpassCategory::Below95
        } else {
            EpassCategory::Above95
        }
    }

    /// 报表标签
    pub fn label(&self) -> &'static str {
        match self {
            EpassCategory::Below50 => "<50%",
            EpassCategory::Below70 => "<70%",
            EpassCategory::Below80 => "<80%",
            EpassCategory::Below90 => "<90%",
            EpassCategory::Below95 => "<95%",
            EpassCategory::Above95 => "Above 95%",
        }
    }

    /// 档位 -> 颜色令牌 (固定查找表, 供可视化协作方使用)
    pub fn color(&self) -> &'static str {
        match self {
            EpassCategory::Below50 => "#d32f2f",
            EpassCategory::Below70 => "#f4511e",
            EpassCategory::Below80 => "#fb8c00",
            EpassCategory::Below90 => "#fdd835",
            EpassCategory::Below95 => "#9ccc65",
            EpassCategory::Above95 => "#43a047",
        }
    }
}

impl fmt::Display for EpassCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epass_category_right_closed_edges() {
        // 右闭分箱: 上边界归属下方档位
        assert_eq!(EpassCategory::from_epass(0.0), EpassCategory::Below50);
        assert_eq!(EpassCategory::from_epass(0.5), EpassCategory::Below50);
        assert_eq!(EpassCategory::from_epass(0.7), EpassCategory::Below70);
        assert_eq!(EpassCategory::from_epass(0.8), EpassCategory::Below80);
        assert_eq!(EpassCategory::from_epass(0.9), EpassCategory::Below90);
        assert_eq!(EpassCategory::from_epass(0.95), EpassCategory::Below95);
        assert_eq!(EpassCategory::from_epass(0.9501), EpassCategory::Above95);
        assert_eq!(EpassCategory::from_epass(1.0), EpassCategory::Above95);
    }

    #[test]
    fn test_epass_category_color_lookup() {
        assert_eq!(EpassCategory::Above95.color(), "#43a047");
        assert_eq!(EpassCategory::Below50.color(), "#d32f2f");
    }
}
