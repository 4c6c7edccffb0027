// ==========================================
// RR 检测补正系统 - 补正管线引擎
// ==========================================
// 职责: 按方法族分发线性补正策略, 输出统一补正记录集
// 输入: 已分类记录 + 系数索引
// 输出: 已补正记录 (缺失系数 => corrected = None, 保留明细)
// ==========================================
// 红线: 联接失配不得中止批次, 也不得以 0 填充
// ==========================================

use crate::domain::coefficient::CoefficientStore;
use crate::domain::measurement::{ClassifiedRecord, CorrectedRecord};
use crate::domain::types::MethodFamily;
use tracing::debug;

// ==========================================
// CorrectionStrategy - 补正策略契约
// ==========================================
// 每个方法族一个策略对象, 共用同一契约:
// correct(record, coefficients) -> Some(value) | None
pub trait CorrectionStrategy {
    fn correct(&self, record: &ClassifiedRecord, store: &CoefficientStore) -> Option<f64>;
}

// ==========================================
// IsoCorrection - ISO 两段线性补正
// ==========================================
// 第一段 "本地": (plant, position) 联接 -> value' = raw * A + B
// 第二段 "参照": (method_name) 联接   -> corrected = value' * C + D
pub struct IsoCorrection;

impl CorrectionStrategy for IsoCorrection {
    fn correct(&self, classified: &ClassifiedRecord, store: &CoefficientStore) -> Option<f64> {
        let record = &classified.record;
        let local = store.local_for(&record.plant, &record.position)?;
        let reference = store.reference_for(&record.test_method_name)?;
        let stage1 = local.apply(record.raw_value);
        Some(reference.apply(stage1))
    }
}

// ==========================================
// SvpCorrection - SVP 单段线性补正
// ==========================================
// (plant, POSITION 大写, method_name) 联接; 第二段为恒等 (C=1, D=0)
pub struct SvpCorrection;

impl CorrectionStrategy for SvpCorrection {
    fn correct(&self, classified: &ClassifiedRecord, store: &CoefficientStore) -> Option<f64> {
        let record = &classified.record;
        let cal = store.svp_for(&record.plant, &record.position, &record.test_method_name)?;
        Some(cal.apply(record.raw_value))
    }
}

// ==========================================
// SaeCorrection - SAE 恒等补正
// ==========================================
// corrected = raw; 产品/方法修正由 ProductFactorAdjuster 叠加
pub struct SaeCorrection;

impl CorrectionStrategy for SaeCorrection {
    fn correct(&self, classified: &ClassifiedRecord, _store: &CoefficientStore) -> Option<f64> {
        Some(classified.record.raw_value)
    }
}

impl MethodFamily {
    /// 方法族 -> 补正策略分发
    pub fn correction_strategy(&self) -> &'static dyn CorrectionStrategy {
        match self {
            MethodFamily::Iso => &IsoCorrection,
            MethodFamily::Svp => &SvpCorrection,
            MethodFamily::Sae => &SaeCorrection,
        }
    }
}

// ==========================================
// CorrectionPipeline - 补正管线
// ==========================================
pub struct CorrectionPipeline {
    // 无状态引擎, 系数索引按次注入
}

impl CorrectionPipeline {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 对全部已分类记录应用族内补正策略
    ///
    /// # 参数
    /// - `records`: 已分类记录
    /// - `store`: 系数索引 (运行期间只读)
    ///
    /// # 返回
    /// 三族输出合并后的已补正记录集 (period_tag 此阶段未定)
    pub fn apply(
        &self,
        records: Vec<ClassifiedRecord>,
        store: &CoefficientStore,
    ) -> Vec<CorrectedRecord> {
        let mut corrected = Vec::with_capacity(records.len());

        for classified in records {
            let value = classified.family.correction_strategy().correct(&classified, store);

            if value.is_none() {
                debug!(
                    plant = %classified.record.plant,
                    position = %classified.record.position,
                    method = %classified.record.test_method_name,
                    family = %classified.family,
                    "补正系数联接失配, 补正值未定义"
                );
            }

            corrected.push(CorrectedRecord {
                family: classified.family,
                record: classified.record,
                corrected: value,
                period_tag: None,
            });
        }

        corrected
    }
}

impl Default for CorrectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
