// ==========================================
// RR 检测补正系统 - 补正系数参照表装载器
// ==========================================
// 来源: 外部维护的 CSV 参照文件 (非仓库查询)
// 支持: 本地标定表 / 方法参照标定表 / SVP 标定表
// ==========================================

use crate::domain::coefficient::{CoefficientStore, CorrectionCoefficient};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// 装载器错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("参照文件不存在: {0}")]
    FileNotFound(String),

    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("字段值错误 (file={file}): {message}")]
    FieldValue { file: String, message: String },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ===== CSV 行结构 =====

#[derive(Debug, Deserialize)]
struct LocalCsvRow {
    plant: String,
    position: String,
    slope: f64,
    intercept: f64,
}

#[derive(Debug, Deserialize)]
struct ReferenceCsvRow {
    method_name: String,
    reference_method_name: Option<String>,
    slope: f64,
    intercept: f64,
}

#[derive(Debug, Deserialize)]
struct SvpCsvRow {
    plant: String,
    position: String,
    method_name: String,
    slope: f64,
    intercept: f64,
}

// ==========================================
// CoefficientLoader - 系数参照表装载器
// ==========================================
pub struct CoefficientLoader;

impl CoefficientLoader {
    pub fn new() -> Self {
        Self
    }

    /// 装载三个子表并构建索引
    ///
    /// # 参数
    /// - `local_path`: 本地标定表 (plant,position,slope,intercept)
    /// - `reference_path`: 方法参照标定表 (method_name,reference_method_name,slope,intercept)
    /// - `svp_path`: SVP 标定表 (plant,position,method_name,slope,intercept)
    pub fn load_store(
        &self,
        local_path: &Path,
        reference_path: &Path,
        svp_path: &Path,
    ) -> ConfigResult<CoefficientStore> {
        let local = self.load_local(local_path)?;
        let reference = self.load_reference(reference_path)?;
        let svp = self.load_svp(svp_path)?;

        info!(
            local = local.len(),
            reference = reference.len(),
            svp = svp.len(),
            "补正系数参照表装载完成"
        );

        Ok(CoefficientStore::from_rows(&local, &reference, &svp))
    }

    /// 装载本地标定表 (ISO 第一段, 方法无关)
    pub fn load_local(&self, path: &Path) -> ConfigResult<Vec<CorrectionCoefficient>> {
        let mut reader = open_csv(path)?;
        let mut rows = Vec::new();
        for result in reader.deserialize::<LocalCsvRow>() {
            let row = result?;
            validate_calibration(path, row.slope)?;
            rows.push(CorrectionCoefficient {
                plant: row.plant,
                position: row.position,
                method_name: String::new(),
                reference_method_name: None,
                slope: row.slope,
                intercept: row.intercept,
            });
        }
        Ok(rows)
    }

    /// 装载方法参照标定表 (ISO 第二段, 工位无关)
    pub fn load_reference(&self, path: &Path) -> ConfigResult<Vec<CorrectionCoefficient>> {
        let mut reader = open_csv(path)?;
        let mut rows = Vec::new();
        for result in reader.deserialize::<ReferenceCsvRow>() {
            let row = result?;
            validate_calibration(path, row.slope)?;
            rows.push(CorrectionCoefficient {
                plant: String::new(),
                position: String::new(),
                method_name: row.method_name,
                reference_method_name: row.reference_method_name,
                slope: row.slope,
                intercept: row.intercept,
            });
        }
        Ok(rows)
    }

    /// 装载 SVP 标定表 (单段)
    pub fn load_svp(&self, path: &Path) -> ConfigResult<Vec<CorrectionCoefficient>> {
        let mut reader = open_csv(path)?;
        let mut rows = Vec::new();
        for result in reader.deserialize::<SvpCsvRow>() {
            let row = result?;
            validate_calibration(path, row.slope)?;
            rows.push(CorrectionCoefficient {
                plant: row.plant,
                position: row.position,
                method_name: row.method_name,
                reference_method_name: None,
                slope: row.slope,
                intercept: row.intercept,
            });
        }
        Ok(rows)
    }
}

impl Default for CoefficientLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// 打开 CSV 读取器 (表头必需, 字段两端去空白, 容忍行长不一致)
fn open_csv(path: &Path) -> ConfigResult<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    Ok(ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file))
}

/// 标定值校验: 斜率为 0 或非有限值意味着参照表损坏, 立即报错而非静默产出无效补正
fn validate_calibration(path: &Path, slope: f64) -> ConfigResult<()> {
    if !slope.is_finite() || slope == 0.0 {
        return Err(ConfigError::FieldValue {
            file: path.display().to_string(),
            message: format!("slope 无效: {}", slope),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_local_trims_and_skips_blank_lines() {
        let file = write_temp_csv(
            "plant,position,slope,intercept\nDJ, FL ,1.02,-0.10\n\nKM,RR,0.98,0.05\n",
        );
        let loader = CoefficientLoader::new();
        let rows = loader.load_local(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].plant, "DJ");
        assert_eq!(rows[0].position, "FL");
        assert!((rows[0].slope - 1.02).abs() < 1e-12);
    }

    #[test]
    fn test_load_reference_rejects_zero_slope() {
        let file = write_temp_csv(
            "method_name,reference_method_name,slope,intercept\nISO28580,ISO28580,0.0,0.1\n",
        );
        let loader = CoefficientLoader::new();
        let err = loader.load_reference(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FieldValue { .. }));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let loader = CoefficientLoader::new();
        let err = loader
            .load_svp(Path::new("/nonexistent/svp.csv"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
