// ==========================================
// RR 检测补正系统 - 测定记录抽取仓储
// ==========================================
// 数据源: 仓库镜像表 rr_inspection_result
// 红线: 不含业务逻辑，只负责数据访问; 引擎层不拼 SQL
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::measurement::MeasurementRecord;
use crate::domain::types::TestScope;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// MeasurementRepository - 测定记录仓储
// ==========================================
pub struct MeasurementRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MeasurementRepository {
    /// 创建新的 MeasurementRepository 实例
    ///
    /// # 参数
    /// - db_path: 仓库镜像数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按日期区间与测试范围抽取测定记录
    ///
    /// # 参数
    /// - `date_from` / `date_to`: 采样日期闭区间
    /// - `scope`: OE / 非 OE 范围标志
    ///
    /// # 返回
    /// 原始测定记录列表 (未分类, 未补正)
    ///
    /// # 说明
    /// 方法名/产品代码过滤属于引擎入参, 在 API 层于内存中过滤,
    /// 本仓储保持固定查询语句
    pub fn fetch_by_range(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        scope: TestScope,
    ) -> RepositoryResult<Vec<MeasurementRecord>> {
        if date_from > date_to {
            return Err(RepositoryError::ValidationError(format!(
                "日期区间无效: {} > {}",
                date_from, date_to
            )));
        }

        let conn = self.get_conn()?;
        let scope_predicate = match scope {
            TestScope::Oe => "oe_flag = 'OE'",
            TestScope::NonOe => "oe_flag <> 'OE'",
        };
        let sql = format!(
            r#"
            SELECT plant, sample_date, m_code, warm_load, raw_result,
                   corrected_result_hint, position, judgement,
                   raw_test_value, test_sequence, test_method_name
            FROM rr_inspection_result
            WHERE sample_date BETWEEN ?1 AND ?2
              AND {}
            ORDER BY plant, m_code, sample_date, test_sequence
            "#,
            scope_predicate
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![date_from, date_to], |row| {
            Ok(MeasurementRecord {
                plant: row.get("plant")?,
                sample_date: row.get("sample_date")?,
                product_code: row.get("m_code")?,
                warm_load: row.get("warm_load")?,
                raw_value: row.get("raw_result")?,
                corrected_result_hint: row.get("corrected_result_hint")?,
                position: row.get::<_, Option<String>>("position")?.unwrap_or_default(),
                judgement: row.get("judgement")?,
                raw_test_value: row.get("raw_test_value")?,
                test_sequence: row.get("test_sequence")?,
                test_method_name: row
                    .get::<_, Option<String>>("test_method_name")?
                    .unwrap_or_default(),
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
