// ==========================================
// RR 检测补正系统 - 规格参照抽取仓储
// ==========================================
// 数据源: 仓库镜像表 rr_specification
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::specification::SpecificationRow;
use crate::domain::types::TestScope;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// SpecificationRepository - 规格参照仓储
// ==========================================
pub struct SpecificationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SpecificationRepository {
    /// 创建新的 SpecificationRepository 实例
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

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按测试范围抽取规格参照行
    ///
    /// # 说明
    /// spec_max 为 NULL 的行照常返回, 丢弃判断属于 SpecEnvelopeResolver
    pub fn fetch_by_scope(&self, scope: TestScope) -> RepositoryResult<Vec<SpecificationRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT plant, m_code, spec_max, spec_min, rr_index
            FROM rr_specification
            WHERE test_scope = ?1
            ORDER BY plant, m_code
            "#,
        )?;

        let scope_value = match scope {
            TestScope::Oe => "OE",
            TestScope::NonOe => "NON-OE",
        };

        let rows = stmt.query_map([scope_value], |row| {
            Ok(SpecificationRow {
                plant: row.get("plant")?,
                product_code: row.get("m_code")?,
                spec_max: row.get("spec_max")?,
                spec_min: row.get::<_, Option<f64>>("spec_min")?.unwrap_or(0.0),
                rr_index: row.get::<_, Option<f64>>("rr_index")?.unwrap_or(0.0),
            })
        })?;

        let mut specs = Vec::new();
        for row in rows {
            specs.push(row?);
        }
        Ok(specs)
    }
}
