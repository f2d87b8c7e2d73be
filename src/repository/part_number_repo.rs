// ==========================================
// 产线小时生产追踪系统 - 料号数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::reference::PartNumber;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// PartNumberRepository - 料号仓储
// ==========================================

/// 料号仓储
/// 职责: 管理 part_numbers 表的 CRUD 操作
pub struct PartNumberRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PartNumberRepository {
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

    /// 按料号查询
    ///
    /// # 返回
    /// - Ok(Some(PartNumber)): 找到料号
    /// - Ok(None): 未找到
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<PartNumber>> {
        let conn = self.get_conn()?;

        let part = conn
            .query_row(
                r#"
                SELECT code, description, run_rate_t1, run_rate_t2, run_rate_t3
                FROM part_numbers
                WHERE code = ?1
                "#,
                params![code],
                Self::map_row,
            )
            .optional()?;

        Ok(part)
    }

    /// 查询全部料号（按 code 排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<PartNumber>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT code, description, run_rate_t1, run_rate_t2, run_rate_t3
            FROM part_numbers
            ORDER BY code
            "#,
        )?;

        let parts = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(parts)
    }

    /// 写入/覆盖料号
    pub fn upsert(&self, part: &PartNumber) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO part_numbers
                (code, description, run_rate_t1, run_rate_t2, run_rate_t3)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                part.code,
                part.description,
                part.run_rate_t1,
                part.run_rate_t2,
                part.run_rate_t3,
            ],
        )?;

        Ok(())
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PartNumber> {
        Ok(PartNumber {
            code: row.get(0)?,
            description: row.get(1)?,
            run_rate_t1: row.get(2)?,
            run_rate_t2: row.get(3)?,
            run_rate_t3: row.get(4)?,
        })
    }
}
