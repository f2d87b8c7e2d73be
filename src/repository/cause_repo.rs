// ==========================================
// 产线小时生产追踪系统 - 停线原因目录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::reference::DowntimeCause;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 停线原因目录仓储
/// 职责: 管理 downtime_causes 表（大类 + 细分）
pub struct DowntimeCauseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DowntimeCauseRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部停线原因（大类、细分排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<DowntimeCause>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT general_cause, specific_cause
            FROM downtime_causes
            ORDER BY general_cause, specific_cause
            "#,
        )?;

        let causes = stmt
            .query_map([], |row| {
                Ok(DowntimeCause {
                    general_cause: row.get(0)?,
                    specific_cause: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(causes)
    }

    /// 写入停线原因（已存在则忽略）
    pub fn insert(&self, cause: &DowntimeCause) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR IGNORE INTO downtime_causes (general_cause, specific_cause)
            VALUES (?1, ?2)
            "#,
            params![cause.general_cause, cause.specific_cause],
        )?;

        Ok(())
    }
}
