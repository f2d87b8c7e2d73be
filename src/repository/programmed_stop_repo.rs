// ==========================================
// 产线小时生产追踪系统 - 计划停机数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::reference::ProgrammedStop;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 计划停机仓储
/// 职责: 管理 programmed_stops 表的 CRUD 操作
pub struct ProgrammedStopRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProgrammedStopRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按名称查询计划停机
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<ProgrammedStop>> {
        let conn = self.get_conn()?;

        let stop = conn
            .query_row(
                r#"
                SELECT name, duration_minutes, applies_weekday, applies_saturday
                FROM programmed_stops
                WHERE name = ?1
                "#,
                params![name],
                Self::map_row,
            )
            .optional()?;

        Ok(stop)
    }

    /// 查询全部计划停机（按名称排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<ProgrammedStop>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT name, duration_minutes, applies_weekday, applies_saturday
            FROM programmed_stops
            ORDER BY name
            "#,
        )?;

        let stops = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(stops)
    }

    /// 写入/覆盖计划停机
    pub fn upsert(&self, stop: &ProgrammedStop) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO programmed_stops
                (name, duration_minutes, applies_weekday, applies_saturday)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                stop.name,
                stop.duration_minutes,
                stop.applies_weekday,
                stop.applies_saturday,
            ],
        )?;

        Ok(())
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProgrammedStop> {
        Ok(ProgrammedStop {
            name: row.get(0)?,
            duration_minutes: row.get(1)?,
            applies_weekday: row.get(2)?,
            applies_saturday: row.get(3)?,
        })
    }
}
