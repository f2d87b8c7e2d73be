// ==========================================
// 产线小时生产追踪系统 - 生产登记仓储
// ==========================================
// 职责: production_entries 表的追加与查询
// 说明: 提交以 id 为主键 INSERT OR REPLACE,对同一 id 幂等
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::entry::ProductionEntry;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

const REGISTERED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 生产登记仓储
pub struct ProductionEntryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductionEntryRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 提交登记记录（以 id 为主键，重复提交同一 id 幂等）
    pub fn upsert(&self, entry: &ProductionEntry) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let registered_at = entry
            .registered_at
            .map(|ts| ts.format(REGISTERED_AT_FORMAT).to_string());

        conn.execute(
            r#"
            INSERT OR REPLACE INTO production_entries (
                id, hour, real_head_count, additional_head_count, programmed_stop,
                work_order, part_number, hourly_target, daily_production, delta,
                downtime, available_time, general_cause, specific_cause,
                registered_at, is_overtime
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                entry.id,
                entry.hour,
                entry.real_head_count,
                entry.additional_head_count,
                entry.programmed_stop,
                entry.work_order,
                entry.part_number,
                entry.hourly_target,
                entry.daily_production,
                entry.delta,
                entry.downtime,
                entry.available_time,
                entry.general_cause,
                entry.specific_cause,
                registered_at,
                entry.is_overtime,
            ],
        )?;

        Ok(())
    }

    /// 按 id 查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ProductionEntry>> {
        let conn = self.get_conn()?;

        let entry = conn
            .query_row(
                &format!("{} WHERE id = ?1", Self::SELECT_BASE),
                params![id],
                Self::map_row,
            )
            .optional()?;

        Ok(entry)
    }

    /// 查询全部登记记录（按提交时刻排序，未提交的在前）
    pub fn list_all(&self) -> RepositoryResult<Vec<ProductionEntry>> {
        let conn = self.get_conn()?;

        let mut stmt =
            conn.prepare(&format!("{} ORDER BY registered_at", Self::SELECT_BASE))?;

        let entries = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// 按小时时段查询登记记录
    pub fn list_by_hour(&self, hour: &str) -> RepositoryResult<Vec<ProductionEntry>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE hour = ?1 ORDER BY registered_at",
            Self::SELECT_BASE
        ))?;

        let entries = stmt
            .query_map(params![hour], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    const SELECT_BASE: &'static str = r#"
        SELECT
            id, hour, real_head_count, additional_head_count, programmed_stop,
            work_order, part_number, hourly_target, daily_production, delta,
            downtime, available_time, general_cause, specific_cause,
            registered_at, is_overtime
        FROM production_entries
    "#;

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductionEntry> {
        let registered_at: Option<String> = row.get(14)?;
        let registered_at = registered_at
            .and_then(|s| NaiveDateTime::parse_from_str(&s, REGISTERED_AT_FORMAT).ok());

        Ok(ProductionEntry {
            id: row.get(0)?,
            hour: row.get(1)?,
            real_head_count: row.get(2)?,
            additional_head_count: row.get(3)?,
            programmed_stop: row.get(4)?,
            work_order: row.get(5)?,
            part_number: row.get(6)?,
            hourly_target: row.get(7)?,
            daily_production: row.get(8)?,
            delta: row.get(9)?,
            downtime: row.get(10)?,
            available_time: row.get(11)?,
            general_cause: row.get(12)?,
            specific_cause: row.get(13)?,
            registered_at,
            is_overtime: row.get(15)?,
        })
    }
}
