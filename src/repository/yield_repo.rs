// ==========================================
// 产线小时生产追踪系统 - 良率与理论人数仓储
// ==========================================
// 职责: yield_factors / theoretical_headcount 两张参考表
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::reference::{TheoreticalHeadcount, YieldFactor};
use crate::domain::types::ShiftType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// 良率与理论人数仓储
pub struct YieldRepository {
    conn: Arc<Mutex<Connection>>,
}

impl YieldRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 (周次, 班次类型) 查询良率系数
    ///
    /// # 返回
    /// - Ok(Some(f64)): 良率系数
    /// - Ok(None): 未维护
    pub fn find_factor(
        &self,
        week_number: u32,
        shift_type: ShiftType,
    ) -> RepositoryResult<Option<f64>> {
        let conn = self.get_conn()?;

        let factor = conn
            .query_row(
                r#"
                SELECT factor FROM yield_factors
                WHERE week_number = ?1 AND shift_type = ?2
                "#,
                params![week_number, shift_type.to_string()],
                |row| row.get::<_, f64>(0),
            )
            .optional()?;

        Ok(factor)
    }

    /// 查询全部良率系数
    pub fn list_factors(&self) -> RepositoryResult<Vec<YieldFactor>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT week_number, shift_type, factor
            FROM yield_factors
            ORDER BY week_number, shift_type
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut factors = Vec::new();
        for row in rows {
            let (week_number, shift_type_str, factor) = row?;
            let shift_type = ShiftType::from_str(&shift_type_str).map_err(|e| {
                RepositoryError::FieldValueError {
                    field: "shift_type".to_string(),
                    message: e,
                }
            })?;
            factors.push(YieldFactor {
                week_number,
                shift_type,
                factor,
            });
        }

        Ok(factors)
    }

    /// 写入/覆盖良率系数
    pub fn upsert_factor(&self, factor: &YieldFactor) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO yield_factors (week_number, shift_type, factor)
            VALUES (?1, ?2, ?3)
            "#,
            params![
                factor.week_number,
                factor.shift_type.to_string(),
                factor.factor,
            ],
        )?;

        Ok(())
    }

    /// 按班次类型查询理论人数
    pub fn find_theoretical_headcount(
        &self,
        shift_type: ShiftType,
    ) -> RepositoryResult<Option<u32>> {
        let conn = self.get_conn()?;

        let head_count = conn
            .query_row(
                "SELECT head_count FROM theoretical_headcount WHERE shift_type = ?1",
                params![shift_type.to_string()],
                |row| row.get::<_, u32>(0),
            )
            .optional()?;

        Ok(head_count)
    }

    /// 写入/覆盖理论人数
    pub fn upsert_theoretical_headcount(
        &self,
        hc: &TheoreticalHeadcount,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO theoretical_headcount (shift_type, head_count)
            VALUES (?1, ?2)
            "#,
            params![hc.shift_type.to_string(), hc.head_count],
        )?;

        Ok(())
    }
}
