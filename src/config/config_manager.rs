// ==========================================
// 产线小时生产追踪系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、缺省值落库
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::engine::staleness::StalenessThresholds;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ===== 配置键 =====
const KEY_STALENESS_ON_TIME_LIMIT: &str = "staleness.on_time_limit_minutes";
const KEY_STALENESS_LATE_LIMIT: &str = "staleness.late_limit_minutes";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（scope_id='global'，覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO config_kv (scope_id, key, value)
            VALUES ('global', ?1, ?2)
            "#,
            params![key, value],
        )?;

        Ok(())
    }

    /// 读取 i64 配置值，缺失或非法时回落到 default
    fn get_i64_or(&self, key: &str, default: i64) -> Result<i64, Box<dyn Error>> {
        let value = self.get_config_value(key)?;
        Ok(value
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(default))
    }

    /// 首次运行落库缺省配置（已存在的键不覆盖）
    pub fn ensure_defaults(&self) -> Result<(), Box<dyn Error>> {
        let defaults = StalenessThresholds::default();
        let pairs = [
            (
                KEY_STALENESS_ON_TIME_LIMIT,
                defaults.on_time_limit_minutes.to_string(),
            ),
            (
                KEY_STALENESS_LATE_LIMIT,
                defaults.late_limit_minutes.to_string(),
            ),
        ];

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        for (key, value) in pairs {
            conn.execute(
                r#"
                INSERT OR IGNORE INTO config_kv (scope_id, key, value)
                VALUES ('global', ?1, ?2)
                "#,
                params![key, value],
            )?;
        }

        Ok(())
    }

    /// 读取登记时效分级阈值（缺省 15/30 分钟）
    pub fn get_staleness_thresholds(&self) -> Result<StalenessThresholds, Box<dyn Error>> {
        let defaults = StalenessThresholds::default();
        Ok(StalenessThresholds {
            on_time_limit_minutes: self
                .get_i64_or(KEY_STALENESS_ON_TIME_LIMIT, defaults.on_time_limit_minutes)?,
            late_limit_minutes: self
                .get_i64_or(KEY_STALENESS_LATE_LIMIT, defaults.late_limit_minutes)?,
        })
    }
}
