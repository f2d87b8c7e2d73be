// ==========================================
// 产线小时生产追踪系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 统一建表入口，保证所有仓储看到同一套 schema
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等，CREATE TABLE IF NOT EXISTS）
///
/// 表清单：
/// - part_numbers: 料号主数据（三班节拍）
/// - programmed_stops: 计划停机目录
/// - yield_factors: 周良率系数（按周次 + 班次类型）
/// - theoretical_headcount: 理论人数（按班次类型）
/// - downtime_causes: 停线原因目录（大类 + 细分）
/// - production_entries: 小时生产登记记录
/// - config_kv: 配置键值表（global scope）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS part_numbers (
            code            TEXT PRIMARY KEY,
            description     TEXT,
            run_rate_t1     INTEGER NOT NULL DEFAULT 0,
            run_rate_t2     INTEGER NOT NULL DEFAULT 0,
            run_rate_t3     INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS programmed_stops (
            name              TEXT PRIMARY KEY,
            duration_minutes  INTEGER NOT NULL,
            applies_weekday   INTEGER NOT NULL DEFAULT 1,
            applies_saturday  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS yield_factors (
            week_number  INTEGER NOT NULL,
            shift_type   TEXT NOT NULL,
            factor       REAL NOT NULL,
            PRIMARY KEY (week_number, shift_type)
        );

        CREATE TABLE IF NOT EXISTS theoretical_headcount (
            shift_type  TEXT PRIMARY KEY,
            head_count  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS downtime_causes (
            general_cause   TEXT NOT NULL,
            specific_cause  TEXT NOT NULL,
            PRIMARY KEY (general_cause, specific_cause)
        );

        CREATE TABLE IF NOT EXISTS production_entries (
            id                    TEXT PRIMARY KEY,
            hour                  TEXT NOT NULL,
            real_head_count       INTEGER,
            additional_head_count INTEGER,
            programmed_stop       TEXT,
            work_order            TEXT NOT NULL DEFAULT '',
            part_number           TEXT NOT NULL DEFAULT '',
            hourly_target         INTEGER NOT NULL DEFAULT 0,
            daily_production      INTEGER,
            delta                 INTEGER NOT NULL DEFAULT 0,
            downtime              INTEGER NOT NULL DEFAULT 0,
            available_time        INTEGER NOT NULL DEFAULT 60,
            general_cause         TEXT,
            specific_cause        TEXT,
            registered_at         TEXT,
            is_overtime           INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_production_entries_hour
            ON production_entries (hour);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id  TEXT NOT NULL,
            key       TEXT NOT NULL,
            value     TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )?;
    Ok(())
}
