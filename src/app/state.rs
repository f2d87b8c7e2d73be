// ==========================================
// 产线小时生产追踪系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::error::Error;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::EntryApi;
use crate::config::ConfigManager;
use crate::repository::{
    DowntimeCauseRepository, PartNumberRepository, ProductionEntryRepository,
    ProgrammedStopRepository, SqliteReferenceReader, YieldRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 生产登记API
    pub entry_api: Arc<EntryApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 料号仓储（数据维护入口）
    pub part_repo: Arc<PartNumberRepository>,

    /// 计划停机仓储
    pub stop_repo: Arc<ProgrammedStopRepository>,

    /// 良率与理论人数仓储
    pub yield_repo: Arc<YieldRepository>,

    /// 停线原因目录仓储
    pub cause_repo: Arc<DowntimeCauseRepository>,
}

impl AppState {
    /// 初始化应用状态
    ///
    /// 打开数据库、应用统一 PRAGMA、建表、落库缺省配置、组装仓储与 API
    pub fn new(db_path: String) -> Result<Self, Box<dyn Error>> {
        let conn = crate::db::open_sqlite_connection(&db_path)?;
        crate::db::init_schema(&conn)?;
        let conn: Arc<Mutex<Connection>> = Arc::new(Mutex::new(conn));

        let part_repo = Arc::new(PartNumberRepository::from_connection(conn.clone()));
        let stop_repo = Arc::new(ProgrammedStopRepository::from_connection(conn.clone()));
        let yield_repo = Arc::new(YieldRepository::from_connection(conn.clone()));
        let cause_repo = Arc::new(DowntimeCauseRepository::from_connection(conn.clone()));
        let entry_repo = Arc::new(ProductionEntryRepository::from_connection(conn.clone()));

        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone())?);
        config_manager.ensure_defaults()?;
        let thresholds = config_manager.get_staleness_thresholds()?;

        let reader = Arc::new(SqliteReferenceReader::new(
            part_repo.clone(),
            stop_repo.clone(),
            yield_repo.clone(),
            cause_repo.clone(),
        ));

        let entry_api = Arc::new(EntryApi::new(reader, entry_repo, thresholds));

        Ok(Self {
            db_path,
            entry_api,
            config_manager,
            part_repo,
            stop_repo,
            yield_repo,
            cause_repo,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先使用系统数据目录，不可用时回落到当前目录
pub fn get_default_db_path() -> String {
    let base = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let dir = base.join("production-tracking");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("创建数据目录失败,回落到当前目录: {}", e);
        return "production-tracking.db".to_string();
    }
    dir.join("production-tracking.db")
        .to_string_lossy()
        .to_string()
}
