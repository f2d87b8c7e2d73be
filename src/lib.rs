// ==========================================
// 产线小时生产追踪系统 - 核心库
// ==========================================
// 依据: 车间数据采集规范 v1.2
// 技术栈: Rust + SQLite
// 系统定位: 小时目标计算 + 数据录入校验引擎
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ShiftType, StalenessLevel, ValidationResult};

// 领域实体
pub use domain::{
    DowntimeCause, PartNumber, ProductionEntry, ProgrammedStop, Shift,
    TheoreticalHeadcount, YieldFactor,
};

// 引擎
pub use engine::{
    DataEntrySession, EntryValidator, HourRangeGenerator, ReferenceCatalog,
    StalenessClassifier, StalenessThresholds, TargetCalculator,
};

// API
pub use api::{ApiError, ApiResult, EntryApi, SlotSummary, SubmitOutcome};

/// 系统版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
