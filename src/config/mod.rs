// ==========================================
// 产线小时生产追踪系统 - 配置层
// ==========================================
// 职责: 系统配置加载与查询
// ==========================================

pub mod config_manager;

pub use config_manager::ConfigManager;
