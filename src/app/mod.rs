// ==========================================
// 产线小时生产追踪系统 - 应用层
// ==========================================
// 职责: 组装共享状态,提供进程级入口所需的基础设施
// ==========================================

pub mod seed;
pub mod state;

pub use seed::seed_default_catalog;
pub use state::{get_default_db_path, AppState};
