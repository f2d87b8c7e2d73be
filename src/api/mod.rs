// ==========================================
// 产线小时生产追踪系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供外层（桌面端/看板）调用
// ==========================================

pub mod entry_api;
pub mod error;

// 重导出核心类型
pub use entry_api::{EntryApi, SlotSummary, SubmitOutcome};
pub use error::{ApiError, ApiResult};
