// ==========================================
// 产线小时生产追踪系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,不拼 SQL
// 红线: Engine 不拼 SQL, 所有校验必须输出 reason
// 红线: "当前时刻"一律由调用方注入,引擎不读系统时钟
// ==========================================

pub mod catalog;
pub mod hour_range;
pub mod session;
pub mod staleness;
pub mod target;
pub mod validator;

// 重导出核心引擎
pub use catalog::ReferenceCatalog;
pub use hour_range::{parse_hour_label_start, HourRangeGenerator};
pub use session::DataEntrySession;
pub use staleness::{StalenessClassifier, StalenessThresholds};
pub use target::TargetCalculator;
pub use validator::EntryValidator;
