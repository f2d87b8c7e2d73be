// ==========================================
// 产线小时生产追踪系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod entry;
pub mod reference;
pub mod shift;
pub mod types;

// 重导出核心类型
pub use entry::ProductionEntry;
pub use reference::{
    DowntimeCause, PartNumber, ProgrammedStop, TheoreticalHeadcount, YieldFactor,
};
pub use shift::Shift;
pub use types::{ShiftType, StalenessLevel, ValidationResult};
