// ==========================================
// 产线小时生产追踪系统 - 数据仓储层
// ==========================================
// 职责: 封装 SQLite 数据访问
// 红线: Repository 不含业务逻辑
// ==========================================

pub mod cause_repo;
pub mod entry_repo;
pub mod error;
pub mod part_number_repo;
pub mod programmed_stop_repo;
pub mod reference_reader;
pub mod yield_repo;

// 重导出核心类型
pub use cause_repo::DowntimeCauseRepository;
pub use entry_repo::ProductionEntryRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use part_number_repo::PartNumberRepository;
pub use programmed_stop_repo::ProgrammedStopRepository;
pub use reference_reader::{ReferenceDataReader, SqliteReferenceReader};
pub use yield_repo::YieldRepository;
