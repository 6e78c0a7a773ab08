//! 基础设施层：存储、快照导入与日志

pub mod logger;
pub mod seed;
pub mod snapshot;
pub mod storage;

pub use storage::MemStorage;
