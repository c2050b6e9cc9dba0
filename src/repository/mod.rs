// ==========================================
// 电影节排片助手 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 已选集合存储、场次目录、操作日志
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod action_log_repo;
pub mod error;
mod row_utils;
pub mod screening_repo;
pub mod selection_repo;
pub mod selection_store;

// 重导出核心仓储
pub use action_log_repo::ActionLogRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use screening_repo::ScreeningRepository;
pub use selection_repo::SelectionRepository;
pub use selection_store::{MemorySelectionStore, SelectionStore};
