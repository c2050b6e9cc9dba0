// ==========================================
// 电影节排片助手 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、引擎输入契约
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod conflict;
pub mod itinerary;
pub mod screening;
pub mod selection;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use conflict::{Conflict, ConflictSummary};
pub use itinerary::{DateGroup, ItineraryEntry};
pub use screening::{Schedulable, Screening, ScreeningSlot};
pub use selection::Selection;
pub use types::ConflictSeverity;
