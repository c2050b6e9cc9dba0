// ==========================================
// 电影节排片助手 - 引擎层
// ==========================================
// 职责: 区间计算、冲突判定、按日期分组
// 红线: Engine 不拼 SQL, 不持有状态, 输入相同则输出相同
// ==========================================

pub mod conflict_detector;
pub mod interval;
pub mod schedule_grouper;

// 重导出核心引擎
pub use conflict_detector::{is_same_venue, ConflictDetector, TRAVEL_BUFFER_MINUTES};
pub use interval::{has_overlap, overlap_minutes, TimeInterval};
pub use schedule_grouper::{date_key, ScheduleGrouper};
