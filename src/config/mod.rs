// ==========================================
// 电影节排片助手 - 配置层
// ==========================================
// 职责: 系统配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod planner_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, parse_utc_offset, ConfigManager};
pub use planner_config_trait::PlannerConfigReader;
