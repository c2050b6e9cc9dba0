// ==========================================
// 电影节排片助手 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 观影日程冲突提示（冲突只提示,不阻止选择）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 冲突检测与分组
pub mod engine;

// 导入层 - 场次目录
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ActionLog, ActionType, Conflict, ConflictSeverity, ConflictSummary, DateGroup,
    ItineraryEntry, Schedulable, Screening, ScreeningSlot, Selection,
};

// 引擎
pub use engine::{
    has_overlap, overlap_minutes, ConflictDetector, ScheduleGrouper, TimeInterval,
    TRAVEL_BUFFER_MINUTES,
};

// 存储
pub use repository::{MemorySelectionStore, SelectionStore};

// API
pub use api::{CatalogueApi, ScheduleApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "电影节排片助手";
