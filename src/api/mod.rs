// ==========================================
// 电影节排片助手 - API 层
// ==========================================
// 职责: 组合仓储与引擎,对外提供业务接口
// ==========================================

pub mod catalogue_api;
pub mod error;
pub mod schedule_api;

// 重导出核心类型
pub use catalogue_api::CatalogueApi;
pub use error::{ApiError, ApiResult};
pub use schedule_api::{
    AddSelectionResponse, ConflictPreview, ExportDay, ItineraryView, ScheduleApi,
};
