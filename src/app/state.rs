// ==========================================
// 电影节排片助手 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{CatalogueApi, ScheduleApi};
use crate::config::config_manager::ConfigManager;
use crate::repository::{
    ActionLogRepository, ScreeningRepository, SelectionRepository, SelectionStore,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 日程API
    pub schedule_api: Arc<ScheduleApi>,

    /// 场次目录API
    pub catalogue_api: Arc<CatalogueApi>,

    /// 配置管理器（用于读写 config_kv）
    pub config_manager: Arc<ConfigManager>,

    /// 操作日志仓储
    pub action_log_repo: Arc<ActionLogRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并确保表结构存在
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::db::ensure_schema(&conn).map_err(|e| format!("无法初始化表结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let screening_repo = Arc::new(ScreeningRepository::new(conn.clone()));
        let selection_store: Arc<dyn SelectionStore> =
            Arc::new(SelectionRepository::new(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let schedule_api = Arc::new(ScheduleApi::new(
            selection_store,
            screening_repo.clone(),
            action_log_repo.clone(),
            config_manager.clone(),
        ));
        let catalogue_api = Arc::new(CatalogueApi::new(screening_repo, config_manager.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            schedule_api,
            catalogue_api,
            config_manager,
            action_log_repo,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级:
/// 1. 环境变量 FESTIVAL_PLANNER_DB_PATH
/// 2. 用户数据目录下 festival-planner/festival_planner.db
/// 3. 当前目录 ./festival_planner.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("FESTIVAL_PLANNER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./festival_planner.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("festival-planner");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("festival_planner.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_app_state_new_creates_schema() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);
        assert!(state.schedule_api.list_selections().unwrap().is_empty());
        assert_eq!(state.catalogue_api.count_screenings().unwrap(), 0);
    }
}
