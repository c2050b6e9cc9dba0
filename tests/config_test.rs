// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置读取与缺省回退
// ==========================================


use std::sync::{Arc, Mutex};

use festival_planner::config::{config_keys, ConfigManager, PlannerConfigReader};
use test_helpers::{create_test_db, insert_test_config, open_test_connection};

fn manager(db_path: &str) -> ConfigManager {
    let conn = open_test_connection(db_path).expect("Failed to open db");
    ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
        .expect("Failed to create ConfigManager")
}

#[tokio::test]
async fn test_defaults_without_config_rows() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = manager(&db_path);

    assert_eq!(
        config_manager.get_festival_utc_offset().await.unwrap().local_minus_utc(),
        0
    );
    assert_eq!(config_manager.get_selection_limit().await.unwrap(), 100);
    assert_eq!(config_manager.get_festival_name().await.unwrap(), "");
}

#[tokio::test]
async fn test_reads_configured_values() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).unwrap();
    insert_test_config(&conn, config_keys::FESTIVAL_UTC_OFFSET, "-05:00").unwrap();
    insert_test_config(&conn, config_keys::SELECTION_LIMIT, "12").unwrap();
    insert_test_config(&conn, config_keys::FESTIVAL_NAME, " Berlinale 2025 ").unwrap();

    let config_manager = manager(&db_path);
    assert_eq!(
        config_manager.get_festival_utc_offset().await.unwrap().local_minus_utc(),
        -5 * 3600
    );
    assert_eq!(config_manager.get_selection_limit().await.unwrap(), 12);
    assert_eq!(config_manager.get_festival_name().await.unwrap(), "Berlinale 2025");
}

#[tokio::test]
async fn test_malformed_values_fall_back_to_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).unwrap();
    insert_test_config(&conn, config_keys::FESTIVAL_UTC_OFFSET, "CET").unwrap();
    insert_test_config(&conn, config_keys::SELECTION_LIMIT, "0").unwrap();

    let config_manager = manager(&db_path);
    assert_eq!(
        config_manager.get_festival_utc_offset().await.unwrap().local_minus_utc(),
        0
    );
    assert_eq!(config_manager.get_selection_limit().await.unwrap(), 100);
}

#[tokio::test]
async fn test_set_value_and_snapshot() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = manager(&db_path);

    config_manager
        .set_global_config_value(config_keys::SELECTION_LIMIT, "5")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::SELECTION_LIMIT, "7")
        .unwrap();
    assert_eq!(config_manager.get_selection_limit().await.unwrap(), 7);

    let snapshot: serde_json::Value =
        serde_json::from_str(&config_manager.get_config_snapshot().unwrap()).unwrap();
    assert_eq!(snapshot[config_keys::SELECTION_LIMIT], "7");
}
