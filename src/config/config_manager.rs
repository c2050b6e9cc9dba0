// ==========================================
// 电影节排片助手 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::planner_config_trait::PlannerConfigReader;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{FixedOffset, Offset, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)
                .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!(config_key = key, "配置已更新");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        serde_json::to_string(&json!(config_map))
            .map_err(|e| RepositoryError::InternalError(e.to_string()))
    }
}

// ==========================================
// PlannerConfigReader Trait 实现
// ==========================================
#[async_trait]
impl PlannerConfigReader for ConfigManager {
    async fn get_festival_utc_offset(&self) -> RepositoryResult<FixedOffset> {
        let value = self.get_config_or_default(config_keys::FESTIVAL_UTC_OFFSET, "+00:00")?;
        Ok(parse_utc_offset(&value).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::FESTIVAL_UTC_OFFSET,
                raw_value = %value,
                "UTC 偏移配置格式错误，使用 +00:00"
            );
            utc_offset()
        }))
    }

    async fn get_selection_limit(&self) -> RepositoryResult<usize> {
        let value = self.get_config_or_default(config_keys::SELECTION_LIMIT, "100")?;
        match value.trim().parse::<usize>() {
            Ok(limit) if limit > 0 => Ok(limit),
            _ => {
                tracing::warn!(
                    config_key = config_keys::SELECTION_LIMIT,
                    raw_value = %value,
                    "已选上限配置格式错误，使用 100"
                );
                Ok(100)
            }
        }
    }

    async fn get_festival_name(&self) -> RepositoryResult<String> {
        Ok(self
            .get_config_or_default(config_keys::FESTIVAL_NAME, "")?
            .trim()
            .to_string())
    }
}

/// 解析 UTC 偏移: "Z" / "+HH:MM" / "-HH:MM" / "+HHMM"
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let s = raw.trim();
    if s.eq_ignore_ascii_case("z") {
        return Some(utc_offset());
    }
    s.parse::<FixedOffset>().ok()
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 电影节
    pub const FESTIVAL_NAME: &str = "festival_name";
    pub const FESTIVAL_UTC_OFFSET: &str = "festival_utc_offset";

    // 日程
    pub const SELECTION_LIMIT: &str = "selection_limit";
}
