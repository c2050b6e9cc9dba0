// ==========================================
// 电影节排片助手 - 操作日志数据仓储
// ==========================================
// 红线: 已选集合的每次增删都记录; 只追加,不修改
// ==========================================

use crate::domain::action_log::ActionLog;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// ==========================================
// ActionLogRepository - 操作日志仓储
// ==========================================
pub struct ActionLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ActionLogRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入操作日志
    ///
    /// # 返回
    /// - `Ok(action_id)`: 成功插入
    /// - `Err(...)`: 数据库错误
    pub fn insert(&self, log: &ActionLog) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO action_log (
                action_id, action_type, action_ts, screening_id, payload_json
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                log.action_id,
                log.action_type,
                log.action_ts.format(TS_FORMAT).to_string(),
                log.screening_id,
                log.payload_json.as_ref().map(|v| v.to_string()),
            ],
        )?;

        Ok(log.action_id.clone())
    }

    /// 最近的操作日志（时间倒序）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT action_id, action_type, action_ts, screening_id, payload_json
            FROM action_log
            ORDER BY action_ts DESC, rowid DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter()
            .map(|(action_id, action_type, action_ts, screening_id, payload)| {
                let action_ts = NaiveDateTime::parse_from_str(&action_ts, TS_FORMAT).map_err(|e| {
                    RepositoryError::FieldValueError {
                        field: "action_ts".to_string(),
                        message: e.to_string(),
                    }
                })?;
                // payload 损坏不影响日志可读性
                let payload_json = payload.and_then(|p| serde_json::from_str(&p).ok());
                Ok(ActionLog {
                    action_id,
                    action_type,
                    action_ts,
                    screening_id,
                    payload_json,
                })
            })
            .collect()
    }
}
