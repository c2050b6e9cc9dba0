// ==========================================
// 电影节排片助手 - 已选场次仓储 (SQLite)
// ==========================================
// 红线: Repository 不含业务逻辑
// 存储: selection 表, start_at 为 RFC 3339 文本（保留时区偏移）
// ==========================================

use crate::domain::selection::Selection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row_utils::parse_timestamp;
use crate::repository::selection_store::SelectionStore;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// selection 表原始行
type SelectionRow = (String, String, i64, String, String, String, Option<String>, String);

// ==========================================
// SelectionRepository - 已选场次仓储
// ==========================================
pub struct SelectionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SelectionRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按场次ID查询
    ///
    /// # 返回
    /// - Ok(Some(Selection)): 已选
    /// - Ok(None): 未选
    /// - Err: 数据库错误
    pub fn find_by_id(&self, screening_id: &str) -> RepositoryResult<Option<Selection>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT screening_id, start_at, duration_minutes, venue_id,
                       film_title, venue_name, poster_url, added_at
                FROM selection
                WHERE screening_id = ?1
                "#,
                params![screening_id],
                map_row,
            )
            .optional()?;

        row.map(row_to_selection).transpose()
    }

    /// 清空已选集合
    pub fn clear(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM selection", [])?;
        Ok(affected)
    }
}

impl SelectionStore for SelectionRepository {
    fn list(&self) -> RepositoryResult<Vec<Selection>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT screening_id, start_at, duration_minutes, venue_id,
                   film_title, venue_name, poster_url, added_at
            FROM selection
            ORDER BY seq ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter().map(row_to_selection).collect()
    }

    fn add(&self, selection: &Selection) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO selection (
                screening_id, start_at, duration_minutes, venue_id,
                film_title, venue_name, poster_url, added_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                selection.screening_id,
                selection.start.to_rfc3339(),
                selection.duration_minutes,
                selection.venue_id,
                selection.film_title,
                selection.venue_name,
                selection.poster_url,
                selection.added_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn remove(&self, screening_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM selection WHERE screening_id = ?1",
            params![screening_id],
        )?;
        Ok(affected > 0)
    }

    fn contains(&self, screening_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM selection WHERE screening_id = ?1",
                params![screening_id],
                |_row| Ok(true),
            )
            .optional()?;
        Ok(found.unwrap_or(false))
    }
}

fn map_row(row: &rusqlite::Row<'_>) -> SqliteResult<SelectionRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn row_to_selection(row: SelectionRow) -> RepositoryResult<Selection> {
    let (screening_id, start_at, duration_minutes, venue_id, film_title, venue_name, poster_url, added_at) =
        row;

    Ok(Selection {
        start: parse_timestamp("start_at", &start_at)?,
        added_at: parse_timestamp("added_at", &added_at)?.with_timezone(&Utc),
        screening_id,
        duration_minutes,
        venue_id,
        film_title,
        venue_name,
        poster_url,
    })
}
