// ==========================================
// 电影节排片助手 - 场次目录仓储 (SQLite)
// ==========================================
// 红线: Repository 不含业务逻辑
// 存储: screening 表; start_epoch_ms 仅用于排序/区间查询
// ==========================================

use crate::domain::screening::Screening;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row_utils::parse_timestamp;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// screening 表原始行
type ScreeningRow = (String, String, String, i64, String, String, Option<String>, Option<String>);

const SELECT_COLUMNS: &str = r#"
    SELECT screening_id, film_title, start_at, duration_minutes,
           venue_id, venue_name, poster_url, section
    FROM screening
"#;

// ==========================================
// ScreeningRepository - 场次目录仓储
// ==========================================
pub struct ScreeningRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScreeningRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量写入场次（同 id 覆盖）
    ///
    /// # 返回
    /// - Ok(usize): 写入行数
    /// - Err: 数据库错误（事务整体回滚）
    pub fn upsert_batch(&self, screenings: &[Screening]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO screening (
                    screening_id, film_title, start_at, start_epoch_ms, duration_minutes,
                    venue_id, venue_name, poster_url, section
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ON CONFLICT(screening_id) DO UPDATE SET
                    film_title = excluded.film_title,
                    start_at = excluded.start_at,
                    start_epoch_ms = excluded.start_epoch_ms,
                    duration_minutes = excluded.duration_minutes,
                    venue_id = excluded.venue_id,
                    venue_name = excluded.venue_name,
                    poster_url = excluded.poster_url,
                    section = excluded.section
                "#,
            )?;

            for screening in screenings {
                count += stmt.execute(params![
                    screening.screening_id,
                    screening.film_title,
                    screening.start.to_rfc3339(),
                    screening.start.timestamp_millis(),
                    screening.duration_minutes,
                    screening.venue_id,
                    screening.venue_name,
                    screening.poster_url,
                    screening.section,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// 按场次ID查询
    pub fn find_by_id(&self, screening_id: &str) -> RepositoryResult<Option<Screening>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE screening_id = ?1", SELECT_COLUMNS);
        let row = conn
            .query_row(&sql, params![screening_id], map_row)
            .optional()?;

        row.map(row_to_screening).transpose()
    }

    /// 查询全部场次（按开映时刻升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Screening>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY start_epoch_ms ASC, screening_id ASC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter().map(row_to_screening).collect()
    }

    /// 查询某一当地日期的场次
    ///
    /// 日期按开映时刻自身偏移下的当地日期判断
    pub fn list_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Screening>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|s| s.start.date_naive() == date)
            .collect())
    }

    /// 场次总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM screening", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn map_row(row: &rusqlite::Row<'_>) -> SqliteResult<ScreeningRow> {
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

fn row_to_screening(row: ScreeningRow) -> RepositoryResult<Screening> {
    let (screening_id, film_title, start_at, duration_minutes, venue_id, venue_name, poster_url, section) =
        row;

    Ok(Screening {
        start: parse_timestamp("start_at", &start_at)?,
        screening_id,
        film_title,
        duration_minutes,
        venue_id,
        venue_name,
        poster_url,
        section,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, ensure_schema};
    use chrono::DateTime;

    fn setup_test_db() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        Arc::new(Mutex::new(conn))
    }

    fn make_screening(id: &str, start: &str, title: &str) -> Screening {
        Screening {
            screening_id: id.to_string(),
            start: DateTime::parse_from_rfc3339(start).unwrap(),
            duration_minutes: 110,
            venue_id: "V1".to_string(),
            venue_name: "Venue 1".to_string(),
            film_title: title.to_string(),
            poster_url: None,
            section: Some("Competition".to_string()),
        }
    }

    #[test]
    fn test_upsert_overwrites_existing() {
        let repo = ScreeningRepository::new(setup_test_db());
        repo.upsert_batch(&[make_screening("s1", "2025-03-15T14:00:00+01:00", "Old")])
            .unwrap();
        repo.upsert_batch(&[make_screening("s1", "2025-03-15T14:00:00+01:00", "New")])
            .unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        let found = repo.find_by_id("s1").unwrap().unwrap();
        assert_eq!(found.film_title, "New");
    }

    #[test]
    fn test_list_all_ordered_by_instant() {
        let repo = ScreeningRepository::new(setup_test_db());
        repo.upsert_batch(&[
            make_screening("late", "2025-03-15T20:00:00+01:00", "B"),
            // 同一天更早的时刻, 以 UTC 偏移书写
            make_screening("early", "2025-03-15T09:00:00+00:00", "A"),
        ])
        .unwrap();

        let ids: Vec<String> = repo.list_all().unwrap().into_iter().map(|s| s.screening_id).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_list_by_date() {
        let repo = ScreeningRepository::new(setup_test_db());
        repo.upsert_batch(&[
            make_screening("d1", "2025-03-15T20:00:00+01:00", "A"),
            make_screening("d2", "2025-03-16T10:00:00+01:00", "B"),
        ])
        .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        let found = repo.list_by_date(day).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].screening_id, "d2");
    }
}
