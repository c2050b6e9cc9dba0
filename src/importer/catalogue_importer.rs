// ==========================================
// 电影节排片助手 - 场次目录导入器
// ==========================================
// 流程: 文件解析 → 字段映射/校验 → 批量写入 screening 表
// 约束: 行级错误只拒绝该行,其余行照常导入
// ==========================================

use crate::domain::screening::Screening;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, FileParser, RawRecord};
use crate::repository::screening_repo::ScreeningRepository;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::instrument;

/// 不带偏移的本地时间可接受格式
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// 片长上限（分钟）: 一整天; 超出视为录入错误
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

// ==========================================
// 导入报告
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: Vec<RowRejection>,
}

/// 被拒绝的行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowRejection {
    pub row: usize,
    pub screening_id: Option<String>,
    pub reason: String,
}

// ==========================================
// CatalogueImporter - 场次目录导入器
// ==========================================
pub struct CatalogueImporter {
    parser: Box<dyn FileParser>,
}

impl Default for CatalogueImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogueImporter {
    pub fn new() -> Self {
        Self {
            parser: Box::new(CsvParser),
        }
    }

    /// 使用自定义解析器
    pub fn with_parser(parser: Box<dyn FileParser>) -> Self {
        Self { parser }
    }

    /// 从 CSV 导入场次目录
    ///
    /// # 参数
    /// - `path`: CSV 文件路径
    /// - `festival_offset`: 本地时间缺省的 UTC 偏移
    /// - `repo`: 场次目录仓储
    #[instrument(skip(self, path, repo), fields(file = %path.display()))]
    pub fn import_csv(
        &self,
        path: &Path,
        festival_offset: FixedOffset,
        repo: &ScreeningRepository,
    ) -> ImportResult<ImportReport> {
        let records = self.parser.parse_to_raw_records(path)?;
        let (screenings, rejected) = self.map_records(&records, festival_offset);

        let imported = repo.upsert_batch(&screenings)?;

        for rejection in &rejected {
            tracing::warn!(row = rejection.row, reason = %rejection.reason, "场次行被拒绝");
        }
        tracing::info!(imported, rejected = rejected.len(), "场次目录导入完成");

        Ok(ImportReport { imported, rejected })
    }

    /// 字段映射与校验
    ///
    /// # 返回
    /// (合法场次, 被拒绝的行)
    pub fn map_records(
        &self,
        records: &[RawRecord],
        festival_offset: FixedOffset,
    ) -> (Vec<Screening>, Vec<RowRejection>) {
        let mut screenings = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (row, fields) in records {
            match map_record(*row, fields, festival_offset) {
                Ok(screening) => screenings.push(screening),
                Err(err) => rejected.push(RowRejection {
                    row: *row,
                    screening_id: optional_field(fields, "screening_id"),
                    reason: err.to_string(),
                }),
            }
        }

        (screenings, rejected)
    }
}

fn map_record(
    row: usize,
    fields: &HashMap<String, String>,
    festival_offset: FixedOffset,
) -> ImportResult<Screening> {
    let screening_id = required_field(row, fields, "screening_id")?;
    let film_title = required_field(row, fields, "film_title")?;
    let start_raw = required_field(row, fields, "start")?;
    let duration_raw = required_field(row, fields, "duration_minutes")?;

    let start = parse_start(&start_raw, festival_offset).ok_or_else(|| {
        ImportError::DateTimeFormatError {
            row,
            field: "start".to_string(),
            value: start_raw.clone(),
        }
    })?;

    let duration_minutes = duration_raw
        .parse::<i64>()
        .map_err(|e| ImportError::ValueRangeError {
            row,
            field: "duration_minutes".to_string(),
            value: duration_raw.clone(),
            message: e.to_string(),
        })?;
    if duration_minutes <= 0 {
        return Err(ImportError::ValueRangeError {
            row,
            field: "duration_minutes".to_string(),
            value: duration_raw,
            message: "片长必须为正数".to_string(),
        });
    }
    if duration_minutes > MAX_DURATION_MINUTES {
        return Err(ImportError::ValueRangeError {
            row,
            field: "duration_minutes".to_string(),
            value: duration_raw,
            message: format!("片长不能超过 {} 分钟", MAX_DURATION_MINUTES),
        });
    }

    // 场馆可缺省: 未解析的场馆以空标识保存
    let venue_id = optional_field(fields, "venue_id").unwrap_or_default();
    let venue_name = optional_field(fields, "venue_name").unwrap_or_else(|| venue_id.clone());

    Ok(Screening {
        screening_id,
        film_title,
        start,
        duration_minutes,
        venue_id,
        venue_name,
        poster_url: optional_field(fields, "poster_url"),
        section: optional_field(fields, "section"),
    })
}

/// 解析开映时刻
///
/// - 带偏移的 RFC 3339 原样使用
/// - 不带偏移的本地时间补上电影节偏移
pub fn parse_start(raw: &str, festival_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| naive.and_local_timezone(festival_offset).single())
}

fn required_field(row: usize, fields: &HashMap<String, String>, name: &str) -> ImportResult<String> {
    optional_field(fields, name).ok_or_else(|| ImportError::MissingField {
        row,
        field: name.to_string(),
    })
}

fn optional_field(fields: &HashMap<String, String>, name: &str) -> Option<String> {
    fields
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
