// ==========================================
// 电影节排片助手 - 仓储行解析工具
// ==========================================
// 职责: 各仓储共用的列值解析
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, FixedOffset};

/// 解析 RFC 3339 时间文本
///
/// 解析失败返回 FieldValueError, 附带字段名与原始值
pub(crate) fn parse_timestamp(field: &str, raw: &str) -> RepositoryResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("{}: {}", raw, e),
    })
}
