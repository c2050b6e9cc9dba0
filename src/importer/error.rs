// ==========================================
// 电影节排片助手 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 行级数据错误 =====
    #[error("必填字段缺失 (行 {row}): {field}")]
    MissingField { row: usize, field: String },

    #[error("时间格式错误 (行 {row}, 字段 {field}): 期望 RFC 3339 或 YYYY-MM-DD HH:MM，实际 {value}")]
    DateTimeFormatError {
        row: usize,
        field: String,
        value: String,
    },

    #[error("数值错误 (行 {row}, 字段 {field}): {value} ({message})")]
    ValueRangeError {
        row: usize,
        field: String,
        value: String,
        message: String,
    },

    // ===== 数据库错误 =====
    #[error("场次写入失败: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
