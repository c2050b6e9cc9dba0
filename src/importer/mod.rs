// ==========================================
// 电影节排片助手 - 导入层
// ==========================================
// 职责: 外部场次目录导入
// 支持: CSV
// ==========================================

pub mod catalogue_importer;
pub mod error;
pub mod file_parser;

// 重导出核心类型
pub use catalogue_importer::{
    parse_start, CatalogueImporter, ImportReport, RowRejection, MAX_DURATION_MINUTES,
};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, FileParser, RawRecord};
