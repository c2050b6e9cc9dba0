// ==========================================
// 电影节排片助手 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 冲突严重度 (Conflict Severity)
// ==========================================
// 红线: 只有两档,不做评分
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictSeverity {
    Impossible, // 时间重叠,无法同时观看
    Warning,    // 跨场馆转场时间不足
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictSeverity::Impossible => write!(f, "IMPOSSIBLE"),
            ConflictSeverity::Warning => write!(f, "WARNING"),
        }
    }
}

impl ConflictSeverity {
    /// 从字符串解析严重度
    ///
    /// 未知值按 Warning 处理（较轻的一档）
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "IMPOSSIBLE" => ConflictSeverity::Impossible,
            _ => ConflictSeverity::Warning,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ConflictSeverity::Impossible => "IMPOSSIBLE",
            ConflictSeverity::Warning => "WARNING",
        }
    }
}
