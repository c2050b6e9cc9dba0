// ==========================================
// 电影节排片助手 - 操作日志领域模型
// ==========================================
// 用途: 已选集合增删的审计追踪
// 对齐: action_log 表
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,         // 日志ID (UUID)
    pub action_type: String,       // 操作类型 (存储为字符串)
    pub action_ts: NaiveDateTime,  // 操作时间戳 (UTC)
    pub screening_id: String,      // 关联场次
    pub payload_json: Option<JsonValue>, // 操作时的冲突摘要等
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    AddSelection,    // 加入日程
    RemoveSelection, // 移出日程
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::AddSelection => write!(f, "ADD_SELECTION"),
            ActionType::RemoveSelection => write!(f, "REMOVE_SELECTION"),
        }
    }
}
