// ==========================================
// 电影节排片助手 - 行程视图模型
// ==========================================
// 生命周期: 每次渲染重建,不落库
// ==========================================

use crate::domain::conflict::Conflict;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 行程条目: 已选场次 + 其参与的冲突（无冲突时为空）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEntry<T> {
    pub selection: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<Conflict>,
}

impl<T> ItineraryEntry<T> {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// 日期分组: 某一自然日（开映地当地日期）的全部已选场次,按开映时间升序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroup<T> {
    pub date: NaiveDate,
    pub entries: Vec<ItineraryEntry<T>>,
}

impl<T> DateGroup<T> {
    /// 日期键（YYYY-MM-DD）
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
