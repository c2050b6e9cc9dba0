// ==========================================
// 电影节排片助手 - 冲突领域模型
// ==========================================
// 生命周期: 每次查询现算,不缓存、不落库
// ==========================================

use crate::domain::types::ConflictSeverity;
use serde::{Deserialize, Serialize};

// ==========================================
// Conflict - 两个场次之间的排期冲突
// ==========================================
// a: 输入顺序中先出现的场次, b: 后出现的场次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub a: String,
    pub b: String,
    pub severity: ConflictSeverity,
    /// Impossible: 重叠分钟数 (> 0); Warning: 恒为 0
    pub overlap_minutes: f64,
}

impl Conflict {
    pub fn impossible(a: &str, b: &str, overlap_minutes: f64) -> Self {
        Self {
            a: a.to_string(),
            b: b.to_string(),
            severity: ConflictSeverity::Impossible,
            overlap_minutes,
        }
    }

    pub fn warning(a: &str, b: &str) -> Self {
        Self {
            a: a.to_string(),
            b: b.to_string(),
            severity: ConflictSeverity::Warning,
            overlap_minutes: 0.0,
        }
    }

    /// 是否涉及指定场次
    pub fn involves(&self, screening_id: &str) -> bool {
        self.a == screening_id || self.b == screening_id
    }

    /// 取冲突的另一方; 不涉及该场次时返回 None
    pub fn other(&self, screening_id: &str) -> Option<&str> {
        if self.a == screening_id {
            Some(&self.b)
        } else if self.b == screening_id {
            Some(&self.a)
        } else {
            None
        }
    }

    pub fn is_impossible(&self) -> bool {
        self.severity == ConflictSeverity::Impossible
    }
}

// ==========================================
// ConflictSummary - 冲突计数汇总
// ==========================================
// 用途: 展示层决定"无冲突"还是告警横幅
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub impossible_count: usize,
    pub warning_count: usize,
}

impl ConflictSummary {
    pub fn from_conflicts(conflicts: &[Conflict]) -> Self {
        conflicts.iter().fold(Self::default(), |mut acc, c| {
            match c.severity {
                ConflictSeverity::Impossible => acc.impossible_count += 1,
                ConflictSeverity::Warning => acc.warning_count += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.impossible_count + self.warning_count
    }

    pub fn is_clear(&self) -> bool {
        self.total() == 0
    }
}
