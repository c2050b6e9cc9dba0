// ==========================================
// 电影节排片助手 - 已选场次领域模型
// ==========================================
// 红线: 已选集合只归 SelectionStore 所有,引擎只读快照
// ==========================================

use crate::domain::screening::{Schedulable, Screening};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Selection - 用户已选场次
// ==========================================
// 对齐: selection 表
// 说明: 展示字段为冗余拷贝,原样透传
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    // ===== 引擎字段 =====
    pub screening_id: String,
    pub start: DateTime<FixedOffset>,
    pub duration_minutes: i64,
    pub venue_id: String,

    // ===== 冗余展示字段 =====
    pub film_title: String,
    pub venue_name: String,
    pub poster_url: Option<String>,

    // ===== 审计 =====
    pub added_at: DateTime<Utc>,
}

impl Selection {
    /// 由目录场次生成已选记录
    pub fn from_screening(screening: &Screening, added_at: DateTime<Utc>) -> Self {
        Self {
            screening_id: screening.screening_id.clone(),
            start: screening.start,
            duration_minutes: screening.duration_minutes,
            venue_id: screening.venue_id.clone(),
            film_title: screening.film_title.clone(),
            venue_name: screening.venue_name.clone(),
            poster_url: screening.poster_url.clone(),
            added_at,
        }
    }
}

impl Schedulable for Selection {
    fn screening_id(&self) -> &str {
        &self.screening_id
    }

    fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    fn venue_id(&self) -> &str {
        &self.venue_id
    }
}
