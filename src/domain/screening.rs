// ==========================================
// 电影节排片助手 - 场次领域模型
// ==========================================
// 职责: 场次目录实体 + 引擎最小输入契约
// ==========================================

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ==========================================
// Trait: Schedulable
// ==========================================
// 用途: 冲突检测/行程分组引擎的输入契约
// 约束: 引擎只读取这四个字段,展示字段一律不看
pub trait Schedulable {
    /// 场次唯一标识
    fn screening_id(&self) -> &str;

    /// 开映时刻（带时区偏移,保证时刻无歧义）
    fn start(&self) -> DateTime<FixedOffset>;

    /// 片长（分钟）
    fn duration_minutes(&self) -> i64;

    /// 场馆标识（空字符串表示尚未解析）
    fn venue_id(&self) -> &str;
}

// ==========================================
// ScreeningSlot - 裸场次时段
// ==========================================
// 用途: 临时候选场次、测试数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSlot {
    pub screening_id: String,
    pub start: DateTime<FixedOffset>,
    pub duration_minutes: i64,
    pub venue_id: String,
}

impl ScreeningSlot {
    pub fn new(
        screening_id: impl Into<String>,
        start: DateTime<FixedOffset>,
        duration_minutes: i64,
        venue_id: impl Into<String>,
    ) -> Self {
        Self {
            screening_id: screening_id.into(),
            start,
            duration_minutes,
            venue_id: venue_id.into(),
        }
    }
}

impl Schedulable for ScreeningSlot {
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

// ==========================================
// Screening - 场次目录条目
// ==========================================
// 对齐: screening 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screening {
    // ===== 主键 =====
    pub screening_id: String,

    // ===== 时间与地点 =====
    pub start: DateTime<FixedOffset>, // 开映时刻
    pub duration_minutes: i64,        // 片长（分钟）
    pub venue_id: String,             // 场馆标识（可能为空: 未解析）
    pub venue_name: String,           // 场馆显示名

    // ===== 展示字段 =====
    pub film_title: String,
    pub poster_url: Option<String>,
    pub section: Option<String>, // 单元（主竞赛/全景等）
}

impl Screening {
    /// 转换为裸时段（丢弃展示字段）
    pub fn to_slot(&self) -> ScreeningSlot {
        ScreeningSlot::new(
            self.screening_id.clone(),
            self.start,
            self.duration_minutes,
            self.venue_id.clone(),
        )
    }
}

impl Schedulable for Screening {
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
