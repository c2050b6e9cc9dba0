// ==========================================
// 电影节排片助手 - 时间区间模型
// ==========================================
// 职责: (开映时刻, 片长) → 半开区间 [start, end), 提供重叠运算
// 约束: 全部以毫秒时间戳相减再除以 60000 得到分钟,不做取整
// ==========================================

use crate::domain::screening::Schedulable;

/// 每分钟毫秒数
pub const MILLIS_PER_MINUTE: i64 = 60_000;

// ==========================================
// TimeInterval - 半开时间区间
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeInterval {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// 由场次生成占用区间
    ///
    /// 片长不做校验: 0 或负数会得到退化区间; 超大片长饱和到 i64 边界
    pub fn from_slot<T: Schedulable + ?Sized>(slot: &T) -> Self {
        let start_ms = slot.start().timestamp_millis();
        let duration_ms = slot.duration_minutes().saturating_mul(MILLIS_PER_MINUTE);
        let end_ms = start_ms.saturating_add(duration_ms);
        Self { start_ms, end_ms }
    }

    /// 区间长度（分钟）
    pub fn length_minutes(&self) -> f64 {
        millis_to_minutes(self.end_ms.saturating_sub(self.start_ms))
    }

    /// 重叠分钟数: max(0, min(end) - max(start))
    ///
    /// 首尾相接（一场结束即另一场开始）记为 0
    pub fn overlap_minutes(&self, other: &TimeInterval) -> f64 {
        let overlap_ms = self
            .end_ms
            .min(other.end_ms)
            .saturating_sub(self.start_ms.max(other.start_ms));
        millis_to_minutes(overlap_ms.max(0))
    }

    pub fn has_overlap(&self, other: &TimeInterval) -> bool {
        self.overlap_minutes(other) > 0.0
    }

    /// 间隔分钟数: 较早一场的结束到较晚一场的开始之间的绝对距离
    ///
    /// 开映时刻相同时以先结束者为较早一场,保证结果与参数顺序无关
    pub fn gap_minutes(&self, other: &TimeInterval) -> f64 {
        let self_first = (self.start_ms, self.end_ms) <= (other.start_ms, other.end_ms);
        let (earlier, later) = if self_first { (self, other) } else { (other, self) };
        millis_to_minutes(later.start_ms.saturating_sub(earlier.end_ms).saturating_abs())
    }
}

/// 两个场次的重叠分钟数
pub fn overlap_minutes<A, B>(a: &A, b: &B) -> f64
where
    A: Schedulable + ?Sized,
    B: Schedulable + ?Sized,
{
    TimeInterval::from_slot(a).overlap_minutes(&TimeInterval::from_slot(b))
}

/// 两个场次是否真实重叠
pub fn has_overlap<A, B>(a: &A, b: &B) -> bool
where
    A: Schedulable + ?Sized,
    B: Schedulable + ?Sized,
{
    overlap_minutes(a, b) > 0.0
}

fn millis_to_minutes(ms: i64) -> f64 {
    ms as f64 / MILLIS_PER_MINUTE as f64
}
