// ==========================================
// 电影节排片助手 - 冲突检测引擎
// ==========================================
// 职责: 两两比较已选场次,判定 IMPOSSIBLE / WARNING / 无冲突
// 输入: 已选场次快照（任意顺序）
// 输出: 冲突列表（不去重、不合并,按输入顺序 i < j 产生）
// 红线: 纯计算,无 I/O,不会失败
// ==========================================

use crate::domain::conflict::Conflict;
use crate::domain::screening::Schedulable;
use crate::engine::interval::TimeInterval;
use tracing::instrument;

/// 跨场馆转场缓冲（分钟）; 间隔严格小于该值即告警
pub const TRAVEL_BUFFER_MINUTES: f64 = 30.0;

// ==========================================
// ConflictDetector - 冲突检测引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ConflictDetector {
    // 无状态引擎,不需要注入依赖
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 全量两两冲突分析
    ///
    /// 对每一对 (i, j), i < j:
    /// 1) 重叠 > 0 → IMPOSSIBLE, 记录重叠分钟数
    /// 2) 不同场馆 且 间隔 < 30 分钟 → WARNING
    /// 3) 其余情况无冲突
    ///
    /// 复杂度 O(N²); N 为个人日程规模
    #[instrument(skip(self, selections), fields(count = selections.len()))]
    pub fn detect_conflicts<T: Schedulable>(&self, selections: &[T]) -> Vec<Conflict> {
        let intervals: Vec<TimeInterval> =
            selections.iter().map(TimeInterval::from_slot).collect();

        let mut conflicts = Vec::new();
        for i in 0..selections.len() {
            for j in (i + 1)..selections.len() {
                if let Some(conflict) = self.classify(
                    &selections[i],
                    &intervals[i],
                    &selections[j],
                    &intervals[j],
                ) {
                    conflicts.push(conflict);
                }
            }
        }

        tracing::debug!(conflicts = conflicts.len(), "冲突检测完成");
        conflicts
    }

    /// 预判候选场次加入后会引入的冲突
    ///
    /// 候选场次视作追加在已选集合末尾的成员,与每个已选场次按相同规则比较;
    /// 只返回涉及候选场次的冲突, 不修改 `existing`。
    /// 已选集合中与候选同 id 的记录（已选过）不与候选比较。
    #[instrument(skip(self, existing, candidate), fields(count = existing.len(), candidate = candidate.screening_id()))]
    pub fn would_conflict<T, C>(&self, existing: &[T], candidate: &C) -> Vec<Conflict>
    where
        T: Schedulable,
        C: Schedulable,
    {
        let candidate_interval = TimeInterval::from_slot(candidate);

        let conflicts: Vec<Conflict> = existing
            .iter()
            .filter(|member| member.screening_id() != candidate.screening_id())
            .filter_map(|member| {
                self.classify(
                    member,
                    &TimeInterval::from_slot(member),
                    candidate,
                    &candidate_interval,
                )
            })
            .collect();

        tracing::debug!(conflicts = conflicts.len(), "候选场次冲突预判完成");
        conflicts
    }

    /// 判定单对场次
    ///
    /// # 返回
    /// - Some(Conflict): a 为先出现者
    /// - None: 无冲突
    pub fn evaluate_pair<A, B>(&self, a: &A, b: &B) -> Option<Conflict>
    where
        A: Schedulable + ?Sized,
        B: Schedulable + ?Sized,
    {
        self.classify(a, &TimeInterval::from_slot(a), b, &TimeInterval::from_slot(b))
    }

    /// 从冲突列表中筛出涉及指定场次的冲突
    pub fn conflicts_for(&self, screening_id: &str, conflicts: &[Conflict]) -> Vec<Conflict> {
        conflicts
            .iter()
            .filter(|c| c.involves(screening_id))
            .cloned()
            .collect()
    }

    // ==========================================
    // 判定规则
    // ==========================================

    fn classify<A, B>(
        &self,
        a: &A,
        a_interval: &TimeInterval,
        b: &B,
        b_interval: &TimeInterval,
    ) -> Option<Conflict>
    where
        A: Schedulable + ?Sized,
        B: Schedulable + ?Sized,
    {
        // 1. 真实重叠: 终止判定
        let overlap = a_interval.overlap_minutes(b_interval);
        if overlap > 0.0 {
            return Some(Conflict::impossible(a.screening_id(), b.screening_id(), overlap));
        }

        // 2. 同场馆不考虑转场
        if is_same_venue(a.venue_id(), b.venue_id()) {
            return None;
        }

        // 3. 跨场馆转场时间
        if a_interval.gap_minutes(b_interval) < TRAVEL_BUFFER_MINUTES {
            return Some(Conflict::warning(a.screening_id(), b.screening_id()));
        }

        None
    }
}

/// 同场馆判定: 标识精确相等; 空标识（未解析）不与任何场馆相同
pub fn is_same_venue(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

#[cfg(test)]
mod tests;
