// ==========================================
// 电影节排片助手 - 行程分组引擎
// ==========================================
// 职责: 已选场次 → 按日期分组、组内按时间排序、附带冲突
// 输入: 已选场次快照（任意顺序）
// 输出: 日期升序的 DateGroup 列表,可直接渲染
// 红线: 纯函数,同一输入重复调用结果一致
// ==========================================

use crate::domain::itinerary::{DateGroup, ItineraryEntry};
use crate::domain::screening::Schedulable;
use crate::engine::conflict_detector::ConflictDetector;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// ScheduleGrouper - 行程分组引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduleGrouper {
    detector: ConflictDetector,
}

impl ScheduleGrouper {
    pub fn new() -> Self {
        Self {
            detector: ConflictDetector::new(),
        }
    }

    /// 按开映时刻升序排序（稳定排序: 同时刻保持输入顺序）
    ///
    /// 导出层直接使用该顺序
    pub fn sort_by_start<T: Schedulable + Clone>(&self, selections: &[T]) -> Vec<T> {
        let mut sorted = selections.to_vec();
        sorted.sort_by_key(|s| s.start());
        sorted
    }

    /// 生成按日期分组、附带冲突的行程
    ///
    /// 步骤:
    /// 1) 按开映时刻稳定排序
    /// 2) 按开映地当地日期分桶,日期键升序输出
    /// 3) 每个日期组内独立做冲突检测（不跨日期比较）
    /// 4) 每个条目挂上其参与的冲突
    ///
    /// 跨午夜的场次按开映日期归组,不与次日场次比较
    #[instrument(skip(self, selections), fields(count = selections.len()))]
    pub fn group_by_date_with_conflicts<T: Schedulable + Clone>(
        &self,
        selections: &[T],
    ) -> Vec<DateGroup<T>> {
        let mut buckets: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
        for selection in self.sort_by_start(selections) {
            buckets
                .entry(date_key(&selection))
                .or_insert_with(Vec::new)
                .push(selection);
        }

        let groups: Vec<DateGroup<T>> = buckets
            .into_iter()
            .map(|(date, members)| self.build_group(date, members))
            .collect();

        tracing::debug!(groups = groups.len(), "行程分组完成");
        groups
    }

    fn build_group<T: Schedulable + Clone>(&self, date: NaiveDate, members: Vec<T>) -> DateGroup<T> {
        let conflicts = self.detector.detect_conflicts(&members);

        let entries = members
            .into_iter()
            .map(|selection| {
                let conflicts = self
                    .detector
                    .conflicts_for(selection.screening_id(), &conflicts);
                ItineraryEntry {
                    selection,
                    conflicts,
                }
            })
            .collect();

        DateGroup { date, entries }
    }
}

/// 日期键: 开映时刻在其自身时区偏移下的当地日期
pub fn date_key<T: Schedulable + ?Sized>(selection: &T) -> NaiveDate {
    selection.start().date_naive()
}
