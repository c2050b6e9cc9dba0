// ==========================================
// 电影节排片助手 - 日程 API
// ==========================================
// 职责: 已选场次增删、冲突检测/预判、行程视图与导出
// 约束: 每次查询都从存储读取最新快照现算,不缓存任何冲突结果
// ==========================================

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::PlannerConfigReader;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::conflict::{Conflict, ConflictSummary};
use crate::domain::itinerary::DateGroup;
use crate::domain::screening::{Schedulable, Screening};
use crate::domain::selection::Selection;
use crate::engine::{ConflictDetector, ScheduleGrouper};
use crate::repository::error::RepositoryError;
use crate::repository::{ActionLogRepository, ScreeningRepository, SelectionStore};

// ==========================================
// 响应结构
// ==========================================

/// 加入日程的结果: 新记录 + 本次引入的冲突
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSelectionResponse {
    pub selection: Selection,
    pub introduced_conflicts: Vec<Conflict>,
    pub summary: ConflictSummary,
}

/// 候选场次冲突预判结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictPreview {
    pub screening_id: String,
    pub conflicts: Vec<Conflict>,
    pub summary: ConflictSummary,
}

/// 行程视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryView {
    pub festival_name: String,
    pub groups: Vec<DateGroup<Selection>>,
    pub summary: ConflictSummary,
}

/// 导出用的单日行程（不含冲突标注）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDay {
    pub date: NaiveDate,
    pub selections: Vec<Selection>,
}

// ==========================================
// ScheduleApi - 日程 API
// ==========================================
pub struct ScheduleApi {
    selection_store: Arc<dyn SelectionStore>,
    screening_repo: Arc<ScreeningRepository>,
    action_log_repo: Arc<ActionLogRepository>,
    config: Arc<dyn PlannerConfigReader>,
    detector: ConflictDetector,
    grouper: ScheduleGrouper,
}

impl ScheduleApi {
    pub fn new(
        selection_store: Arc<dyn SelectionStore>,
        screening_repo: Arc<ScreeningRepository>,
        action_log_repo: Arc<ActionLogRepository>,
        config: Arc<dyn PlannerConfigReader>,
    ) -> Self {
        Self {
            selection_store,
            screening_repo,
            action_log_repo,
            config,
            detector: ConflictDetector::new(),
            grouper: ScheduleGrouper::new(),
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 当前已选场次（按加入顺序）
    pub fn list_selections(&self) -> ApiResult<Vec<Selection>> {
        Ok(self.selection_store.list()?)
    }

    /// 全量冲突分析
    pub fn detect_conflicts(&self) -> ApiResult<Vec<Conflict>> {
        let snapshot = self.selection_store.list()?;
        Ok(self.detector.detect_conflicts(&snapshot))
    }

    /// 预判目录中某场次加入后会引入的冲突（不修改日程）
    pub fn preview_conflicts(&self, screening_id: &str) -> ApiResult<ConflictPreview> {
        let screening = self.load_screening(screening_id)?;
        self.preview_candidate(&screening)
    }

    /// 预判任意候选场次（场馆可未解析）
    pub fn preview_candidate<C: Schedulable>(&self, candidate: &C) -> ApiResult<ConflictPreview> {
        let snapshot = self.selection_store.list()?;
        let conflicts = self.detector.would_conflict(&snapshot, candidate);
        debug!(
            screening_id = candidate.screening_id(),
            conflicts = conflicts.len(),
            "冲突预判"
        );

        Ok(ConflictPreview {
            screening_id: candidate.screening_id().to_string(),
            summary: ConflictSummary::from_conflicts(&conflicts),
            conflicts,
        })
    }

    /// 按日期分组的行程视图
    pub async fn get_itinerary(&self) -> ApiResult<ItineraryView> {
        let snapshot = self.selection_store.list()?;
        let groups = self.grouper.group_by_date_with_conflicts(&snapshot);
        let all_conflicts: Vec<Conflict> = groups
            .iter()
            .flat_map(|g| self.detector.detect_conflicts(&selections_of(g)))
            .collect();

        Ok(ItineraryView {
            festival_name: self.config.get_festival_name().await?,
            summary: ConflictSummary::from_conflicts(&all_conflicts),
            groups,
        })
    }

    /// 导出行程（按日期分组、组内按时间排序,不含冲突标注）
    pub fn export_itinerary(&self) -> ApiResult<Vec<ExportDay>> {
        let snapshot = self.selection_store.list()?;
        Ok(self
            .grouper
            .group_by_date_with_conflicts(&snapshot)
            .iter()
            .map(|g| ExportDay {
                date: g.date,
                selections: selections_of(g),
            })
            .collect())
    }

    /// 导出行程为 JSON 文本
    pub fn export_itinerary_json(&self) -> ApiResult<String> {
        let days = self.export_itinerary()?;
        serde_json::to_string_pretty(&days).map_err(|e| ApiError::InternalError(e.to_string()))
    }

    /// 最近的日程操作记录
    pub fn list_recent_actions(&self, limit: usize) -> ApiResult<Vec<ActionLog>> {
        Ok(self.action_log_repo.list_recent(limit)?)
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 加入日程
    ///
    /// 校验:
    /// 1. 场次存在于目录
    /// 2. 片长为正
    /// 3. 尚未加入
    /// 4. 未超过已选上限
    ///
    /// 片长非正属于目录数据问题,返回 BusinessRuleViolation
    ///
    /// 冲突不阻止加入,只随响应返回
    pub async fn add_selection(&self, screening_id: &str) -> ApiResult<AddSelectionResponse> {
        let screening = self.load_screening(screening_id)?;
        if screening.duration_minutes <= 0 {
            return Err(ApiError::BusinessRuleViolation(format!(
                "场次{}片长无效: {}",
                screening.screening_id, screening.duration_minutes
            )));
        }

        // 先读上限再取快照,缩短检查到写入之间的窗口
        let limit = self.config.get_selection_limit().await?;

        let snapshot = self.selection_store.list()?;
        if snapshot.iter().any(|s| s.screening_id == screening.screening_id) {
            return Err(ApiError::AlreadySelected(screening.screening_id));
        }
        if snapshot.len() >= limit {
            return Err(ApiError::SelectionLimitReached { limit });
        }

        let introduced_conflicts = self.detector.would_conflict(&snapshot, &screening);
        let summary = ConflictSummary::from_conflicts(&introduced_conflicts);

        let selection = Selection::from_screening(&screening, Utc::now());
        self.selection_store
            .add(&selection)
            .map_err(|e| match e {
                RepositoryError::UniqueConstraintViolation(_) => {
                    ApiError::AlreadySelected(selection.screening_id.clone())
                }
                other => other.into(),
            })?;

        self.record_action(ActionType::AddSelection, &selection.screening_id, &introduced_conflicts);
        info!(
            screening_id = %selection.screening_id,
            impossible = summary.impossible_count,
            warning = summary.warning_count,
            "场次已加入日程"
        );

        Ok(AddSelectionResponse {
            selection,
            introduced_conflicts,
            summary,
        })
    }

    /// 移出日程
    pub fn remove_selection(&self, screening_id: &str) -> ApiResult<()> {
        let screening_id = validate_id(screening_id)?;
        if !self.selection_store.remove(screening_id)? {
            return Err(ApiError::NotFound(format!("已选场次(id={})不存在", screening_id)));
        }

        self.record_action(ActionType::RemoveSelection, screening_id, &[]);
        info!(screening_id, "场次已移出日程");
        Ok(())
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn load_screening(&self, screening_id: &str) -> ApiResult<Screening> {
        let screening_id = validate_id(screening_id)?;
        self.screening_repo
            .find_by_id(screening_id)?
            .ok_or_else(|| ApiError::NotFound(format!("场次(id={})不存在", screening_id)))
    }

    /// 记录操作日志; 写日志失败不回滚已完成的增删
    fn record_action(&self, action_type: ActionType, screening_id: &str, conflicts: &[Conflict]) {
        let summary = ConflictSummary::from_conflicts(conflicts);
        let conflicting_ids: Vec<&str> = conflicts
            .iter()
            .filter_map(|c| c.other(screening_id))
            .collect();

        let log = ActionLog {
            action_id: Uuid::new_v4().to_string(),
            action_type: action_type.to_string(),
            action_ts: Utc::now().naive_utc(),
            screening_id: screening_id.to_string(),
            payload_json: Some(json!({
                "impossible_count": summary.impossible_count,
                "warning_count": summary.warning_count,
                "conflicting_ids": conflicting_ids,
            })),
        };

        if let Err(e) = self.action_log_repo.insert(&log) {
            warn!(screening_id, error = %e, "操作日志写入失败");
        }
    }
}

fn validate_id(screening_id: &str) -> ApiResult<&str> {
    let trimmed = screening_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput("场次ID不能为空".to_string()));
    }
    Ok(trimmed)
}

fn selections_of(group: &DateGroup<Selection>) -> Vec<Selection> {
    group.entries.iter().map(|e| e.selection.clone()).collect()
}
