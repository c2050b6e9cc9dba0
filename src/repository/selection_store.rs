// ==========================================
// 电影节排片助手 - 已选集合存储接口
// ==========================================
// 红线: 已选集合由存储独占; 引擎只接收快照
// 约束: 单次 add/remove 为单写者操作
// ==========================================

use crate::domain::selection::Selection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::Mutex;

// ==========================================
// Trait: SelectionStore
// ==========================================
pub trait SelectionStore: Send + Sync {
    /// 读取当前全部已选场次（按加入顺序）
    fn list(&self) -> RepositoryResult<Vec<Selection>>;

    /// 加入场次; 已存在同 id 时返回 UniqueConstraintViolation
    fn add(&self, selection: &Selection) -> RepositoryResult<()>;

    /// 移除场次; 返回是否确有记录被移除
    fn remove(&self, screening_id: &str) -> RepositoryResult<bool>;

    /// 是否已选
    fn contains(&self, screening_id: &str) -> RepositoryResult<bool> {
        Ok(self
            .list()?
            .iter()
            .any(|s| s.screening_id == screening_id))
    }
}

// ==========================================
// MemorySelectionStore - 进程内存储
// ==========================================
// 用途: 预览/测试,不落盘
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    selections: Mutex<Vec<Selection>>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有快照初始化
    pub fn with_selections(selections: Vec<Selection>) -> Self {
        Self {
            selections: Mutex::new(selections),
        }
    }

    fn guard(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Vec<Selection>>> {
        self.selections
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl SelectionStore for MemorySelectionStore {
    fn list(&self) -> RepositoryResult<Vec<Selection>> {
        Ok(self.guard()?.clone())
    }

    fn add(&self, selection: &Selection) -> RepositoryResult<()> {
        let mut selections = self.guard()?;
        if selections
            .iter()
            .any(|s| s.screening_id == selection.screening_id)
        {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "selection.screening_id={}",
                selection.screening_id
            )));
        }
        selections.push(selection.clone());
        Ok(())
    }

    fn remove(&self, screening_id: &str) -> RepositoryResult<bool> {
        let mut selections = self.guard()?;
        let before = selections.len();
        selections.retain(|s| s.screening_id != screening_id);
        Ok(selections.len() != before)
    }
}
