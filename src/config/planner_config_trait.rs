// ==========================================
// 电影节排片助手 - 配置读取 Trait
// ==========================================
// 职责: 定义导入/日程模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::FixedOffset;

// ==========================================
// PlannerConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait PlannerConfigReader: Send + Sync {
    /// 电影节所在地 UTC 偏移
    ///
    /// 用于给目录中不带偏移的本地时间补齐时区
    ///
    /// # 默认值
    /// - +00:00
    async fn get_festival_utc_offset(&self) -> RepositoryResult<FixedOffset>;

    /// 已选场次数量上限
    ///
    /// # 默认值
    /// - 100
    async fn get_selection_limit(&self) -> RepositoryResult<usize>;

    /// 电影节显示名
    ///
    /// # 默认值
    /// - 空字符串
    async fn get_festival_name(&self) -> RepositoryResult<String>;
}
