// ==========================================
// 电影节排片助手 - 场次目录 API
// ==========================================
// 职责: 目录导入、场次查询
// ==========================================

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::PlannerConfigReader;
use crate::domain::screening::Screening;
use crate::importer::{CatalogueImporter, ImportReport};
use crate::repository::ScreeningRepository;

pub struct CatalogueApi {
    screening_repo: Arc<ScreeningRepository>,
    config: Arc<dyn PlannerConfigReader>,
    importer: CatalogueImporter,
}

impl CatalogueApi {
    pub fn new(
        screening_repo: Arc<ScreeningRepository>,
        config: Arc<dyn PlannerConfigReader>,
    ) -> Self {
        Self {
            screening_repo,
            config,
            importer: CatalogueImporter::new(),
        }
    }

    /// 导入 CSV 场次目录
    ///
    /// 不带偏移的本地时间按配置中的电影节 UTC 偏移解释;
    /// 单行校验失败只记入报告,不影响其它行
    pub async fn import_catalogue(&self, path: &str) -> ApiResult<ImportReport> {
        if path.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
        }

        let offset = self.config.get_festival_utc_offset().await?;
        let report = self
            .importer
            .import_csv(Path::new(path), offset, &self.screening_repo)?;

        info!(
            path,
            imported = report.imported,
            rejected = report.rejected.len(),
            "目录导入结束"
        );
        Ok(report)
    }

    /// 全部场次（按开映时刻升序）
    pub fn list_screenings(&self) -> ApiResult<Vec<Screening>> {
        Ok(self.screening_repo.list_all()?)
    }

    /// 指定日期的场次
    pub fn list_screenings_by_date(&self, date: NaiveDate) -> ApiResult<Vec<Screening>> {
        Ok(self.screening_repo.list_by_date(date)?)
    }

    pub fn get_screening(&self, screening_id: &str) -> ApiResult<Screening> {
        self.screening_repo
            .find_by_id(screening_id)?
            .ok_or_else(|| ApiError::NotFound(format!("场次(id={})不存在", screening_id)))
    }

    pub fn count_screenings(&self) -> ApiResult<i64> {
        Ok(self.screening_repo.count()?)
    }
}
