use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::external::{ListPageExtractor, UpstreamFetcher};
use crate::models::{FilterCatalogs, FilterRequest, ValidationError};
use super::query_builder::FilterQueryBuilder;

/// 筛选流程错误
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 上游信封 success=false
    #[error("something went wrong with queries{}", with_detail(.0))]
    Upstream(Option<String>),

    #[error("upstream fetch failed: {0}")]
    Fetch(anyhow::Error),

    #[error("failed to extract list page: {0}")]
    Extract(anyhow::Error),
}

fn with_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// 筛选服务：校验 → 构建规范查询 → 抓取 → 提取
pub struct FilterService {
    catalogs: &'static FilterCatalogs,
    fetcher: Arc<dyn UpstreamFetcher>,
    extractor: Arc<dyn ListPageExtractor>,
}

impl FilterService {
    pub fn new(
        catalogs: &'static FilterCatalogs,
        fetcher: Arc<dyn UpstreamFetcher>,
        extractor: Arc<dyn ListPageExtractor>,
    ) -> Self {
        Self {
            catalogs,
            fetcher,
            extractor,
        }
    }

    pub fn catalogs(&self) -> &FilterCatalogs {
        self.catalogs
    }

    pub async fn filter(&self, request: &FilterRequest) -> Result<Value, FilterError> {
        let upstream = FilterQueryBuilder::new(self.catalogs).build(request)?;
        let query = upstream.query.to_query_string();

        info!("Fetching: {}", upstream.url_path());

        let envelope = self
            .fetcher
            .fetch(upstream.endpoint, &query)
            .await
            .map_err(FilterError::Fetch)?;

        debug!(
            "{}",
            envelope.message.as_deref().unwrap_or("no message from source")
        );

        if !envelope.success {
            return Err(FilterError::Upstream(envelope.message));
        }

        self.extractor
            .extract(envelope.data)
            .map_err(FilterError::Extract)
    }
}
