use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::external::{DetailPageExtractor, UpstreamFetcher};
use crate::models::{normalize_person_id, Endpoint, ValidationError, DEFAULT_PERSON_KIND};

/// 人物查询错误
#[derive(Debug, Error)]
pub enum PersonError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 上游信封 success=false
    #[error("make sure given endpoint is correct")]
    Upstream,

    #[error("no character or actor found for '{0}'")]
    NotFound(String),

    #[error("upstream fetch failed: {0}")]
    Fetch(anyhow::Error),

    #[error("failed to extract detail page: {0}")]
    Extract(anyhow::Error),
}

/// 人物 / 角色详情服务
pub struct PersonService {
    fetcher: Arc<dyn UpstreamFetcher>,
    extractor: Arc<dyn DetailPageExtractor>,
}

impl PersonService {
    pub fn new(fetcher: Arc<dyn UpstreamFetcher>, extractor: Arc<dyn DetailPageExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    /// `id` 可以是 `people/123`、`character:abc` 或裸 id
    pub async fn detail(&self, id: &str) -> Result<Vec<Value>, PersonError> {
        if id.trim().is_empty() {
            return Err(ValidationError::MissingId.into());
        }

        let endpoint = Endpoint::Person(normalize_person_id(id, DEFAULT_PERSON_KIND));
        info!("Fetching: {}", endpoint.path());

        let envelope = self
            .fetcher
            .fetch(endpoint, "")
            .await
            .map_err(PersonError::Fetch)?;

        if !envelope.success {
            debug!(
                "{}",
                envelope.message.as_deref().unwrap_or("no message from source")
            );
            return Err(PersonError::Upstream);
        }

        let items = self
            .extractor
            .extract_detail(envelope.data)
            .map_err(PersonError::Extract)?;

        if items.is_empty() {
            return Err(PersonError::NotFound(id.to_string()));
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{PassthroughExtractor, UpstreamEnvelope};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingFetcher {
        calls: Mutex<Vec<Endpoint>>,
        reply: UpstreamEnvelope,
    }

    impl RecordingFetcher {
        fn new(reply: UpstreamEnvelope) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn calls(&self) -> Vec<Endpoint> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UpstreamFetcher for RecordingFetcher {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            query: &str,
        ) -> anyhow::Result<UpstreamEnvelope> {
            assert!(query.is_empty());
            self.calls.lock().unwrap().push(endpoint);
            Ok(self.reply.clone())
        }
    }

    fn service(fetcher: Arc<dyn UpstreamFetcher>) -> PersonService {
        PersonService::new(fetcher, Arc::new(PassthroughExtractor))
    }

    #[tokio::test]
    async fn test_bare_id_is_fetched_as_people() {
        let fetcher =
            RecordingFetcher::new(UpstreamEnvelope::ok(json!("<div>Kana Hanazawa</div>")));
        let items = service(fetcher.clone()).detail("kana-hanazawa-1").await.unwrap();

        assert_eq!(items, vec![json!("<div>Kana Hanazawa</div>")]);
        assert_eq!(
            fetcher.calls(),
            vec![Endpoint::Person("people:kana-hanazawa-1".to_string())]
        );
        assert_eq!(fetcher.calls()[0].path(), "/people/kana-hanazawa-1");
    }

    #[tokio::test]
    async fn test_character_prefix_is_kept() {
        let fetcher = RecordingFetcher::new(UpstreamEnvelope::ok(json!("<div/>")));
        service(fetcher.clone()).detail("character/naruto-uzumaki-2").await.unwrap();

        assert_eq!(fetcher.calls()[0].path(), "/character/naruto-uzumaki-2");
    }

    #[tokio::test]
    async fn test_blank_id_is_rejected_before_fetch() {
        let fetcher = RecordingFetcher::new(UpstreamEnvelope::ok(json!("<div/>")));
        let err = service(fetcher.clone()).detail("  ").await.unwrap_err();

        assert!(matches!(err, PersonError::Validation(ValidationError::MissingId)));
        assert_eq!(err.to_string(), "id is required");
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let fetcher =
            RecordingFetcher::new(UpstreamEnvelope::failure("upstream responded with 404"));
        let err = service(fetcher).detail("42").await.unwrap_err();

        assert!(matches!(err, PersonError::Upstream));
        assert_eq!(err.to_string(), "make sure given endpoint is correct");
    }

    #[tokio::test]
    async fn test_empty_detail_is_not_found() {
        let fetcher = RecordingFetcher::new(UpstreamEnvelope::ok(json!("   ")));
        let err = service(fetcher).detail("people/9").await.unwrap_err();

        assert!(matches!(err, PersonError::NotFound(ref id) if id == "people/9"));
    }
}
