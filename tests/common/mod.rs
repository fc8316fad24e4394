// 集成测试共用的假上游与请求辅助函数

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anime_filter_backend::{
    api::{build_router, AppState},
    config::AppConfig,
    external::{PassthroughExtractor, UpstreamEnvelope, UpstreamFetcher},
    models::{Endpoint, FILTER_CATALOGS},
    services::{FilterService, PersonService, ScheduleService},
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

type Responder = dyn Fn(&Endpoint, &str) -> anyhow::Result<UpstreamEnvelope> + Send + Sync;

/// 记录请求，并按端点和查询生成响应
pub struct FakeUpstream {
    calls: Mutex<Vec<(Endpoint, String)>>,
    respond: Box<Responder>,
}

impl FakeUpstream {
    pub fn new(reply: UpstreamEnvelope) -> Arc<Self> {
        Self::with(move |_, _| Ok(reply.clone()))
    }

    pub fn with<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&Endpoint, &str) -> anyhow::Result<UpstreamEnvelope> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    pub fn calls(&self) -> Vec<(Endpoint, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamFetcher for FakeUpstream {
    async fn fetch(&self, endpoint: Endpoint, query: &str) -> anyhow::Result<UpstreamEnvelope> {
        let reply = (self.respond)(&endpoint, query);
        self.calls.lock().unwrap().push((endpoint, query.to_string()));
        reply
    }
}

pub fn setup_app(upstream: Arc<FakeUpstream>) -> Router {
    let extractor = Arc::new(PassthroughExtractor);
    let state = AppState::new(
        FilterService::new(&FILTER_CATALOGS, upstream.clone(), extractor.clone()),
        ScheduleService::new(upstream.clone(), extractor.clone()),
        PersonService::new(upstream, extractor),
    );
    let config = AppConfig {
        enable_logging: false,
        ..AppConfig::default()
    };
    build_router(state, &config)
}

pub async fn send(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
