use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Endpoint;

/// 上游响应信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UpstreamEnvelope {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: serde_json::Value::Null,
            message: Some(message.into()),
        }
    }
}

/// 上游抓取
#[async_trait]
pub trait UpstreamFetcher: Send + Sync {
    /// `query` 为已编码的查询串
    async fn fetch(&self, endpoint: Endpoint, query: &str) -> Result<UpstreamEnvelope>;
}

/// 基于 reqwest 的上游客户端
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, endpoint: &Endpoint, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, endpoint.path())
        } else {
            format!("{}{}?{}", self.base_url, endpoint.path(), query)
        }
    }
}

#[async_trait]
impl UpstreamFetcher for UpstreamClient {
    async fn fetch(&self, endpoint: Endpoint, query: &str) -> Result<UpstreamEnvelope> {
        let url = self.build_url(&endpoint, query);

        let response = self
            .client
            .get(&url)
            .header(header::REFERER, format!("{}/home", self.base_url))
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Upstream {} returned {}", url, status);
            return Ok(UpstreamEnvelope::failure(format!("upstream responded with {}", status)));
        }

        // ajax 接口返回 JSON，页面返回 HTML
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        let data = if is_json {
            response.json::<serde_json::Value>().await?
        } else {
            serde_json::Value::String(response.text().await?)
        };

        Ok(UpstreamEnvelope::ok(data))
    }
}
