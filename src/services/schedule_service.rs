use anyhow::anyhow;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::external::{ScheduleExtractor, UpstreamFetcher};
use crate::models::{Endpoint, ScheduleRequest, ValidationError};

/// 日期 → 当天节目
pub type ScheduleDays = BTreeMap<String, Vec<Value>>;

/// 排期服务：按天并发抓取，单日失败时该日返回空列表
pub struct ScheduleService {
    fetcher: Arc<dyn UpstreamFetcher>,
    extractor: Arc<dyn ScheduleExtractor>,
}

impl ScheduleService {
    pub fn new(fetcher: Arc<dyn UpstreamFetcher>, extractor: Arc<dyn ScheduleExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    pub async fn schedules(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleDays, ValidationError> {
        self.schedules_from(request, Local::now().date_naive()).await
    }

    /// `today` 为未指定 date 时的起始日期
    pub async fn schedules_from(
        &self,
        request: &ScheduleRequest,
        today: NaiveDate,
    ) -> Result<ScheduleDays, ValidationError> {
        let plan = request.plan(today)?;

        let handles: Vec<_> = plan
            .dates
            .iter()
            .map(|date| {
                let fetcher = Arc::clone(&self.fetcher);
                let extractor = Arc::clone(&self.extractor);
                let query = plan.query_for(date).to_query_string();
                let task = tokio::spawn(async move {
                    fetch_day(fetcher.as_ref(), extractor.as_ref(), &query).await
                });
                (date.clone(), task)
            })
            .collect();

        let mut days = ScheduleDays::new();
        for (date, task) in handles {
            let shows = match task.await {
                Ok(Ok(shows)) => shows,
                Ok(Err(e)) => {
                    warn!("Failed to fetch schedule for {}: {}", date, e);
                    Vec::new()
                }
                Err(e) => {
                    warn!("Schedule task for {} aborted: {}", date, e);
                    Vec::new()
                }
            };
            days.insert(date, shows);
        }

        Ok(days)
    }
}

async fn fetch_day(
    fetcher: &dyn UpstreamFetcher,
    extractor: &dyn ScheduleExtractor,
    query: &str,
) -> anyhow::Result<Vec<Value>> {
    info!("Fetching: {}?{}", Endpoint::Schedule.path(), query);

    let envelope = fetcher.fetch(Endpoint::Schedule, query).await?;
    if !envelope.success {
        return Err(anyhow!(envelope
            .message
            .unwrap_or_else(|| "upstream reported failure".to_string())));
    }

    let html = schedule_html(&envelope.data)
        .ok_or_else(|| anyhow!("schedule payload has no html"))?;
    extractor.extract_schedule(&html)
}

/// 取出 `{ "html": ... }` 中的片段，兼容未按 JSON 解析的响应体
fn schedule_html(data: &Value) -> Option<String> {
    let parsed;
    let payload = match data {
        Value::String(body) => {
            parsed = serde_json::from_str::<Value>(body).ok()?;
            &parsed
        }
        other => other,
    };

    payload.get("html")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{PassthroughExtractor, UpstreamEnvelope};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// 按日期返回预设结果，记录收到的查询
    struct DailyFetcher {
        calls: Mutex<Vec<String>>,
        failing_date: Option<&'static str>,
    }

    impl DailyFetcher {
        fn new(failing_date: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                failing_date,
            })
        }

        fn sorted_calls(&self) -> Vec<String> {
            let mut calls = self.calls.lock().unwrap().clone();
            calls.sort();
            calls
        }
    }

    #[async_trait]
    impl UpstreamFetcher for DailyFetcher {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            query: &str,
        ) -> anyhow::Result<UpstreamEnvelope> {
            assert_eq!(endpoint, Endpoint::Schedule);
            self.calls.lock().unwrap().push(query.to_string());

            if let Some(date) = self.failing_date {
                if query.ends_with(date) {
                    return Err(anyhow!("timeout"));
                }
            }
            let day = query.rsplit('=').next().unwrap_or_default();
            Ok(UpstreamEnvelope::ok(json!({ "html": format!("<li>{}</li>", day) })))
        }
    }

    fn service(fetcher: Arc<dyn UpstreamFetcher>) -> ScheduleService {
        ScheduleService::new(fetcher, Arc::new(PassthroughExtractor))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 29).unwrap()
    }

    #[tokio::test]
    async fn test_week_is_fetched_per_day() {
        let fetcher = DailyFetcher::new(None);
        let days = service(fetcher.clone())
            .schedules_from(&ScheduleRequest::default(), today())
            .await
            .unwrap();

        let dates: Vec<&str> = days.keys().map(String::as_str).collect();
        assert_eq!(
            dates,
            vec![
                "2024-12-29", "2024-12-30", "2024-12-31", "2025-01-01", "2025-01-02",
                "2025-01-03", "2025-01-04"
            ]
        );
        assert_eq!(days["2025-01-01"], vec![json!("<li>2025-01-01</li>")]);
        assert_eq!(fetcher.sorted_calls().len(), 7);
        assert_eq!(fetcher.sorted_calls()[0], "tzOffset=-360&date=2024-12-29");
    }

    #[tokio::test]
    async fn test_failed_day_yields_empty_shows() {
        let fetcher = DailyFetcher::new(Some("2024-12-31"));
        let days = service(fetcher)
            .schedules_from(&ScheduleRequest::default(), today())
            .await
            .unwrap();

        assert_eq!(days.len(), 7);
        assert!(days["2024-12-31"].is_empty());
        assert_eq!(days["2024-12-30"].len(), 1);
    }

    #[tokio::test]
    async fn test_single_day_with_offset() {
        let fetcher = DailyFetcher::new(None);
        let request = ScheduleRequest {
            date: Some("2024-05-01".to_string()),
            tz_offset: Some("330".to_string()),
        };
        let days = service(fetcher.clone())
            .schedules_from(&request, today())
            .await
            .unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(fetcher.sorted_calls(), vec!["tzOffset=330&date=2024-05-01"]);
    }

    #[tokio::test]
    async fn test_invalid_offset_skips_fetch() {
        let fetcher = DailyFetcher::new(None);
        let request = ScheduleRequest {
            tz_offset: Some("east".to_string()),
            ..Default::default()
        };
        let err = service(fetcher.clone())
            .schedules_from(&request, today())
            .await
            .unwrap_err();

        assert!(matches!(err, ValidationError::InvalidTzOffset(_)));
        assert!(fetcher.sorted_calls().is_empty());
    }

    #[test]
    fn test_schedule_html_accepts_raw_body() {
        assert_eq!(
            schedule_html(&json!({ "html": "<li>a</li>" })).as_deref(),
            Some("<li>a</li>")
        );
        assert_eq!(
            schedule_html(&json!("{\"html\":\"<li>b</li>\"}")).as_deref(),
            Some("<li>b</li>")
        );
        assert!(schedule_html(&json!("<html></html>")).is_none());
    }
}
