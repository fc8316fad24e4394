pub mod character;
pub mod error;
pub mod filter;
pub mod health;
pub mod response;
pub mod schedule;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, CorsOrigins};
use crate::services::{FilterService, PersonService, ScheduleService};

#[derive(Clone)]
pub struct AppState {
    pub filter_service: Arc<FilterService>,
    pub schedule_service: Arc<ScheduleService>,
    pub person_service: Arc<PersonService>,
}

impl AppState {
    pub fn new(
        filter_service: FilterService,
        schedule_service: ScheduleService,
        person_service: PersonService,
    ) -> Self {
        Self {
            filter_service: Arc::new(filter_service),
            schedule_service: Arc::new(schedule_service),
            person_service: Arc::new(person_service),
        }
    }
}

/// 组装全部路由
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let api = Router::new()
        .route("/filter", get(filter::filter_anime))
        .route("/filter/options", get(filter::get_filter_options))
        .route("/schedules", get(schedule::get_schedules))
        .route("/character/:id", get(character::get_character));

    let router = Router::new()
        .route("/", get(health::index))
        .route("/ping", get(health::ping))
        .nest("/api/v1", api)
        .fallback(health::not_found)
        .layer(cors_layer(&config.cors_origins))
        .with_state(state);

    if config.enable_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed))
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        }
    }
}
