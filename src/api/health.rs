use axum::response::IntoResponse;
use serde_json::json;

use super::error::{ApiError, ApiResult};
use super::response::success;

/// 服务信息
pub async fn index() -> impl IntoResponse {
    success(json!({
        "message": "Anime filter backend",
        "documentation": "/api/v1/filter/options",
        "health": "/ping",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 健康检查端点
pub async fn ping() -> impl IntoResponse {
    axum::Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// 未匹配的路由
pub async fn not_found() -> ApiResult<()> {
    Err(ApiError::NotFound("Route not found".to_string()))
}
