use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
};

use super::error::{ApiError, ApiResult};
use super::response::success;
use super::AppState;
use crate::models::FilterRequest;

/// 按筛选条件（或关键字）查询上游列表页
pub async fn filter_anime(
    State(state): State<AppState>,
    params: Result<Query<FilterRequest>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(request) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let page = state.filter_service.filter(&request).await?;

    Ok(success(page))
}

/// 可用的筛选选项
pub async fn get_filter_options(State(state): State<AppState>) -> impl IntoResponse {
    success(state.filter_service.catalogs().present())
}
