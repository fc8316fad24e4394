use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use super::error::ApiResult;
use super::response::success;
use super::AppState;

/// 人物或角色详情
pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let detail = state.person_service.detail(&id).await?;
    Ok(success(detail))
}
