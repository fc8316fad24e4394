use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
};

use super::error::{ApiError, ApiResult};
use super::response::success;
use super::AppState;
use crate::models::ScheduleRequest;

/// 按日期分组的播出排期
pub async fn get_schedules(
    State(state): State<AppState>,
    params: Result<Query<ScheduleRequest>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(request) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let days = state.schedule_service.schedules(&request).await?;

    Ok(success(days))
}
