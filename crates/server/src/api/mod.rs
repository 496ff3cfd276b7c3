use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{TimetableQuery, TimetableRequest, TimetableResponse, TIMETABLE_ROUTE},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};
use tracing::warn;

use crate::app_state::AppState;

const MAX_REQUEST_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route(TIMETABLE_ROUTE, get(get_timetable).post(build_timetable))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_timetable(State(state): State<Arc<AppState>>) -> ApiResult<TimetableResponse> {
    state
        .timetable
        .last_built()
        .await
        .map(Json)
        .map_err(error_response)
}

async fn build_timetable(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimetableQuery>,
    Json(req): Json<TimetableRequest>,
) -> ApiResult<TimetableResponse> {
    state
        .timetable
        .build(query.sheet_id.as_deref(), req.sections)
        .await
        .map(Json)
        .map_err(error_response)
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = status_for(err.code);
    if status.is_server_error() {
        warn!(error = %err, "timetable request failed");
    }
    (status, Json(ApiError::from(err)))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
