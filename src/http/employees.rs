//! Employee route handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Instant;

use crate::employee::{EmployeeInput, ServiceError, ServiceResult};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Liveness payload for `/health`.
#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

pub async fn list_employees(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let result = state.service.list_all().await;
    respond(&state, &headers, "list_all", start, result)
}

pub async fn search_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
    fragment: Result<Path<String>, PathRejection>,
) -> Response {
    let start = Instant::now();
    let result = match fragment {
        Ok(Path(fragment)) => state.service.search_by_name(&fragment).await,
        Err(e) => Err(ServiceError::InvalidInput(e.body_text())),
    };
    respond(&state, &headers, "search_by_name", start, result)
}

pub async fn get_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let start = Instant::now();
    let result = match path_id(id) {
        Ok(id) => state.service.get_by_id(&id).await,
        Err(e) => Err(e),
    };
    respond(&state, &headers, "get_by_id", start, result)
}

pub async fn highest_salary(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let result = state.service.highest_salary().await;
    respond(&state, &headers, "highest_salary", start, result)
}

pub async fn top_ten_earners(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let result = state.service.top_ten_by_earning().await;
    respond(&state, &headers, "top_ten_by_earning", start, result)
}

pub async fn create_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let result = match checked_input(&state, payload) {
        Ok(input) => state.service.create(&input).await,
        Err(e) => Err(e),
    };
    respond(&state, &headers, "create", start, result)
}

pub async fn delete_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let start = Instant::now();
    let result = match path_id(id) {
        Ok(id) => state.service.delete_by_id(&id).await,
        Err(e) => Err(e),
    };
    respond_with(&state, &headers, "delete_by_id", start, result, |name| {
        (StatusCode::OK, name).into_response()
    })
}

/// An identifier segment that failed to decode is a malformed identifier.
fn path_id(id: Result<Path<String>, PathRejection>) -> ServiceResult<String> {
    id.map(|Path(id)| id)
        .map_err(|e| ServiceError::InvalidId(e.body_text()))
}

/// Unwrap the create payload, validating it when strict validation is on.
fn checked_input(
    state: &AppState,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> ServiceResult<EmployeeInput> {
    let Json(input) = payload.map_err(|e| ServiceError::InvalidInput(e.body_text()))?;
    if state.api.strict_validation {
        input
            .validate()
            .map_err(|problems| ServiceError::InvalidInput(problems.join("; ")))?;
    }
    Ok(input)
}

fn respond<T: Serialize>(
    state: &AppState,
    headers: &HeaderMap,
    operation: &'static str,
    start: Instant,
    result: ServiceResult<T>,
) -> Response {
    respond_with(state, headers, operation, start, result, |body| {
        (StatusCode::OK, Json(body)).into_response()
    })
}

fn respond_with<T>(
    state: &AppState,
    headers: &HeaderMap,
    operation: &'static str,
    start: Instant,
    result: ServiceResult<T>,
    render: impl FnOnce(T) -> Response,
) -> Response {
    let response = match result {
        Ok(body) => render(body),
        Err(error) => {
            tracing::warn!(
                request_id = %request_id(headers),
                operation,
                kind = error.kind(),
                error = %error,
                "Operation produced no result"
            );
            ApiError::new(error, state.api.distinct_error_status).into_response()
        }
    };
    metrics::record_request(operation, response.status().as_u16(), start);
    response
}
