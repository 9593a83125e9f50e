//! HTTP request handlers for the attendance and payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{PayrollRunRequest, RevertRequest, StaffMonthRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;
use crate::error::EngineResult;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/summary", post(attendance_summary_handler))
        .route("/bonus/evaluate", post(bonus_evaluate_handler))
        .route("/payroll/preview", post(payroll_preview_handler))
        .route("/payroll/finalize", post(payroll_finalize_handler))
        .route("/payroll/revert", post(payroll_revert_handler))
        .route("/advance/eligibility", post(advance_eligibility_handler))
        .route("/pay/estimate", post(pay_estimate_handler))
        .with_state(state)
}

/// Unwraps an extracted JSON body, turning rejections into 400 responses.
fn parse_json<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response())
        }
    }
}

/// Turns an engine result into a JSON response with the standard error
/// mapping, logging the outcome under the correlation id.
fn respond<T: Serialize>(
    result: EngineResult<T>,
    correlation_id: Uuid,
    operation: &str,
    started: Instant,
) -> Response {
    match result {
        Ok(value) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = started.elapsed().as_micros(),
                "Request completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(value),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for POST /attendance/summary.
async fn attendance_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<StaffMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        staff_id = %request.staff_id,
        year = request.year,
        month = request.month,
        "Processing attendance summary request"
    );
    let result = state
        .engine()
        .monthly_summary(&request.staff_id, request.year, request.month);
    respond(result, correlation_id, "attendance_summary", started)
}

/// Handler for POST /bonus/evaluate.
async fn bonus_evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<StaffMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result = state
        .engine()
        .evaluate_bonus(&request.staff_id, request.year, request.month);
    respond(result, correlation_id, "bonus_evaluate", started)
}

/// Handler for POST /payroll/preview.
async fn payroll_preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        year = request.year,
        month = request.month,
        roster_size = request.staff_ids.len(),
        "Processing payroll preview request"
    );
    let result = state
        .engine()
        .preview_run(request.year, request.month, &request.staff_ids);
    respond(result, correlation_id, "payroll_preview", started)
}

/// Handler for POST /payroll/finalize.
async fn payroll_finalize_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        year = request.year,
        month = request.month,
        roster_size = request.staff_ids.len(),
        "Processing payroll finalize request"
    );
    let result = state
        .engine()
        .finalize_run(request.year, request.month, &request.staff_ids);
    respond(result, correlation_id, "payroll_finalize", started)
}

/// Handler for POST /payroll/revert.
async fn payroll_revert_handler(
    State(state): State<AppState>,
    payload: Result<Json<RevertRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        payslips = request.payslip_keys.len(),
        "Processing payroll revert request"
    );
    let result = state.engine().revert_run(&request.payslip_keys);
    respond(result, correlation_id, "payroll_revert", started)
}

/// Handler for POST /advance/eligibility.
async fn advance_eligibility_handler(
    State(state): State<AppState>,
    payload: Result<Json<StaffMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result =
        state
            .engine()
            .advance_eligibility(&request.staff_id, request.year, request.month);
    respond(result, correlation_id, "advance_eligibility", started)
}

/// Handler for POST /pay/estimate.
async fn pay_estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<StaffMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result = state
        .engine()
        .live_estimate(&request.staff_id, request.year, request.month);
    respond(result, correlation_id, "pay_estimate", started)
}
