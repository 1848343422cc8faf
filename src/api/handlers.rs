//! HTTP request handlers for the Compliance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::compliance::{assess, assess_roster};
use crate::error::EngineResult;
use crate::models::{EvaluationRecord, Worker};

use super::request::{AssessmentRequest, RosterRequest, resolve_today};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/assess", post(assess_handler))
        .route("/roster", post(roster_handler))
        .route("/policy", get(policy_handler))
        .with_state(state)
}

/// Handler for POST /assess endpoint.
///
/// Accepts one worker with their evaluation history and returns the
/// worker's assessment, audit trace included.
async fn assess_handler(
    State(state): State<AppState>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assessment request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let today = match resolve_today(request.today.as_deref()) {
        Ok(today) => today,
        Err(err) => return engine_error_response(correlation_id, err.into()),
    };

    let worker: Worker = request.worker.into();
    let records: Vec<EvaluationRecord> = request
        .evaluations
        .into_iter()
        .map(|evaluation| evaluation.for_worker(&worker.id))
        .collect();

    let start_time = Instant::now();
    let assessment = assess(&worker, &records, today, state.policy());
    info!(
        correlation_id = %correlation_id,
        worker_id = %worker.id,
        records_count = records.len(),
        category = %assessment.status.category,
        duration_us = start_time.elapsed().as_micros(),
        "Assessment completed successfully"
    );

    json_response(&assessment)
}

/// Handler for POST /roster endpoint.
///
/// Assesses every active worker in the request and returns them in
/// worklist order with a per-category summary.
async fn roster_handler(
    State(state): State<AppState>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing roster request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let today = match resolve_today(request.today.as_deref()) {
        Ok(today) => today,
        Err(err) => return engine_error_response(correlation_id, err.into()),
    };

    let records = match collect_records(request.evaluations.into_iter()) {
        Ok(records) => records,
        Err(err) => return engine_error_response(correlation_id, err.into()),
    };
    let workers: Vec<Worker> = request.workers.into_iter().map(Into::into).collect();

    let start_time = Instant::now();
    let report = assess_roster(&workers, &records, today, state.policy());
    info!(
        correlation_id = %correlation_id,
        workers_count = workers.len(),
        assessed = report.assessments.len(),
        overdue = report.summary.overdue,
        duration_us = start_time.elapsed().as_micros(),
        "Roster assessment completed successfully"
    );

    json_response(&report)
}

/// Handler for GET /policy endpoint.
///
/// Returns the compliance policy the server was started with.
async fn policy_handler(State(state): State<AppState>) -> Response {
    debug!("Serving active compliance policy");
    json_response(state.policy())
}

fn collect_records(
    evaluations: impl Iterator<Item = super::request::EvaluationRequest>,
) -> EngineResult<Vec<EvaluationRecord>> {
    evaluations
        .enumerate()
        .map(|(index, evaluation)| evaluation.into_record(index))
        .collect()
}

fn json_response<T: serde::Serialize>(body: &T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, api_error: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Request rejected"
    );
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
