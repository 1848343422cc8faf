//! HTTP API module for the Compliance Engine.
//!
//! This module provides the REST API endpoints for assessing individual
//! workers and whole rosters against the configured compliance policy.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssessmentRequest, EvaluationRequest, RosterRequest, WorkerRequest, resolve_today,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
