//! Request types for the Compliance Engine API.
//!
//! This module defines the JSON request structures for the `/assess` and
//! `/roster` endpoints.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::compliance::parse_date;
use crate::error::{EngineError, EngineResult};
use crate::models::{EvaluationRecord, ObserverStatus, Worker};

/// Request body for the `/assess` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// The worker to assess.
    pub worker: WorkerRequest,
    /// The worker's evaluation history.
    #[serde(default)]
    pub evaluations: Vec<EvaluationRequest>,
    /// The date to assess on; the server's UTC date when omitted.
    #[serde(default)]
    pub today: Option<String>,
}

/// Request body for the `/roster` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    /// The workers to assess.
    pub workers: Vec<WorkerRequest>,
    /// Evaluation records for any of the workers, matched by `worker_id`.
    #[serde(default)]
    pub evaluations: Vec<EvaluationRequest>,
    /// The date to assess on; the server's UTC date when omitted.
    #[serde(default)]
    pub today: Option<String>,
}

/// Worker information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    /// Unique identifier for the worker.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Hire date as entered by HR.
    pub hire_date: String,
    /// Optional recurring due date.
    #[serde(default)]
    pub annual_anchor_date: Option<String>,
    /// Observer email, if one is assigned.
    #[serde(default)]
    pub observer_email: Option<String>,
    /// Whether the worker is tracked.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Evaluation record in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Identifier of the record.
    #[serde(default)]
    pub id: Option<String>,
    /// Owning worker; optional for `/assess`, required for `/roster`.
    #[serde(default)]
    pub worker_id: Option<String>,
    /// Date the evaluation was performed.
    pub evaluation_date: String,
    /// Observer approval state.
    #[serde(default)]
    pub observer_status: ObserverStatus,
}

impl From<WorkerRequest> for Worker {
    fn from(req: WorkerRequest) -> Self {
        Worker {
            id: req.id,
            name: req.name,
            hire_date: req.hire_date,
            annual_anchor_date: req.annual_anchor_date,
            observer_email: req.observer_email,
            active: req.active,
        }
    }
}

impl EvaluationRequest {
    /// Converts the request into a record owned by `worker_id`.
    pub fn for_worker(self, worker_id: &str) -> EvaluationRecord {
        EvaluationRecord {
            id: self.id,
            worker_id: worker_id.to_string(),
            evaluation_date: self.evaluation_date,
            observer_status: self.observer_status,
        }
    }

    /// Converts the request into a record, requiring its own `worker_id`.
    pub fn into_record(self, index: usize) -> EngineResult<EvaluationRecord> {
        let worker_id = self
            .worker_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| EngineError::InvalidRequest {
                field: format!("evaluations[{}].worker_id", index),
                message: "required when assessing a roster".to_string(),
            })?;
        Ok(self.for_worker(&worker_id))
    }
}

/// Resolves the assessment date of a request.
///
/// Accepts the same formats as worker dates. An unparseable date is a
/// request error, unlike worker dates which only mark the worker invalid.
pub fn resolve_today(today: Option<&str>) -> EngineResult<NaiveDate> {
    match today {
        None => Ok(Utc::now().date_naive()),
        Some(text) => parse_date(text).ok_or_else(|| EngineError::InvalidRequest {
            field: "today".to_string(),
            message: format!("'{}' is not a calendar date", text),
        }),
    }
}
