//! Evaluation record model and observer workflow states.

use serde::{Deserialize, Serialize};

/// Where an evaluation sits in the observer approval workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverStatus {
    /// The worker has no observer; nothing to approve.
    #[default]
    None,
    /// Submitted and waiting for the observer's sign-off.
    Pending,
    /// Signed off by the observer.
    Approved,
    /// Sent back by the observer for rework.
    ReviewRequested,
}

impl std::fmt::Display for ObserverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObserverStatus::None => write!(f, "none"),
            ObserverStatus::Pending => write!(f, "pending"),
            ObserverStatus::Approved => write!(f, "approved"),
            ObserverStatus::ReviewRequested => write!(f, "review_requested"),
        }
    }
}

/// One submitted evaluation for a worker.
///
/// # Example
///
/// ```
/// use compliance_engine::models::{EvaluationRecord, ObserverStatus};
///
/// let record = EvaluationRecord::new("w_001", "2023-03-01")
///     .with_observer_status(ObserverStatus::Pending);
/// assert_eq!(record.observer_status, ObserverStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Identifier of the record, when the caller has one.
    #[serde(default)]
    pub id: Option<String>,
    /// The worker this evaluation belongs to.
    pub worker_id: String,
    /// The date the evaluation was performed, as entered.
    pub evaluation_date: String,
    /// Observer approval state.
    #[serde(default)]
    pub observer_status: ObserverStatus,
}

impl EvaluationRecord {
    /// Creates a record with no observer involvement.
    pub fn new(worker_id: impl Into<String>, evaluation_date: impl Into<String>) -> Self {
        Self {
            id: None,
            worker_id: worker_id.into(),
            evaluation_date: evaluation_date.into(),
            observer_status: ObserverStatus::None,
        }
    }

    /// Sets the observer status.
    pub fn with_observer_status(mut self, status: ObserverStatus) -> Self {
        self.observer_status = status;
        self
    }
}
