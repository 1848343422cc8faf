//! Core data models for the Compliance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assessment;
mod cycle;
mod evaluation;
mod status;
mod worker;

pub use assessment::{Assessment, AuditStep, AuditTrace, AuditWarning};
pub use cycle::{CyclePhase, CycleWindow, Regime};
pub use evaluation::{EvaluationRecord, ObserverStatus};
pub use status::{ComplianceStatus, SignedDays, StatusCategory};
pub use worker::Worker;
