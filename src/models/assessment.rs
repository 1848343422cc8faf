//! Assessment models for the Compliance Engine.
//!
//! This module contains the [`Assessment`] type returned for each worker,
//! along with the audit trace recording how its status was reached.

use serde::{Deserialize, Serialize};

use super::{ComplianceStatus, CyclePhase, CycleWindow, Regime};

/// A single step in the audit trace recording an engine decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during an assessment.
///
/// Warnings indicate data problems that did not stop the assessment
/// but may require attention from HR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an assessment.
///
/// # Example
///
/// ```
/// use compliance_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of decision steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated along the way.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Step number the next recorded step will carry.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Appends a step, numbering it in sequence.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) {
        let step_number = self.next_step_number();
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning: reasoning.into(),
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: impl Into<String>, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message: message.into(),
            severity: severity.to_string(),
        });
    }
}

/// The engine's verdict for one worker, with the context it was computed in.
///
/// Contains no timestamps or generated ids: assessing the same inputs twice
/// yields equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// The worker this assessment is for.
    pub worker_id: String,
    /// The resulting compliance status.
    pub status: ComplianceStatus,
    /// The regime applied; absent when the hire date is invalid.
    pub regime: Option<Regime>,
    /// The phase the status refers to.
    pub phase: Option<CyclePhase>,
    /// The window the status was computed against.
    pub window: Option<CycleWindow>,
    /// Days elapsed since hire, when the hire date parsed.
    pub days_since_hire: Option<i64>,
    /// Decisions taken to reach the status.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SignedDays, StatusCategory};

    #[test]
    fn test_record_numbers_steps_sequentially() {
        let mut trace = AuditTrace::default();
        trace.record(
            "a",
            "A",
            serde_json::json!({}),
            serde_json::json!({}),
            "first",
        );
        trace.record(
            "b",
            "B",
            serde_json::json!({}),
            serde_json::json!({}),
            "second",
        );

        assert_eq!(trace.steps[0].step_number, 1);
        assert_eq!(trace.steps[1].step_number, 2);
        assert_eq!(trace.next_step_number(), 3);
    }

    #[test]
    fn test_warn_appends_warning() {
        let mut trace = AuditTrace::default();
        trace.warn("MALFORMED_EVALUATION_DATE", "bad date", "medium");

        assert_eq!(trace.warnings.len(), 1);
        assert_eq!(trace.warnings[0].code, "MALFORMED_EVALUATION_DATE");
        assert_eq!(trace.warnings[0].severity, "medium");
    }

    #[test]
    fn test_assessment_serialization() {
        let assessment = Assessment {
            worker_id: "w_001".to_string(),
            status: ComplianceStatus::new(
                StatusCategory::Invalid,
                "Fecha de ingreso inválida",
                SignedDays::Undefined,
            ),
            regime: None,
            phase: None,
            window: None,
            days_since_hire: None,
            audit_trace: AuditTrace::default(),
        };

        let json = serde_json::to_string(&assessment).unwrap();
        assert!(json.contains("\"worker_id\":\"w_001\""));
        assert!(json.contains("\"category\":\"invalido\""));
        assert!(json.contains("\"signed_days\":\"undefined\""));

        let deserialized: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, assessment);
    }
}
