//! Compliance status values produced by the engine.
//!
//! A [`ComplianceStatus`] is recomputed fresh on every query; it has no
//! identity and is never persisted.

use serde::{Deserialize, Serialize};

/// The compliance state of one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    /// A required date could not be parsed.
    #[serde(rename = "invalido")]
    Invalid,
    /// Due date is further away than the alert threshold.
    #[serde(rename = "pendiente")]
    Pending,
    /// Due date is within the alert threshold.
    #[serde(rename = "alerta")]
    Alert,
    /// Due date reached or passed without a finalized evaluation.
    #[serde(rename = "atrasado")]
    Overdue,
    /// Evaluation submitted, waiting for the observer's sign-off.
    #[serde(rename = "pending_observation")]
    PendingObservation,
    /// A finalized evaluation exists in the active window.
    #[serde(rename = "completado")]
    Completed,
}

impl StatusCategory {
    /// Every category, in badge legend order.
    pub const ALL: [StatusCategory; 6] = [
        StatusCategory::Invalid,
        StatusCategory::Pending,
        StatusCategory::Alert,
        StatusCategory::Overdue,
        StatusCategory::PendingObservation,
        StatusCategory::Completed,
    ];

    /// The wire tag for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Invalid => "invalido",
            StatusCategory::Pending => "pendiente",
            StatusCategory::Alert => "alerta",
            StatusCategory::Overdue => "atrasado",
            StatusCategory::PendingObservation => "pending_observation",
            StatusCategory::Completed => "completado",
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day count attached to a status, used to order worklists.
///
/// Variant order is the worklist order: finite counts ascending (most
/// overdue first), then statuses with no deadline pressure, then invalid
/// ones. On the wire a finite count is a bare number; the other two are
/// the strings `"unbounded"` and `"undefined"`.
///
/// # Example
///
/// ```
/// use compliance_engine::models::SignedDays;
///
/// let mut days = vec![SignedDays::Undefined, SignedDays::Finite(12), SignedDays::Unbounded, SignedDays::Finite(-3)];
/// days.sort();
/// assert_eq!(days, vec![SignedDays::Finite(-3), SignedDays::Finite(12), SignedDays::Unbounded, SignedDays::Undefined]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "SignedDaysRepr", into = "SignedDaysRepr")]
pub enum SignedDays {
    /// Days until the due date; negative when overdue.
    Finite(i64),
    /// No deadline pressure (completed, or waiting on the observer).
    Unbounded,
    /// No meaningful count (invalid input).
    Undefined,
}

impl SignedDays {
    /// Floating point rendering for spreadsheet export: the count itself,
    /// `+inf` for [`SignedDays::Unbounded`] and `NaN` for [`SignedDays::Undefined`].
    pub fn as_f64(&self) -> f64 {
        match self {
            SignedDays::Finite(days) => *days as f64,
            SignedDays::Unbounded => f64::INFINITY,
            SignedDays::Undefined => f64::NAN,
        }
    }

    /// Returns the finite count, if any.
    pub fn finite(&self) -> Option<i64> {
        match self {
            SignedDays::Finite(days) => Some(*days),
            _ => None,
        }
    }
}

/// Wire form of [`SignedDays`]: a bare number for finite counts, a tag
/// otherwise.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SignedDaysRepr {
    Days(i64),
    Marker(DayMarker),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DayMarker {
    Unbounded,
    Undefined,
}

impl From<SignedDaysRepr> for SignedDays {
    fn from(repr: SignedDaysRepr) -> Self {
        match repr {
            SignedDaysRepr::Days(days) => SignedDays::Finite(days),
            SignedDaysRepr::Marker(DayMarker::Unbounded) => SignedDays::Unbounded,
            SignedDaysRepr::Marker(DayMarker::Undefined) => SignedDays::Undefined,
        }
    }
}

impl From<SignedDays> for SignedDaysRepr {
    fn from(days: SignedDays) -> Self {
        match days {
            SignedDays::Finite(days) => SignedDaysRepr::Days(days),
            SignedDays::Unbounded => SignedDaysRepr::Marker(DayMarker::Unbounded),
            SignedDays::Undefined => SignedDaysRepr::Marker(DayMarker::Undefined),
        }
    }
}

/// The engine's output for one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    /// The status tag.
    pub category: StatusCategory,
    /// Human-readable description for badges and exports.
    pub message: String,
    /// Signed day count for sorting.
    pub signed_days: SignedDays,
}

impl ComplianceStatus {
    /// Creates a status value.
    pub fn new(category: StatusCategory, message: impl Into<String>, signed_days: SignedDays) -> Self {
        Self {
            category,
            message: message.into(),
            signed_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serialization_uses_portal_tags() {
        for category in StatusCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_category_deserialization() {
        let category: StatusCategory = serde_json::from_str("\"atrasado\"").unwrap();
        assert_eq!(category, StatusCategory::Overdue);
    }

    #[test]
    fn test_signed_days_as_f64() {
        assert_eq!(SignedDays::Finite(-5).as_f64(), -5.0);
        assert_eq!(SignedDays::Unbounded.as_f64(), f64::INFINITY);
        assert!(SignedDays::Undefined.as_f64().is_nan());
    }

    #[test]
    fn test_signed_days_finite_accessor() {
        assert_eq!(SignedDays::Finite(7).finite(), Some(7));
        assert_eq!(SignedDays::Unbounded.finite(), None);
        assert_eq!(SignedDays::Undefined.finite(), None);
    }

    #[test]
    fn test_signed_days_ordering() {
        assert!(SignedDays::Finite(-100) < SignedDays::Finite(-1));
        assert!(SignedDays::Finite(i64::MAX) < SignedDays::Unbounded);
        assert!(SignedDays::Unbounded < SignedDays::Undefined);
    }

    #[test]
    fn test_signed_days_serialization() {
        assert_eq!(
            serde_json::to_string(&SignedDays::Finite(-5)).unwrap(),
            "-5"
        );
        assert_eq!(
            serde_json::to_string(&SignedDays::Unbounded).unwrap(),
            "\"unbounded\""
        );
        assert_eq!(
            serde_json::to_string(&SignedDays::Undefined).unwrap(),
            "\"undefined\""
        );
    }

    #[test]
    fn test_signed_days_deserialization() {
        let days: Vec<SignedDays> =
            serde_json::from_str(r#"[12, -3, "unbounded", "undefined"]"#).unwrap();
        assert_eq!(
            days,
            vec![
                SignedDays::Finite(12),
                SignedDays::Finite(-3),
                SignedDays::Unbounded,
                SignedDays::Undefined,
            ]
        );
        assert!(serde_json::from_str::<SignedDays>(r#"{"finite":-5}"#).is_err());
    }
}
