//! Worker model.
//!
//! This module defines the [`Worker`] struct representing an employee whose
//! performance evaluations are tracked for compliance.

use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// An employee subject to periodic performance evaluation.
///
/// Dates are kept as the text HR entered. The engine parses them on every
/// assessment so that an unparseable hire date surfaces as an `invalido`
/// status instead of being rejected at the door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The date the worker was hired (`YYYY-MM-DD` or `DD-MM-YYYY`).
    pub hire_date: String,
    /// Optional recurring due date overriding the hire-date anniversary.
    #[serde(default)]
    pub annual_anchor_date: Option<String>,
    /// Email of the observer who must approve evaluations, if any.
    #[serde(default)]
    pub observer_email: Option<String>,
    /// Inactive workers are left out of roster assessments.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Worker {
    /// Creates an active worker with no anchor date and no observer.
    ///
    /// # Examples
    ///
    /// ```
    /// use compliance_engine::models::Worker;
    ///
    /// let worker = Worker::new("w_001", "2023-01-10");
    /// assert!(worker.active);
    /// assert!(!worker.has_observer());
    /// ```
    pub fn new(id: impl Into<String>, hire_date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            hire_date: hire_date.into(),
            annual_anchor_date: None,
            observer_email: None,
            active: true,
        }
    }

    /// Sets the annual anchor date.
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.annual_anchor_date = Some(anchor.into());
        self
    }

    /// Assigns an observer by email.
    pub fn with_observer(mut self, email: impl Into<String>) -> Self {
        self.observer_email = Some(email.into());
        self
    }

    /// Returns true if an observer is assigned.
    ///
    /// A blank email counts as no observer.
    pub fn has_observer(&self) -> bool {
        self.observer_email
            .as_deref()
            .is_some_and(|email| !email.trim().is_empty())
    }

    /// Returns the anchor date text, treating blank text as absent.
    pub fn anchor_text(&self) -> Option<&str> {
        self.annual_anchor_date
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_worker() {
        let json = r#"{
            "id": "w_001",
            "hire_date": "2023-01-10"
        }"#;

        let worker: Worker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.id, "w_001");
        assert_eq!(worker.hire_date, "2023-01-10");
        assert_eq!(worker.annual_anchor_date, None);
        assert_eq!(worker.observer_email, None);
        assert!(worker.active);
        assert!(worker.name.is_empty());
    }

    #[test]
    fn test_deserialize_full_worker() {
        let json = r#"{
            "id": "w_002",
            "name": "Ana Torres",
            "hire_date": "10/01/2020",
            "annual_anchor_date": "2020-03-15",
            "observer_email": "jefa@example.com",
            "active": false
        }"#;

        let worker: Worker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.name, "Ana Torres");
        assert_eq!(worker.anchor_text(), Some("2020-03-15"));
        assert!(worker.has_observer());
        assert!(!worker.active);
    }

    #[test]
    fn test_blank_observer_email_is_no_observer() {
        let worker = Worker::new("w_001", "2023-01-10").with_observer("   ");
        assert!(!worker.has_observer());
    }

    #[test]
    fn test_blank_anchor_is_absent() {
        let worker = Worker::new("w_001", "2023-01-10").with_anchor(" ");
        assert_eq!(worker.anchor_text(), None);
    }

    #[test]
    fn test_anchor_text_is_trimmed() {
        let worker = Worker::new("w_001", "2023-01-10").with_anchor(" 2023-06-01 ");
        assert_eq!(worker.anchor_text(), Some("2023-06-01"));
    }
}
