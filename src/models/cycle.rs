//! Cycle windows, regimes and phases.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The compliance rule set applied to a worker, selected by tenure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// First year: two fixed phases measured in days since hire.
    Onboarding,
    /// After the first year: one evaluation per anniversary.
    Recurring,
}

/// The evaluation a cycle window asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// Onboarding phase 1, the first evaluation after hire.
    FirstEvaluation,
    /// Onboarding phase 2, the first-year annual evaluation.
    FirstYearAnnual,
    /// The recurring annual evaluation.
    Annual,
}

impl CyclePhase {
    /// Label shown next to the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            CyclePhase::FirstEvaluation => "Primera evaluación",
            CyclePhase::FirstYearAnnual => "Evaluación anual (primer año)",
            CyclePhase::Annual => "Evaluación anual",
        }
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The `[start, end]` date range within which one compliant evaluation must exist.
///
/// Both bounds are inclusive.
///
/// # Example
///
/// ```
/// use compliance_engine::models::CycleWindow;
/// use chrono::NaiveDate;
///
/// let window = CycleWindow::new(
///     NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
/// );
/// assert!(window.contains(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
/// assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleWindow {
    /// First day of the window.
    pub start: NaiveDate,
    /// Due date; last day of the window.
    pub end: NaiveDate,
}

impl CycleWindow {
    /// Creates a window from its bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true if `date` falls within the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Signed number of days from `today` to the due date.
    ///
    /// Negative once the due date has passed.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.end - today).num_days()
    }
}
