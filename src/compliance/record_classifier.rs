//! Record classification.
//!
//! Decides what a worker's evaluation history says about one cycle window:
//! whether a finalized evaluation closes it, whether submitted work is
//! waiting on the observer, or whether nothing counts yet.

use serde::{Deserialize, Serialize};

use super::date_parser::parse_date;
use crate::models::{CycleWindow, EvaluationRecord, ObserverStatus};

/// What the records inside a window amount to.
///
/// Variant order is priority order: a finalized record outranks one
/// awaiting the observer, which outranks having nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    /// At least one record satisfies the cycle.
    Finalized,
    /// No record satisfies the cycle, but at least one awaits the observer.
    AwaitingObserver,
    /// Nothing in the window counts.
    Unmet,
}

/// Per-window counts behind a [`RecordOutcome`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTally {
    /// Records whose date parsed and fell inside the window.
    pub in_window: usize,
    /// In-window records that satisfy the cycle.
    pub finalized: usize,
    /// In-window records waiting on the observer.
    pub awaiting_observer: usize,
    /// In-window records sent back for rework.
    pub review_requested: usize,
}

impl WindowTally {
    /// The outcome these counts imply.
    pub fn outcome(&self) -> RecordOutcome {
        if self.finalized > 0 {
            RecordOutcome::Finalized
        } else if self.awaiting_observer > 0 {
            RecordOutcome::AwaitingObserver
        } else {
            RecordOutcome::Unmet
        }
    }
}

/// Returns true if the record satisfies a cycle.
///
/// Without an observer every submitted evaluation counts; with one, only
/// approved evaluations do.
pub fn is_finalized(record: &EvaluationRecord, has_observer: bool) -> bool {
    !has_observer || record.observer_status == ObserverStatus::Approved
}

/// Returns true if the record is waiting for the observer's sign-off.
pub fn is_awaiting_observer(record: &EvaluationRecord, has_observer: bool) -> bool {
    has_observer && record.observer_status == ObserverStatus::Pending
}

/// Counts the records falling inside `window`.
///
/// Records whose date does not parse are left out entirely.
pub fn tally_records(
    records: &[EvaluationRecord],
    window: &CycleWindow,
    has_observer: bool,
) -> WindowTally {
    records
        .iter()
        .filter(|record| {
            parse_date(&record.evaluation_date).is_some_and(|date| window.contains(date))
        })
        .fold(WindowTally::default(), |mut tally, record| {
            tally.in_window += 1;
            if is_finalized(record, has_observer) {
                tally.finalized += 1;
            } else if is_awaiting_observer(record, has_observer) {
                tally.awaiting_observer += 1;
            } else if record.observer_status == ObserverStatus::ReviewRequested {
                tally.review_requested += 1;
            }
            tally
        })
}

/// Classifies a worker's records against one window.
///
/// # Example
///
/// ```
/// use compliance_engine::compliance::{classify, RecordOutcome};
/// use compliance_engine::models::{CycleWindow, EvaluationRecord, ObserverStatus};
/// use chrono::NaiveDate;
///
/// let window = CycleWindow::new(
///     NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 4, 10).unwrap(),
/// );
/// let records = vec![
///     EvaluationRecord::new("w_001", "2023-02-01").with_observer_status(ObserverStatus::ReviewRequested),
///     EvaluationRecord::new("w_001", "2023-03-01").with_observer_status(ObserverStatus::Approved),
/// ];
/// assert_eq!(classify(&records, &window, true), RecordOutcome::Finalized);
/// ```
pub fn classify(records: &[EvaluationRecord], window: &CycleWindow, has_observer: bool) -> RecordOutcome {
    tally_records(records, window, has_observer).outcome()
}
