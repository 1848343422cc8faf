//! Roster assessment and worklist ordering.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::assessment::assess;
use crate::config::CompliancePolicy;
use crate::models::{Assessment, EvaluationRecord, StatusCategory, Worker};

/// Number of assessed workers in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    /// Workers with an unusable date.
    #[serde(rename = "invalido")]
    pub invalid: usize,
    /// Workers with time to spare.
    #[serde(rename = "pendiente")]
    pub pending: usize,
    /// Workers inside the alert threshold.
    #[serde(rename = "alerta")]
    pub alert: usize,
    /// Workers past their due date.
    #[serde(rename = "atrasado")]
    pub overdue: usize,
    /// Workers waiting on an observer.
    pub pending_observation: usize,
    /// Workers whose current cycle is closed.
    #[serde(rename = "completado")]
    pub completed: usize,
}

impl RosterSummary {
    /// Counts one more worker in `category`.
    pub fn add(&mut self, category: StatusCategory) {
        *self.slot(category) += 1;
    }

    /// Number of workers in `category`.
    pub fn count(&self, category: StatusCategory) -> usize {
        match category {
            StatusCategory::Invalid => self.invalid,
            StatusCategory::Pending => self.pending,
            StatusCategory::Alert => self.alert,
            StatusCategory::Overdue => self.overdue,
            StatusCategory::PendingObservation => self.pending_observation,
            StatusCategory::Completed => self.completed,
        }
    }

    /// Total number of workers counted.
    pub fn total(&self) -> usize {
        StatusCategory::ALL.iter().map(|c| self.count(*c)).sum()
    }

    fn slot(&mut self, category: StatusCategory) -> &mut usize {
        match category {
            StatusCategory::Invalid => &mut self.invalid,
            StatusCategory::Pending => &mut self.pending,
            StatusCategory::Alert => &mut self.alert,
            StatusCategory::Overdue => &mut self.overdue,
            StatusCategory::PendingObservation => &mut self.pending_observation,
            StatusCategory::Completed => &mut self.completed,
        }
    }
}

/// Assessments for a whole roster, in worklist order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterReport {
    /// One assessment per active worker, most urgent first.
    pub assessments: Vec<Assessment>,
    /// Per-category counts over `assessments`.
    pub summary: RosterSummary,
    /// Inactive workers left out of the report.
    pub skipped_inactive: usize,
    /// Evaluation records naming no worker on the roster.
    pub unmatched_records: usize,
}

/// Worklist ordering: most overdue first, then by time remaining, then
/// workers with no deadline pressure, then invalid ones. Ties break on
/// worker id.
pub fn worklist_order(a: &Assessment, b: &Assessment) -> Ordering {
    a.status
        .signed_days
        .cmp(&b.status.signed_days)
        .then_with(|| a.worker_id.cmp(&b.worker_id))
}

/// Sorts assessments into worklist order.
pub fn sort_worklist(assessments: &mut [Assessment]) {
    assessments.sort_by(worklist_order);
}

/// Assesses every active worker on the roster.
///
/// `records` may hold evaluations for any number of workers; they are
/// matched to workers by `worker_id`.
///
/// # Example
///
/// ```
/// use compliance_engine::compliance::assess_roster;
/// use compliance_engine::config::CompliancePolicy;
/// use compliance_engine::models::{EvaluationRecord, StatusCategory, Worker};
/// use chrono::NaiveDate;
///
/// let workers = vec![
///     Worker::new("w_001", "2023-01-10"),
///     Worker::new("w_002", "2023-01-10"),
/// ];
/// let records = vec![EvaluationRecord::new("w_002", "2023-02-01")];
/// let today = NaiveDate::from_ymd_opt(2023, 4, 15).unwrap();
///
/// let report = assess_roster(&workers, &records, today, &CompliancePolicy::new(45));
/// assert_eq!(report.assessments[0].worker_id, "w_001");
/// assert_eq!(report.summary.count(StatusCategory::Overdue), 1);
/// ```
pub fn assess_roster(
    workers: &[Worker],
    records: &[EvaluationRecord],
    today: NaiveDate,
    policy: &CompliancePolicy,
) -> RosterReport {
    let mut by_worker: HashMap<&str, Vec<EvaluationRecord>> = HashMap::new();
    for record in records {
        by_worker
            .entry(record.worker_id.as_str())
            .or_default()
            .push(record.clone());
    }

    let mut summary = RosterSummary::default();
    let mut skipped_inactive: usize = 0;
    let mut assessments = Vec::with_capacity(workers.len());

    for worker in workers {
        let history = by_worker.remove(worker.id.as_str()).unwrap_or_default();
        if !worker.active {
            skipped_inactive += 1;
            continue;
        }

        let assessment = assess(worker, &history, today, policy);
        summary.add(assessment.status.category);
        assessments.push(assessment);
    }

    let unmatched_records: usize = by_worker.values().map(Vec::len).sum();
    sort_worklist(&mut assessments);

    debug!(
        assessed = assessments.len(),
        skipped_inactive, unmatched_records, "roster assessed"
    );

    RosterReport {
        assessments,
        summary,
        skipped_inactive,
        unmatched_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LIST_VIEW_ANNUAL_ALERT_DAYS;
    use crate::models::{ObserverStatus, SignedDays};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy() -> CompliancePolicy {
        CompliancePolicy::new(LIST_VIEW_ANNUAL_ALERT_DAYS)
    }

    fn roster() -> Vec<Worker> {
        vec![
            // pendiente, 68 days left on 2023-02-01
            Worker::new("pending", "2023-01-10"),
            // atrasado by 12 days
            Worker::new("overdue", "2022-10-22"),
            Worker::new("invalid", "31-04-2022"),
            Worker::new("completed", "2022-12-01"),
            Worker::new("observed", "2022-12-01").with_observer("obs@example.com"),
            // alerta, 10 days left
            Worker::new("alert", "2022-11-13"),
        ]
    }

    fn records() -> Vec<EvaluationRecord> {
        vec![
            EvaluationRecord::new("completed", "2023-01-15"),
            EvaluationRecord::new("observed", "2023-01-15")
                .with_observer_status(ObserverStatus::Pending),
        ]
    }

    #[test]
    fn test_roster_worklist_order() {
        let report = assess_roster(&roster(), &records(), date(2023, 2, 1), &policy());
        let order: Vec<&str> = report
            .assessments
            .iter()
            .map(|a| a.worker_id.as_str())
            .collect();

        assert_eq!(
            order,
            vec!["overdue", "alert", "pending", "completed", "observed", "invalid"]
        );
        assert_eq!(report.assessments[0].status.signed_days, SignedDays::Finite(-12));
        assert_eq!(report.assessments[1].status.signed_days, SignedDays::Finite(10));
    }

    #[test]
    fn test_roster_summary_counts() {
        let report = assess_roster(&roster(), &records(), date(2023, 2, 1), &policy());

        assert_eq!(report.summary.count(StatusCategory::Pending), 1);
        assert_eq!(report.summary.count(StatusCategory::Alert), 1);
        assert_eq!(report.summary.count(StatusCategory::Overdue), 1);
        assert_eq!(report.summary.count(StatusCategory::Invalid), 1);
        assert_eq!(report.summary.count(StatusCategory::Completed), 1);
        assert_eq!(report.summary.count(StatusCategory::PendingObservation), 1);
        assert_eq!(report.summary.total(), 6);
    }

    #[test]
    fn test_roster_skips_inactive_workers() {
        let mut workers = roster();
        workers[0].active = false;

        let report = assess_roster(&workers, &records(), date(2023, 2, 1), &policy());

        assert_eq!(report.skipped_inactive, 1);
        assert_eq!(report.assessments.len(), 5);
        assert!(report.assessments.iter().all(|a| a.worker_id != "pending"));
    }

    #[test]
    fn test_roster_counts_unmatched_records() {
        let mut records = records();
        records.push(EvaluationRecord::new("ghost", "2023-01-15"));
        records.push(EvaluationRecord::new("ghost", "2023-01-16"));

        let report = assess_roster(&roster(), &records, date(2023, 2, 1), &policy());

        assert_eq!(report.unmatched_records, 2);
    }

    #[test]
    fn test_records_of_inactive_workers_are_not_unmatched() {
        let mut workers = roster();
        workers[3].active = false;

        let report = assess_roster(&workers, &records(), date(2023, 2, 1), &policy());

        assert_eq!(report.unmatched_records, 0);
    }

    #[test]
    fn test_records_only_apply_to_their_worker() {
        let workers = vec![
            Worker::new("a", "2023-01-10"),
            Worker::new("b", "2023-01-10"),
        ];
        let records = vec![EvaluationRecord::new("a", "2023-02-01")];

        let report = assess_roster(&workers, &records, date(2023, 4, 5), &policy());
        let status_of = |id: &str| {
            report
                .assessments
                .iter()
                .find(|a| a.worker_id == id)
                .map(|a| a.status.category)
        };

        assert_eq!(status_of("a"), Some(StatusCategory::Completed));
        assert_eq!(status_of("b"), Some(StatusCategory::Alert));
    }

    #[test]
    fn test_ties_break_on_worker_id() {
        let workers = vec![
            Worker::new("zeta", "2023-01-10"),
            Worker::new("alfa", "2023-01-10"),
        ];

        let report = assess_roster(&workers, &[], date(2023, 2, 1), &policy());

        assert_eq!(report.assessments[0].worker_id, "alfa");
        assert_eq!(report.assessments[1].worker_id, "zeta");
    }

    #[test]
    fn test_empty_roster() {
        let report = assess_roster(&[], &[], date(2023, 2, 1), &policy());

        assert!(report.assessments.is_empty());
        assert_eq!(report.summary, RosterSummary::default());
    }

    #[test]
    fn test_summary_serialization_uses_portal_tags() {
        let mut summary = RosterSummary::default();
        summary.add(StatusCategory::Overdue);

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["atrasado"], 1);
        assert_eq!(json["pending_observation"], 0);
    }
}
