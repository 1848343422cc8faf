//! Per-worker assessment.
//!
//! Chains the engine stages for one worker: parse the worker's dates,
//! resolve the cycle, classify the evaluation history against the window(s)
//! and compose the status. Each decision is written to the audit trace.

use chrono::NaiveDate;
use serde_json::json;
use tracing::debug;

use super::cycle_resolver::{
    AnnualCycle, CyclePlan, OnboardingPlan, days_since_hire, resolve_cycle,
};
use super::date_parser::{format_date, parse_date};
use super::record_classifier::tally_records;
use super::status_compositor::{compose_status, invalid_status};
use crate::config::CompliancePolicy;
use crate::models::{
    Assessment, AuditTrace, ComplianceStatus, CyclePhase, CycleWindow, EvaluationRecord, Regime,
    StatusCategory, Worker,
};

/// Message for an unusable hire date.
pub const INVALID_HIRE_DATE_MESSAGE: &str = "Fecha de ingreso inválida";

/// Message for an unusable annual anchor date.
pub const INVALID_ANCHOR_DATE_MESSAGE: &str = "Fecha de aniversario inválida";

/// Message for dates whose cycle cannot be placed on the calendar.
pub const OUT_OF_RANGE_MESSAGE: &str = "Fecha fuera de rango";

/// Warning code for evaluation records whose date does not parse.
pub const MALFORMED_EVALUATION_DATE: &str = "MALFORMED_EVALUATION_DATE";

struct Verdict {
    status: ComplianceStatus,
    phase: CyclePhase,
    window: CycleWindow,
}

/// Assesses one worker's compliance on `today`.
///
/// `records` is taken to be this worker's full evaluation history; the
/// records' `worker_id` is not consulted. The result depends only on the
/// arguments, so identical inputs always give identical assessments.
///
/// # Example
///
/// ```
/// use compliance_engine::compliance::assess;
/// use compliance_engine::config::CompliancePolicy;
/// use compliance_engine::models::{SignedDays, StatusCategory, Worker};
/// use chrono::NaiveDate;
///
/// let worker = Worker::new("w_001", "2023-01-10");
/// let today = NaiveDate::from_ymd_opt(2023, 4, 5).unwrap();
///
/// let assessment = assess(&worker, &[], today, &CompliancePolicy::new(45));
/// assert_eq!(assessment.status.category, StatusCategory::Alert);
/// assert_eq!(assessment.status.signed_days, SignedDays::Finite(5));
/// ```
pub fn assess(
    worker: &Worker,
    records: &[EvaluationRecord],
    today: NaiveDate,
    policy: &CompliancePolicy,
) -> Assessment {
    let mut trace = AuditTrace::default();
    let invalid = |status: ComplianceStatus, days_since_hire: Option<i64>, trace: AuditTrace| {
        Assessment {
            worker_id: worker.id.clone(),
            status,
            regime: None,
            phase: None,
            window: None,
            days_since_hire,
            audit_trace: trace,
        }
    };

    let hire_date = parse_date(&worker.hire_date);
    let anchor_text = worker.anchor_text();
    let anchor_date = anchor_text.map(parse_date);

    trace.record(
        "date_parsing",
        "Worker Date Parsing",
        json!({
            "hire_date": worker.hire_date,
            "annual_anchor_date": worker.annual_anchor_date,
            "today": format_date(today),
        }),
        json!({
            "hire_date": hire_date.map(format_date),
            "annual_anchor_date": anchor_date.flatten().map(format_date),
        }),
        match (hire_date, anchor_date) {
            (None, _) => format!("hire date '{}' is not a calendar date", worker.hire_date),
            (Some(_), Some(None)) => format!(
                "annual anchor date '{}' is not a calendar date",
                anchor_text.unwrap_or_default()
            ),
            (Some(_), Some(Some(_))) => "hire and anchor dates parsed".to_string(),
            (Some(_), None) => "hire date parsed, no anchor date configured".to_string(),
        },
    );

    let Some(hire_date) = hire_date else {
        debug!(worker_id = %worker.id, hire_date = %worker.hire_date, "invalid hire date");
        return invalid(invalid_status(INVALID_HIRE_DATE_MESSAGE), None, trace);
    };
    let days_since_hire = days_since_hire(hire_date, today);

    let anchor = match anchor_date {
        Some(None) => {
            debug!(worker_id = %worker.id, "invalid annual anchor date");
            return invalid(
                invalid_status(INVALID_ANCHOR_DATE_MESSAGE),
                Some(days_since_hire),
                trace,
            );
        }
        Some(Some(anchor)) => Some(anchor),
        None => None,
    };

    for record in records {
        if parse_date(&record.evaluation_date).is_none() {
            debug!(
                worker_id = %worker.id,
                evaluation_date = %record.evaluation_date,
                "skipping evaluation with malformed date"
            );
            trace.warn(
                MALFORMED_EVALUATION_DATE,
                format!(
                    "evaluation {}dated '{}' was ignored: not a calendar date",
                    record
                        .id
                        .as_deref()
                        .map(|id| format!("'{}' ", id))
                        .unwrap_or_default(),
                    record.evaluation_date
                ),
                "medium",
            );
        }
    }

    let Some(plan) = resolve_cycle(hire_date, anchor, today, policy) else {
        return invalid(
            invalid_status(OUT_OF_RANGE_MESSAGE),
            Some(days_since_hire),
            trace,
        );
    };

    let regime = plan.regime();
    debug!(worker_id = %worker.id, ?regime, days_since_hire, "resolved compliance regime");

    trace.record(
        "regime_selection",
        "Regime Selection",
        json!({
            "days_since_hire": days_since_hire,
            "tenure_threshold_days": policy.tenure_threshold_days,
        }),
        json!({ "regime": regime }),
        match regime {
            Regime::Recurring => format!(
                "{} days since hire exceeds {} day threshold, recurring annual regime",
                days_since_hire, policy.tenure_threshold_days
            ),
            Regime::Onboarding => format!(
                "{} days since hire is within {} day threshold, onboarding regime",
                days_since_hire, policy.tenure_threshold_days
            ),
        },
    );

    let has_observer = worker.has_observer();
    let verdict = match &plan {
        CyclePlan::Recurring(cycle) => assess_annual(cycle, records, has_observer, today, &mut trace),
        CyclePlan::Onboarding(plan) => {
            assess_onboarding(plan, records, has_observer, today, &mut trace)
        }
    };

    Assessment {
        worker_id: worker.id.clone(),
        status: verdict.status,
        regime: Some(regime),
        phase: Some(verdict.phase),
        window: Some(verdict.window),
        days_since_hire: Some(days_since_hire),
        audit_trace: trace,
    }
}

/// Returns only the status of [`assess`].
pub fn compliance_status(
    worker: &Worker,
    records: &[EvaluationRecord],
    today: NaiveDate,
    policy: &CompliancePolicy,
) -> ComplianceStatus {
    assess(worker, records, today, policy).status
}

fn assess_annual(
    cycle: &AnnualCycle,
    records: &[EvaluationRecord],
    has_observer: bool,
    today: NaiveDate,
    trace: &mut AuditTrace,
) -> Verdict {
    let status = evaluate_window(
        CyclePhase::Annual,
        &cycle.window,
        &cycle.window,
        cycle.alert_days,
        records,
        has_observer,
        today,
        trace,
    );

    Verdict {
        status,
        phase: CyclePhase::Annual,
        window: cycle.window,
    }
}

/// Walks the onboarding phases in order. A phase is only looked at once
/// every earlier phase is complete; the first incomplete phase decides.
fn assess_onboarding(
    plan: &OnboardingPlan,
    records: &[EvaluationRecord],
    has_observer: bool,
    today: NaiveDate,
    trace: &mut AuditTrace,
) -> Verdict {
    let mut verdict: Option<Verdict> = None;

    for (index, phase) in plan.phases.iter().enumerate() {
        if !phase.active && index > 0 {
            trace.record(
                "phase_gating",
                "Onboarding Phase Gating",
                json!({
                    "phase": phase.phase,
                    "start_day": phase.start_day,
                    "days_since_hire": plan.days_since_hire,
                }),
                json!({ "active": false }),
                format!(
                    "{} starts on day {}, not yet active at day {}",
                    phase.phase, phase.start_day, plan.days_since_hire
                ),
            );
            break;
        }

        let status = evaluate_window(
            phase.phase,
            &phase.records,
            &phase.window,
            phase.alert_days,
            records,
            has_observer,
            today,
            trace,
        );
        let completed = status.category == StatusCategory::Completed;

        verdict = Some(Verdict {
            status,
            phase: phase.phase,
            window: phase.window,
        });

        if !completed {
            break;
        }
    }

    // Validated policies always have a first phase, and it is never skipped.
    verdict.unwrap_or_else(|| Verdict {
        status: invalid_status(OUT_OF_RANGE_MESSAGE),
        phase: CyclePhase::FirstEvaluation,
        window: CycleWindow::new(today, today),
    })
}

/// Classifies `records` falling in `counted` and composes the status
/// against the due date `window.end`.
fn evaluate_window(
    phase: CyclePhase,
    counted: &CycleWindow,
    window: &CycleWindow,
    alert_days: i64,
    records: &[EvaluationRecord],
    has_observer: bool,
    today: NaiveDate,
    trace: &mut AuditTrace,
) -> ComplianceStatus {
    let tally = tally_records(records, counted, has_observer);
    let outcome = tally.outcome();

    trace.record(
        "record_classification",
        "Evaluation Record Classification",
        json!({
            "phase": phase,
            "window_start": format_date(counted.start),
            "window_end": format_date(counted.end),
            "due_date": format_date(window.end),
            "has_observer": has_observer,
            "records": records.len(),
        }),
        json!({
            "in_window": tally.in_window,
            "finalized": tally.finalized,
            "awaiting_observer": tally.awaiting_observer,
            "review_requested": tally.review_requested,
            "outcome": outcome,
        }),
        format!(
            "{} of {} records fall in {}..={} for {}",
            tally.in_window,
            records.len(),
            format_date(counted.start),
            format_date(counted.end),
            phase
        ),
    );

    let status = compose_status(window, outcome, today, alert_days);

    trace.record(
        "status_composition",
        "Status Composition",
        json!({
            "phase": phase,
            "outcome": outcome,
            "days_until_due": window.days_until_due(today),
            "alert_days": alert_days,
        }),
        json!({
            "category": status.category,
            "signed_days": status.signed_days,
        }),
        format!("{}: {}", phase, status.message),
    );

    status
}
