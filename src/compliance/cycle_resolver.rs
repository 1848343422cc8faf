//! Cycle resolution.
//!
//! Decides which compliance regime applies to a worker on a given day and
//! computes the window(s) an evaluation must fall into.
//!
//! - Tenure above the policy threshold (365 days by default): one window
//!   per year, ending on the next anniversary of the anchor date (or the
//!   hire date when no anchor is configured).
//! - Otherwise: the onboarding phases, each a fixed range of days since
//!   hire.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{CompliancePolicy, PhaseConfig};
use crate::models::{CyclePhase, CycleWindow, Regime};

/// The recurring annual window for a tenured worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualCycle {
    /// The date whose anniversaries set the due dates.
    pub reference: NaiveDate,
    /// Whether `reference` came from the anchor date rather than the hire date.
    pub anchored: bool,
    /// One-year window ending on the next due date.
    pub window: CycleWindow,
    /// Alert threshold in days.
    pub alert_days: i64,
}

/// One onboarding phase resolved against a hire date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindow {
    /// Which evaluation the phase asks for.
    pub phase: CyclePhase,
    /// First day since hire on which the phase is active.
    pub start_day: i64,
    /// Day since hire on which the phase falls due.
    pub end_day: i64,
    /// The phase as calendar dates; `window.end` is the due date.
    pub window: CycleWindow,
    /// Dates whose evaluations count for this phase: the window minus its
    /// due date, which already belongs to the next phase.
    pub records: CycleWindow,
    /// Alert threshold in days.
    pub alert_days: i64,
    /// False while the worker has not yet reached `start_day`.
    pub active: bool,
}

/// The onboarding schedule for a worker in their first year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingPlan {
    /// Days elapsed since hire.
    pub days_since_hire: i64,
    /// Phases in the order they must be completed.
    pub phases: Vec<PhaseWindow>,
}

/// The outcome of cycle resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum CyclePlan {
    /// First-year, phase-by-phase schedule.
    Onboarding(OnboardingPlan),
    /// Recurring annual window.
    Recurring(AnnualCycle),
}

impl CyclePlan {
    /// The regime this plan belongs to.
    pub fn regime(&self) -> Regime {
        match self {
            CyclePlan::Onboarding(_) => Regime::Onboarding,
            CyclePlan::Recurring(_) => Regime::Recurring,
        }
    }
}

/// Whole days elapsed from `hire_date` to `today`; negative for future hires.
pub fn days_since_hire(hire_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - hire_date).num_days()
}

/// Resolves the compliance plan for a worker.
///
/// `annual_anchor` replaces the hire date as the anniversary reference in
/// the recurring regime; it plays no part during onboarding.
///
/// Returns `None` when a window bound would fall outside the representable
/// calendar, including phase bounds too large to be a day count.
///
/// # Example
///
/// ```
/// use compliance_engine::compliance::{resolve_cycle, CyclePlan};
/// use compliance_engine::config::CompliancePolicy;
/// use chrono::NaiveDate;
///
/// let policy = CompliancePolicy::new(45);
/// let hire = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap();
/// let today = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
///
/// match resolve_cycle(hire, None, today, &policy) {
///     Some(CyclePlan::Recurring(cycle)) => {
///         assert_eq!(cycle.window.end, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
///         assert_eq!(cycle.window.start, NaiveDate::from_ymd_opt(2023, 1, 10).unwrap());
///     }
///     other => panic!("unexpected plan: {:?}", other),
/// }
/// ```
pub fn resolve_cycle(
    hire_date: NaiveDate,
    annual_anchor: Option<NaiveDate>,
    today: NaiveDate,
    policy: &CompliancePolicy,
) -> Option<CyclePlan> {
    let tenure = days_since_hire(hire_date, today);

    if tenure > policy.tenure_threshold_days {
        let reference = annual_anchor.unwrap_or(hire_date);
        let window = annual_window(reference, today)?;
        return Some(CyclePlan::Recurring(AnnualCycle {
            reference,
            anchored: annual_anchor.is_some(),
            window,
            alert_days: policy.annual_alert_days,
        }));
    }

    let phases = policy
        .onboarding_phases
        .iter()
        .map(|phase| phase_window(hire_date, tenure, phase))
        .collect::<Option<Vec<_>>>()?;

    Some(CyclePlan::Onboarding(OnboardingPlan {
        days_since_hire: tenure,
        phases,
    }))
}

/// The next anniversary of `reference` strictly after `today`.
///
/// An anniversary falling on `today` itself rolls over to next year.
///
/// # Example
///
/// ```
/// use compliance_engine::compliance::next_due_date;
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2019, 3, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2023, 3, 15).unwrap();
/// assert_eq!(next_due_date(reference, today), NaiveDate::from_ymd_opt(2024, 3, 15));
/// ```
pub fn next_due_date(reference: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let candidate = anniversary(today.year(), reference.month(), reference.day())?;
    if candidate <= today {
        anniversary(today.year() + 1, reference.month(), reference.day())
    } else {
        Some(candidate)
    }
}

/// The one-year lookback window ending on the next due date.
pub fn annual_window(reference: NaiveDate, today: NaiveDate) -> Option<CycleWindow> {
    let due = next_due_date(reference, today)?;
    let start = anniversary(due.year() - 1, due.month(), due.day())?;
    Some(CycleWindow::new(start, due))
}

/// Builds `year-month-day`, moving February 29 to March 1 in common years.
fn anniversary(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 {
            NaiveDate::from_ymd_opt(year, 3, 1)
        } else {
            None
        }
    })
}

fn phase_window(hire_date: NaiveDate, tenure: i64, phase: &PhaseConfig) -> Option<PhaseWindow> {
    let start = hire_date.checked_add_signed(Duration::try_days(phase.start_day)?)?;
    let end = hire_date.checked_add_signed(Duration::try_days(phase.end_day)?)?;
    let last_counted = end.pred_opt()?;

    Some(PhaseWindow {
        phase: phase.phase,
        start_day: phase.start_day,
        end_day: phase.end_day,
        window: CycleWindow::new(start, end),
        records: CycleWindow::new(start, last_counted),
        alert_days: phase.effective_alert_days(),
        active: tenure >= phase.start_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LIST_VIEW_ANNUAL_ALERT_DAYS;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy() -> CompliancePolicy {
        CompliancePolicy::new(LIST_VIEW_ANNUAL_ALERT_DAYS)
    }

    fn recurring(plan: Option<CyclePlan>) -> AnnualCycle {
        match plan {
            Some(CyclePlan::Recurring(cycle)) => cycle,
            other => panic!("Expected recurring plan, got {:?}", other),
        }
    }

    fn onboarding(plan: Option<CyclePlan>) -> OnboardingPlan {
        match plan {
            Some(CyclePlan::Onboarding(plan)) => plan,
            other => panic!("Expected onboarding plan, got {:?}", other),
        }
    }

    // ==========================================================================
    // CR-001: regime selection
    // ==========================================================================
    #[test]
    fn test_cr_001_tenure_365_is_onboarding() {
        let hire = date(2023, 1, 10);
        let today = hire + Duration::days(365);

        let plan = resolve_cycle(hire, None, today, &policy());
        assert_eq!(plan.as_ref().map(CyclePlan::regime), Some(Regime::Onboarding));
    }

    #[test]
    fn test_cr_001_tenure_366_is_recurring() {
        let hire = date(2023, 1, 10);
        let today = hire + Duration::days(366);

        let plan = resolve_cycle(hire, None, today, &policy());
        assert_eq!(plan.as_ref().map(CyclePlan::regime), Some(Regime::Recurring));
    }

    #[test]
    fn test_cr_001_future_hire_is_onboarding() {
        let plan = onboarding(resolve_cycle(
            date(2023, 2, 1),
            None,
            date(2023, 1, 25),
            &policy(),
        ));
        assert_eq!(plan.days_since_hire, -7);
        assert!(plan.phases.iter().all(|phase| !phase.active));
    }

    // ==========================================================================
    // CR-002: onboarding phases
    // ==========================================================================
    #[test]
    fn test_cr_002_phase_windows_from_hire_date() {
        let hire = date(2023, 1, 10);
        let plan = onboarding(resolve_cycle(hire, None, date(2023, 2, 1), &policy()));

        assert_eq!(plan.days_since_hire, 22);
        assert_eq!(plan.phases.len(), 2);

        let first = plan.phases[0];
        assert_eq!(first.phase, CyclePhase::FirstEvaluation);
        assert_eq!(first.window.start, hire);
        assert_eq!(first.window.end, date(2023, 4, 10));
        assert_eq!(first.records.end, date(2023, 4, 9));
        assert_eq!(first.alert_days, 20);
        assert!(first.active);

        let second = plan.phases[1];
        assert_eq!(second.phase, CyclePhase::FirstYearAnnual);
        assert_eq!(second.window.start, date(2023, 4, 10));
        assert_eq!(second.window.end, date(2024, 1, 10));
        assert_eq!(second.records.start, date(2023, 4, 10));
        assert_eq!(second.records.end, date(2024, 1, 9));
        assert_eq!(second.alert_days, 45);
        assert!(!second.active);
    }

    #[test]
    fn test_cr_002_second_phase_activates_on_day_90() {
        let hire = date(2023, 1, 10);

        let plan = onboarding(resolve_cycle(hire, None, hire + Duration::days(89), &policy()));
        assert!(!plan.phases[1].active);

        let plan = onboarding(resolve_cycle(hire, None, hire + Duration::days(90), &policy()));
        assert!(plan.phases[1].active);
    }

    #[test]
    fn test_cr_002_phase_bounds_beyond_calendar_resolve_to_none() {
        let mut policy = policy();
        policy.onboarding_phases = vec![PhaseConfig::new(CyclePhase::FirstEvaluation, 0, i64::MAX)];
        policy.tenure_threshold_days = i64::MAX;

        let hire = date(2023, 1, 10);
        assert_eq!(resolve_cycle(hire, None, date(2023, 2, 1), &policy), None);

        policy.onboarding_phases = vec![PhaseConfig::new(CyclePhase::FirstEvaluation, i64::MIN, 90)];
        assert_eq!(resolve_cycle(hire, None, date(2023, 2, 1), &policy), None);
    }

    #[test]
    fn test_cr_002_anchor_ignored_during_onboarding() {
        let hire = date(2023, 1, 10);
        let today = date(2023, 2, 1);

        let with_anchor = resolve_cycle(hire, Some(date(2023, 6, 1)), today, &policy());
        let without_anchor = resolve_cycle(hire, None, today, &policy());
        assert_eq!(with_anchor, without_anchor);
    }

    // ==========================================================================
    // CR-003: recurring annual window
    // ==========================================================================
    #[test]
    fn test_cr_003_anniversary_later_this_year() {
        let cycle = recurring(resolve_cycle(
            date(2020, 9, 1),
            None,
            date(2023, 6, 1),
            &policy(),
        ));

        assert_eq!(cycle.reference, date(2020, 9, 1));
        assert!(!cycle.anchored);
        assert_eq!(cycle.window, CycleWindow::new(date(2022, 9, 1), date(2023, 9, 1)));
        assert_eq!(cycle.alert_days, 45);
    }

    #[test]
    fn test_cr_003_anniversary_already_passed_rolls_forward() {
        let cycle = recurring(resolve_cycle(
            date(2020, 1, 10),
            None,
            date(2023, 6, 1),
            &policy(),
        ));

        assert_eq!(cycle.window, CycleWindow::new(date(2023, 1, 10), date(2024, 1, 10)));
    }

    #[test]
    fn test_cr_003_anniversary_today_rolls_forward() {
        let due = next_due_date(date(2020, 6, 1), date(2023, 6, 1));
        assert_eq!(due, Some(date(2024, 6, 1)));
    }

    #[test]
    fn test_cr_003_day_before_anniversary() {
        let due = next_due_date(date(2020, 6, 1), date(2023, 5, 31));
        assert_eq!(due, Some(date(2023, 6, 1)));
    }

    #[test]
    fn test_cr_003_anchor_overrides_hire_date() {
        let cycle = recurring(resolve_cycle(
            date(2020, 1, 10),
            Some(date(2021, 3, 15)),
            date(2023, 6, 1),
            &policy(),
        ));

        assert!(cycle.anchored);
        assert_eq!(cycle.reference, date(2021, 3, 15));
        assert_eq!(cycle.window, CycleWindow::new(date(2023, 3, 15), date(2024, 3, 15)));
    }

    #[test]
    fn test_cr_003_anchor_in_future_uses_month_and_day_only() {
        let cycle = recurring(resolve_cycle(
            date(2020, 1, 10),
            Some(date(2030, 8, 20)),
            date(2023, 6, 1),
            &policy(),
        ));

        assert_eq!(cycle.window.end, date(2023, 8, 20));
    }

    #[test]
    fn test_cr_003_policy_annual_threshold_is_used() {
        let mut policy = policy();
        policy.annual_alert_days = 30;

        let cycle = recurring(resolve_cycle(
            date(2020, 1, 10),
            None,
            date(2023, 6, 1),
            &policy,
        ));
        assert_eq!(cycle.alert_days, 30);
    }

    // ==========================================================================
    // CR-004: leap day references
    // ==========================================================================
    #[test]
    fn test_cr_004_leap_day_reference_in_common_year_falls_on_march_1() {
        let window = annual_window(date(2020, 2, 29), date(2022, 6, 1)).unwrap();
        assert_eq!(window, CycleWindow::new(date(2022, 3, 1), date(2023, 3, 1)));
    }

    #[test]
    fn test_cr_004_leap_day_reference_in_leap_year() {
        let window = annual_window(date(2020, 2, 29), date(2023, 6, 1)).unwrap();
        assert_eq!(window, CycleWindow::new(date(2023, 3, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_cr_004_leap_day_reference_on_march_1_common_year_rolls() {
        let due = next_due_date(date(2020, 2, 29), date(2023, 3, 1));
        assert_eq!(due, Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_days_since_hire() {
        assert_eq!(days_since_hire(date(2023, 1, 10), date(2023, 2, 1)), 22);
        assert_eq!(days_since_hire(date(2023, 1, 10), date(2023, 1, 10)), 0);
        assert_eq!(days_since_hire(date(2023, 1, 10), date(2023, 1, 9)), -1);
    }

    #[test]
    fn test_plan_serialization_is_tagged() {
        let plan = resolve_cycle(date(2020, 1, 10), None, date(2023, 6, 1), &policy()).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["regime"], "recurring");
        assert_eq!(json["window"]["end"], "2024-01-10");
    }
}
