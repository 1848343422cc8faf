//! The evaluation cycle and compliance status engine.
//!
//! This module contains the pure functions that turn a worker, their
//! evaluation history and the current date into a compliance status:
//! flexible date parsing, cycle resolution across the onboarding and
//! recurring regimes, record classification with observer approval,
//! status composition, and roster-level worklist ordering.
//!
//! Nothing here reads the clock or holds state; "today" is always an
//! argument.

mod assessment;
mod cycle_resolver;
mod date_parser;
mod record_classifier;
mod roster;
mod status_compositor;

pub use assessment::{
    INVALID_ANCHOR_DATE_MESSAGE, INVALID_HIRE_DATE_MESSAGE, MALFORMED_EVALUATION_DATE,
    OUT_OF_RANGE_MESSAGE, assess, compliance_status,
};
pub use cycle_resolver::{
    AnnualCycle, CyclePlan, OnboardingPlan, PhaseWindow, annual_window, days_since_hire,
    next_due_date, resolve_cycle,
};
pub use date_parser::{MAX_YEAR, MIN_YEAR, format_date, parse_date};
pub use record_classifier::{
    RecordOutcome, WindowTally, classify, is_awaiting_observer, is_finalized, tally_records,
};
pub use roster::{RosterReport, RosterSummary, assess_roster, sort_worklist, worklist_order};
pub use status_compositor::{compose_status, invalid_status};
