//! Configuration types for compliance tracking.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::CyclePhase;

/// Regime A alert threshold used by the worker list view.
pub const LIST_VIEW_ANNUAL_ALERT_DAYS: i64 = 45;

/// Regime A alert threshold used by the worker detail view.
pub const DETAIL_VIEW_ANNUAL_ALERT_DAYS: i64 = 30;

/// Tenure, in days, up to which the onboarding regime applies.
pub const DEFAULT_TENURE_THRESHOLD_DAYS: i64 = 365;

/// Day since hire on which the first evaluation falls due.
pub const FIRST_EVALUATION_DUE_DAY: i64 = 90;

/// Phases spanning more than this many days get the long alert threshold.
const SHORT_PHASE_MAX_SPAN: i64 = 90;
const SHORT_PHASE_ALERT_DAYS: i64 = 20;
const LONG_PHASE_ALERT_DAYS: i64 = 45;

fn default_tenure_threshold_days() -> i64 {
    DEFAULT_TENURE_THRESHOLD_DAYS
}

fn default_onboarding_phases() -> Vec<PhaseConfig> {
    vec![
        PhaseConfig::new(CyclePhase::FirstEvaluation, 0, FIRST_EVALUATION_DUE_DAY),
        PhaseConfig::new(
            CyclePhase::FirstYearAnnual,
            FIRST_EVALUATION_DUE_DAY,
            DEFAULT_TENURE_THRESHOLD_DAYS,
        ),
    ]
}

/// One onboarding phase, measured in days since hire.
///
/// The phase is active from `start_day` and falls due on `end_day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Which evaluation this phase asks for.
    pub phase: CyclePhase,
    /// First day since hire on which the phase is active.
    pub start_day: i64,
    /// Day since hire on which the phase falls due.
    pub end_day: i64,
    /// Explicit alert threshold; derived from the span when omitted.
    #[serde(default)]
    pub alert_days: Option<i64>,
}

impl PhaseConfig {
    /// Creates a phase with a span-derived alert threshold.
    pub fn new(phase: CyclePhase, start_day: i64, end_day: i64) -> Self {
        Self {
            phase,
            start_day,
            end_day,
            alert_days: None,
        }
    }

    /// Number of days the phase spans, saturating at the `i64` bounds.
    pub fn span(&self) -> i64 {
        self.end_day.saturating_sub(self.start_day)
    }

    /// The alert threshold in effect for this phase.
    ///
    /// # Examples
    ///
    /// ```
    /// use compliance_engine::config::PhaseConfig;
    /// use compliance_engine::models::CyclePhase;
    ///
    /// assert_eq!(PhaseConfig::new(CyclePhase::FirstEvaluation, 0, 90).effective_alert_days(), 20);
    /// assert_eq!(PhaseConfig::new(CyclePhase::FirstYearAnnual, 90, 365).effective_alert_days(), 45);
    /// ```
    pub fn effective_alert_days(&self) -> i64 {
        self.alert_days.unwrap_or(if self.span() > SHORT_PHASE_MAX_SPAN {
            LONG_PHASE_ALERT_DAYS
        } else {
            SHORT_PHASE_ALERT_DAYS
        })
    }
}

/// All tunable constants of the compliance engine.
///
/// `annual_alert_days` has no default. The worker list and detail views
/// disagree on it ([`LIST_VIEW_ANNUAL_ALERT_DAYS`] vs
/// [`DETAIL_VIEW_ANNUAL_ALERT_DAYS`]) and the deployed value needs product
/// sign-off, so every policy names it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompliancePolicy {
    /// Tenure strictly above this many days selects the recurring regime.
    #[serde(default = "default_tenure_threshold_days")]
    pub tenure_threshold_days: i64,
    /// Alert threshold for the recurring annual evaluation.
    pub annual_alert_days: i64,
    /// Onboarding phases, in order.
    #[serde(default = "default_onboarding_phases")]
    pub onboarding_phases: Vec<PhaseConfig>,
}

impl CompliancePolicy {
    /// Creates a policy with the standard onboarding phases.
    ///
    /// # Example
    ///
    /// ```
    /// use compliance_engine::config::{CompliancePolicy, LIST_VIEW_ANNUAL_ALERT_DAYS};
    ///
    /// let policy = CompliancePolicy::new(LIST_VIEW_ANNUAL_ALERT_DAYS);
    /// assert!(policy.validate().is_ok());
    /// assert_eq!(policy.onboarding_phases.len(), 2);
    /// ```
    pub fn new(annual_alert_days: i64) -> Self {
        Self {
            tenure_threshold_days: DEFAULT_TENURE_THRESHOLD_DAYS,
            annual_alert_days,
            onboarding_phases: default_onboarding_phases(),
        }
    }

    /// Checks that the policy describes a usable schedule.
    ///
    /// Phases must be non-empty, contiguous from day 0, each strictly
    /// longer than zero days, and the last one must end at the tenure
    /// threshold. Alert thresholds must be non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidPolicy { message });

        if self.annual_alert_days < 0 {
            return invalid(format!(
                "annual_alert_days must be non-negative, found {}",
                self.annual_alert_days
            ));
        }
        if self.tenure_threshold_days <= 0 {
            return invalid(format!(
                "tenure_threshold_days must be positive, found {}",
                self.tenure_threshold_days
            ));
        }
        if self.onboarding_phases.is_empty() {
            return invalid("onboarding_phases must not be empty".to_string());
        }

        let mut expected_start = 0;
        for phase in &self.onboarding_phases {
            if phase.start_day != expected_start {
                return invalid(format!(
                    "phase '{}' starts on day {}, expected day {}",
                    phase.phase, phase.start_day, expected_start
                ));
            }
            if phase.end_day <= phase.start_day {
                return invalid(format!(
                    "phase '{}' ends on day {} which is not after its start day {}",
                    phase.phase, phase.end_day, phase.start_day
                ));
            }
            if phase.effective_alert_days() < 0 {
                return invalid(format!(
                    "phase '{}' has a negative alert threshold",
                    phase.phase
                ));
            }
            expected_start = phase.end_day;
        }

        if expected_start != self.tenure_threshold_days {
            return invalid(format!(
                "onboarding phases end on day {} but tenure_threshold_days is {}",
                expected_start, self.tenure_threshold_days
            ));
        }

        Ok(())
    }
}
