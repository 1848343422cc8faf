//! Status composition.
//!
//! Turns a window, the record outcome for it, and the current date into the
//! final [`ComplianceStatus`].

use chrono::NaiveDate;

use super::date_parser::format_date;
use super::record_classifier::RecordOutcome;
use crate::models::{ComplianceStatus, CycleWindow, SignedDays, StatusCategory};

fn days_text(days: i64) -> String {
    if days == 1 {
        "1 día".to_string()
    } else {
        format!("{} días", days)
    }
}

/// Composes the status for one window.
///
/// | outcome            | days until due         | category              | signed days  |
/// |--------------------|------------------------|-----------------------|--------------|
/// | finalized          | any                    | `completado`          | unbounded    |
/// | awaiting observer  | any                    | `pending_observation` | unbounded    |
/// | unmet              | `<= 0`                 | `atrasado`            | days         |
/// | unmet              | `1..=alert_days`       | `alerta`              | days         |
/// | unmet              | `> alert_days`         | `pendiente`           | days         |
///
/// # Example
///
/// ```
/// use compliance_engine::compliance::{compose_status, RecordOutcome};
/// use compliance_engine::models::{CycleWindow, SignedDays, StatusCategory};
/// use chrono::NaiveDate;
///
/// let window = CycleWindow::new(
///     NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 4, 10).unwrap(),
/// );
/// let today = NaiveDate::from_ymd_opt(2023, 4, 15).unwrap();
///
/// let status = compose_status(&window, RecordOutcome::Unmet, today, 20);
/// assert_eq!(status.category, StatusCategory::Overdue);
/// assert_eq!(status.signed_days, SignedDays::Finite(-5));
/// ```
pub fn compose_status(
    window: &CycleWindow,
    outcome: RecordOutcome,
    today: NaiveDate,
    alert_days: i64,
) -> ComplianceStatus {
    match outcome {
        RecordOutcome::Finalized => ComplianceStatus::new(
            StatusCategory::Completed,
            "Evaluación completada",
            SignedDays::Unbounded,
        ),
        RecordOutcome::AwaitingObserver => ComplianceStatus::new(
            StatusCategory::PendingObservation,
            "Evaluación enviada, pendiente de aprobación del observador",
            SignedDays::Unbounded,
        ),
        RecordOutcome::Unmet => {
            let days = window.days_until_due(today);
            let due = format_date(window.end);

            let (category, message) = if days <= 0 {
                let message = if days == 0 {
                    format!("Atrasado: vence hoy ({})", due)
                } else {
                    format!("Atrasado por {} (venció el {})", days_text(-days), due)
                };
                (StatusCategory::Overdue, message)
            } else if days <= alert_days {
                (
                    StatusCategory::Alert,
                    format!("Vence en {} ({})", days_text(days), due),
                )
            } else {
                (
                    StatusCategory::Pending,
                    format!("Pendiente: faltan {} ({})", days_text(days), due),
                )
            };

            ComplianceStatus::new(category, message, SignedDays::Finite(days))
        }
    }
}

/// The status reported when a required date cannot be used.
///
/// `reason` names the offending input, e.g. "Fecha de ingreso inválida".
pub fn invalid_status(reason: impl Into<String>) -> ComplianceStatus {
    ComplianceStatus::new(StatusCategory::Invalid, reason, SignedDays::Undefined)
}
