//! Read-side progress summary for treatment plans. Never persisted.

use crate::models::{Treatment, TreatmentStatus};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

const SESSION_WEIGHT: f64 = 0.6;
const STATUS_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentProgress {
    pub overall_percent: u8,
    pub sessions_percent: u8,
    pub payment_percent: u8,
    pub status_percent: u8,
    /// True when the headline figure comes from the stored override.
    pub manual_override: bool,
}

pub fn status_percent(status: TreatmentStatus) -> f64 {
    match status {
        TreatmentStatus::Completed => 100.0,
        TreatmentStatus::InProgress => 55.0,
        TreatmentStatus::Planned => 15.0,
        TreatmentStatus::Cancelled => 0.0,
    }
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn as_percent(value: f64) -> u8 {
    clamp_percent(value).round() as u8
}

fn sessions_ratio(treatment: &Treatment) -> f64 {
    if treatment.planned_sessions == 0 {
        return 0.0;
    }
    clamp_percent(100.0 * treatment.sessions.len() as f64 / f64::from(treatment.planned_sessions))
}

fn payment_ratio(treatment: &Treatment) -> f64 {
    let total_cost = treatment.total_cost();
    if total_cost <= Decimal::ZERO {
        return 0.0;
    }
    // Only a payment far larger than the cost leaves the decimal range.
    treatment
        .total_paid()
        .checked_div(total_cost)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(100.0, |percent| clamp_percent(percent.to_f64().unwrap_or(0.0)))
}

/// Blend session completion and status into one figure, unless staff have
/// set an explicit percentage.
pub fn treatment_progress(treatment: &Treatment) -> TreatmentProgress {
    let sessions = sessions_ratio(treatment);
    let payment = payment_ratio(treatment);
    let status = status_percent(treatment.status);

    let (overall, manual_override) = match treatment.progress_percent {
        Some(manual) => (clamp_percent(f64::from(manual)), true),
        None if treatment.planned_sessions > 0 => {
            (sessions * SESSION_WEIGHT + status * STATUS_WEIGHT, false)
        }
        None => (status, false),
    };

    TreatmentProgress {
        overall_percent: as_percent(overall),
        sessions_percent: as_percent(sessions),
        payment_percent: as_percent(payment),
        status_percent: as_percent(status),
        manual_override,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::PaymentStatus;
    use crate::models::TreatmentSession;
    use chrono::{NaiveDate, Utc};

    fn plan(planned_sessions: u32, completed: usize, status: TreatmentStatus) -> Treatment {
        let now = Utc::now();
        let visit = TreatmentSession {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            duration_minutes: 45,
            notes: None,
        };
        Treatment {
            id: "t-1".to_string(),
            patient_id: "p-1".to_string(),
            dentist_id: "d-1".to_string(),
            procedure_id: None,
            billing_id: None,
            title: "Root canal, lower left molar".to_string(),
            status,
            planned_sessions,
            sessions: vec![visit; completed],
            estimated_cost: Decimal::ZERO,
            actual_cost: None,
            paid_amount: Decimal::ZERO,
            advance_paid: Decimal::ZERO,
            progress_percent: None,
            payment_status: PaymentStatus::Pending,
            notes: None,
            created_by: "staff-1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn blends_sessions_and_status() {
        let mut t = plan(4, 2, TreatmentStatus::InProgress);
        t.actual_cost = Some(Decimal::from(1000));
        t.paid_amount = Decimal::from(250);

        let p = treatment_progress(&t);

        assert_eq!(p.sessions_percent, 50);
        assert_eq!(p.payment_percent, 25);
        assert_eq!(p.status_percent, 55);
        assert_eq!(p.overall_percent, 52);
        assert!(!p.manual_override);
    }

    #[test]
    fn manual_override_wins_for_headline_only() {
        let mut t = plan(4, 1, TreatmentStatus::InProgress);
        t.progress_percent = Some(90);

        let p = treatment_progress(&t);

        assert_eq!(p.overall_percent, 90);
        assert_eq!(p.sessions_percent, 25);
        assert!(p.manual_override);
    }

    #[test]
    fn override_above_hundred_is_clamped() {
        let mut t = plan(2, 0, TreatmentStatus::Planned);
        t.progress_percent = Some(140);
        assert_eq!(treatment_progress(&t).overall_percent, 100);
    }

    #[test]
    fn without_planned_sessions_status_alone_decides() {
        let t = plan(0, 3, TreatmentStatus::Planned);
        let p = treatment_progress(&t);
        assert_eq!(p.sessions_percent, 0);
        assert_eq!(p.overall_percent, 15);
    }

    #[test]
    fn extra_sessions_cap_at_hundred() {
        let t = plan(2, 5, TreatmentStatus::Completed);
        let p = treatment_progress(&t);
        assert_eq!(p.sessions_percent, 100);
        assert_eq!(p.overall_percent, 100);
    }

    #[test]
    fn advance_counts_towards_payment_and_estimate_is_fallback() {
        let mut t = plan(1, 0, TreatmentStatus::Planned);
        t.estimated_cost = Decimal::from(800);
        t.actual_cost = Some(Decimal::ZERO);
        t.paid_amount = Decimal::from(200);
        t.advance_paid = Decimal::from(200);

        assert_eq!(treatment_progress(&t).payment_percent, 50);
    }

    #[test]
    fn no_cost_means_no_payment_progress() {
        let mut t = plan(1, 1, TreatmentStatus::Completed);
        t.paid_amount = Decimal::from(100);
        assert_eq!(treatment_progress(&t).payment_percent, 0);
    }

    #[test]
    fn cancelled_plan_with_no_sessions_is_zero() {
        let t = plan(3, 0, TreatmentStatus::Cancelled);
        assert_eq!(treatment_progress(&t).overall_percent, 0);
    }

    #[test]
    fn payments_beyond_decimal_range_report_fully_paid() {
        let mut t = plan(2, 1, TreatmentStatus::InProgress);
        t.estimated_cost = Decimal::from(1000);
        t.paid_amount = Decimal::MAX;
        t.advance_paid = Decimal::MAX;

        assert_eq!(treatment_progress(&t).payment_percent, 100);
    }

    #[test]
    fn tiny_cost_with_large_payment_caps_at_hundred() {
        let mut t = plan(2, 1, TreatmentStatus::InProgress);
        t.estimated_cost = Decimal::new(1, 4);
        t.paid_amount = Decimal::MAX;

        assert_eq!(treatment_progress(&t).payment_percent, 100);
    }
}
