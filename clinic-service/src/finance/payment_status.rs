//! Payment-status derivation for financial documents.
//!
//! `pending`, `partial` and `paid` are derived from the paid amount on every
//! write. `overdue` and `cancelled` are only ever set through
//! [`apply_manual_status`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    #[serde(alias = "partially-paid", alias = "partially_paid")]
    Partial,
    Paid,
    Overdue,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Overdue => "overdue",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status string, accepting legacy spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "partial" | "partially-paid" | "partially_paid" => Some(PaymentStatus::Partial),
            "paid" => Some(PaymentStatus::Paid),
            "overdue" => Some(PaymentStatus::Overdue),
            "cancelled" => Some(PaymentStatus::Cancelled),
            _ => None,
        }
    }
}

/// Normalised paid amount together with the status it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub status: PaymentStatus,
    pub paid_amount: Decimal,
}

/// Derive the three-state status from `(paid_amount, total)`.
///
/// Overpayment is clamped to `total`; it is not kept as credit.
pub fn derive(paid_amount: Decimal, total: Decimal) -> Settlement {
    if paid_amount <= Decimal::ZERO {
        Settlement {
            status: PaymentStatus::Pending,
            paid_amount: Decimal::ZERO,
        }
    } else if paid_amount < total {
        Settlement {
            status: PaymentStatus::Partial,
            paid_amount,
        }
    } else {
        Settlement {
            status: PaymentStatus::Paid,
            paid_amount: total,
        }
    }
}

/// Apply derivation on top of the document's current status.
///
/// A cancelled document stays cancelled. An overdue document stays overdue
/// until it is fully paid.
pub fn settle(current: PaymentStatus, paid_amount: Decimal, total: Decimal) -> Settlement {
    let derived = derive(paid_amount, total);
    let status = match (current, derived.status) {
        (PaymentStatus::Cancelled, _) => PaymentStatus::Cancelled,
        (PaymentStatus::Overdue, PaymentStatus::Paid) => PaymentStatus::Paid,
        (PaymentStatus::Overdue, _) => PaymentStatus::Overdue,
        (_, derived_status) => derived_status,
    };
    Settlement {
        status,
        paid_amount: derived.paid_amount,
    }
}

/// Add a received amount to what has already been paid.
///
/// Saturates at `Decimal::MAX`. Any saturated sum is at least the largest
/// possible total, so the following [`settle`] clamps it exactly as it would
/// the true sum.
pub fn add_payment(paid_amount: Decimal, amount: Decimal) -> Decimal {
    paid_amount.saturating_add(amount)
}

/// Statuses that may be set by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManualStatus {
    Overdue,
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("document is cancelled")]
    Cancelled,
    #[error("a paid document cannot be marked overdue")]
    AlreadyPaid,
}

/// Validate a manual transition and return the resulting status.
pub fn apply_manual_status(
    current: PaymentStatus,
    requested: ManualStatus,
) -> Result<PaymentStatus, StatusError> {
    match (current, requested) {
        (_, ManualStatus::Cancelled) => Ok(PaymentStatus::Cancelled),
        (PaymentStatus::Cancelled, ManualStatus::Overdue) => Err(StatusError::Cancelled),
        (PaymentStatus::Paid, ManualStatus::Overdue) => Err(StatusError::AlreadyPaid),
        (_, ManualStatus::Overdue) => Ok(PaymentStatus::Overdue),
    }
}

/// Reject edits to a cancelled document.
pub fn ensure_open(current: PaymentStatus) -> Result<(), StatusError> {
    if current == PaymentStatus::Cancelled {
        Err(StatusError::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn payments_accumulate() {
        assert_eq!(add_payment(d(40), d(60)), d(100));
    }

    #[test]
    fn payment_past_decimal_range_still_settles_as_paid() {
        let paid = add_payment(d(40), Decimal::MAX);
        assert_eq!(paid, Decimal::MAX);

        let s = settle(PaymentStatus::Partial, paid, d(100));
        assert_eq!(s.status, PaymentStatus::Paid);
        assert_eq!(s.paid_amount, d(100));
    }

    #[test]
    fn nothing_paid_is_pending() {
        let s = derive(d(0), d(100));
        assert_eq!(s.status, PaymentStatus::Pending);
        assert_eq!(s.paid_amount, d(0));
    }

    #[test]
    fn negative_payment_resets_to_pending() {
        let s = settle(PaymentStatus::Paid, d(-20), d(100));
        assert_eq!(s.status, PaymentStatus::Pending);
        assert_eq!(s.paid_amount, d(0));
    }

    #[test]
    fn part_payment_is_partial_and_unchanged() {
        let s = derive(Decimal::new(4050, 2), d(100));
        assert_eq!(s.status, PaymentStatus::Partial);
        assert_eq!(s.paid_amount, Decimal::new(4050, 2));
    }

    #[test]
    fn overpayment_is_clamped_to_total() {
        let s = derive(d(250), d(200));
        assert_eq!(s.status, PaymentStatus::Paid);
        assert_eq!(s.paid_amount, d(200));
    }

    #[test]
    fn exact_payment_is_paid() {
        assert_eq!(derive(d(200), d(200)).status, PaymentStatus::Paid);
    }

    #[test]
    fn reducing_payment_reverts_paid_to_partial() {
        let s = settle(PaymentStatus::Paid, d(50), d(200));
        assert_eq!(s.status, PaymentStatus::Partial);
    }

    #[test]
    fn cancelled_is_never_overwritten() {
        let s = settle(PaymentStatus::Cancelled, d(500), d(200));
        assert_eq!(s.status, PaymentStatus::Cancelled);
        assert_eq!(s.paid_amount, d(200));
    }

    #[test]
    fn overdue_holds_until_fully_paid() {
        assert_eq!(
            settle(PaymentStatus::Overdue, d(50), d(200)).status,
            PaymentStatus::Overdue
        );
        assert_eq!(
            settle(PaymentStatus::Overdue, d(200), d(200)).status,
            PaymentStatus::Paid
        );
    }

    #[test]
    fn settle_is_idempotent() {
        let first = settle(PaymentStatus::Pending, d(120), d(100));
        let second = settle(first.status, first.paid_amount, d(100));
        assert_eq!(first, second);
    }

    #[test]
    fn legacy_spellings_deserialize_to_partial() {
        for raw in ["\"partial\"", "\"partially-paid\"", "\"partially_paid\""] {
            let status: PaymentStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(status, PaymentStatus::Partial);
        }
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Partial).unwrap(),
            "\"partial\""
        );
        assert_eq!(PaymentStatus::parse("partially-paid"), Some(PaymentStatus::Partial));
        assert_eq!(PaymentStatus::parse("settled"), None);
    }

    #[test]
    fn manual_transitions() {
        assert_eq!(
            apply_manual_status(PaymentStatus::Partial, ManualStatus::Overdue),
            Ok(PaymentStatus::Overdue)
        );
        assert_eq!(
            apply_manual_status(PaymentStatus::Paid, ManualStatus::Overdue),
            Err(StatusError::AlreadyPaid)
        );
        assert_eq!(
            apply_manual_status(PaymentStatus::Cancelled, ManualStatus::Overdue),
            Err(StatusError::Cancelled)
        );
        assert_eq!(
            apply_manual_status(PaymentStatus::Cancelled, ManualStatus::Cancelled),
            Ok(PaymentStatus::Cancelled)
        );
        assert!(ensure_open(PaymentStatus::Cancelled).is_err());
        assert!(ensure_open(PaymentStatus::Overdue).is_ok());
    }
}
