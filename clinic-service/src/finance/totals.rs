use rust_decimal::Decimal;
use service_core::error::AppError;
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// A derived amount that does not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("{0} exceeds the largest supported amount")]
    Overflow(&'static str),
}

impl AmountError {
    fn field(&self) -> &'static str {
        match self {
            AmountError::Overflow(field) => field,
        }
    }
}

/// Reported like any other rule violation: 422 with the offending field.
impl From<AmountError> for AppError {
    fn from(err: AmountError) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(
            err.field(),
            ValidationError::new("amount_range").with_message(Cow::Owned(err.to_string())),
        );
        AppError::ValidationError(errors)
    }
}

/// `max(0, subtotal + tax - discount)`. A discount larger than the taxed
/// subtotal is absorbed rather than rejected.
pub fn compute_total(
    subtotal: Decimal,
    tax: Decimal,
    discount: Decimal,
) -> Result<Decimal, AmountError> {
    subtotal
        .checked_add(tax)
        .and_then(|taxed| taxed.checked_sub(discount))
        .map(|total| total.max(Decimal::ZERO))
        .ok_or(AmountError::Overflow("total"))
}

/// Amount still owed on a document; never negative.
pub fn balance_due(total: Decimal, paid_amount: Decimal) -> Decimal {
    (total - paid_amount).max(Decimal::ZERO)
}
