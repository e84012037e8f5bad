pub mod billings;
pub mod employees;
pub mod expenses;
pub mod health;
pub mod insurance_claims;
pub mod inventory_items;
pub mod inventory_orders;
pub mod lab_works;
pub mod payments;
pub mod prescriptions;
pub mod treatments;

mod financial;

use crate::finance::StatusError;
use service_core::error::AppError;

/// Illegal state transitions surface as 409.
pub(crate) fn status_conflict(err: StatusError) -> AppError {
    AppError::Conflict(anyhow::Error::new(err))
}
