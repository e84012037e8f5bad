//! Persisted records for clinic-service.

mod billing;
mod employee;
mod expense;
mod insurance_claim;
mod inventory_item;
mod inventory_order;
mod lab_work;
mod payment;
mod prescription;
mod treatment;

pub use billing::Billing;
pub use employee::{full_name, Employee, StaffRole};
pub use expense::{Expense, ExpenseCategory};
pub use insurance_claim::{ClaimStatus, InsuranceClaim};
pub use inventory_item::{needs_reorder, stock_value, InventoryItem};
pub use inventory_order::{InventoryOrder, OrderStatus};
pub use lab_work::{LabStatus, LabWork};
pub use payment::{Payment, PaymentMethod, PaymentRecordStatus};
pub use prescription::{Medication, Prescription};
pub use treatment::{refresh_payment_status, Treatment, TreatmentSession, TreatmentStatus};

use serde::{de::DeserializeOwned, Serialize};

/// A document stored in its own MongoDB collection, keyed by a string `_id`.
pub trait Record: Serialize + DeserializeOwned + Unpin + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Bump `updated_at` before a replace.
    fn touch(&mut self);
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
