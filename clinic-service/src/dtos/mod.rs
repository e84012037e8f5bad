//! Request and response bodies.
//!
//! Requests never carry server-computed fields: totals, statuses and codes
//! sent by a client are ignored during deserialization.

mod billings;
mod claims;
mod employees;
mod expenses;
mod inventory;
mod lab_works;
mod payments;
mod prescriptions;
mod treatments;

pub use billings::{BillingResponse, CreateBillingRequest, RecordPaymentRequest, UpdateBillingRequest};
pub use claims::{ClaimResponse, CreateClaimRequest, UpdateClaimRequest};
pub use employees::{CreateEmployeeRequest, EmployeeResponse, UpdateEmployeeRequest};
pub use expenses::{CreateExpenseRequest, ExpenseResponse, UpdateExpenseRequest};
pub use inventory::{
    CreateInventoryItemRequest, CreateInventoryOrderRequest, InventoryItemResponse,
    InventoryOrderResponse, UpdateInventoryItemRequest, UpdateInventoryOrderRequest,
};
pub use lab_works::{CreateLabWorkRequest, LabWorkResponse, UpdateLabWorkRequest};
pub use payments::{CreatePaymentRequest, PaymentResponse};
pub use prescriptions::{
    CreatePrescriptionRequest, MedicationRequest, PrescriptionResponse, UpdatePrescriptionRequest,
};
pub use treatments::{
    treatment_status_filter, AddSessionRequest, CreateTreatmentRequest, TreatmentResponse,
    UpdateTreatmentRequest,
};

use crate::finance::{LineItem, ManualStatus, PaymentStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Query string accepted by every list route. Filters that do not apply to a
/// collection are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub patient_id: Option<String>,
    pub category: Option<String>,
    pub role: Option<String>,
    pub low_stock: Option<bool>,
}

impl ListParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn skip(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }
}

/// Canonical spelling of a payment-status filter. Unknown values are passed
/// through untouched and simply match nothing.
pub fn payment_status_filter(raw: &str) -> String {
    PaymentStatus::parse(raw)
        .map(|status| status.as_str().to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// API form of a stored timestamp: RFC 3339 in UTC with milliseconds.
pub(crate) fn rfc3339(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, total: u64, params: &ListParams) -> Self {
        let page_size = params.page_size();
        Self {
            data,
            total,
            page: params.page(),
            page_size,
            total_pages: total.div_ceil(page_size),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    #[validate(length(min = 1, message = "Item description is required"))]
    pub description: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[validate(custom(function = "non_negative"))]
    pub unit_price: Decimal,
}

impl From<LineItemRequest> for LineItem {
    fn from(item: LineItemRequest) -> Self {
        LineItem::new(item.description, item.quantity, item.unit_price)
    }
}

pub(crate) fn line_items(items: Vec<LineItemRequest>) -> Vec<LineItem> {
    items.into_iter().map(LineItem::from).collect()
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ManualStatusRequest {
    pub status: ManualStatus,
}

pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative")
            .with_message(Cow::Borrowed("Amount must not be negative")));
    }
    Ok(())
}

pub fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive")
            .with_message(Cow::Borrowed("Amount must be greater than zero")));
    }
    Ok(())
}
