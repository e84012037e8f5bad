use super::{line_items, non_negative, positive, rfc3339, LineItemRequest};
use crate::finance::{balance_due, LineItem, PaymentStatus};
use crate::models::{Billing, PaymentMethod};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillingRequest {
    #[validate(length(min = 1, message = "Patient is required"))]
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub treatment_id: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<LineItemRequest>,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateBillingRequest {
    pub fn into_billing(self, created_by: String) -> Billing {
        let mut billing = Billing::new(self.patient_id, created_by);
        billing.appointment_id = self.appointment_id;
        billing.treatment_id = self.treatment_id;
        billing.items = line_items(self.items);
        billing.tax = self.tax.unwrap_or_default();
        billing.discount = self.discount.unwrap_or_default();
        billing.paid_amount = self.paid_amount.unwrap_or_default();
        billing.payment_method = self.payment_method;
        billing.due_date = self.due_date;
        billing.notes = self.notes;
        billing
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillingRequest {
    pub appointment_id: Option<String>,
    pub treatment_id: Option<String>,
    #[validate(nested)]
    pub items: Option<Vec<LineItemRequest>>,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateBillingRequest {
    pub fn apply(self, billing: &mut Billing) {
        if let Some(appointment_id) = self.appointment_id {
            billing.appointment_id = Some(appointment_id);
        }
        if let Some(treatment_id) = self.treatment_id {
            billing.treatment_id = Some(treatment_id);
        }
        if let Some(items) = self.items {
            billing.items = line_items(items);
        }
        if let Some(tax) = self.tax {
            billing.tax = tax;
        }
        if let Some(discount) = self.discount {
            billing.discount = discount;
        }
        if let Some(paid_amount) = self.paid_amount {
            billing.paid_amount = paid_amount;
        }
        if let Some(method) = self.payment_method {
            billing.payment_method = Some(method);
        }
        if let Some(due_date) = self.due_date {
            billing.due_date = Some(due_date);
        }
        if let Some(notes) = self.notes {
            billing.notes = Some(notes);
        }
    }
}

/// An amount received against an invoice.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub invoice_number: Option<String>,
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub treatment_id: Option<String>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub balance_due: Decimal,
    pub status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Billing> for BillingResponse {
    fn from(billing: Billing) -> Self {
        Self {
            balance_due: balance_due(billing.total, billing.paid_amount),
            id: billing.id,
            invoice_number: billing.invoice_number,
            patient_id: billing.patient_id,
            appointment_id: billing.appointment_id,
            treatment_id: billing.treatment_id,
            items: billing.items,
            subtotal: billing.subtotal,
            tax: billing.tax,
            discount: billing.discount,
            total: billing.total,
            paid_amount: billing.paid_amount,
            status: billing.status,
            payment_method: billing.payment_method,
            due_date: billing.due_date,
            notes: billing.notes,
            created_by: billing.created_by,
            created_at: rfc3339(&billing.created_at),
            updated_at: rfc3339(&billing.updated_at),
        }
    }
}
