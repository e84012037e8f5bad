use super::{positive, rfc3339};
use crate::models::{new_id, Payment, PaymentMethod, PaymentRecordStatus};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, message = "Patient is required"))]
    pub patient_id: String,
    pub billing_id: Option<String>,
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: Option<PaymentRecordStatus>,
    pub reference: Option<String>,
    pub paid_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreatePaymentRequest {
    pub fn into_payment(self, created_by: String) -> Payment {
        let now = Utc::now();
        Payment {
            id: new_id(),
            payment_id: None,
            patient_id: self.patient_id,
            billing_id: self.billing_id,
            amount: self.amount,
            method: self.method,
            status: self.status.unwrap_or_default(),
            reference: self.reference,
            paid_on: self.paid_on.unwrap_or_else(|| Utc::now().date_naive()),
            notes: self.notes,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub payment_id: Option<String>,
    pub patient_id: String,
    pub billing_id: Option<String>,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentRecordStatus,
    pub reference: Option<String>,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            payment_id: payment.payment_id,
            patient_id: payment.patient_id,
            billing_id: payment.billing_id,
            amount: payment.amount,
            method: payment.method,
            status: payment.status,
            reference: payment.reference,
            paid_on: payment.paid_on,
            notes: payment.notes,
            created_by: payment.created_by,
            created_at: rfc3339(&payment.created_at),
            updated_at: rfc3339(&payment.updated_at),
        }
    }
}
