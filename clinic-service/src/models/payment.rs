//! Standalone payment receipts.

use super::Record;
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    #[serde(alias = "bank_transfer")]
    BankTransfer,
    Cheque,
    Insurance,
}

/// Settlement state of a payment, set by whoever records the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentRecordStatus {
    Pending,
    #[default]
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
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
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Record for Payment {
    const COLLECTION: &'static str = "payments";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for Payment {
    const KIND: DocumentKind = DocumentKind::Payment;

    fn code(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.payment_id = Some(code);
    }
}
