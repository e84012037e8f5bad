//! Work sent out to dental laboratories.

use super::Record;
use crate::finance::{FinancialDocument, Ledger, Lines, PaymentStatus};
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabStatus {
    #[default]
    Ordered,
    #[serde(alias = "in_progress")]
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabWork {
    #[serde(rename = "_id")]
    pub id: String,
    pub lab_number: Option<String>,
    pub patient_id: String,
    pub dentist_id: String,
    pub treatment_id: Option<String>,
    pub lab_name: String,
    pub work_type: String,
    pub shade: Option<String>,
    pub cost: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub status: LabStatus,
    pub sent_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Record for LabWork {
    const COLLECTION: &'static str = "lab_works";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for LabWork {
    const KIND: DocumentKind = DocumentKind::LabWork;

    fn code(&self) -> Option<&str> {
        self.lab_number.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.lab_number = Some(code);
    }
}

impl FinancialDocument for LabWork {
    fn ledger(&mut self) -> Ledger<'_> {
        Ledger {
            lines: Lines::Flat(self.cost),
            tax: self.tax,
            discount: self.discount,
            subtotal: &mut self.subtotal,
            total: &mut self.total,
            paid_amount: &mut self.paid_amount,
            status: &mut self.payment_status,
        }
    }
}
