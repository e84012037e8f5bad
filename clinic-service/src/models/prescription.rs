//! Prescriptions, billed like an invoice for dispensed medication.

use super::Record;
use crate::finance::{FinancialDocument, Ledger, LineClamp, LineItem, Lines, PaymentStatus};
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "_id")]
    pub id: String,
    pub prescription_number: Option<String>,
    pub patient_id: String,
    pub dentist_id: String,
    pub medications: Vec<Medication>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub status: PaymentStatus,
    pub issued_on: NaiveDate,
    pub notes: Option<String>,
    pub created_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Record for Prescription {
    const COLLECTION: &'static str = "prescriptions";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for Prescription {
    const KIND: DocumentKind = DocumentKind::Prescription;

    fn code(&self) -> Option<&str> {
        self.prescription_number.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.prescription_number = Some(code);
    }
}

impl FinancialDocument for Prescription {
    fn ledger(&mut self) -> Ledger<'_> {
        Ledger {
            lines: Lines::Itemized {
                items: &mut self.items,
                clamp: LineClamp::Unclamped,
            },
            tax: self.tax,
            discount: self.discount,
            subtotal: &mut self.subtotal,
            total: &mut self.total,
            paid_amount: &mut self.paid_amount,
            status: &mut self.status,
        }
    }
}
