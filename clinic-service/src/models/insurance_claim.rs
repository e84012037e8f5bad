//! Insurance claims filed on behalf of patients.

use super::Record;
use crate::finance::{FinancialDocument, Ledger, Lines, PaymentStatus};
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Review outcome reported by the insurer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimStatus {
    #[default]
    Submitted,
    #[serde(alias = "under_review")]
    UnderReview,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceClaim {
    #[serde(rename = "_id")]
    pub id: String,
    pub claim_id: Option<String>,
    pub patient_id: String,
    pub billing_id: Option<String>,
    pub provider: String,
    pub policy_number: String,
    pub claim_amount: Decimal,
    pub approved_amount: Option<Decimal>,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub status: ClaimStatus,
    pub submitted_on: NaiveDate,
    pub notes: Option<String>,
    pub created_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl InsuranceClaim {
    /// The insurer's approved figure once known, otherwise the amount claimed.
    pub fn payable_amount(&self) -> Decimal {
        self.approved_amount.unwrap_or(self.claim_amount)
    }
}

impl Record for InsuranceClaim {
    const COLLECTION: &'static str = "insurance_claims";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for InsuranceClaim {
    const KIND: DocumentKind = DocumentKind::InsuranceClaim;

    fn code(&self) -> Option<&str> {
        self.claim_id.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.claim_id = Some(code);
    }
}

impl FinancialDocument for InsuranceClaim {
    fn ledger(&mut self) -> Ledger<'_> {
        Ledger {
            lines: Lines::Flat(self.payable_amount()),
            tax: Decimal::ZERO,
            discount: Decimal::ZERO,
            subtotal: &mut self.subtotal,
            total: &mut self.total,
            paid_amount: &mut self.paid_amount,
            status: &mut self.payment_status,
        }
    }
}
