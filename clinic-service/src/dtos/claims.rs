use super::{non_negative, rfc3339};
use crate::finance::PaymentStatus;
use crate::models::{new_id, ClaimStatus, InsuranceClaim};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    #[validate(length(min = 1, message = "Patient is required"))]
    pub patient_id: String,
    pub billing_id: Option<String>,
    #[validate(length(min = 1, message = "Insurance provider is required"))]
    pub provider: String,
    #[validate(length(min = 1, message = "Policy number is required"))]
    pub policy_number: String,
    #[validate(custom(function = "non_negative"))]
    pub claim_amount: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub approved_amount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub submitted_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateClaimRequest {
    pub fn into_claim(self, created_by: String) -> InsuranceClaim {
        let now = Utc::now();
        InsuranceClaim {
            id: new_id(),
            claim_id: None,
            patient_id: self.patient_id,
            billing_id: self.billing_id,
            provider: self.provider,
            policy_number: self.policy_number,
            claim_amount: self.claim_amount,
            approved_amount: self.approved_amount,
            subtotal: Decimal::ZERO,
            total: Decimal::ZERO,
            paid_amount: self.paid_amount.unwrap_or_default(),
            payment_status: PaymentStatus::Pending,
            status: ClaimStatus::Submitted,
            submitted_on: self.submitted_on.unwrap_or_else(|| Utc::now().date_naive()),
            notes: self.notes,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClaimRequest {
    #[validate(length(min = 1, message = "Insurance provider is required"))]
    pub provider: Option<String>,
    #[validate(length(min = 1, message = "Policy number is required"))]
    pub policy_number: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub claim_amount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub approved_amount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    /// Review outcome reported by the insurer.
    pub status: Option<ClaimStatus>,
    pub notes: Option<String>,
}

impl UpdateClaimRequest {
    pub fn apply(self, claim: &mut InsuranceClaim) {
        if let Some(provider) = self.provider {
            claim.provider = provider;
        }
        if let Some(policy_number) = self.policy_number {
            claim.policy_number = policy_number;
        }
        if let Some(amount) = self.claim_amount {
            claim.claim_amount = amount;
        }
        if let Some(amount) = self.approved_amount {
            claim.approved_amount = Some(amount);
        }
        if let Some(paid_amount) = self.paid_amount {
            claim.paid_amount = paid_amount;
        }
        if let Some(status) = self.status {
            claim.status = status;
        }
        if let Some(notes) = self.notes {
            claim.notes = Some(notes);
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<InsuranceClaim> for ClaimResponse {
    fn from(claim: InsuranceClaim) -> Self {
        Self {
            id: claim.id,
            claim_id: claim.claim_id,
            patient_id: claim.patient_id,
            billing_id: claim.billing_id,
            provider: claim.provider,
            policy_number: claim.policy_number,
            claim_amount: claim.claim_amount,
            approved_amount: claim.approved_amount,
            subtotal: claim.subtotal,
            total: claim.total,
            paid_amount: claim.paid_amount,
            payment_status: claim.payment_status,
            status: claim.status,
            submitted_on: claim.submitted_on,
            notes: claim.notes,
            created_by: claim.created_by,
            created_at: rfc3339(&claim.created_at),
            updated_at: rfc3339(&claim.updated_at),
        }
    }
}
