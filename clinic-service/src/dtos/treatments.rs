use super::{non_negative, rfc3339};
use crate::finance::PaymentStatus;
use crate::models::{new_id, Treatment, TreatmentSession, TreatmentStatus};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

const MAX_PERCENT: u8 = 100;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTreatmentRequest {
    #[validate(length(min = 1, message = "Patient is required"))]
    pub patient_id: String,
    #[validate(length(min = 1, message = "Dentist is required"))]
    pub dentist_id: String,
    pub procedure_id: Option<String>,
    pub billing_id: Option<String>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub status: Option<TreatmentStatus>,
    #[validate(range(min = 1, message = "At least one session must be planned"))]
    pub planned_sessions: u32,
    #[validate(custom(function = "non_negative"))]
    pub estimated_cost: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub actual_cost: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub advance_paid: Option<Decimal>,
    pub progress_percent: Option<u8>,
    pub notes: Option<String>,
}

impl CreateTreatmentRequest {
    pub fn into_treatment(self, created_by: String) -> Treatment {
        let now = Utc::now();
        Treatment {
            id: new_id(),
            patient_id: self.patient_id,
            dentist_id: self.dentist_id,
            procedure_id: self.procedure_id,
            billing_id: self.billing_id,
            title: self.title,
            status: self.status.unwrap_or_default(),
            planned_sessions: self.planned_sessions,
            sessions: Vec::new(),
            estimated_cost: self.estimated_cost,
            actual_cost: self.actual_cost,
            paid_amount: self.paid_amount.unwrap_or_default(),
            advance_paid: self.advance_paid.unwrap_or_default(),
            progress_percent: self.progress_percent.map(|p| p.min(MAX_PERCENT)),
            payment_status: PaymentStatus::Pending,
            notes: self.notes,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTreatmentRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub billing_id: Option<String>,
    pub status: Option<TreatmentStatus>,
    #[validate(range(min = 1, message = "At least one session must be planned"))]
    pub planned_sessions: Option<u32>,
    #[validate(custom(function = "non_negative"))]
    pub estimated_cost: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub actual_cost: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub advance_paid: Option<Decimal>,
    pub progress_percent: Option<u8>,
    pub notes: Option<String>,
}

impl UpdateTreatmentRequest {
    pub fn apply(self, treatment: &mut Treatment) {
        if let Some(title) = self.title {
            treatment.title = title;
        }
        if let Some(billing_id) = self.billing_id {
            treatment.billing_id = Some(billing_id);
        }
        if let Some(status) = self.status {
            treatment.status = status;
        }
        if let Some(planned) = self.planned_sessions {
            treatment.planned_sessions = planned;
        }
        if let Some(cost) = self.estimated_cost {
            treatment.estimated_cost = cost;
        }
        if let Some(cost) = self.actual_cost {
            treatment.actual_cost = Some(cost);
        }
        if let Some(paid_amount) = self.paid_amount {
            treatment.paid_amount = paid_amount;
        }
        if let Some(advance) = self.advance_paid {
            treatment.advance_paid = advance;
        }
        if let Some(percent) = self.progress_percent {
            treatment.progress_percent = Some(percent.min(MAX_PERCENT));
        }
        if let Some(notes) = self.notes {
            treatment.notes = Some(notes);
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSessionRequest {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Duration must be at least one minute"))]
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

impl AddSessionRequest {
    pub fn into_session(self) -> TreatmentSession {
        TreatmentSession {
            date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
            duration_minutes: self.duration_minutes,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub patient_id: String,
    pub dentist_id: String,
    pub procedure_id: Option<String>,
    pub billing_id: Option<String>,
    pub title: String,
    pub status: TreatmentStatus,
    pub planned_sessions: u32,
    pub sessions: Vec<TreatmentSession>,
    pub estimated_cost: Decimal,
    pub actual_cost: Option<Decimal>,
    pub paid_amount: Decimal,
    pub advance_paid: Decimal,
    pub progress_percent: Option<u8>,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Treatment> for TreatmentResponse {
    fn from(treatment: Treatment) -> Self {
        Self {
            id: treatment.id,
            patient_id: treatment.patient_id,
            dentist_id: treatment.dentist_id,
            procedure_id: treatment.procedure_id,
            billing_id: treatment.billing_id,
            title: treatment.title,
            status: treatment.status,
            planned_sessions: treatment.planned_sessions,
            sessions: treatment.sessions,
            estimated_cost: treatment.estimated_cost,
            actual_cost: treatment.actual_cost,
            paid_amount: treatment.paid_amount,
            advance_paid: treatment.advance_paid,
            progress_percent: treatment.progress_percent,
            payment_status: treatment.payment_status,
            notes: treatment.notes,
            created_by: treatment.created_by,
            created_at: rfc3339(&treatment.created_at),
            updated_at: rfc3339(&treatment.updated_at),
        }
    }
}

/// Canonical spelling of a treatment-status filter. Unknown values are passed
/// through untouched and simply match nothing.
pub fn treatment_status_filter(raw: &str) -> String {
    TreatmentStatus::parse(raw)
        .map(|status| status.as_str().to_string())
        .unwrap_or_else(|| raw.to_string())
}
