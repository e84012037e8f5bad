//! Multi-session treatment plans.

use super::Record;
use crate::finance::{derive, PaymentStatus};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentStatus {
    #[default]
    Planned,
    #[serde(alias = "in_progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl TreatmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentStatus::Planned => "planned",
            TreatmentStatus::InProgress => "in-progress",
            TreatmentStatus::Completed => "completed",
            TreatmentStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status string, accepting the legacy underscore spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(TreatmentStatus::Planned),
            "in-progress" | "in_progress" => Some(TreatmentStatus::InProgress),
            "completed" => Some(TreatmentStatus::Completed),
            "cancelled" => Some(TreatmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// One recorded visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentSession {
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
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
    /// Manual override for the headline progress figure.
    pub progress_percent: Option<u8>,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Treatment {
    /// Actual cost when recorded and non-zero, else the estimate.
    pub fn total_cost(&self) -> Decimal {
        match self.actual_cost {
            Some(cost) if !cost.is_zero() => cost,
            _ => self.estimated_cost,
        }
    }

    /// Paid plus advance, saturating at `Decimal::MAX`. A saturated sum
    /// already exceeds any representable cost.
    pub fn total_paid(&self) -> Decimal {
        self.paid_amount.saturating_add(self.advance_paid)
    }
}

/// Re-derive `payment_status` from everything paid so far.
///
/// Paid amounts are left as recorded: the cost of an open plan may still
/// change, so nothing is clamped here.
pub fn refresh_payment_status(treatment: &mut Treatment) {
    treatment.payment_status = derive(treatment.total_paid(), treatment.total_cost()).status;
}

impl Record for Treatment {
    const COLLECTION: &'static str = "treatments";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
