use super::{non_negative, rfc3339};
use crate::finance::PaymentStatus;
use crate::models::{new_id, LabStatus, LabWork};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabWorkRequest {
    #[validate(length(min = 1, message = "Patient is required"))]
    pub patient_id: String,
    #[validate(length(min = 1, message = "Dentist is required"))]
    pub dentist_id: String,
    pub treatment_id: Option<String>,
    #[validate(length(min = 1, message = "Lab name is required"))]
    pub lab_name: String,
    #[validate(length(min = 1, message = "Work type is required"))]
    pub work_type: String,
    pub shade: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub cost: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub sent_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateLabWorkRequest {
    pub fn into_lab_work(self, created_by: String) -> LabWork {
        let now = Utc::now();
        LabWork {
            id: new_id(),
            lab_number: None,
            patient_id: self.patient_id,
            dentist_id: self.dentist_id,
            treatment_id: self.treatment_id,
            lab_name: self.lab_name,
            work_type: self.work_type,
            shade: self.shade,
            cost: self.cost,
            subtotal: Decimal::ZERO,
            tax: self.tax.unwrap_or_default(),
            discount: self.discount.unwrap_or_default(),
            total: Decimal::ZERO,
            paid_amount: self.paid_amount.unwrap_or_default(),
            payment_status: PaymentStatus::Pending,
            status: LabStatus::Ordered,
            sent_on: self.sent_on,
            due_on: self.due_on,
            notes: self.notes,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLabWorkRequest {
    #[validate(length(min = 1, message = "Lab name is required"))]
    pub lab_name: Option<String>,
    #[validate(length(min = 1, message = "Work type is required"))]
    pub work_type: Option<String>,
    pub shade: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub cost: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub status: Option<LabStatus>,
    pub sent_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateLabWorkRequest {
    pub fn apply(self, work: &mut LabWork) {
        if let Some(lab_name) = self.lab_name {
            work.lab_name = lab_name;
        }
        if let Some(work_type) = self.work_type {
            work.work_type = work_type;
        }
        if let Some(shade) = self.shade {
            work.shade = Some(shade);
        }
        if let Some(cost) = self.cost {
            work.cost = cost;
        }
        if let Some(tax) = self.tax {
            work.tax = tax;
        }
        if let Some(discount) = self.discount {
            work.discount = discount;
        }
        if let Some(paid_amount) = self.paid_amount {
            work.paid_amount = paid_amount;
        }
        if let Some(status) = self.status {
            work.status = status;
        }
        if let Some(sent_on) = self.sent_on {
            work.sent_on = Some(sent_on);
        }
        if let Some(due_on) = self.due_on {
            work.due_on = Some(due_on);
        }
        if let Some(notes) = self.notes {
            work.notes = Some(notes);
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabWorkResponse {
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<LabWork> for LabWorkResponse {
    fn from(work: LabWork) -> Self {
        Self {
            id: work.id,
            lab_number: work.lab_number,
            patient_id: work.patient_id,
            dentist_id: work.dentist_id,
            treatment_id: work.treatment_id,
            lab_name: work.lab_name,
            work_type: work.work_type,
            shade: work.shade,
            cost: work.cost,
            subtotal: work.subtotal,
            tax: work.tax,
            discount: work.discount,
            total: work.total,
            paid_amount: work.paid_amount,
            payment_status: work.payment_status,
            status: work.status,
            sent_on: work.sent_on,
            due_on: work.due_on,
            notes: work.notes,
            created_by: work.created_by,
            created_at: rfc3339(&work.created_at),
            updated_at: rfc3339(&work.updated_at),
        }
    }
}
