use super::{line_items, non_negative, rfc3339, LineItemRequest};
use crate::finance::{LineItem, PaymentStatus};
use crate::models::{new_id, Medication, Prescription};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    #[validate(length(min = 1, message = "Medication name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Dosage is required"))]
    pub dosage: String,
    #[validate(length(min = 1, message = "Frequency is required"))]
    pub frequency: String,
    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration: String,
    pub instructions: Option<String>,
}

impl From<MedicationRequest> for Medication {
    fn from(m: MedicationRequest) -> Self {
        Medication {
            name: m.name,
            dosage: m.dosage,
            frequency: m.frequency,
            duration: m.duration,
            instructions: m.instructions,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionRequest {
    #[validate(length(min = 1, message = "Patient is required"))]
    pub patient_id: String,
    #[validate(length(min = 1, message = "Dentist is required"))]
    pub dentist_id: String,
    #[validate(length(min = 1, message = "At least one medication is required"), nested)]
    pub medications: Vec<MedicationRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<LineItemRequest>,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub issued_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreatePrescriptionRequest {
    pub fn into_prescription(self, created_by: String) -> Prescription {
        let now = Utc::now();
        Prescription {
            id: new_id(),
            prescription_number: None,
            patient_id: self.patient_id,
            dentist_id: self.dentist_id,
            medications: self.medications.into_iter().map(Medication::from).collect(),
            items: line_items(self.items),
            subtotal: Decimal::ZERO,
            tax: self.tax.unwrap_or_default(),
            discount: self.discount.unwrap_or_default(),
            total: Decimal::ZERO,
            paid_amount: self.paid_amount.unwrap_or_default(),
            status: PaymentStatus::Pending,
            issued_on: self.issued_on.unwrap_or_else(|| Utc::now().date_naive()),
            notes: self.notes,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrescriptionRequest {
    #[validate(length(min = 1, message = "At least one medication is required"), nested)]
    pub medications: Option<Vec<MedicationRequest>>,
    #[validate(nested)]
    pub items: Option<Vec<LineItemRequest>>,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub notes: Option<String>,
}

impl UpdatePrescriptionRequest {
    pub fn apply(self, prescription: &mut Prescription) {
        if let Some(medications) = self.medications {
            prescription.medications = medications.into_iter().map(Medication::from).collect();
        }
        if let Some(items) = self.items {
            prescription.items = line_items(items);
        }
        if let Some(tax) = self.tax {
            prescription.tax = tax;
        }
        if let Some(discount) = self.discount {
            prescription.discount = discount;
        }
        if let Some(paid_amount) = self.paid_amount {
            prescription.paid_amount = paid_amount;
        }
        if let Some(notes) = self.notes {
            prescription.notes = Some(notes);
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionResponse {
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<Prescription> for PrescriptionResponse {
    fn from(prescription: Prescription) -> Self {
        Self {
            id: prescription.id,
            prescription_number: prescription.prescription_number,
            patient_id: prescription.patient_id,
            dentist_id: prescription.dentist_id,
            medications: prescription.medications,
            items: prescription.items,
            subtotal: prescription.subtotal,
            tax: prescription.tax,
            discount: prescription.discount,
            total: prescription.total,
            paid_amount: prescription.paid_amount,
            status: prescription.status,
            issued_on: prescription.issued_on,
            notes: prescription.notes,
            created_by: prescription.created_by,
            created_at: rfc3339(&prescription.created_at),
            updated_at: rfc3339(&prescription.updated_at),
        }
    }
}
