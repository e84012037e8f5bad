//! Patient invoice.

use super::{PaymentMethod, Record};
use crate::finance::{FinancialDocument, Ledger, LineClamp, LineItem, Lines, PaymentStatus};
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    #[serde(rename = "_id")]
    pub id: String,
    pub invoice_number: Option<String>,
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub treatment_id: Option<String>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Billing {
    pub fn new(patient_id: String, created_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            invoice_number: None,
            patient_id,
            appointment_id: None,
            treatment_id: None,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            discount: Decimal::ZERO,
            total: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            status: PaymentStatus::Pending,
            payment_method: None,
            due_date: None,
            notes: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Billing {
    const COLLECTION: &'static str = "billings";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for Billing {
    const KIND: DocumentKind = DocumentKind::Invoice;

    fn code(&self) -> Option<&str> {
        self.invoice_number.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.invoice_number = Some(code);
    }
}

impl FinancialDocument for Billing {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::normalize;
    use mongodb::bson::{from_document, to_document, Bson};

    #[test]
    fn stored_shape_uses_wire_field_names() {
        let mut billing = Billing::new("patient-1".to_string(), "staff-1".to_string());
        billing.items.push(LineItem::new("Extraction", 1, Decimal::from(120)));
        billing.assign_code("INV2024030001".to_string());
        normalize(&mut billing).unwrap();

        let stored = to_document(&billing).unwrap();
        assert_eq!(stored.get_str("_id").unwrap(), billing.id);
        assert_eq!(stored.get_str("invoiceNumber").unwrap(), "INV2024030001");
        assert_eq!(stored.get_str("paidAmount").unwrap(), "0");
        assert_eq!(stored.get_str("status").unwrap(), "pending");

        let item = stored.get_array("items").unwrap()[0].as_document().unwrap();
        assert_eq!(item.get_str("unitPrice").unwrap(), "120");
        assert_eq!(item.get_str("total").unwrap(), "120");
    }

    #[test]
    fn timestamps_are_stored_as_bson_dates() {
        let billing = Billing::new("patient-1".to_string(), "staff-1".to_string());

        let stored = to_document(&billing).unwrap();
        assert!(matches!(stored.get("createdAt"), Some(Bson::DateTime(_))));
        assert!(matches!(stored.get("updatedAt"), Some(Bson::DateTime(_))));

        let restored: Billing = from_document(stored).unwrap();
        assert_eq!(
            restored.created_at.timestamp_millis(),
            billing.created_at.timestamp_millis()
        );
    }
}
