//! Purchase orders raised against suppliers.

use super::Record;
use crate::finance::{FinancialDocument, Ledger, LineClamp, LineItem, Lines, PaymentStatus};
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Ordered,
    Received,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_number: Option<String>,
    pub supplier: String,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Record for InventoryOrder {
    const COLLECTION: &'static str = "inventory_orders";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for InventoryOrder {
    const KIND: DocumentKind = DocumentKind::PurchaseOrder;

    fn code(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.order_number = Some(code);
    }
}

impl FinancialDocument for InventoryOrder {
    fn ledger(&mut self) -> Ledger<'_> {
        Ledger {
            lines: Lines::Itemized {
                items: &mut self.items,
                clamp: LineClamp::FloorAtZero,
            },
            tax: self.tax,
            discount: self.discount,
            subtotal: &mut self.subtotal,
            total: &mut self.total,
            paid_amount: &mut self.paid_amount,
            status: &mut self.payment_status,
        }
    }
}
