//! Stock keeping for consumables and instruments.

use super::Record;
use crate::finance::AmountError;
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub sku: Option<String>,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit: String,
    pub unit_cost: Decimal,
    pub reorder_level: u32,
    pub supplier: Option<String>,
    pub created_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Stock has fallen to or below the reorder level.
pub fn needs_reorder(item: &InventoryItem) -> bool {
    item.quantity <= item.reorder_level
}

/// Quantity on hand valued at unit cost.
pub fn stock_value(item: &InventoryItem) -> Result<Decimal, AmountError> {
    Decimal::from(item.quantity)
        .checked_mul(item.unit_cost)
        .ok_or(AmountError::Overflow("stock value"))
}

impl Record for InventoryItem {
    const COLLECTION: &'static str = "inventory_items";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for InventoryItem {
    const KIND: DocumentKind = DocumentKind::InventoryItem;

    fn code(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.sku = Some(code);
    }
}
