use super::{line_items, non_negative, rfc3339, LineItemRequest};
use crate::finance::{AmountError, LineItem, PaymentStatus};
use crate::models::{
    needs_reorder, new_id, stock_value, InventoryItem, InventoryOrder, OrderStatus,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryOrderRequest {
    #[validate(length(min = 1, message = "Supplier is required"))]
    pub supplier: String,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<LineItemRequest>,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateInventoryOrderRequest {
    pub fn into_order(self, created_by: String) -> InventoryOrder {
        let now = Utc::now();
        InventoryOrder {
            id: new_id(),
            order_number: None,
            supplier: self.supplier,
            items: line_items(self.items),
            subtotal: Decimal::ZERO,
            tax: self.tax.unwrap_or_default(),
            discount: self.discount.unwrap_or_default(),
            total: Decimal::ZERO,
            paid_amount: self.paid_amount.unwrap_or_default(),
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Ordered,
            expected_date: self.expected_date,
            notes: self.notes,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryOrderRequest {
    #[validate(length(min = 1, message = "Supplier is required"))]
    pub supplier: Option<String>,
    #[validate(nested)]
    pub items: Option<Vec<LineItemRequest>>,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    /// Delivery state of the order, independent of its payment status.
    pub status: Option<OrderStatus>,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateInventoryOrderRequest {
    pub fn apply(self, order: &mut InventoryOrder) {
        if let Some(supplier) = self.supplier {
            order.supplier = supplier;
        }
        if let Some(items) = self.items {
            order.items = line_items(items);
        }
        if let Some(tax) = self.tax {
            order.tax = tax;
        }
        if let Some(discount) = self.discount {
            order.discount = discount;
        }
        if let Some(paid_amount) = self.paid_amount {
            order.paid_amount = paid_amount;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(date) = self.expected_date {
            order.expected_date = Some(date);
        }
        if let Some(notes) = self.notes {
            order.notes = Some(notes);
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemRequest {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub quantity: u32,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    #[validate(custom(function = "non_negative"))]
    pub unit_cost: Decimal,
    #[serde(default)]
    pub reorder_level: u32,
    pub supplier: Option<String>,
}

impl CreateInventoryItemRequest {
    pub fn into_item(self, created_by: String) -> InventoryItem {
        let now = Utc::now();
        InventoryItem {
            id: new_id(),
            sku: None,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            unit: self.unit,
            unit_cost: self.unit_cost,
            reorder_level: self.reorder_level,
            supplier: self.supplier,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItemRequest {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,
    pub quantity: Option<u32>,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub unit_cost: Option<Decimal>,
    pub reorder_level: Option<u32>,
    pub supplier: Option<String>,
}

impl UpdateInventoryItemRequest {
    pub fn apply(self, item: &mut InventoryItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(unit_cost) = self.unit_cost {
            item.unit_cost = unit_cost;
        }
        if let Some(level) = self.reorder_level {
            item.reorder_level = level;
        }
        if let Some(supplier) = self.supplier {
            item.supplier = Some(supplier);
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOrderResponse {
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<InventoryOrder> for InventoryOrderResponse {
    fn from(order: InventoryOrder) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            supplier: order.supplier,
            items: order.items,
            subtotal: order.subtotal,
            tax: order.tax,
            discount: order.discount,
            total: order.total,
            paid_amount: order.paid_amount,
            payment_status: order.payment_status,
            status: order.status,
            expected_date: order.expected_date,
            notes: order.notes,
            created_by: order.created_by,
            created_at: rfc3339(&order.created_at),
            updated_at: rfc3339(&order.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub sku: Option<String>,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit: String,
    pub unit_cost: Decimal,
    pub reorder_level: u32,
    pub needs_reorder: bool,
    pub stock_value: Decimal,
    pub supplier: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<InventoryItem> for InventoryItemResponse {
    type Error = AmountError;

    fn try_from(item: InventoryItem) -> Result<Self, Self::Error> {
        Ok(Self {
            needs_reorder: needs_reorder(&item),
            stock_value: stock_value(&item)?,
            id: item.id,
            sku: item.sku,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            unit: item.unit,
            unit_cost: item.unit_cost,
            reorder_level: item.reorder_level,
            supplier: item.supplier,
            created_by: item.created_by,
            created_at: rfc3339(&item.created_at),
            updated_at: rfc3339(&item.updated_at),
        })
    }
}
