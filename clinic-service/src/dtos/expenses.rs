use super::{non_negative, rfc3339};
use crate::finance::PaymentStatus;
use crate::models::{Expense, ExpenseCategory, PaymentMethod};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub category: ExpenseCategory,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub vendor: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    /// Defaults to today.
    pub expense_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateExpenseRequest {
    pub fn into_expense(self, created_by: String) -> Expense {
        let now = Utc::now();
        Expense {
            id: crate::models::new_id(),
            expense_id: None,
            category: self.category,
            description: self.description,
            vendor: self.vendor,
            amount: self.amount,
            subtotal: Decimal::ZERO,
            tax: self.tax.unwrap_or_default(),
            discount: self.discount.unwrap_or_default(),
            total: Decimal::ZERO,
            paid_amount: self.paid_amount.unwrap_or_default(),
            status: PaymentStatus::Pending,
            payment_method: self.payment_method,
            expense_date: self.expense_date.unwrap_or_else(|| Utc::now().date_naive()),
            notes: self.notes,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub category: Option<ExpenseCategory>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub vendor: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub amount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub paid_amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub expense_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateExpenseRequest {
    pub fn apply(self, expense: &mut Expense) {
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(vendor) = self.vendor {
            expense.vendor = Some(vendor);
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(tax) = self.tax {
            expense.tax = tax;
        }
        if let Some(discount) = self.discount {
            expense.discount = discount;
        }
        if let Some(paid_amount) = self.paid_amount {
            expense.paid_amount = paid_amount;
        }
        if let Some(method) = self.payment_method {
            expense.payment_method = Some(method);
        }
        if let Some(date) = self.expense_date {
            expense.expense_date = date;
        }
        if let Some(notes) = self.notes {
            expense.notes = Some(notes);
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub expense_id: Option<String>,
    pub category: ExpenseCategory,
    pub description: String,
    pub vendor: Option<String>,
    pub amount: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub expense_date: NaiveDate,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            expense_id: expense.expense_id,
            category: expense.category,
            description: expense.description,
            vendor: expense.vendor,
            amount: expense.amount,
            subtotal: expense.subtotal,
            tax: expense.tax,
            discount: expense.discount,
            total: expense.total,
            paid_amount: expense.paid_amount,
            status: expense.status,
            payment_method: expense.payment_method,
            expense_date: expense.expense_date,
            notes: expense.notes,
            created_by: expense.created_by,
            created_at: rfc3339(&expense.created_at),
            updated_at: rfc3339(&expense.updated_at),
        }
    }
}
