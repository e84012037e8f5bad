//! Clinic running costs.

use super::{PaymentMethod, Record};
use crate::finance::{FinancialDocument, Ledger, Lines, PaymentStatus};
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseCategory {
    Supplies,
    Equipment,
    Rent,
    Utilities,
    Salaries,
    #[serde(alias = "lab_fees")]
    LabFees,
    Marketing,
    Maintenance,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: String,
    pub expense_id: Option<String>,
    pub category: ExpenseCategory,
    pub description: String,
    pub vendor: Option<String>,
    /// Base amount; becomes the subtotal.
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
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Record for Expense {
    const COLLECTION: &'static str = "expenses";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for Expense {
    const KIND: DocumentKind = DocumentKind::Expense;

    fn code(&self) -> Option<&str> {
        self.expense_id.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.expense_id = Some(code);
    }
}

impl FinancialDocument for Expense {
    fn ledger(&mut self) -> Ledger<'_> {
        Ledger {
            lines: Lines::Flat(self.amount),
            tax: self.tax,
            discount: self.discount,
            subtotal: &mut self.subtotal,
            total: &mut self.total,
            paid_amount: &mut self.paid_amount,
            status: &mut self.status,
        }
    }
}
