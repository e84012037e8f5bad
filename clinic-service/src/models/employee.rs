//! Staff records and their roles.

use super::Record;
use crate::numbering::{Coded, DocumentKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffRole {
    Admin,
    Dentist,
    Hygienist,
    Assistant,
    Receptionist,
    Accountant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    pub employee_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: StaffRole,
    pub email: String,
    pub phone: Option<String>,
    pub hired_on: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub active: bool,
    pub created_by: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

pub fn full_name(employee: &Employee) -> String {
    format!("{} {}", employee.first_name, employee.last_name)
        .trim()
        .to_string()
}

impl Record for Employee {
    const COLLECTION: &'static str = "employees";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Coded for Employee {
    const KIND: DocumentKind = DocumentKind::Employee;

    fn code(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    fn assign_code(&mut self, code: String) {
        self.employee_id = Some(code);
    }
}
