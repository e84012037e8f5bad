use super::{non_negative, rfc3339};
use crate::models::{full_name, new_id, Employee, StaffRole};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: StaffRole,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub hired_on: Option<NaiveDate>,
    #[validate(custom(function = "non_negative"))]
    pub salary: Option<Decimal>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

impl CreateEmployeeRequest {
    pub fn into_employee(self, created_by: String) -> Employee {
        let now = Utc::now();
        Employee {
            id: new_id(),
            employee_id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            email: self.email.to_lowercase(),
            phone: self.phone,
            hired_on: self.hired_on,
            salary: self.salary,
            active: self.active,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<StaffRole>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hired_on: Option<NaiveDate>,
    #[validate(custom(function = "non_negative"))]
    pub salary: Option<Decimal>,
    pub active: Option<bool>,
}

impl UpdateEmployeeRequest {
    pub fn apply(self, employee: &mut Employee) {
        if let Some(first_name) = self.first_name {
            employee.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            employee.last_name = last_name;
        }
        if let Some(role) = self.role {
            employee.role = role;
        }
        if let Some(email) = self.email {
            employee.email = email.to_lowercase();
        }
        if let Some(phone) = self.phone {
            employee.phone = Some(phone);
        }
        if let Some(hired_on) = self.hired_on {
            employee.hired_on = Some(hired_on);
        }
        if let Some(salary) = self.salary {
            employee.salary = Some(salary);
        }
        if let Some(active) = self.active {
            employee.active = active;
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub employee_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: StaffRole,
    pub email: String,
    pub phone: Option<String>,
    pub hired_on: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub active: bool,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            full_name: full_name(&employee),
            id: employee.id,
            employee_id: employee.employee_id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            role: employee.role,
            email: employee.email,
            phone: employee.phone,
            hired_on: employee.hired_on,
            salary: employee.salary,
            active: employee.active,
            created_by: employee.created_by,
            created_at: rfc3339(&employee.created_at),
            updated_at: rfc3339(&employee.updated_at),
        }
    }
}
