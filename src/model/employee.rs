use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Employee {
    pub id: i64,

    #[schema(example = "Maria Santos")]
    pub full_name: String,

    #[schema(example = 28)]
    pub age: Option<i64>,

    #[schema(example = 1)]
    pub department_id: i64,

    #[schema(example = 3)]
    pub position_id: i64,

    #[schema(example = 2, nullable = true)]
    pub shift_id: Option<i64>,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = "+639171234567", nullable = true)]
    pub contact: Option<String>,

    /// Unique code scanned at the attendance kiosk
    pub qr_code: String,

    #[schema(example = "active")]
    pub status: EmployeeStatus,

    pub emergency_contact: Option<String>,

    pub profile_path: Option<String>,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}
