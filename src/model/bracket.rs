use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeductionType {
    Sss,
    Philhealth,
    Pagibig,
}

/// Read-only reference row seeded by migration. `salary_max` is exclusive;
/// NULL marks the open-ended top bracket.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DeductionBracket {
    pub id: i64,
    pub deduction_type: DeductionType,
    pub salary_min: f64,
    pub salary_max: Option<f64>,
    pub employee_share: f64,
    pub active: bool,
}

impl DeductionBracket {
    pub fn covers(&self, salary: f64) -> bool {
        salary >= self.salary_min && self.salary_max.is_none_or(|max| salary < max)
    }
}
