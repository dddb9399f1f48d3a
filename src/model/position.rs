use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard full-time hours backing the monthly/hourly consistency rule:
/// `monthly_salary = hourly_rate * MONTHLY_HOURS`, enforced at write time.
pub const MONTHLY_HOURS: f64 = 160.0;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Position {
    pub id: i64,

    #[schema(example = "Sales Associate")]
    pub title: String,

    #[schema(example = 1)]
    pub department_id: i64,

    #[schema(example = 16000.0)]
    pub monthly_salary: f64,

    #[schema(example = 100.0)]
    pub hourly_rate: f64,

    pub description: Option<String>,
}
