use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HoldStatus {
    Active,
    Released,
}

/// Administrative suspension of salary release. The storage layer enforces
/// at most one active hold per employee.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SalaryHold {
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "Pending clearance review")]
    pub reason: String,

    #[schema(value_type = String, format = "date-time")]
    pub hold_date: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub release_date: Option<DateTime<Utc>>,

    pub held_by: i64,

    pub released_by: Option<i64>,

    #[schema(example = "active")]
    pub status: HoldStatus,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl SalaryHold {
    /// Active holds may be deleted only within this window after creation.
    pub fn deletion_grace() -> Duration {
        Duration::hours(24)
    }

    pub fn within_deletion_grace(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at <= Self::deletion_grace()
    }
}
