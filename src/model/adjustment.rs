use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdjustmentKind {
    Bonus,
    Deduction,
    Overtime,
    Allowance,
    Leave,
}

impl AdjustmentKind {
    /// Normalizes a user-entered amount to the ledger's sign convention:
    /// deductions and unpaid leave reduce net pay, everything else adds.
    pub fn signed_amount(&self, amount: f64) -> f64 {
        match self {
            AdjustmentKind::Deduction | AdjustmentKind::Leave => -amount.abs(),
            _ => amount.abs(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdjustmentStatus {
    Pending,
    Approved,
    Rejected,
}

/// Append-only audit entry. Terminal states are immutable apart from the
/// payroll link, which is filled in when the period is processed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PayrollAdjustment {
    pub id: i64,

    #[schema(nullable = true)]
    pub payroll_id: Option<i64>,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "bonus")]
    pub kind: AdjustmentKind,

    /// Signed: bonuses positive, deductions negative
    #[schema(example = 1000.0)]
    pub amount: f64,

    #[schema(example = "Quarterly performance bonus")]
    pub reason: String,

    pub added_by: i64,

    pub approved_by: Option<i64>,

    #[schema(value_type = String, format = "date-time")]
    pub date_added: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub date_resolved: Option<DateTime<Utc>>,

    #[schema(example = "pending")]
    pub status: AdjustmentStatus,
}
