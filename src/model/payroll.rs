use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Immutable snapshot of one processed employee-period. Base and
/// attendance-derived fields are never updated after insert; corrections go
/// through the adjustment ledger.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payroll {
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 6)]
    pub month: u32,

    #[schema(example = 2024)]
    pub year: i32,

    #[schema(example = 16000.0)]
    pub base_salary: f64,

    #[schema(example = 2)]
    pub late_count: i64,

    #[schema(example = 1)]
    pub absent_count: i64,

    #[schema(example = 872.73)]
    pub attendance_deduction: f64,

    #[schema(example = 675.0)]
    pub sss: f64,

    #[schema(example = 320.0)]
    pub philhealth: f64,

    #[schema(example = 100.0)]
    pub pagibig: f64,

    #[schema(example = 1095.0)]
    pub government_total: f64,

    /// Signed sum of approved adjustments in the period
    #[schema(example = 0.0)]
    pub adjustment_total: f64,

    /// Attendance plus government deductions
    #[schema(example = 1967.73)]
    pub total_deductions: f64,

    #[schema(example = 14032.27)]
    pub net_salary: f64,

    /// Pre-floor net, recorded only when the floor at zero engaged
    #[schema(nullable = true)]
    pub net_before_floor: Option<f64>,

    /// Payment suspended by an active salary hold; the amount is unaffected
    pub held: bool,

    #[schema(value_type = String, format = "date-time")]
    pub date_processed: DateTime<Utc>,

    pub processed_by: Option<i64>,

    pub notes: Option<String>,
}
