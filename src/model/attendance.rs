use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Ontime,
    Late,
    Absent,
}

/// One row per (employee, date), enforced by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "2024-06-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "08:12:00", value_type = String, format = "time")]
    pub time_in: NaiveTime,

    #[schema(example = "17:02:00", value_type = String, format = "time", nullable = true)]
    pub time_out: Option<NaiveTime>,

    #[schema(example = "ontime")]
    pub status: AttendanceStatus,

    /// Derived at clock-out
    pub hours_worked: Option<f64>,

    /// Shift in effect at clock-in time, if any
    pub shift_id: Option<i64>,
}
