use chrono::{Datelike, Months, NaiveDate, NaiveTime, Weekday};
use sqlx::SqlitePool;

use crate::error::{EngineError, is_unique_violation};
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::shift::is_late_for;
use crate::store;
use crate::utils::round2;

/// Default rest-day policy; absences are only expected on the remaining days.
pub const REST_DAYS: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

#[derive(Debug, Clone, Copy)]
pub struct AttendanceSummary {
    pub late: i64,
    pub absent: i64,
}

pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), EngineError> {
    let invalid = || EngineError::Validation(format!("invalid period {:02}/{}", month, year));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;

    Ok((first, last))
}

pub fn working_days_in_month(
    year: i32,
    month: u32,
    rest_days: &[Weekday],
) -> Result<i64, EngineError> {
    let (first, last) = month_bounds(year, month)?;

    let mut working = 0;
    let mut day = first;
    while day <= last {
        if !rest_days.contains(&day.weekday()) {
            working += 1;
        }
        day = day
            .succ_opt()
            .ok_or_else(|| EngineError::Validation(format!("invalid period {:02}/{}", month, year)))?;
    }

    Ok(working)
}

/// Tallies the month from persisted status only; lateness was judged by the
/// shift resolver at clock-in time and is not re-derived here.
pub async fn summarize(
    pool: &SqlitePool,
    employee_id: i64,
    year: i32,
    month: u32,
) -> Result<AttendanceSummary, EngineError> {
    let (from, to) = month_bounds(year, month)?;

    let late = store::attendance::count_late(pool, employee_id, from, to).await?;
    let present = store::attendance::count_present(pool, employee_id, from, to).await?;
    let expected = working_days_in_month(year, month, &REST_DAYS)?;

    Ok(AttendanceSummary {
        late,
        absent: (expected - present).max(0),
    })
}

/// QR-code clock-in. Lateness is resolved against the employee's assigned
/// shift (or the organizational cutoff) and stored with the row.
pub async fn clock_in(
    pool: &SqlitePool,
    qr_code: &str,
    date: NaiveDate,
    time_in: NaiveTime,
) -> Result<Attendance, EngineError> {
    let employee = store::employees::get_employee_by_qr(pool, qr_code)
        .await?
        .ok_or_else(|| EngineError::Validation("unknown QR code".to_string()))?;

    if !employee.is_active() {
        return Err(EngineError::InactiveEmployee(employee.id));
    }

    let shift = match employee.shift_id {
        Some(shift_id) => {
            let shift = store::shifts::get_shift(pool, shift_id).await?;
            if shift.is_none() {
                tracing::warn!(
                    employee_id = employee.id,
                    shift_id,
                    "assigned shift missing, using default cutoff"
                );
            }
            shift
        }
        None => None,
    };

    let status = if is_late_for(shift.as_ref(), time_in) {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Ontime
    };

    match store::attendance::insert_attendance(
        pool,
        employee.id,
        date,
        time_in,
        status,
        shift.map(|s| s.id),
    )
    .await
    {
        Ok(attendance) => Ok(attendance),
        Err(e) if is_unique_violation(&e) => Err(EngineError::Validation(
            "already clocked in today".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn clock_out(
    pool: &SqlitePool,
    qr_code: &str,
    date: NaiveDate,
    time_out: NaiveTime,
) -> Result<Attendance, EngineError> {
    let employee = store::employees::get_employee_by_qr(pool, qr_code)
        .await?
        .ok_or_else(|| EngineError::Validation("unknown QR code".to_string()))?;

    let record = store::attendance::get_attendance(pool, employee.id, date)
        .await?
        .ok_or_else(|| EngineError::Validation("no clock-in found for today".to_string()))?;

    if record.time_out.is_some() {
        return Err(EngineError::Validation(
            "already clocked out today".to_string(),
        ));
    }
    if time_out < record.time_in {
        return Err(EngineError::Validation(
            "time out cannot be earlier than time in".to_string(),
        ));
    }

    let hours_worked = round2((time_out - record.time_in).num_minutes() as f64 / 60.0);
    store::attendance::close_attendance(pool, employee.id, date, time_out, hours_worked).await?;

    Ok(Attendance {
        time_out: Some(time_out),
        hours_worked: Some(hours_worked),
        ..record
    })
}
