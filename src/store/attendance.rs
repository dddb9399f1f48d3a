use chrono::{NaiveDate, NaiveTime};
use sqlx::SqlitePool;

use crate::model::attendance::{Attendance, AttendanceStatus};

pub async fn get_attendance(
    pool: &SqlitePool,
    employee_id: i64,
    date: NaiveDate,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>("SELECT * FROM attendance WHERE employee_id = ? AND date = ?")
        .bind(employee_id)
        .bind(date)
        .fetch_optional(pool)
        .await
}

pub async fn list_attendance(
    pool: &SqlitePool,
    employee_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        "SELECT * FROM attendance WHERE employee_id = ? AND date BETWEEN ? AND ? ORDER BY date",
    )
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn insert_attendance(
    pool: &SqlitePool,
    employee_id: i64,
    date: NaiveDate,
    time_in: NaiveTime,
    status: AttendanceStatus,
    shift_id: Option<i64>,
) -> Result<Attendance, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, time_in, status, shift_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(time_in)
    .bind(status)
    .bind(shift_id)
    .execute(pool)
    .await?;

    Ok(Attendance {
        id: result.last_insert_rowid(),
        employee_id,
        date,
        time_in,
        time_out: None,
        status,
        hours_worked: None,
        shift_id,
    })
}

/// Fills in the clock-out side of today's record. Returns rows affected so
/// the caller can distinguish "no open clock-in".
pub async fn close_attendance(
    pool: &SqlitePool,
    employee_id: i64,
    date: NaiveDate,
    time_out: NaiveTime,
    hours_worked: f64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET time_out = ?, hours_worked = ?
        WHERE employee_id = ? AND date = ? AND time_out IS NULL
        "#,
    )
    .bind(time_out)
    .bind(hours_worked)
    .bind(employee_id)
    .bind(date)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn count_late(
    pool: &SqlitePool,
    employee_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM attendance
        WHERE employee_id = ? AND date BETWEEN ? AND ? AND status = 'late'
        "#,
    )
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await
}

/// Days the employee showed up at all; rows explicitly marked absent do not
/// count as presence.
pub async fn count_present(
    pool: &SqlitePool,
    employee_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM attendance
        WHERE employee_id = ? AND date BETWEEN ? AND ? AND status != 'absent'
        "#,
    )
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await
}
