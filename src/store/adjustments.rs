use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::model::adjustment::{AdjustmentKind, AdjustmentStatus, PayrollAdjustment};

pub async fn insert_adjustment(
    pool: &SqlitePool,
    employee_id: i64,
    kind: AdjustmentKind,
    amount: f64,
    reason: &str,
    added_by: i64,
    date_added: DateTime<Utc>,
) -> Result<PayrollAdjustment, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO payroll_adjustments
            (employee_id, kind, amount, reason, added_by, date_added, status)
        VALUES (?, ?, ?, ?, ?, ?, 'pending')
        "#,
    )
    .bind(employee_id)
    .bind(kind)
    .bind(amount)
    .bind(reason)
    .bind(added_by)
    .bind(date_added)
    .execute(pool)
    .await?;

    Ok(PayrollAdjustment {
        id: result.last_insert_rowid(),
        payroll_id: None,
        employee_id,
        kind,
        amount,
        reason: reason.to_string(),
        added_by,
        approved_by: None,
        date_added,
        date_resolved: None,
        status: AdjustmentStatus::Pending,
    })
}

pub async fn get_adjustment(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<PayrollAdjustment>, sqlx::Error> {
    sqlx::query_as::<_, PayrollAdjustment>("SELECT * FROM payroll_adjustments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Moves a pending adjustment to a terminal state. The status guard in the
/// WHERE clause makes terminal states immutable; returns rows affected.
pub async fn resolve_adjustment(
    pool: &SqlitePool,
    id: i64,
    status: AdjustmentStatus,
    approved_by: i64,
    date_resolved: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE payroll_adjustments
        SET status = ?, approved_by = ?, date_resolved = ?
        WHERE id = ? AND status = 'pending'
        "#,
    )
    .bind(status)
    .bind(approved_by)
    .bind(date_resolved)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_pending_adjustment(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM payroll_adjustments WHERE id = ? AND status = 'pending'")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_approved_adjustments(
    pool: &SqlitePool,
    employee_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<PayrollAdjustment>, sqlx::Error> {
    sqlx::query_as::<_, PayrollAdjustment>(
        r#"
        SELECT * FROM payroll_adjustments
        WHERE employee_id = ?
          AND status = 'approved'
          AND date(date_added) BETWEEN ? AND ?
        ORDER BY date_added
        "#,
    )
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn set_payroll_link(
    pool: &SqlitePool,
    id: i64,
    payroll_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE payroll_adjustments SET payroll_id = ? WHERE id = ?")
        .bind(payroll_id)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Links the period's approved adjustments to the payroll record that
/// consumed them. Linking is the one mutation allowed on terminal rows.
pub async fn bind_adjustments_to_payroll(
    pool: &SqlitePool,
    payroll_id: i64,
    employee_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE payroll_adjustments
        SET payroll_id = ?
        WHERE employee_id = ?
          AND status = 'approved'
          AND payroll_id IS NULL
          AND date(date_added) BETWEEN ? AND ?
        "#,
    )
    .bind(payroll_id)
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
