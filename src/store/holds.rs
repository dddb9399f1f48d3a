use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::model::salary_hold::{HoldStatus, SalaryHold};

pub async fn get_hold(pool: &SqlitePool, id: i64) -> Result<Option<SalaryHold>, sqlx::Error> {
    sqlx::query_as::<_, SalaryHold>("SELECT * FROM salary_holds WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_active_hold(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Option<SalaryHold>, sqlx::Error> {
    sqlx::query_as::<_, SalaryHold>(
        "SELECT * FROM salary_holds WHERE employee_id = ? AND status = 'active'",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}

/// The partial unique index on (employee_id) WHERE status='active' backs the
/// one-active-hold rule; a violation surfaces as a database error.
pub async fn insert_hold(
    pool: &SqlitePool,
    employee_id: i64,
    reason: &str,
    held_by: i64,
    now: DateTime<Utc>,
) -> Result<SalaryHold, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO salary_holds
            (employee_id, reason, hold_date, held_by, status, created_at)
        VALUES (?, ?, ?, ?, 'active', ?)
        "#,
    )
    .bind(employee_id)
    .bind(reason)
    .bind(now)
    .bind(held_by)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(SalaryHold {
        id: result.last_insert_rowid(),
        employee_id,
        reason: reason.to_string(),
        hold_date: now,
        release_date: None,
        held_by,
        released_by: None,
        status: HoldStatus::Active,
        created_at: now,
    })
}

pub async fn release_hold(
    pool: &SqlitePool,
    id: i64,
    released_by: i64,
    release_date: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE salary_holds
        SET status = 'released', released_by = ?, release_date = ?
        WHERE id = ? AND status = 'active'
        "#,
    )
    .bind(released_by)
    .bind(release_date)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_hold(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM salary_holds WHERE id = ? AND status = 'active'")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
