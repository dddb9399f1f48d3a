use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::model::payroll::Payroll;

/// Fully itemized record ready for insert, built by the engine.
#[derive(Debug, Clone)]
pub struct PayrollDraft {
    pub employee_id: i64,
    pub month: u32,
    pub year: i32,
    pub base_salary: f64,
    pub late_count: i64,
    pub absent_count: i64,
    pub attendance_deduction: f64,
    pub sss: f64,
    pub philhealth: f64,
    pub pagibig: f64,
    pub government_total: f64,
    pub adjustment_total: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
    pub net_before_floor: Option<f64>,
    pub held: bool,
    pub date_processed: DateTime<Utc>,
    pub processed_by: Option<i64>,
    pub notes: Option<String>,
}

pub async fn payroll_exists(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM payrolls WHERE employee_id = ? AND month = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(month)
    .bind(year)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Inserts the draft; the UNIQUE (employee_id, month, year) constraint is the
/// authoritative double-processing guard and surfaces as a database error.
pub async fn insert_payroll(pool: &SqlitePool, draft: &PayrollDraft) -> Result<Payroll, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO payrolls
            (employee_id, month, year, base_salary, late_count, absent_count,
             attendance_deduction, sss, philhealth, pagibig, government_total,
             adjustment_total, total_deductions, net_salary, net_before_floor,
             held, date_processed, processed_by, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(draft.employee_id)
    .bind(draft.month)
    .bind(draft.year)
    .bind(draft.base_salary)
    .bind(draft.late_count)
    .bind(draft.absent_count)
    .bind(draft.attendance_deduction)
    .bind(draft.sss)
    .bind(draft.philhealth)
    .bind(draft.pagibig)
    .bind(draft.government_total)
    .bind(draft.adjustment_total)
    .bind(draft.total_deductions)
    .bind(draft.net_salary)
    .bind(draft.net_before_floor)
    .bind(draft.held)
    .bind(draft.date_processed)
    .bind(draft.processed_by)
    .bind(draft.notes.as_deref())
    .execute(pool)
    .await?;

    Ok(Payroll {
        id: result.last_insert_rowid(),
        employee_id: draft.employee_id,
        month: draft.month,
        year: draft.year,
        base_salary: draft.base_salary,
        late_count: draft.late_count,
        absent_count: draft.absent_count,
        attendance_deduction: draft.attendance_deduction,
        sss: draft.sss,
        philhealth: draft.philhealth,
        pagibig: draft.pagibig,
        government_total: draft.government_total,
        adjustment_total: draft.adjustment_total,
        total_deductions: draft.total_deductions,
        net_salary: draft.net_salary,
        net_before_floor: draft.net_before_floor,
        held: draft.held,
        date_processed: draft.date_processed,
        processed_by: draft.processed_by,
        notes: draft.notes.clone(),
    })
}

/// Notes are the only field open to correction after processing.
pub async fn update_payroll_notes(
    pool: &SqlitePool,
    id: i64,
    notes: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE payrolls SET notes = ? WHERE id = ?")
        .bind(notes)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn get_payroll(pool: &SqlitePool, id: i64) -> Result<Option<Payroll>, sqlx::Error> {
    sqlx::query_as::<_, Payroll>("SELECT * FROM payrolls WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_payroll_for_period(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
) -> Result<Option<Payroll>, sqlx::Error> {
    sqlx::query_as::<_, Payroll>(
        "SELECT * FROM payrolls WHERE employee_id = ? AND month = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(month)
    .bind(year)
    .fetch_optional(pool)
    .await
}

pub async fn count_payrolls_for_period(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM payrolls WHERE employee_id = ? AND month = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(month)
    .bind(year)
    .fetch_one(pool)
    .await
}
