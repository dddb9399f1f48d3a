//! Payroll core: everything here is decoupled from HTTP and exercised
//! directly by the API layer.

pub mod attendance;
pub mod deductions;
pub mod ledger;
pub mod payroll;

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{NaiveDate, NaiveTime};
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::db::MIGRATOR;

    /// In-memory database with the real migrations applied. A single
    /// connection keeps every query on the same in-memory instance.
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    pub async fn seed_department(pool: &SqlitePool, name: &str) -> i64 {
        sqlx::query("INSERT INTO departments (name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    pub async fn seed_position(pool: &SqlitePool, department_id: i64, monthly_salary: f64) -> i64 {
        sqlx::query(
            "INSERT INTO positions (title, department_id, monthly_salary, hourly_rate)
             VALUES ('Test Position', ?, ?, ?)",
        )
        .bind(department_id)
        .bind(monthly_salary)
        .bind(monthly_salary / crate::model::position::MONTHLY_HOURS)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    pub async fn seed_shift(pool: &SqlitePool, name: &str, start: NaiveTime, end: NaiveTime) -> i64 {
        sqlx::query("INSERT INTO shifts (name, start_time, end_time, active) VALUES (?, ?, ?, 1)")
            .bind(name)
            .bind(start)
            .bind(end)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    pub async fn seed_employee(
        pool: &SqlitePool,
        department_id: i64,
        position_id: i64,
        shift_id: Option<i64>,
        qr_code: &str,
        status: &str,
    ) -> i64 {
        sqlx::query(
            "INSERT INTO employees
                 (full_name, department_id, position_id, shift_id, hire_date, qr_code, status)
             VALUES ('Test Employee', ?, ?, ?, '2024-01-15', ?, ?)",
        )
        .bind(department_id)
        .bind(position_id)
        .bind(shift_id)
        .bind(qr_code)
        .bind(status)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    pub async fn seed_attendance(
        pool: &SqlitePool,
        employee_id: i64,
        date: NaiveDate,
        status: &str,
    ) {
        sqlx::query(
            "INSERT INTO attendance (employee_id, date, time_in, status)
             VALUES (?, ?, '08:00:00', ?)",
        )
        .bind(employee_id)
        .bind(date)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
    }
}
