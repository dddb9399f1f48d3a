use sqlx::SqlitePool;

use crate::model::employee::Employee;

pub async fn get_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_employee_by_qr(
    pool: &SqlitePool,
    qr_code: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE qr_code = ?")
        .bind(qr_code)
        .fetch_optional(pool)
        .await
}

pub async fn list_active_employees(pool: &SqlitePool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE status = 'active' ORDER BY id")
        .fetch_all(pool)
        .await
}
