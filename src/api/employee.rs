use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::employee::{Employee, EmployeeStatus};
use crate::utils::db_utils::{SqlValue, build_update_sql, execute_update};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Maria Santos")]
    pub full_name: String,

    #[schema(example = 28)]
    pub age: Option<i64>,

    #[schema(example = 1)]
    pub department_id: i64,

    #[schema(example = 3)]
    pub position_id: i64,

    #[schema(example = 2)]
    pub shift_id: Option<i64>,

    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub hire_date: NaiveDate,

    #[schema(example = "+639171234567")]
    pub contact: Option<String>,

    pub emergency_contact: Option<String>,

    pub profile_path: Option<String>,
}

// Keeps an explicit `"shift_id": null` distinguishable from an absent field.
fn deserialize_explicit_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub full_name: Option<String>,
    pub age: Option<i64>,
    pub department_id: Option<i64>,
    pub position_id: Option<i64>,
    /// Assign or change the shift; pass null to clear it
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    #[schema(value_type = Option<i64>)]
    pub shift_id: Option<Option<i64>>,
    pub contact: Option<String>,
    pub emergency_contact: Option<String>,
    pub profile_path: Option<String>,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub department_id: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

enum FilterValue<'a> {
    I64(i64),
    Str(&'a str),
    Like(String),
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/v1/employee",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created with a generated QR code"),
        (status = 400, description = "Unknown department, position or shift reference"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let qr_code = Uuid::new_v4().to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO employees
            (full_name, age, department_id, position_id, shift_id, hire_date,
             contact, qr_code, status, emergency_contact, profile_path)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'active', ?, ?)
        "#,
    )
    .bind(&payload.full_name)
    .bind(payload.age)
    .bind(payload.department_id)
    .bind(payload.position_id)
    .bind(payload.shift_id)
    .bind(payload.hire_date)
    .bind(payload.contact.as_deref())
    .bind(&qr_code)
    .bind(payload.emergency_contact.as_deref())
    .bind(payload.profile_path.as_deref())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(done) => Ok(HttpResponse::Created().json(json!({
            "message": "Employee created successfully",
            "id": done.last_insert_rowid(),
            "qr_code": qr_code
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return Ok(HttpResponse::BadRequest().json(json!({
                        "message": "Unknown department, position or shift reference"
                    })));
                }
            }

            error!(error = %e, "Failed to create employee");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Update Employee (partial)
#[utoipa::path(
    put,
    path = "/api/v1/employee/{id}",
    request_body = UpdateEmployee,
    params(
        ("id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee updated"),
        (status = 400, description = "No fields provided"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let payload = payload.into_inner();

    let mut fields: Vec<(&str, SqlValue)> = Vec::new();
    if let Some(v) = payload.full_name {
        fields.push(("full_name", SqlValue::String(v)));
    }
    if let Some(v) = payload.age {
        fields.push(("age", SqlValue::I64(v)));
    }
    if let Some(v) = payload.department_id {
        fields.push(("department_id", SqlValue::I64(v)));
    }
    if let Some(v) = payload.position_id {
        fields.push(("position_id", SqlValue::I64(v)));
    }
    if let Some(v) = payload.shift_id {
        fields.push((
            "shift_id",
            match v {
                Some(shift_id) => SqlValue::I64(shift_id),
                None => SqlValue::Null,
            },
        ));
    }
    if let Some(v) = payload.contact {
        fields.push(("contact", SqlValue::String(v)));
    }
    if let Some(v) = payload.emergency_contact {
        fields.push(("emergency_contact", SqlValue::String(v)));
    }
    if let Some(v) = payload.profile_path {
        fields.push(("profile_path", SqlValue::String(v)));
    }
    if let Some(v) = payload.hire_date {
        fields.push(("hire_date", SqlValue::Date(v)));
    }

    let update = build_update_sql("employees", fields, "id", employee_id)?;

    let affected = execute_update(pool.get_ref(), update).await.map_err(|e| {
        error!(error = %e, employee_id, "Failed to update employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/employee/{id}",
    params(
        ("id", description = "Employee ID")
    ),
    responses(
        (status = 200, body = Employee),
        (status = 404)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = crate::store::employees::get_employee(pool.get_ref(), employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to fetch employee");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match employee {
        Some(e) => Ok(HttpResponse::Ok().json(e)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Deactivate Employee
///
/// Employees with payroll history are never deleted, only soft-disabled.
#[utoipa::path(
    delete,
    path = "/api/v1/employee/{id}",
    params(
        ("id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deactivated"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn deactivate_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let result = sqlx::query("UPDATE employees SET status = 'inactive' WHERE id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to deactivate employee");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deactivated"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/employee",
    params(EmployeeQuery),
    responses(
        (status = 200, body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(department_id) = query.department_id {
        where_sql.push_str(" AND department_id = ?");
        args.push(FilterValue::I64(department_id));
    }
    if let Some(status) = query.status.as_deref() {
        status.parse::<EmployeeStatus>().map_err(|_| {
            actix_web::error::ErrorBadRequest("Invalid status. Allowed: active, inactive")
        })?;
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }
    if let Some(search) = query.search.as_deref() {
        where_sql.push_str(" AND full_name LIKE ?");
        args.push(FilterValue::Like(format!("%{}%", search)));
    }

    let count_sql = format!("SELECT COUNT(*) FROM employees{}", where_sql);
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::I64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
            FilterValue::Like(s) => count_q.bind(s.clone()),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count employees");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        r#"
        SELECT * FROM employees
        {}
        ORDER BY full_name
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, Employee>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::I64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
            FilterValue::Like(s) => data_q.bind(s),
        };
    }

    let data = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch employee list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data,
        page,
        per_page,
        total,
    }))
}
