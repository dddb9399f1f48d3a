use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::position::{MONTHLY_HOURS, Position};
use crate::utils::round2;

#[derive(Deserialize, ToSchema)]
pub struct CreatePosition {
    #[schema(example = "Sales Associate")]
    pub title: String,

    #[schema(example = 1)]
    pub department_id: i64,

    /// The hourly rate is derived from this at the standard 160 hours
    #[schema(example = 16000.0)]
    pub monthly_salary: f64,

    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePosition {
    pub title: Option<String>,

    /// Changing the salary recomputes the hourly rate
    pub monthly_salary: Option<f64>,

    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PositionListResponse {
    pub data: Vec<Position>,
}

#[utoipa::path(
    post,
    path = "/api/v1/position",
    request_body = CreatePosition,
    responses(
        (status = 201, description = "Position created"),
        (status = 400, description = "Salary must be positive")
    ),
    tag = "Position"
)]
pub async fn create_position(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreatePosition>,
) -> actix_web::Result<impl Responder> {
    if payload.monthly_salary <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "monthly_salary must be positive"
        })));
    }

    let hourly_rate = round2(payload.monthly_salary / MONTHLY_HOURS);

    let result = sqlx::query(
        r#"
        INSERT INTO positions (title, department_id, monthly_salary, hourly_rate, description)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.title)
    .bind(payload.department_id)
    .bind(payload.monthly_salary)
    .bind(hourly_rate)
    .bind(payload.description.as_deref())
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create position");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Position created successfully",
        "id": result.last_insert_rowid()
    })))
}

/// Update Position, keeping the salary/rate pair consistent
#[utoipa::path(
    put,
    path = "/api/v1/position/{id}",
    request_body = UpdatePosition,
    params(
        ("id", description = "Position ID")
    ),
    responses(
        (status = 200, description = "Position updated"),
        (status = 404, description = "Position not found")
    ),
    tag = "Position"
)]
pub async fn update_position(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdatePosition>,
) -> actix_web::Result<impl Responder> {
    let position_id = path.into_inner();

    let current = crate::store::positions::get_position(pool.get_ref(), position_id)
        .await
        .map_err(|e| {
            error!(error = %e, position_id, "Failed to fetch position");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(current) = current else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Position not found"
        })));
    };

    let title = payload.title.clone().unwrap_or(current.title);
    let monthly_salary = payload.monthly_salary.unwrap_or(current.monthly_salary);
    let description = payload.description.clone().or(current.description);

    if monthly_salary <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "monthly_salary must be positive"
        })));
    }

    let hourly_rate = round2(monthly_salary / MONTHLY_HOURS);

    sqlx::query(
        r#"
        UPDATE positions
        SET title = ?, monthly_salary = ?, hourly_rate = ?, description = ?
        WHERE id = ?
        "#,
    )
    .bind(&title)
    .bind(monthly_salary)
    .bind(hourly_rate)
    .bind(description.as_deref())
    .bind(position_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, position_id, "Failed to update position");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Position updated successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/position",
    responses(
        (status = 200, body = PositionListResponse)
    ),
    tag = "Position"
)]
pub async fn list_positions(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let data = sqlx::query_as::<_, Position>("SELECT * FROM positions ORDER BY title")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch position list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(PositionListResponse { data }))
}
