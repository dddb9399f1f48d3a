use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::shift::Shift;

#[derive(Deserialize, ToSchema)]
pub struct CreateShift {
    #[schema(example = "Night Shift")]
    pub name: String,

    #[schema(example = "22:00:00", value_type = String, format = "time")]
    pub start_time: NaiveTime,

    /// May be earlier than start_time for an overnight shift
    #[schema(example = "06:30:00", value_type = String, format = "time")]
    pub end_time: NaiveTime,
}

#[derive(Serialize, ToSchema)]
pub struct ShiftListResponse {
    pub data: Vec<Shift>,
}

#[utoipa::path(
    post,
    path = "/api/v1/shift",
    request_body = CreateShift,
    responses(
        (status = 201, description = "Shift created"),
        (status = 400, description = "Start and end time are equal")
    ),
    tag = "Shift"
)]
pub async fn create_shift(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateShift>,
) -> actix_web::Result<impl Responder> {
    // equal times would make every clock-in ambiguous
    if payload.start_time == payload.end_time {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "start_time and end_time cannot be equal"
        })));
    }

    let result = sqlx::query("INSERT INTO shifts (name, start_time, end_time, active) VALUES (?, ?, ?, 1)")
        .bind(&payload.name)
        .bind(payload.start_time)
        .bind(payload.end_time)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create shift");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Shift created successfully",
        "id": result.last_insert_rowid()
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/shift",
    responses(
        (status = 200, body = ShiftListResponse)
    ),
    tag = "Shift"
)]
pub async fn list_shifts(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let data = sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE active = 1 ORDER BY name")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch shift list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(ShiftListResponse { data }))
}
