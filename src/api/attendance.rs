use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::model::attendance::Attendance;
use crate::service::attendance as clocking;
use crate::store;

#[derive(Deserialize, ToSchema)]
pub struct ClockRequest {
    /// Employee QR code scanned at the kiosk
    #[schema(example = "0a1b2c3d-4e5f-6789-abcd-ef0123456789")]
    pub qr_code: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 2024)]
    pub year: i32,

    #[schema(example = 6)]
    pub month: u32,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<Attendance>,
}

/// QR clock-in; lateness is resolved against the assigned shift
#[utoipa::path(
    post,
    path = "/api/v1/attendance/clock-in",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Clocked in", body = Attendance),
        (status = 400, description = "Unknown QR code or already clocked in today"),
        (status = 422, description = "Employee is not active")
    ),
    tag = "Attendance"
)]
pub async fn clock_in(
    pool: web::Data<SqlitePool>,
    payload: web::Json<ClockRequest>,
) -> actix_web::Result<impl Responder> {
    let now = Local::now();
    let attendance = clocking::clock_in(
        pool.get_ref(),
        &payload.qr_code,
        now.date_naive(),
        now.time(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(attendance))
}

/// QR clock-out; derives hours worked
#[utoipa::path(
    put,
    path = "/api/v1/attendance/clock-out",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Clocked out", body = Attendance),
        (status = 400, description = "No open clock-in found for today")
    ),
    tag = "Attendance"
)]
pub async fn clock_out(
    pool: web::Data<SqlitePool>,
    payload: web::Json<ClockRequest>,
) -> actix_web::Result<impl Responder> {
    let now = Local::now();
    let attendance = clocking::clock_out(
        pool.get_ref(),
        &payload.qr_code,
        now.date_naive(),
        now.time(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(attendance))
}

/// One employee's attendance rows for a month
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance rows", body = AttendanceListResponse),
        (status = 400, description = "Invalid period")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let (from, to) = clocking::month_bounds(query.year, query.month)?;

    let data = store::attendance::list_attendance(pool.get_ref(), query.employee_id, from, to)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id = query.employee_id, "Failed to fetch attendance");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(AttendanceListResponse { data }))
}
