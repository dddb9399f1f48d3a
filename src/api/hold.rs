use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::model::salary_hold::{HoldStatus, SalaryHold};
use crate::service::ledger;

#[derive(Deserialize, ToSchema)]
pub struct CreateHold {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "Pending clearance review")]
    pub reason: String,

    #[schema(example = 1)]
    pub actor_id: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct ReleaseHold {
    #[schema(example = 2)]
    pub actor_id: i64,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HoldQuery {
    pub employee_id: Option<i64>,
    /// active or released
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct HoldListResponse {
    pub data: Vec<SalaryHold>,
}

enum FilterValue<'a> {
    I64(i64),
    Str(&'a str),
}

/// Place a salary hold; payment is suspended until it is released
#[utoipa::path(
    post,
    path = "/api/v1/hold",
    request_body = CreateHold,
    responses(
        (status = 201, description = "Hold placed", body = SalaryHold),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee already has an active hold")
    ),
    tag = "Salary Hold"
)]
pub async fn create_hold(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateHold>,
) -> actix_web::Result<impl Responder> {
    let hold = ledger::hold_salary(
        pool.get_ref(),
        payload.employee_id,
        &payload.reason,
        payload.actor_id,
    )
    .await?;

    Ok(HttpResponse::Created().json(hold))
}

/// Release an active salary hold
#[utoipa::path(
    put,
    path = "/api/v1/hold/{hold_id}/release",
    params(
        ("hold_id", description = "ID of the hold to release")
    ),
    request_body = ReleaseHold,
    responses(
        (status = 200, description = "Hold released", body = SalaryHold),
        (status = 400, description = "Hold is already released"),
        (status = 404)
    ),
    tag = "Salary Hold"
)]
pub async fn release_hold(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<ReleaseHold>,
) -> actix_web::Result<impl Responder> {
    let hold = ledger::release_hold(pool.get_ref(), path.into_inner(), payload.actor_id).await?;

    Ok(HttpResponse::Ok().json(hold))
}

/// Delete a hold created by mistake, within 24 hours of creation
#[utoipa::path(
    delete,
    path = "/api/v1/hold/{hold_id}",
    params(
        ("hold_id", description = "ID of the hold to delete")
    ),
    responses(
        (status = 200, description = "Hold deleted"),
        (status = 400, description = "Hold is released or past the grace window"),
        (status = 404)
    ),
    tag = "Salary Hold"
)]
pub async fn delete_hold(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    ledger::delete_hold(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Hold deleted"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/hold",
    params(HoldQuery),
    responses(
        (status = 200, description = "Hold list", body = HoldListResponse)
    ),
    tag = "Salary Hold"
)]
pub async fn list_holds(
    pool: web::Data<SqlitePool>,
    query: web::Query<HoldQuery>,
) -> actix_web::Result<impl Responder> {
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(employee_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::I64(employee_id));
    }
    if let Some(status) = query.status.as_deref() {
        status.parse::<HoldStatus>().map_err(|_| {
            actix_web::error::ErrorBadRequest("Invalid status. Allowed: active, released")
        })?;
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    let sql = format!(
        "SELECT * FROM salary_holds{} ORDER BY created_at DESC",
        where_sql
    );

    let mut q = sqlx::query_as::<_, SalaryHold>(&sql);
    for arg in args {
        q = match arg {
            FilterValue::I64(v) => q.bind(v),
            FilterValue::Str(s) => q.bind(s),
        };
    }

    let data = q.fetch_all(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch hold list");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(HoldListResponse { data }))
}
