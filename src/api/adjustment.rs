use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::model::adjustment::{AdjustmentKind, AdjustmentStatus, PayrollAdjustment};
use crate::service::ledger;

#[derive(Deserialize, ToSchema)]
pub struct CreateAdjustment {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "bonus")]
    pub kind: AdjustmentKind,

    /// Entered as a positive peso amount; the ledger applies the sign
    #[schema(example = 1000.0)]
    pub amount: f64,

    #[schema(example = "Quarterly performance bonus")]
    pub reason: String,

    #[schema(example = 1)]
    pub actor_id: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct ResolveAdjustment {
    #[schema(example = 2)]
    pub actor_id: i64,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AdjustmentQuery {
    pub employee_id: Option<i64>,
    /// pending, approved or rejected
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct AdjustmentListResponse {
    pub data: Vec<PayrollAdjustment>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

enum FilterValue<'a> {
    I64(i64),
    Str(&'a str),
}

/// Record a manual adjustment; it stays pending until approved
#[utoipa::path(
    post,
    path = "/api/v1/adjustment",
    request_body = CreateAdjustment,
    responses(
        (status = 201, description = "Adjustment recorded", body = PayrollAdjustment),
        (status = 400, description = "Invalid amount or reason"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Adjustment"
)]
pub async fn create_adjustment(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateAdjustment>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let adjustment = ledger::apply_adjustment(
        pool.get_ref(),
        ledger::NewAdjustment {
            employee_id: payload.employee_id,
            kind: payload.kind,
            amount: payload.amount,
            reason: payload.reason,
            actor_id: payload.actor_id,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(adjustment))
}

/// Approve a pending adjustment (requires a different user than the creator)
#[utoipa::path(
    put,
    path = "/api/v1/adjustment/{adjustment_id}/approve",
    params(
        ("adjustment_id", description = "ID of the adjustment to approve")
    ),
    request_body = ResolveAdjustment,
    responses(
        (status = 200, description = "Adjustment approved", body = PayrollAdjustment),
        (status = 400, description = "Not pending, or approver is the creator"),
        (status = 404)
    ),
    tag = "Adjustment"
)]
pub async fn approve_adjustment(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<ResolveAdjustment>,
) -> actix_web::Result<impl Responder> {
    let adjustment =
        ledger::approve_adjustment(pool.get_ref(), path.into_inner(), payload.actor_id).await?;

    Ok(HttpResponse::Ok().json(adjustment))
}

/// Reject a pending adjustment
#[utoipa::path(
    put,
    path = "/api/v1/adjustment/{adjustment_id}/reject",
    params(
        ("adjustment_id", description = "ID of the adjustment to reject")
    ),
    request_body = ResolveAdjustment,
    responses(
        (status = 200, description = "Adjustment rejected", body = PayrollAdjustment),
        (status = 400, description = "Adjustment is not pending"),
        (status = 404)
    ),
    tag = "Adjustment"
)]
pub async fn reject_adjustment(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<ResolveAdjustment>,
) -> actix_web::Result<impl Responder> {
    let adjustment =
        ledger::reject_adjustment(pool.get_ref(), path.into_inner(), payload.actor_id).await?;

    Ok(HttpResponse::Ok().json(adjustment))
}

/// Delete an adjustment while it is still pending
#[utoipa::path(
    delete,
    path = "/api/v1/adjustment/{adjustment_id}",
    params(
        ("adjustment_id", description = "ID of the adjustment to delete")
    ),
    responses(
        (status = 200, description = "Adjustment deleted"),
        (status = 400, description = "Adjustment is not pending"),
        (status = 404)
    ),
    tag = "Adjustment"
)]
pub async fn delete_adjustment(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    ledger::delete_adjustment(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Adjustment deleted"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/adjustment",
    params(AdjustmentQuery),
    responses(
        (status = 200, description = "Paginated adjustment list", body = AdjustmentListResponse)
    ),
    tag = "Adjustment"
)]
pub async fn list_adjustments(
    pool: web::Data<SqlitePool>,
    query: web::Query<AdjustmentQuery>,
) -> actix_web::Result<impl Responder> {
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(employee_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::I64(employee_id));
    }
    if let Some(status) = query.status.as_deref() {
        status.parse::<AdjustmentStatus>().map_err(|_| {
            actix_web::error::ErrorBadRequest("Invalid status. Allowed: pending, approved, rejected")
        })?;
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    let count_sql = format!("SELECT COUNT(*) FROM payroll_adjustments{}", where_sql);
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::I64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count adjustments");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        r#"
        SELECT * FROM payroll_adjustments
        {}
        ORDER BY date_added DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, PayrollAdjustment>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::I64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let data = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch adjustment list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(AdjustmentListResponse {
        data,
        page,
        per_page,
        total,
    }))
}
