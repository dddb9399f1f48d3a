use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::config::{Config, PayrollConfig};
use crate::model::payroll::Payroll;
use crate::service::payroll::{BatchSummary, PayrollBreakdown};
use crate::service::payroll as engine;

#[derive(Deserialize, ToSchema)]
pub struct ProcessPayroll {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 6)]
    pub month: u32,

    #[schema(example = 2024)]
    pub year: i32,

    /// User performing the action
    #[schema(example = 1)]
    pub actor_id: i64,

    /// Overrides the configured engine defaults for this run
    pub config: Option<PayrollConfig>,
}

#[derive(Deserialize, ToSchema)]
pub struct ProcessAllPayrolls {
    #[schema(example = 6)]
    pub month: u32,

    #[schema(example = 2024)]
    pub year: i32,

    #[schema(example = 1)]
    pub actor_id: i64,

    pub config: Option<PayrollConfig>,
}

#[derive(Deserialize, ToSchema)]
pub struct PreviewPayrolls {
    #[schema(example = json!([1, 2, 3]))]
    pub employee_ids: Vec<i64>,

    #[schema(example = 6)]
    pub month: u32,

    #[schema(example = 2024)]
    pub year: i32,

    pub config: Option<PayrollConfig>,
}

#[derive(Deserialize, ToSchema)]
pub struct AppendPayrollNote {
    #[schema(example = "Adjustment approved after cutoff; reflected next period")]
    pub note: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PayrollQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 10)]
    pub per_page: Option<u32>,

    #[schema(example = 1)]
    pub employee_id: Option<i64>,

    #[schema(example = 6)]
    pub month: Option<u32>,

    #[schema(example = 2024)]
    pub year: Option<i32>,
}

#[derive(serde::Serialize, ToSchema)]
pub struct PaginatedPayrollResponse {
    pub data: Vec<Payroll>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue {
    I64(i64),
    U32(u32),
    I32(i32),
}

/// Process one employee-period into a persisted payroll record
#[utoipa::path(
    post,
    path = "/api/v1/payroll/process",
    request_body = ProcessPayroll,
    responses(
        (status = 201, description = "Payroll processed", body = Payroll),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Period already processed for this employee"),
        (status = 422, description = "Employee is not active")
    ),
    tag = "Payroll"
)]
pub async fn process_payroll(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    payload: web::Json<ProcessPayroll>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let engine_config = payload.config.unwrap_or_else(|| config.payroll.clone());

    let payroll = engine::process(
        pool.get_ref(),
        payload.employee_id,
        payload.month,
        payload.year,
        &engine_config,
        payload.actor_id,
    )
    .await?;

    Ok(HttpResponse::Created().json(payroll))
}

/// Process every active employee for the period
#[utoipa::path(
    post,
    path = "/api/v1/payroll/process-all",
    request_body = ProcessAllPayrolls,
    responses(
        (status = 200, description = "Batch result", body = BatchSummary)
    ),
    tag = "Payroll"
)]
pub async fn process_all_payrolls(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    payload: web::Json<ProcessAllPayrolls>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let engine_config = payload.config.unwrap_or_else(|| config.payroll.clone());

    let summary = engine::process_all(
        pool.get_ref(),
        payload.month,
        payload.year,
        &engine_config,
        payload.actor_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Dry-run computation for the review step; persists nothing
#[utoipa::path(
    post,
    path = "/api/v1/payroll/preview",
    request_body = PreviewPayrolls,
    responses(
        (status = 200, description = "Computed breakdowns", body = [PayrollBreakdown])
    ),
    tag = "Payroll"
)]
pub async fn preview_payrolls(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    payload: web::Json<PreviewPayrolls>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let engine_config = payload.config.unwrap_or_else(|| config.payroll.clone());

    let breakdowns = engine::preview(
        pool.get_ref(),
        &payload.employee_ids,
        payload.month,
        payload.year,
        &engine_config,
    )
    .await?;

    Ok(HttpResponse::Ok().json(breakdowns))
}

/// Append a note to a processed payroll record
///
/// Computed fields are immutable once processed; corrections go through the
/// adjustment ledger and notes record the paper trail.
#[utoipa::path(
    put,
    path = "/api/v1/payroll/{payroll_id}/notes",
    params(
        ("payroll_id", description = "Payroll ID")
    ),
    request_body = AppendPayrollNote,
    responses(
        (status = 200, description = "Note appended"),
        (status = 400, description = "Empty note"),
        (status = 404, description = "Payroll not found")
    ),
    tag = "Payroll"
)]
pub async fn append_payroll_note(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<AppendPayrollNote>,
) -> actix_web::Result<impl Responder> {
    let payroll_id = path.into_inner();
    let note = payload.note.trim();

    if note.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "note cannot be empty"
        })));
    }

    let payroll = crate::store::payrolls::get_payroll(pool.get_ref(), payroll_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, payroll_id, "Failed to fetch payroll");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(payroll) = payroll else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Payroll not found"
        })));
    };

    let notes = match payroll.notes {
        Some(existing) => format!("{}; {}", existing, note),
        None => note.to_string(),
    };

    crate::store::payrolls::update_payroll_notes(pool.get_ref(), payroll_id, &notes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, payroll_id, "Failed to update payroll notes");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Note appended"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/{payroll_id}",
    params(
        ("payroll_id", description = "Payroll ID")
    ),
    responses(
        (status = 200, body = Payroll),
        (status = 404)
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let payroll_id = path.into_inner();

    let payroll = crate::store::payrolls::get_payroll(pool.get_ref(), payroll_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, payroll_id, "Failed to fetch payroll");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match payroll {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Payroll not found"
        }))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, body = PaginatedPayrollResponse)
    ),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    pool: web::Data<SqlitePool>,
    query: web::Query<PayrollQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(employee_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::I64(employee_id));
    }
    if let Some(month) = query.month {
        where_sql.push_str(" AND month = ?");
        args.push(FilterValue::U32(month));
    }
    if let Some(year) = query.year {
        where_sql.push_str(" AND year = ?");
        args.push(FilterValue::I32(year));
    }

    let count_sql = format!("SELECT COUNT(*) FROM payrolls{}", where_sql);
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::I64(v) => count_q.bind(*v),
            FilterValue::U32(v) => count_q.bind(*v),
            FilterValue::I32(v) => count_q.bind(*v),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count payrolls");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        r#"
        SELECT * FROM payrolls
        {}
        ORDER BY year DESC, month DESC, employee_id
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, Payroll>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::I64(v) => data_q.bind(v),
            FilterValue::U32(v) => data_q.bind(v),
            FilterValue::I32(v) => data_q.bind(v),
        };
    }

    let data = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch payroll list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(PaginatedPayrollResponse {
        data,
        page,
        per_page,
        total,
    }))
}
