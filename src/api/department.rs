use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::department::Department;

#[derive(Deserialize, ToSchema)]
pub struct CreateDepartment {
    #[schema(example = "Operations")]
    pub name: String,
}

#[derive(Serialize, ToSchema)]
pub struct DepartmentListResponse {
    pub data: Vec<Department>,
}

#[utoipa::path(
    post,
    path = "/api/v1/department",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created"),
        (status = 400, description = "Department name already exists")
    ),
    tag = "Department"
)]
pub async fn create_department(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateDepartment>,
) -> actix_web::Result<impl Responder> {
    let result = sqlx::query("INSERT INTO departments (name) VALUES (?)")
        .bind(&payload.name)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(done) => Ok(HttpResponse::Created().json(json!({
            "message": "Department created successfully",
            "id": done.last_insert_rowid()
        }))),
        Err(e) => {
            if crate::error::is_unique_violation(&e) {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "message": "Department name already exists"
                })));
            }

            error!(error = %e, "Failed to create department");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/department",
    responses(
        (status = 200, body = DepartmentListResponse)
    ),
    tag = "Department"
)]
pub async fn list_departments(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let data = sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY name")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch department list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(DepartmentListResponse { data }))
}
