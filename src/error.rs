use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;

/// Engine-level error taxonomy. All of these are returned as values from
/// service calls; handlers surface them through `ResponseError`.
#[derive(Debug, Display)]
pub enum EngineError {
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(
        fmt = "payroll already processed for employee {} in {:02}/{}",
        employee_id,
        month,
        year
    )]
    AlreadyProcessed {
        employee_id: i64,
        month: u32,
        year: i32,
    },

    #[display(fmt = "employee {} is not active", _0)]
    InactiveEmployee(i64),

    #[display(fmt = "employee {} already has an active salary hold", _0)]
    DuplicateHold(i64),

    #[display(fmt = "{} {} not found", entity, id)]
    MissingReference { entity: &'static str, id: i64 },

    #[display(fmt = "storage error: {}", _0)]
    Persistence(sqlx::Error),
}

impl std::error::Error for EngineError {}

impl From<sqlx::Error> for EngineError {
    fn from(e: sqlx::Error) -> Self {
        EngineError::Persistence(e)
    }
}

impl actix_web::ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::AlreadyProcessed { .. } => StatusCode::CONFLICT,
            EngineError::InactiveEmployee(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::DuplicateHold(_) => StatusCode::CONFLICT,
            EngineError::MissingReference { .. } => StatusCode::NOT_FOUND,
            EngineError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            EngineError::Persistence(e) => {
                tracing::error!(error = %e, "storage failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "message": message }))
    }
}

/// true if the error is a storage-level UNIQUE constraint violation
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
