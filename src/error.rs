use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

/// Application errors. Every handler returns `Result<HttpResponse, ApiError>`
/// and the `ResponseError` impl below turns the error into the standard
/// `{"status": "error", "message": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// State conflicts such as a duplicate like or a taken username.
    /// Reported as 400, not 409.
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("{0}")]
    Internal(String),
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::RecordNotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Database(other),
        }
    }
}

impl ApiError {
    fn public_message(&self) -> String {
        match self.status_code() {
            // Outside development, 500s get a generic body and the real
            // error only goes to the log.
            StatusCode::INTERNAL_SERVER_ERROR if !is_development() => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

fn is_development() -> bool {
    std::env::var("APP_ENV").map(|v| v != "production").unwrap_or(true)
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("unhandled error: {self}");
        }
        HttpResponse::build(status).json(serde_json::json!({
            "status": "error",
            "message": self.public_message(),
        }))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}
