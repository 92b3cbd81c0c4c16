use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Database(ref err) => {
                // Log the driver detail but keep the response message generic
                if err.contains("timeout") || err.contains("locked") {
                    tracing::warn!("SQLite operation stalled: {}", err);
                } else {
                    tracing::error!("SQLite database error: {}", err);
                }

                let user_message = if err.contains("timeout") {
                    "Database operation timed out, please try again"
                } else {
                    "A database error occurred"
                };

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    user_message.to_string(),
                )
            }
            ApiError::NotFound(ref resource) => {
                tracing::debug!("Resource not found: {}", resource);
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{} not found", resource),
                )
            }
            ApiError::Internal(ref err) => {
                tracing::error!("Internal server error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

// SQLite (sqlx) error mapping
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                ApiError::NotFound("Requested row".to_string())
            }
            sqlx::Error::PoolTimedOut => {
                tracing::warn!("SQLite connection pool timeout");
                ApiError::Database("Database connection timeout".to_string())
            }
            sqlx::Error::PoolClosed => {
                tracing::error!("SQLite connection pool is closed");
                ApiError::Database("Database service unavailable".to_string())
            }
            sqlx::Error::Io(ref io_err) => {
                tracing::error!("SQLite I/O error: {}", io_err);
                ApiError::Database("Database file is unavailable".to_string())
            }
            sqlx::Error::Database(ref db_err) => {
                tracing::error!("SQLite error: {} (code: {:?})", db_err, db_err.code());
                ApiError::Database("Database operation failed".to_string())
            }
            _ => {
                tracing::error!("Unhandled sqlx error: {}", err);
                ApiError::Database("Database operation failed".to_string())
            }
        }
    }
}

// Result type alias for convenience
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_pool_timeout_maps_to_database() {
        let err = ApiError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ApiError::Database(_)));
    }
}
