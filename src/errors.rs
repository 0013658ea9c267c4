use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use diesel::r2d2;
use serde_json::json;
use std::fmt;

/// Errors surfaced by the HTTP handlers
#[derive(Debug)]
pub enum AppError {
    // Validation Errors
    InvalidInput { field: String, message: String },

    // Database Errors
    DatabaseError,
    ConnectionPoolError,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput { field, message } => write!(f, "Invalid {}: {}", field, message),
            AppError::DatabaseError => write!(f, "A database error occurred - please try again"),
            AppError::ConnectionPoolError => {
                write!(f, "Service temporarily unavailable - please try again")
            }
        }
    }
}

impl AppError {
    fn code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            AppError::DatabaseError => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::ConnectionPoolError => {
                (StatusCode::SERVICE_UNAVAILABLE, "CONNECTION_POOL_ERROR")
            }
        }
    }

    pub fn invalid_input(field: &str, message: &str) -> Self {
        AppError::InvalidInput {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = self.code();

        match self {
            AppError::DatabaseError | AppError::ConnectionPoolError => {
                log::error!("Server error: {:?}", self);
            }
            _ => {
                log::info!("Client error: {:?}", self);
            }
        }

        HttpResponse::build(status).json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string()
            }
        }))
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Convert database connection pool errors
impl From<r2d2::PoolError> for AppError {
    fn from(err: r2d2::PoolError) -> Self {
        log::error!("Database connection pool error: {}", err);
        AppError::ConnectionPoolError
    }
}

/// Convert diesel database errors; every one is a server error
impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        log::error!("Database error: {}", err);
        AppError::DatabaseError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = AppError::invalid_input("frequency", "Must not be negative");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid frequency: Must not be negative");
    }

    #[test]
    fn test_diesel_errors_are_server_errors() {
        for err in [
            diesel::result::Error::NotFound,
            diesel::result::Error::RollbackTransaction,
        ] {
            let err = AppError::from(err);
            assert!(matches!(err, AppError::DatabaseError));
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert_eq!(
            AppError::ConnectionPoolError.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
