use crate::api::models::users::UserType;
use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Authentication required, credentials invalid, or ownership mismatch
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// User's role does not permit the operation
    #[error("Insufficient permissions: {required:?} role required for {resource}")]
    InsufficientPermissions { required: UserType, resource: String },

    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// Conflict error, e.g., for unique constraint violations
    #[error("Conflict: {message}")]
    Conflict { message: String },
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Error::InsufficientPermissions { .. } => StatusCode::FORBIDDEN,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "Authentication required".to_string()),
            Error::InsufficientPermissions { required, resource } => {
                format!("Insufficient permissions: {required} role required for {resource}")
            }
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource } => format!("{resource} not found"),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, table, .. } => match (table.as_deref(), constraint.as_deref()) {
                    (Some("users"), Some(c)) if c.contains("email") => "An account with this email address already exists".to_string(),
                    _ => "Resource already exists".to_string(),
                },
                DbError::ForeignKeyViolation { .. } => "Invalid reference to related resource".to_string(),
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
            Error::Conflict { message } => message.clone(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Unauthenticated { .. } | Error::InsufficientPermissions { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Conflict { .. } => {
                tracing::warn!("Conflict error: {}", self);
            }
        }

        let status = self.status_code();

        // Conflicts carry a structured JSON body; everything else is plain text
        match &self {
            Error::Conflict { message } => {
                let body = serde_json::json!({ "message": message });
                (status, axum::response::Json(body)).into_response()
            }
            Error::Database(DbError::UniqueViolation { .. }) => {
                let body = serde_json::json!({ "message": self.user_message() });
                (status, axum::response::Json(body)).into_response()
            }
            _ => (status, self.user_message()).into_response(),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::Unauthenticated { message: None }.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::InsufficientPermissions {
                required: UserType::Realtor,
                resource: "home listings".to_string(),
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            Error::NotFound {
                resource: "home 42".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Conflict {
                message: "duplicate".to_string()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_email_message() {
        let err = Error::Database(DbError::UniqueViolation {
            constraint: Some("users_email_key".to_string()),
            table: Some("users".to_string()),
            message: "duplicate key value".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.user_message(), "An account with this email address already exists");
    }

    #[test]
    fn test_internal_errors_do_not_leak() {
        let err = Error::Internal {
            operation: "hash string: parameter out of range".to_string(),
        };
        assert_eq!(err.user_message(), "Internal server error");
    }
}
