use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Access/refresh pair handed to the caller after login or refresh.
///
/// The server keeps no record of issued pairs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// JSON envelope used by every endpoint: `{message, data?}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Request failed field validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request body could not be parsed
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message, errors) = match self {
            AppError::Database(msg) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed with infrastructure error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::InvalidInput(details) => {
                (StatusCode::BAD_REQUEST, "Invalid request", Some(details))
            }
            AppError::BadRequest(details) => {
                tracing::debug!(%details, "unparseable request body");
                (StatusCode::BAD_REQUEST, "Failed to parse request", None)
            }
            AppError::AlreadyExists(_) => (StatusCode::BAD_REQUEST, "Failed to register", None),
            AppError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Incorrect email or password", None)
            }
            AppError::InvalidToken | AppError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "Invalid refresh token", None)
            }
        };

        let body = match errors {
            Some(errors) => serde_json::json!({ "message": message, "errors": errors }),
            None => serde_json::json!({ "message": message }),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
