use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Missing or invalid credentials: {0}")]
    Unauthorized(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Model not found")]
    ModelNotFound,

    #[error("Model service denied the request: {0}")]
    Forbidden(String),

    #[error("Model service unreachable: {0}")]
    RemoteUnavailable(String),

    #[error("Model service request timed out")]
    RemoteTimeout,

    #[error("Model service rejected the request with status {status}")]
    RemoteRejected { status: u16, body: String },

    // Remote update succeeded but the local liked_models write did not.
    // compensation_failed marks the rollback call also failing, which
    // leaves the two stores divergent until reconciled out of band.
    #[error("Failed to persist liked models (compensation_failed: {compensation_failed})")]
    LikeSaveFailed { compensation_failed: bool },

    #[error("Too many requests, retry in {0}s")]
    RateLimited(u64),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable marker, so clients branch on codes
    /// instead of parsing messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ModelNotFound => "MODEL_NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::RemoteUnavailable(_) => "MODEL_SERVICE_UNAVAILABLE",
            Self::RemoteTimeout => "MODEL_SERVICE_TIMEOUT",
            Self::RemoteRejected { .. } => "MODEL_SERVICE_ERROR",
            Self::LikeSaveFailed {
                compensation_failed: false,
            } => "DATABASE_SAVE_ERROR",
            Self::LikeSaveFailed {
                compensation_failed: true,
            } => "STORES_DIVERGENT",
            Self::RateLimited(_) => "RATE_LIMITED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized(_) => "Please sign in and try again.".to_string(),
            Self::UserNotFound => "User not found.".to_string(),
            Self::ModelNotFound => "This model does not exist.".to_string(),
            Self::Forbidden(_) => "You are not allowed to do that.".to_string(),
            Self::RemoteUnavailable(_) | Self::RemoteTimeout => {
                "The model service is unavailable right now. Try again shortly.".to_string()
            }
            Self::RemoteRejected { .. } => {
                "The model service could not process the request.".to_string()
            }
            Self::LikeSaveFailed {
                compensation_failed: false,
            } => "Your like did not register. Nothing was changed.".to_string(),
            Self::LikeSaveFailed {
                compensation_failed: true,
            } => "Your like did not register and needs attention on our side.".to_string(),
            Self::RateLimited(secs) => format!("Too many requests. Retry in {} seconds.", secs),
            Self::Database(_) | Self::Internal(_) => {
                "Something went wrong on our side. Try again later.".to_string()
            }
            Self::Config(_) => "The service is misconfigured.".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::ModelNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::RemoteUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::RemoteTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::RemoteRejected { .. } => StatusCode::BAD_GATEWAY,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::LikeSaveFailed { .. }
            | Self::Database(_)
            | Self::Config(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.user_message(),
            code: self.code(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_map_to_gateway_statuses() {
        assert_eq!(
            AppError::RemoteUnavailable("refused".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::RemoteTimeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::RemoteRejected {
                status: 500,
                body: String::new()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn save_failure_codes_distinguish_divergence() {
        let rolled_back = AppError::LikeSaveFailed {
            compensation_failed: false,
        };
        let divergent = AppError::LikeSaveFailed {
            compensation_failed: true,
        };
        assert_eq!(rolled_back.code(), "DATABASE_SAVE_ERROR");
        assert_eq!(divergent.code(), "STORES_DIVERGENT");
        assert_eq!(rolled_back.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(divergent.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_variants() {
        assert_eq!(AppError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ModelNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ModelNotFound.code(), "MODEL_NOT_FOUND");
    }
}
