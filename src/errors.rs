use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// Failures raised by validation and the follow-up store.
#[derive(Debug, Error)]
pub enum FollowUpError {
    #[error("{0}")]
    Validation(String),

    #[error("Follow-up not found")]
    NotFound { id: u64 },

    #[error("Follow-up {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: u64,
        from: &'static str,
        to: &'static str,
    },

    #[error("storage error: {0}")]
    Storage(String),
}

impl FollowUpError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(err: impl std::error::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<std::io::Error> for FollowUpError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err)
    }
}

impl From<serde_json::Error> for FollowUpError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(err)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<FollowUpError> for AppError {
    fn from(err: FollowUpError) -> Self {
        match err {
            FollowUpError::Validation(_) | FollowUpError::InvalidTransition { .. } => {
                Self::bad_request(err.to_string())
            }
            FollowUpError::NotFound { .. } => Self::not_found(err.to_string()),
            FollowUpError::Storage(_) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let err: AppError = FollowUpError::validation("bad").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "bad");

        let err: AppError = FollowUpError::NotFound { id: 7 }.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Follow-up not found");

        let err: AppError = FollowUpError::InvalidTransition {
            id: 3,
            from: "completed",
            to: "pending",
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: AppError = FollowUpError::Storage("disk full".into()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
