use crate::errors::{errors::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

#[derive(Debug)]
pub struct AppErrorHttp(pub ServiceError);

impl From<ServiceError> for AppErrorHttp {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl AppErrorHttp {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ServiceError::CardNotFound(_)
            | ServiceError::UserNotFound(_)
            | ServiceError::BlockRequestNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::StatusAlreadySet { .. }
            | ServiceError::DuplicateBlockRequest
            | ServiceError::BlockRequestAlreadyCompleted(_)
            | ServiceError::EmailAlreadyExists(_) => StatusCode::CONFLICT,

            ServiceError::CardIsNotActive
            | ServiceError::InsufficientFunds
            | ServiceError::InvalidAmount
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::InvalidCredentials | ServiceError::Jwt(_) => StatusCode::UNAUTHORIZED,

            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,

            ServiceError::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::SERVICE_UNAVAILABLE,
                RepositoryError::AlreadyExists(_) => StatusCode::CONFLICT,
                RepositoryError::ForeignKey(_) => StatusCode::BAD_REQUEST,
                RepositoryError::Sqlx(_) | RepositoryError::Custom(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },

            ServiceError::Bcrypt(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            ServiceError::Repo(RepositoryError::Sqlx(_)) => "Database error".to_string(),
            ServiceError::Bcrypt(_) => "Internal authentication error".to_string(),
            ServiceError::Jwt(_) => "Invalid or expired token".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppErrorHttp {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            error!("🚨 {status}: {:?}", self.0);
        } else {
            warn!("⚠️ {status}: {message}");
        }

        let body = Json(ErrorResponse {
            status: "error".to_string(),
            message,
        });

        (status, body).into_response()
    }
}
