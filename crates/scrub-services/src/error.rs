use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP client could not be created: {0}")]
    ClientBuildFailed(String),
}
