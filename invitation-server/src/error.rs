use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use invitation_core::{site::SiteError, supervisor::SupervisorError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Messages upstream is not configured")]
    UpstreamNotConfigured,

    #[error("Upstream answered with status {0}")]
    UpstreamStatus(u16),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Site content error: {0}")]
    Site(#[from] SiteError),

    #[error("Supervisor error: {0}")]
    Supervisor(#[from] SupervisorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::UpstreamNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamStatus(_) | AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
