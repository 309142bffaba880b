use assistant_gateway::GatewayError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chat_schemas::ValidationErrors;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    // --- Upstream assistant (and its startup config) ---
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // upstream
            AppError::Gateway(GatewayError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Gateway(GatewayError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR, // startup-only
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,

            // 5xx
            AppError::MissingEnv(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingEnv(_) => "MISSING_ENV",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Gateway(GatewayError::Timeout(_)) => "UPSTREAM_TIMEOUT",
            AppError::Gateway(GatewayError::Config(_)) => "CONFIG_ERROR",
            AppError::Gateway(_) => "UPSTREAM_ERROR",
        }
    }

    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::Validation(errs) => errs.violations().iter().map(ApiErrorDetail::from).collect(),
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            error!(code, error = %self, "request failed");
        } else {
            warn!(code, error = %self, "request rejected");
        }

        ApiResponse::<()>::error(code, self.to_string(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
