use std::sync::Arc;

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        ask::{ask_question_route::ask_question, schema_route::question_schema},
        health_route::health,
    },
};

/// Builds the HTTP router around the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ask_question", post(ask_question))
        .route("/ask_question/schema", get(question_schema))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Starts the API on `API_ADDRESS` with the HTTP assistant backend.
pub async fn start() -> Result<(), AppError> {
    let host_url = std::env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::MissingEnv("API_ADDRESS"))?;

    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "api listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("api stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        // Keep serving; the process can still be stopped externally.
        std::future::pending::<()>().await;
    }
}
