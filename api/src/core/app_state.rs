use std::sync::Arc;

use assistant_gateway::{AssistantBackend, GatewayConfig, HttpAssistant};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Assistant that turns a validated question into an answer.
    pub backend: Arc<dyn AssistantBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn AssistantBackend>) -> Self {
        Self { backend }
    }

    /// Builds the HTTP assistant backend from `ASSISTANT_*` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let cfg = GatewayConfig::from_env()?;
        let backend = HttpAssistant::new(cfg)?;
        Ok(Self::new(Arc::new(backend)))
    }
}
