//! Seam between the HTTP API and the upstream assistant service.
//!
//! The API only ever talks to an [`AssistantBackend`]; [`HttpAssistant`] is
//! the production implementation that forwards validated requests over HTTP.

pub mod backend;
pub mod config;
pub mod error_handler;
pub mod http_assistant;

pub use backend::{AnswerFuture, AssistantBackend, CREATE_THREAD, ThreadTarget};
pub use config::GatewayConfig;
pub use error_handler::{ConfigError, GatewayError};
pub use http_assistant::HttpAssistant;
