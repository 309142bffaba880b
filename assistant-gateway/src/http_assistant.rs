//! HTTP client for the upstream assistant service.
//!
//! - `POST {endpoint}/questions` — body is the validated [`QuestionRequest`],
//!   reply must match [`QuestionResponse`].
//!
//! # Examples
//!
//! ```no_run
//! use assistant_gateway::{AssistantBackend, GatewayConfig, HttpAssistant};
//! use chat_schemas::QuestionRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = HttpAssistant::new(GatewayConfig::new("http://localhost:9000"))?;
//! let req = QuestionRequest::validate(&QuestionRequest::example_payload())?;
//! let resp = svc.answer(&req).await?;
//! println!("{}", resp.answer());
//! # Ok(()) }
//! ```

use chat_schemas::{QuestionRequest, QuestionResponse};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    backend::{AnswerFuture, AssistantBackend, ThreadTarget},
    config::GatewayConfig,
    error_handler::{GatewayError, Result},
};

/// Max characters of an error body kept in [`GatewayError::HttpStatus`].
const SNIPPET_CHARS: usize = 240;

/// Thin client for the assistant service.
///
/// Reuses one pooled `reqwest::Client` with the configured timeout.
pub struct HttpAssistant {
    client: reqwest::Client,
    cfg: GatewayConfig,
    url_questions: String,
}

impl HttpAssistant {
    /// Creates a new [`HttpAssistant`] from the given config.
    ///
    /// # Errors
    /// - [`GatewayError::Config`] if the endpoint is not http/https
    /// - [`GatewayError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        crate::error_handler::validate_http_endpoint("ASSISTANT_API_URL", &cfg.endpoint)?;

        let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;
        let url_questions = format!("{}/questions", cfg.endpoint.trim_end_matches('/'));

        Ok(Self {
            client,
            cfg,
            url_questions,
        })
    }

    /// Forwards `request` upstream and validates the reply.
    ///
    /// # Errors
    /// - [`GatewayError::Timeout`] when the configured timeout elapses
    /// - [`GatewayError::HttpTransport`] for other client errors
    /// - [`GatewayError::HttpStatus`] for non-2xx responses
    /// - [`GatewayError::Decode`] if the body is not JSON
    /// - [`GatewayError::InvalidResponse`] if the JSON does not match the response schema
    #[instrument(skip_all, fields(new_thread = ThreadTarget::from_thread_id(request.thread_id()).is_new()))]
    pub async fn ask(&self, request: &QuestionRequest) -> Result<QuestionResponse> {
        debug!("POST {}", self.url_questions);

        let mut call = self.client.post(&self.url_questions).json(request);
        if let Some(key) = &self.cfg.api_key {
            call = call.bearer_auth(key);
        }

        let resp = call.send().await.map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(SNIPPET_CHARS).collect::<String>();
            warn!(%status, "assistant returned an error status");
            return Err(GatewayError::HttpStatus {
                status,
                url: self.url_questions.clone(),
                snippet,
            });
        }

        let body: Value = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(self.cfg.timeout)
            } else {
                GatewayError::Decode(format!("serde error: {e}; expected a JSON object"))
            }
        })?;

        let answer = QuestionResponse::validate_all(&body).map_err(GatewayError::InvalidResponse)?;

        info!(
            thread_id = answer.thread_id(),
            has_token_usage = answer.token_usage_id().is_some(),
            "assistant answered"
        );
        Ok(answer)
    }

    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(self.cfg.timeout)
        } else {
            GatewayError::HttpTransport(e)
        }
    }
}

impl AssistantBackend for HttpAssistant {
    fn answer<'a>(&'a self, request: &'a QuestionRequest) -> AnswerFuture<'a> {
        Box::pin(self.ask(request))
    }
}
