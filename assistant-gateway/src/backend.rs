use std::{future::Future, pin::Pin};

use chat_schemas::{QuestionRequest, QuestionResponse};

use crate::error_handler::GatewayError;

/// Thread id value that asks the assistant to open a new thread.
pub const CREATE_THREAD: &str = "create";

/// Boxed future returned by [`AssistantBackend::answer`].
pub type AnswerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<QuestionResponse, GatewayError>> + Send + 'a>>;

/// Provider interface for answering a validated question.
///
/// Implement this trait to plug in the assistant service (HTTP upstream,
/// in-process stub, ...). The request is already validated; the backend owns
/// thread creation, vector-store selection and token-usage accounting.
pub trait AssistantBackend: Send + Sync {
    fn answer<'a>(&'a self, request: &'a QuestionRequest) -> AnswerFuture<'a>;
}

/// How the backend will treat a request's `thread_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadTarget<'a> {
    /// `"create"`: open a new thread.
    Create,
    /// Continue an existing thread.
    Existing(&'a str),
}

impl<'a> ThreadTarget<'a> {
    pub fn from_thread_id(thread_id: &'a str) -> Self {
        if thread_id == CREATE_THREAD {
            ThreadTarget::Create
        } else {
            ThreadTarget::Existing(thread_id)
        }
    }

    pub fn is_new(self) -> bool {
        matches!(self, ThreadTarget::Create)
    }
}
