use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    errors::{ValidationErrors, ViolationKind},
    fields::FieldCursor,
};

/// Result of processing one [`QuestionRequest`](crate::QuestionRequest).
///
/// `token_usage_id` is serialized as `null` when no usage record was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct QuestionResponse {
    answer: String,
    thread_id: String,
    assistant_id: String,
    user_id: String,
    vector_store_id: String,
    token_usage_id: Option<Uuid>,
}

impl QuestionResponse {
    pub const ANSWER: &'static str = "answer";
    pub const THREAD_ID: &'static str = "thread_id";
    pub const ASSISTANT_ID: &'static str = "assistant_id";
    pub const USER_ID: &'static str = "user_id";
    pub const VECTOR_STORE_ID: &'static str = "vector_store_id";
    pub const TOKEN_USAGE_ID: &'static str = "token_usage_id";

    /// Assembles a response from trusted backend values.
    pub fn assemble(
        answer: impl Into<String>,
        thread_id: impl Into<String>,
        assistant_id: impl Into<String>,
        user_id: impl Into<String>,
        vector_store_id: impl Into<String>,
        token_usage_id: Option<Uuid>,
    ) -> Self {
        Self {
            answer: answer.into(),
            thread_id: thread_id.into(),
            assistant_id: assistant_id.into(),
            user_id: user_id.into(),
            vector_store_id: vector_store_id.into(),
            token_usage_id,
        }
    }

    /// Validates an untyped response (e.g. an upstream JSON body).
    ///
    /// The five text fields are required; `token_usage_id` may be absent,
    /// `null`, or a UUID string.
    pub fn validate_all(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut cur = FieldCursor::new(payload)?;

        let answer = cur.required_text(Self::ANSWER);
        let thread_id = cur.required_text(Self::THREAD_ID);
        let assistant_id = cur.required_text(Self::ASSISTANT_ID);
        let user_id = cur.required_text(Self::USER_ID);
        let vector_store_id = cur.required_text(Self::VECTOR_STORE_ID);

        let token_usage_id = match cur.optional_text(Self::TOKEN_USAGE_ID) {
            Ok(Some(raw)) => match Uuid::parse_str(raw) {
                Ok(id) => Ok(Some(id)),
                Err(e) => {
                    cur.reject(
                        Self::TOKEN_USAGE_ID,
                        ViolationKind::InvalidFormat,
                        format!("value is not a valid UUID: {e}"),
                    );
                    Err(())
                }
            },
            Ok(None) => Ok(None),
            Err(()) => Err(()),
        };

        cur.finish(|| {
            Some(Self::assemble(
                answer?,
                thread_id?,
                assistant_id?,
                user_id?,
                vector_store_id?,
                token_usage_id.ok()?,
            ))
        })
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn vector_store_id(&self) -> &str {
        &self.vector_store_id
    }

    /// Id of the persisted token usage record, if any.
    pub fn token_usage_id(&self) -> Option<Uuid> {
        self.token_usage_id
    }
}

impl TryFrom<Value> for QuestionResponse {
    type Error = ValidationErrors;

    fn try_from(payload: Value) -> Result<Self, Self::Error> {
        Self::validate_all(&payload)
    }
}
