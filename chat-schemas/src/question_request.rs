use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    email::is_valid_email,
    errors::{ValidationError, ValidationErrors, ViolationKind},
    fields::FieldCursor,
};

/// One inbound question submission.
///
/// Can only be obtained through [`QuestionRequest::validate`] /
/// [`QuestionRequest::validate_all`] (or serde, which routes through them), so
/// `content` is always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct QuestionRequest {
    content: String,
    thread_id: String,
    instructions: Option<String>,
    user_id: Option<String>,
    vector_store_id: Option<String>,
}

impl QuestionRequest {
    pub const CONTENT: &'static str = "content";
    pub const THREAD_ID: &'static str = "thread_id";
    pub const INSTRUCTIONS: &'static str = "instructions";
    pub const USER_ID: &'static str = "user_id";
    pub const VECTOR_STORE_ID: &'static str = "vector_store_id";

    /// Validates `payload` and stops at the first violation (declaration order).
    pub fn validate(payload: &Value) -> Result<Self, ValidationError> {
        Self::validate_all(payload).map_err(ValidationErrors::into_first)
    }

    /// Validates `payload`, reporting every violated field at once.
    ///
    /// Checks run in declaration order: `content`, `thread_id`, `instructions`,
    /// `user_id`, `vector_store_id`. Unknown keys are ignored.
    pub fn validate_all(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut cur = FieldCursor::new(payload)?;

        let content = match cur.required_text(Self::CONTENT).map(trim_content) {
            Some(trimmed) if trimmed.is_empty() => {
                cur.reject(
                    Self::CONTENT,
                    ViolationKind::EmptyValue,
                    "content cannot be empty",
                );
                None
            }
            Some(trimmed) => Some(trimmed),
            None => None,
        };

        let thread_id = cur.required_text(Self::THREAD_ID);
        let instructions = cur.optional_text(Self::INSTRUCTIONS);

        let user_id = match cur.optional_text(Self::USER_ID) {
            Ok(Some(email)) if !is_valid_email(email) => {
                cur.reject(
                    Self::USER_ID,
                    ViolationKind::InvalidFormat,
                    "value is not a valid email address",
                );
                Err(())
            }
            other => other,
        };

        let vector_store_id = cur.optional_text(Self::VECTOR_STORE_ID);

        cur.finish(|| {
            Some(Self {
                content: content?.to_owned(),
                thread_id: thread_id?.to_owned(),
                instructions: instructions.ok()?.map(str::to_owned),
                user_id: user_id.ok()?.map(str::to_owned),
                vector_store_id: vector_store_id.ok()?.map(str::to_owned),
            })
        })
    }

    /// Question text, trimmed and never empty.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Thread identifier exactly as supplied (`"create"` is not interpreted here).
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// Caller email, if supplied.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn vector_store_id(&self) -> Option<&str> {
        self.vector_store_id.as_deref()
    }

    /// Canonical example payload shown in the published schema.
    pub fn example_payload() -> Value {
        json!({
            "content": "What is the pathophysiology of poliomyelitis?",
            "thread_id": "create",
            "instructions": null
        })
    }
}

/// Whitespace stripped around `content`: Unicode `White_Space` plus the
/// ASCII information separators U+001C..=U+001F.
fn is_content_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn trim_content(raw: &str) -> &str {
    raw.trim_matches(is_content_whitespace)
}

impl TryFrom<Value> for QuestionRequest {
    type Error = ValidationErrors;

    fn try_from(payload: Value) -> Result<Self, Self::Error> {
        Self::validate_all(&payload)
    }
}
