//! Request/response schemas for the question/answer API.
//!
//! - [`QuestionRequest`] validates an untyped inbound payload: `content` is
//!   trimmed and must not be blank, `thread_id` is required, `user_id` must be
//!   an email if present.
//! - [`QuestionResponse`] is assembled from trusted backend values, or
//!   validated when it arrives as JSON from an upstream service.
//!
//! Both are immutable once built. Validation is pure and reports
//! [`ValidationErrors`] in field declaration order.
//!
//! ```
//! use chat_schemas::{QuestionRequest, ViolationKind};
//! use serde_json::json;
//!
//! let req = QuestionRequest::validate(&json!({ "content": "  hi ", "thread_id": "create" })).unwrap();
//! assert_eq!(req.content(), "hi");
//!
//! let err = QuestionRequest::validate(&json!({ "content": " ", "thread_id": "x" })).unwrap_err();
//! assert_eq!(err.kind, ViolationKind::EmptyValue);
//! ```

mod email;
pub mod errors;
mod fields;
mod question_request;
mod question_response;
mod schema;

pub use email::is_valid_email;
pub use errors::{ValidationError, ValidationErrors, ViolationKind};
pub use fields::PAYLOAD_FIELD;
pub use question_request::QuestionRequest;
pub use question_response::QuestionResponse;
