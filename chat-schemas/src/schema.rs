//! JSON-Schema documents published alongside the API.

use serde_json::{Value, json};

use crate::{QuestionRequest, QuestionResponse};

/// Nullable string property with a description.
fn nullable_text(description: &str) -> Value {
    json!({
        "anyOf": [{ "type": "string" }, { "type": "null" }],
        "default": null,
        "description": description
    })
}

impl QuestionRequest {
    /// JSON-Schema for the inbound payload, including the canonical example.
    pub fn json_schema() -> Value {
        json!({
            "title": "QuestionRequest",
            "description": "Schema for question requests.",
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Question text; surrounding whitespace is trimmed and it must not be blank"
                },
                "thread_id": {
                    "type": "string",
                    "description": "Use 'create' to start a new thread or supply the id of an existing thread"
                },
                "instructions": nullable_text("Optional instructions for the assistant"),
                "user_id": {
                    "anyOf": [{ "type": "string", "format": "email" }, { "type": "null" }],
                    "default": null,
                    "description": "User email (optional; the backend falls back to the assistant's email)"
                },
                "vector_store_id": nullable_text("Optional id of the vector store to use")
            },
            "required": ["content", "thread_id"],
            "example": Self::example_payload()
        })
    }
}

impl QuestionResponse {
    /// JSON-Schema for the outbound payload.
    pub fn json_schema() -> Value {
        json!({
            "title": "QuestionResponse",
            "description": "Schema for question responses.",
            "type": "object",
            "properties": {
                "answer": { "type": "string" },
                "thread_id": { "type": "string" },
                "assistant_id": { "type": "string" },
                "user_id": { "type": "string" },
                "vector_store_id": { "type": "string" },
                "token_usage_id": {
                    "anyOf": [{ "type": "string", "format": "uuid" }, { "type": "null" }],
                    "default": null,
                    "description": "UUID of the persisted token usage record"
                }
            },
            "required": ["answer", "thread_id", "assistant_id", "user_id", "vector_store_id"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_schema_lists_required_fields_and_example() {
        let schema = QuestionRequest::json_schema();
        assert_eq!(schema["required"], json!(["content", "thread_id"]));
        assert_eq!(schema["example"]["thread_id"], "create");
        assert_eq!(
            schema["properties"]["user_id"]["anyOf"][0]["format"],
            "email"
        );
    }

    #[test]
    fn response_schema_matches_serialized_keys() {
        let schema = QuestionResponse::json_schema();
        let resp = QuestionResponse::assemble("a", "t", "as", "u", "vs", None);
        let value = serde_json::to_value(resp).unwrap();

        let props = schema["properties"].as_object().unwrap();
        let keys = value.as_object().unwrap();
        assert_eq!(props.len(), keys.len());
        for key in keys.keys() {
            assert!(props.contains_key(key), "schema is missing {key}");
        }
    }
}
