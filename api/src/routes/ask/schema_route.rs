//! GET /ask_question/schema — JSON-Schema of the request and response bodies.

use axum::Json;
use chat_schemas::{QuestionRequest, QuestionResponse};
use serde_json::{Value, json};

/// Handler: GET /ask_question/schema
pub async fn question_schema() -> Json<Value> {
    Json(json!({
        "request": QuestionRequest::json_schema(),
        "response": QuestionResponse::json_schema(),
    }))
}
