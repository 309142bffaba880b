use axum::Json;
use serde_json::{Value, json};

use crate::core::http::response_envelope::ApiResponse;

/// Handler: GET /health
pub async fn health() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({ "status": "ok" })))
}
