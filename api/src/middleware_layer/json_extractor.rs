use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chat_schemas::QuestionRequest;
use chrono::Utc;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn guess_path_from_msg(msg: &str) -> Option<String> {
    [
        QuestionRequest::CONTENT,
        QuestionRequest::THREAD_ID,
        QuestionRequest::INSTRUCTIONS,
        QuestionRequest::USER_ID,
        QuestionRequest::VECTOR_STORE_ID,
    ]
    .into_iter()
    .find(|key| msg.contains(key))
    .map(str::to_string)
}

fn hint_for(status: StatusCode, msg: &str) -> Option<String> {
    if status == StatusCode::UNSUPPORTED_MEDIA_TYPE || msg.contains("Content-Type") {
        Some("Send the body with `Content-Type: application/json`.".into())
    } else if status == StatusCode::BAD_REQUEST {
        Some(
            "Expected a JSON object (e.g. { \"content\": \"...\", \"thread_id\": \"create\" })."
                .into(),
        )
    } else {
        None
    }
}

fn error_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        s if s.is_server_error() => "SERVER_ERROR",
        _ => "HTTP_ERROR",
    }
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts
        .headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        if !v.trim().is_empty() {
            return v.to_string();
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert(REQUEST_ID_HEADER, value);
    }
    id
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Tags every error response with `X-Request-Id` and rewrites plain-text
/// error bodies (axum extractor rejections, 404/405) into the JSON envelope.
///
/// Responses that are already JSON (e.g. from `AppError`) keep their body.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return res;
    }

    let (mut parts, body) = res.into_parts();
    let req_id = ensure_request_id(&mut parts);
    if is_json(&parts) {
        return Response::from_parts(parts, body);
    }

    let bytes: Bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let original = String::from_utf8_lossy(&bytes);
    let message = match original.trim() {
        "" => status.canonical_reason().unwrap_or("error").to_string(),
        text => text.to_string(),
    };
    tracing::debug!(%status, request_id = %req_id, "mapped plain error response");

    let detail = ApiErrorDetail {
        path: guess_path_from_msg(&message),
        kind: None,
        hint: hint_for(status, &message),
    };
    let details = if detail.path.is_some() || detail.hint.is_some() {
        vec![detail]
    } else {
        Vec::new()
    };

    let envelope = ApiResponse::<()>::error(error_code(status), message, details);

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(body))
}
