//! POST /ask_question — validates a question and forwards it to the assistant.

use std::sync::Arc;

use axum::{Json, extract::State};
use chat_schemas::{QuestionRequest, QuestionResponse};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{core::app_state::AppState, error_handler::AppResult};

/// Handler: POST /ask_question
///
/// The body is taken as untyped JSON so every schema violation can be
/// reported at once (422 with one detail per field).
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask_question \
///   -H 'content-type: application/json' \
///   -d '{"content":"What is the pathophysiology of poliomyelitis?","thread_id":"create","instructions":null}'
/// ```
#[instrument(skip_all)]
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> AppResult<Json<QuestionResponse>> {
    let request = QuestionRequest::validate_all(&payload).inspect_err(|errs| {
        warn!(violations = errs.len(), first = %errs.first(), "question rejected");
    })?;

    debug!(
        thread_id = request.thread_id(),
        has_instructions = request.instructions().is_some(),
        has_vector_store = request.vector_store_id().is_some(),
        "question accepted"
    );

    let response = state.backend.answer(&request).await?;

    info!(
        thread_id = response.thread_id(),
        assistant_id = response.assistant_id(),
        "question answered"
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assistant_gateway::{AnswerFuture, AssistantBackend, GatewayError};
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::router;

    const USAGE: &str = "0b7e9f3c-5d2a-4c1e-8f6b-9a8d7c6b5e4f";

    /// Echoes the normalized request back as an answer.
    struct EchoBackend;

    impl AssistantBackend for EchoBackend {
        fn answer<'a>(&'a self, request: &'a QuestionRequest) -> AnswerFuture<'a> {
            Box::pin(async move {
                let thread = match request.thread_id() {
                    "create" => "thread_new",
                    other => other,
                };
                Ok(QuestionResponse::assemble(
                    format!("you asked: {}", request.content()),
                    thread,
                    "asst_1",
                    request.user_id().unwrap_or("assistant@example.com"),
                    request.vector_store_id().unwrap_or("vs_default"),
                    Uuid::parse_str(USAGE).ok(),
                ))
            })
        }
    }

    struct TimeoutBackend;

    impl AssistantBackend for TimeoutBackend {
        fn answer<'a>(&'a self, _request: &'a QuestionRequest) -> AnswerFuture<'a> {
            Box::pin(async { Err(GatewayError::Timeout(Duration::from_secs(60))) })
        }
    }

    fn test_app(backend: impl AssistantBackend + 'static) -> Router {
        router(Arc::new(AppState::new(Arc::new(backend))))
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ask_question")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn answers_valid_question() {
        let resp = test_app(EchoBackend)
            .oneshot(post_json(&json!({
                "content": "  What is the pathophysiology of poliomyelitis?  ",
                "thread_id": "create",
                "instructions": null
            })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "answer": "you asked: What is the pathophysiology of poliomyelitis?",
                "thread_id": "thread_new",
                "assistant_id": "asst_1",
                "user_id": "assistant@example.com",
                "vector_store_id": "vs_default",
                "token_usage_id": USAGE
            })
        );
    }

    #[tokio::test]
    async fn passes_optional_fields_to_backend() {
        let resp = test_app(EchoBackend)
            .oneshot(post_json(&json!({
                "content": "hi",
                "thread_id": "t_42",
                "user_id": "a@b.com",
                "vector_store_id": "vs_9"
            })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["thread_id"], "t_42");
        assert_eq!(body["user_id"], "a@b.com");
        assert_eq!(body["vector_store_id"], "vs_9");
    }

    #[tokio::test]
    async fn rejects_invalid_question_with_all_violations() {
        let resp = test_app(EchoBackend)
            .oneshot(post_json(&json!({
                "content": " \t ",
                "thread_id": "x",
                "user_id": "not-an-email"
            })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(resp.headers().contains_key("x-request-id"));

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["details"],
            json!([
                { "path": "content", "kind": "EMPTY_VALUE", "hint": "content cannot be empty" },
                { "path": "user_id", "kind": "INVALID_FORMAT", "hint": "value is not a valid email address" }
            ])
        );
    }

    #[tokio::test]
    async fn rejects_non_object_body() {
        let resp = test_app(EchoBackend)
            .oneshot(post_json(&json!(["content", "thread_id"])))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(resp).await;
        assert_eq!(body["error"]["details"][0]["path"], "payload");
        assert_eq!(body["error"]["details"][0]["kind"], "WRONG_TYPE");
    }

    #[tokio::test]
    async fn malformed_json_is_wrapped_as_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/ask_question")
            .header("content-type", "application/json")
            .body(Body::from("{\"content\": "))
            .unwrap();
        let resp = test_app(EchoBackend).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.headers().contains_key("x-request-id"));

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["error"]["details"][0]["hint"].is_string());
    }

    #[tokio::test]
    async fn missing_content_type_is_wrapped() {
        let req = Request::builder()
            .method("POST")
            .uri("/ask_question")
            .body(Body::from(r#"{"content":"hi","thread_id":"x"}"#))
            .unwrap();
        let resp = test_app(EchoBackend).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn wrong_method_is_wrapped() {
        let req = Request::builder()
            .method("GET")
            .uri("/ask_question")
            .body(Body::empty())
            .unwrap();
        let resp = test_app(EchoBackend).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
        assert_eq!(body["error"]["message"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn upstream_timeout_is_504() {
        let resp = test_app(TimeoutBackend)
            .oneshot(post_json(&QuestionRequest::example_payload()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);

        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_TIMEOUT");
    }

    #[tokio::test]
    async fn schema_and_health_routes() {
        let app = test_app(EchoBackend);

        let req = Request::builder()
            .uri("/ask_question/schema")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["request"]["required"], json!(["content", "thread_id"]));
        assert_eq!(body["response"]["title"], "QuestionResponse");

        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({ "success": true, "data": { "status": "ok" } })
        );
    }
}
