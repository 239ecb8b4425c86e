//! # API REST
//!
//! REST API implementation for the assistant.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status codes)
//! - Per-session transcripts for chat clients
//!
//! Uses `api-shared` for wire types and the chat service.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::chat::{list_conditions_res, transcript_res};
use api_shared::{pb, ApiError, ChatService, HealthService};

/// Application state for the REST API server
///
/// Holds the chat service, which owns the stateless assistant and the shared transcript
/// store.
#[derive(Clone)]
pub struct AppState {
    chat: ChatService,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self { chat }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_conditions,
        list_examples,
        chat,
        read_transcript,
        clear_transcript,
    ),
    components(schemas(
        pb::HealthRes,
        pb::Condition,
        pb::ListConditionsRes,
        pb::ListExamplesRes,
        pb::ChatReq,
        pb::ChatRes,
        pb::Turn,
        pb::TranscriptRes,
        pb::ClearTranscriptRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/conditions", get(list_conditions))
        .route("/examples", get(list_examples))
        .route("/chat", post(chat))
        .route(
            "/sessions/:id/transcript",
            get(read_transcript).delete(clear_transcript),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map host errors onto HTTP statuses. Internal details are logged, never returned.
fn error_status(e: &ApiError) -> (StatusCode, &'static str) {
    match e {
        ApiError::InvalidSessionId(_) => (StatusCode::BAD_REQUEST, "Invalid session id"),
        ApiError::UnknownSession(_) => (StatusCode::NOT_FOUND, "Unknown session"),
        other => {
            tracing::error!("Request failed: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = pb::HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports whether the built-in knowledge base loaded.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<pb::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/conditions",
    responses(
        (status = 200, description = "Conditions the assistant can describe", body = pb::ListConditionsRes)
    )
)]
/// List every condition in the catalog, in declaration order.
///
/// Includes conditions that no keyword rule can reach; the list is for help screens only.
#[axum::debug_handler]
async fn list_conditions(State(state): State<AppState>) -> Json<pb::ListConditionsRes> {
    let conditions = state.chat.assistant().list_conditions();
    Json(list_conditions_res(&conditions))
}

#[utoipa::path(
    get,
    path = "/examples",
    responses(
        (status = 200, description = "Example questions", body = pb::ListExamplesRes)
    )
)]
#[axum::debug_handler]
async fn list_examples(State(state): State<AppState>) -> Json<pb::ListExamplesRes> {
    Json(pb::ListExamplesRes {
        examples: state.chat.assistant().example_questions().to_vec(),
    })
}

#[utoipa::path(
    post,
    path = "/chat",
    request_body = pb::ChatReq,
    responses(
        (status = 200, description = "Reply and updated transcript", body = pb::ChatRes),
        (status = 400, description = "Invalid session id"),
        (status = 404, description = "Unknown session"),
        (status = 500, description = "Internal server error")
    )
)]
/// Answer one message.
///
/// Leave `session_id` empty to start a new session; the response carries the id to reuse.
/// A blank message without a session is answered but opens none, so its `session_id` is empty.
/// Each message is classified on its own, whatever the transcript holds.
///
/// # Errors
/// Returns `400 Bad Request` for a malformed session id and `404 Not Found` for a session
/// that does not exist (for example after a server restart).
#[axum::debug_handler]
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<pb::ChatReq>,
) -> Result<Json<pb::ChatRes>, (StatusCode, &'static str)> {
    match state.chat.chat(Some(&req.session_id), &req.message) {
        Ok(outcome) => Ok(Json(pb::ChatRes::from(outcome))),
        Err(e) => Err(error_status(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/sessions/{id}/transcript",
    responses(
        (status = 200, description = "Transcript of the session", body = pb::TranscriptRes),
        (status = 400, description = "Invalid session id"),
        (status = 404, description = "Unknown session")
    )
)]
#[axum::debug_handler]
async fn read_transcript(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<pb::TranscriptRes>, (StatusCode, &'static str)> {
    match state.chat.transcript(&id) {
        Ok(turns) => Ok(Json(transcript_res(&id, &turns))),
        Err(e) => Err(error_status(&e)),
    }
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}/transcript",
    responses(
        (status = 200, description = "Transcript cleared", body = pb::ClearTranscriptRes),
        (status = 400, description = "Invalid session id"),
        (status = 404, description = "Unknown session")
    )
)]
#[axum::debug_handler]
async fn clear_transcript(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<pb::ClearTranscriptRes>, (StatusCode, &'static str)> {
    match state.chat.clear(&id) {
        Ok(()) => Ok(Json(pb::ClearTranscriptRes { success: true })),
        Err(e) => Err(error_status(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::TranscriptStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pulmo_core::AssistantService;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn app() -> Router {
        let chat = ChatService::new(
            AssistantService::new().expect("assistant"),
            TranscriptStore::new(50, 8),
        );
        router(AppState::new(chat))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn json<T: DeserializeOwned>(body: &[u8]) -> T {
        serde_json::from_slice(body).expect("json body")
    }

    fn post_chat(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app();
        let (status, body) = send(
            &app,
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json::<pb::HealthRes>(&body).ok);
    }

    #[tokio::test]
    async fn conditions_lists_catalog() {
        let app = app();
        let (status, body) = send(
            &app,
            Request::get("/conditions").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let res: pb::ListConditionsRes = json(&body);
        assert_eq!(res.conditions.len(), 14);
    }

    #[tokio::test]
    async fn chat_without_session_starts_one() {
        let app = app();
        let (status, body) = send(
            &app,
            post_chat(serde_json::json!({ "message": "Baby has runny nose and fast breathing" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let res: pb::ChatRes = json(&body);
        assert_eq!(res.condition_id, "bronchiolitis");
        assert_eq!(res.kind, "report");
        assert!(!res.session_id.is_empty());
        assert_eq!(res.turns.len(), 1);
    }

    #[tokio::test]
    async fn blank_chat_without_session_opens_none() {
        let app = app();
        let (status, body) = send(&app, post_chat(serde_json::json!({ "message": "   " }))).await;
        assert_eq!(status, StatusCode::OK);
        let res: pb::ChatRes = json(&body);
        assert_eq!(res.kind, "prompt");
        assert!(res.session_id.is_empty());
        assert!(res.turns.is_empty());
    }

    #[tokio::test]
    async fn transcript_round_trip_and_clear() {
        let app = app();
        let (_, body) = send(&app, post_chat(serde_json::json!({ "message": "fever" }))).await;
        let session_id = json::<pb::ChatRes>(&body).session_id;

        let (_, body) = send(
            &app,
            post_chat(serde_json::json!({ "session_id": session_id, "message": "drawing" })),
        )
        .await;
        let second: pb::ChatRes = json(&body);
        assert_eq!(second.kind, "guidance");
        assert_eq!(second.turns.len(), 2);

        let uri = format!("/sessions/{session_id}/transcript");
        let (status, body) = send(&app, Request::get(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json::<pb::TranscriptRes>(&body).turns.len(), 2);

        let (status, _) = send(&app, Request::delete(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Request::get(&uri).body(Body::empty()).unwrap()).await;
        assert!(json::<pb::TranscriptRes>(&body).turns.is_empty());
    }

    #[tokio::test]
    async fn malformed_session_is_bad_request() {
        let app = app();
        let (status, _) = send(
            &app,
            post_chat(serde_json::json!({ "session_id": "nope", "message": "fever" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let app = app();
        let uri = format!("/sessions/{}/transcript", uuid::Uuid::new_v4());
        let (status, _) = send(&app, Request::get(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
