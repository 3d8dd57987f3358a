//! v1 Session handlers.
//!
//! A session owns one wardrobe and one bot. Sessions are created
//! explicitly, expire after a period of inactivity, and can be ended early.

use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{
    validate_request, CreateSessionRequest, CredentialRequest, DeleteSessionResponse,
    SessionResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::error::StyleSyncError;
use crate::services::Session;

/// `POST /api/v1/sessions`
///
/// Starts a session with an empty wardrobe. The bot is ready immediately
/// when the server has an environment credential or `apiKey` is supplied.
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "sessions",
    operation_id = "sessions.create",
    request_body(content = CreateSessionRequest, description = "Optional; may be omitted entirely"),
    responses(
        (status = 201, description = "Session created", body = SessionResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> ApiResponse<SessionResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    if let Err(e) = validate_request(&req) {
        return e.into();
    }

    let session = state.sessions.create(state.stylist_for(req.api_key.as_deref()));
    tracing::info!(
        session_id = %session.id(),
        bot_ready = session.stylist().is_ready(),
        "Session started"
    );

    ApiResponse::created(SessionResponse::from_session(&session).await)
}

/// `GET /api/v1/sessions/{sessionId}`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}",
    tag = "sessions",
    operation_id = "sessions.get",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session status", body = SessionResponse),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn get_session(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResponse<SessionResponse> {
    ApiResponse::success(SessionResponse::from_session(&session).await)
}

/// `DELETE /api/v1/sessions/{sessionId}`
///
/// Ends the session. Its wardrobe is discarded.
#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{sessionId}",
    tag = "sessions",
    operation_id = "sessions.delete",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session ended", body = DeleteSessionResponse),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> ApiResponse<DeleteSessionResponse> {
    let deleted = state.sessions.remove(session.id());
    tracing::info!(session_id = %session.id(), "Session ended");

    ApiResponse::success(DeleteSessionResponse {
        session_id: session.id().to_string(),
        deleted,
    })
}

/// `PUT /api/v1/sessions/{sessionId}/credential`
///
/// Binds the session's bot to a user-supplied credential. The key lives in
/// memory for the lifetime of the session only.
#[utoipa::path(
    put,
    path = "/api/v1/sessions/{sessionId}/credential",
    tag = "sessions",
    operation_id = "sessions.setCredential",
    params(("sessionId" = String, Path, description = "Session ID")),
    request_body = CredentialRequest,
    responses(
        (status = 200, description = "Credential accepted", body = SessionResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn set_credential(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    AppJson(req): AppJson<CredentialRequest>,
) -> ApiResponse<SessionResponse> {
    if let Err(e) = validate_request(&req) {
        return e.into();
    }
    if req.api_key.trim().is_empty() {
        return StyleSyncError::Validation("apiKey: must not be blank".to_string()).into();
    }

    session.set_stylist(state.stylist_for(Some(&req.api_key)));
    tracing::info!(session_id = %session.id(), "Session credential updated");

    ApiResponse::success(SessionResponse::from_session(&session).await)
}
