//! # V1 Session Resolution Middleware
//!
//! Every `/sessions/{sessionId}/...` route runs behind [`session_middleware`].
//! It looks the session up once, refreshes its idle timer, and hands the
//! `Arc<Session>` to handlers through request extensions. Unknown ids are
//! answered here with a `404 not_found` envelope, so handlers never see them.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::services::Session;

use super::response::{ApiResponse, ErrorCode};

pub async fn session_middleware(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(session_id) = params.get("sessionId") else {
        return ApiResponse::<()>::error(ErrorCode::InvalidRequest, "Missing session id")
            .into_response();
    };

    let Some(session) = state.sessions.get(session_id) else {
        return ApiResponse::<()>::error(
            ErrorCode::NotFound,
            format!("Session {session_id} not found"),
        )
        .into_response();
    };

    request.extensions_mut().insert::<Arc<Session>>(session);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm::LlmProvider;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    fn build_test_app() -> (Router, AppState) {
        let config = Config::default();
        let llm = LlmProvider::new(&config.llm);
        let state = AppState::new(config, llm);

        async fn echo_session(Extension(session): Extension<Arc<Session>>) -> String {
            session.id().to_string()
        }

        let app = Router::new()
            .route("/sessions/{sessionId}/echo", get(echo_session))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                session_middleware,
            ))
            .with_state(state.clone());

        (app, state)
    }

    async fn parse_error_body(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found_envelope() {
        let (app, _) = build_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sessions/nope/echo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_known_session_reaches_handler() {
        let (app, state) = build_test_app();
        let session = state.sessions.create(state.stylist_for(None));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/sessions/{}/echo", session.id()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, session.id().as_bytes());
    }
}
