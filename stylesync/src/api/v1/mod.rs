pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod router;

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use crate::api::routes::create_router;
    use crate::api::state::AppState;
    use crate::config::{
        Config, LlmConfig, LogFormat, ServerConfig, SessionConfig, WardrobeConfig,
    };
    use crate::llm::LlmProvider;

    fn test_state(max_upload_bytes: usize) -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8501,
                log_format: LogFormat::Pretty,
            },
            llm: LlmConfig::default(),
            wardrobe: WardrobeConfig {
                max_upload_bytes,
                ..WardrobeConfig::default()
            },
            session: SessionConfig::default(),
        };
        let llm = LlmProvider::new(&config.llm);
        AppState::new(config, llm)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    fn multipart_upload(uri: &str, bytes: &[u8]) -> Request<Body> {
        let boundary = "stylesync-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"shirt.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn create_session(app: &Router, body: &str) -> String {
        let response = send(app, post_json("/api/v1/sessions", body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        json["data"]["sessionId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_gateway_and_sessions() {
        let app = create_router(test_state(1024));

        let response = send(&app, get("/api/v1/health")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["llm"]["provider"], "gemini");
        assert_eq!(json["data"]["llm"]["status"], "needs_credential");
        assert_eq!(json["data"]["activeSessions"], 0);
    }

    #[tokio::test]
    async fn openapi_json_is_valid() {
        let app = create_router(test_state(1024));

        let response = send(&app, get("/api/v1/openapi.json")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let version = json["openapi"]
            .as_str()
            .expect("openapi field should be a string");
        assert!(version.starts_with("3."));
        assert!(json["paths"]["/api/v1/sessions/{sessionId}/items:analyze"].is_object());
    }

    #[tokio::test]
    async fn preference_options_are_listed() {
        let app = create_router(test_state(1024));

        let json = body_json(send(&app, get("/api/v1/preferences/options")).await).await;
        assert_eq!(json["data"]["seasons"][1], "Summer");
        assert_eq!(json["data"]["occasions"].as_array().unwrap().len(), 8);
        assert_eq!(json["data"]["timesOfDay"][0], "Morning");
    }

    #[tokio::test]
    async fn session_without_credential_is_not_ready() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, "{}").await;

        let json = body_json(send(&app, get(&format!("/api/v1/sessions/{session_id}"))).await).await;
        assert_eq!(json["data"]["botReady"], false);
        assert_eq!(json["data"]["credentialSource"], "missing");
        assert_eq!(json["data"]["itemCount"], 0);
    }

    #[tokio::test]
    async fn session_can_be_created_without_body() {
        let app = create_router(test_state(1024));

        let response = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/v1/sessions")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let app = create_router(test_state(1024));

        for uri in [
            "/api/v1/sessions/missing",
            "/api/v1/sessions/missing/items",
            "/api/v1/sessions/missing/stats",
            "/api/v1/sessions/missing/wardrobe:export",
        ] {
            let response = send(&app, get(uri)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "not_found");
        }
    }

    #[tokio::test]
    async fn analyze_without_credential_is_rejected() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, "{}").await;

        let response = send(
            &app,
            multipart_upload(
                &format!("/api/v1/sessions/{session_id}/items:analyze"),
                b"\xFF\xD8\xFF\xE0 jpeg",
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "missing_credential");
    }

    #[tokio::test]
    async fn misconfigured_provider_is_a_gateway_error() {
        let mut state = test_state(1024);
        let llm = LlmConfig {
            model: "mystery-model".to_string(),
            ..LlmConfig::default()
        };
        state.llm = LlmProvider::new(&llm);
        let app = create_router(state);
        let session_id = create_session(&app, r#"{"apiKey": "user-key"}"#).await;

        let response = send(&app, get(&format!("/api/v1/sessions/{session_id}"))).await;
        let json = body_json(response).await;
        assert_eq!(json["data"]["botReady"], false);
        assert_eq!(json["data"]["credentialSource"], "session");
        assert_eq!(
            json["data"]["unavailableReason"],
            "Unknown provider in model: mystery-model"
        );

        let response = send(
            &app,
            multipart_upload(
                &format!("/api/v1/sessions/{session_id}/items:analyze"),
                b"\xFF\xD8\xFF\xE0 jpeg",
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "gateway_error");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("mystery-model"));
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let app = create_router(test_state(16));
        let session_id = create_session(&app, r#"{"apiKey": "test-key"}"#).await;

        let response = send(
            &app,
            multipart_upload(
                &format!("/api/v1/sessions/{session_id}/items:analyze"),
                &[0u8; 64],
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "payload_too_large");
    }

    #[tokio::test]
    async fn upload_without_file_field_is_invalid() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, r#"{"apiKey": "test-key"}"#).await;

        let boundary = "b";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{boundary}--\r\n"
        );
        let response = send(
            &app,
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/sessions/{session_id}/items:analyze"))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn recommend_on_empty_wardrobe_conflicts() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, r#"{"apiKey": "test-key"}"#).await;

        let response = send(
            &app,
            post_json(
                &format!("/api/v1/sessions/{session_id}/recommendations"),
                r#"{"occasion": "Casual", "season": "Summer", "maxItems": 1}"#,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "empty_wardrobe");
        assert_eq!(
            json["error"]["message"],
            "Your wardrobe is empty. Add some clothing items first"
        );
    }

    #[tokio::test]
    async fn recommend_without_credential_is_rejected_first() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, "{}").await;

        let response = send(
            &app,
            post_json(
                &format!("/api/v1/sessions/{session_id}/recommendations"),
                r#"{"preferences": "Casual"}"#,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn credential_entry_readies_the_bot() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, "{}").await;
        let uri = format!("/api/v1/sessions/{session_id}/credential");

        let response = send(
            &app,
            Request::builder()
                .method("PUT")
                .uri(&uri)
                .header("content-type", "application/json")
                .body(Body::from(r#"{"apiKey": "user-key"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["botReady"], true);
        assert_eq!(json["data"]["credentialSource"], "session");

        let response = send(
            &app,
            Request::builder()
                .method("PUT")
                .uri(&uri)
                .header("content-type", "application/json")
                .body(Body::from(r#"{"key": "wrong-field"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Missing required field: apiKey");
    }

    #[tokio::test]
    async fn empty_wardrobe_export_is_a_download() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, "{}").await;

        let response = send(
            &app,
            get(&format!("/api/v1/sessions/{session_id}/wardrobe:export")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"my_wardrobe.json\""
        );
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"[]");
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, "{}").await;

        let response = send(&app, get(&format!("/api/v1/sessions/{session_id}/items/1"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let app = create_router(test_state(1024));
        let session_id = create_session(&app, "{}").await;
        let uri = format!("/api/v1/sessions/{session_id}");

        let response = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get(&uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_serves_the_ui() {
        let app = create_router(test_state(1024));

        let response = send(&app, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
