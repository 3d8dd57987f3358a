use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::session_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .route(
            "/preferences/options",
            get(handlers::recommendations::preference_options),
        )
        .route("/sessions", post(handlers::sessions::create_session))
        .merge(super::openapi::redoc_router());

    let session_routes = Router::new()
        .route(
            "/sessions/{sessionId}",
            get(handlers::sessions::get_session).delete(handlers::sessions::delete_session),
        )
        .route(
            "/sessions/{sessionId}/credential",
            put(handlers::sessions::set_credential),
        )
        .route(
            "/sessions/{sessionId}/items:analyze",
            post(handlers::items::analyze_item),
        )
        .route("/sessions/{sessionId}/items", get(handlers::items::list_items))
        .route(
            "/sessions/{sessionId}/items/{itemId}",
            get(handlers::items::get_item),
        )
        .route(
            "/sessions/{sessionId}/stats",
            get(handlers::items::wardrobe_stats),
        )
        .route(
            "/sessions/{sessionId}/wardrobe:export",
            get(handlers::items::export_wardrobe),
        )
        .route(
            "/sessions/{sessionId}/recommendations",
            post(handlers::recommendations::recommend_outfit),
        )
        .route_layer(middleware::from_fn_with_state(state, session_middleware));

    Router::new().merge(public_routes).merge(session_routes)
}
