use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StyleSync API",
        version = "1.0.0",
        description = "AI fashion assistant. Photograph clothes, build a per-session wardrobe, and get outfit recommendations.",
    ),
    paths(
        handlers::health::health_check,
        handlers::sessions::create_session,
        handlers::sessions::get_session,
        handlers::sessions::delete_session,
        handlers::sessions::set_credential,
        handlers::items::analyze_item,
        handlers::items::list_items,
        handlers::items::get_item,
        handlers::items::wardrobe_stats,
        handlers::items::export_wardrobe,
        handlers::recommendations::recommend_outfit,
        handlers::recommendations::preference_options,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Domain records
        crate::models::ClothingItem,
        crate::models::WardrobeItem,
        crate::models::OutfitRecommendation,
        crate::services::WardrobeStats,
        crate::services::CategoryCount,
        crate::llm::CredentialSource,
        // Sessions
        dto::CreateSessionRequest,
        dto::CredentialRequest,
        dto::SessionResponse,
        dto::DeleteSessionResponse,
        // Wardrobe
        dto::ListItemsResponse,
        // Recommendations
        dto::RecommendationRequest,
        dto::RecommendationResponse,
        dto::PreferenceOptionsResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "sessions", description = "Session lifecycle and credential entry"),
        (name = "wardrobe", description = "Image analysis, wardrobe browsing, stats and export"),
        (name = "recommendations", description = "Outfit recommendations and preference options"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
