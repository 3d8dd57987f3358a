use std::sync::Arc;

use axum::Extension;

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{
    validate_request, PreferenceOptionsResponse, RecommendationRequest, RecommendationResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::models::{OCCASIONS, SEASONS, STYLES, TIMES_OF_DAY};
use crate::services::Session;

/// `POST /api/v1/sessions/{sessionId}/recommendations`
///
/// Asks the bot for outfits built from this session's wardrobe. The
/// response carries the model's recommendation plus the recommended items
/// that actually exist in the wardrobe.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/recommendations",
    tag = "recommendations",
    operation_id = "recommendations.create",
    params(("sessionId" = String, Path, description = "Session ID")),
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "Outfit recommendation", body = RecommendationResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "No model credential for this session", body = ApiError),
        (status = 404, description = "Session not found", body = ApiError),
        (status = 409, description = "Wardrobe is empty", body = ApiError),
        (status = 502, description = "Model gateway failed", body = ApiError),
    )
)]
pub async fn recommend_outfit(
    Extension(session): Extension<Arc<Session>>,
    AppJson(req): AppJson<RecommendationRequest>,
) -> ApiResponse<RecommendationResponse> {
    if let Err(e) = validate_request(&req) {
        return e.into();
    }

    match session.recommend(&req.preference_text(), req.max_items).await {
        Ok((recommendation, outfit)) => ApiResponse::success(RecommendationResponse {
            recommendation,
            outfit,
        }),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/preferences/options`
///
/// Suggested values for the preference form. Other values are accepted.
#[utoipa::path(
    get,
    path = "/api/v1/preferences/options",
    tag = "recommendations",
    operation_id = "preferences.options",
    responses(
        (status = 200, description = "Preference option lists", body = PreferenceOptionsResponse),
    )
)]
pub async fn preference_options() -> ApiResponse<PreferenceOptionsResponse> {
    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    ApiResponse::success(PreferenceOptionsResponse {
        occasions: owned(OCCASIONS),
        seasons: owned(SEASONS),
        times_of_day: owned(TIMES_OF_DAY),
        styles: owned(STYLES),
    })
}
