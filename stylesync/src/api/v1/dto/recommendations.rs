use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{OutfitRecommendation, StylePreferences, WardrobeItem};

/// Body of `POST /sessions/{sessionId}/recommendations`.
///
/// The structured fields mirror the preference form; `preferences` is free
/// text appended after them. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[validate(length(max = 100))]
    pub occasion: Option<String>,
    #[validate(length(max = 100))]
    pub season: Option<String>,
    #[validate(length(max = 100))]
    pub time_of_day: Option<String>,
    #[validate(length(max = 100))]
    pub style: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub preferences: Option<String>,
    /// Number of outfits to ask for. Clamped to the server's range.
    pub max_items: Option<usize>,
}

impl RecommendationRequest {
    /// The single preference string handed to the recommender.
    pub fn preference_text(&self) -> String {
        let structured = StylePreferences {
            occasion: self.occasion.clone(),
            season: self.season.clone(),
            time_of_day: self.time_of_day.clone(),
            style: self.style.clone(),
            notes: self.notes.clone(),
        };
        let free_text = self
            .preferences
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        match free_text {
            Some(text) if structured.is_empty() => text.to_string(),
            Some(text) => format!("{}\n{}", structured.to_prompt_text(), text),
            None => structured.to_prompt_text(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendation: OutfitRecommendation,
    /// Recommended items that exist in the wardrobe, in recommendation order.
    pub outfit: Vec<WardrobeItem>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceOptionsResponse {
    pub occasions: Vec<String>,
    pub seasons: Vec<String>,
    pub times_of_day: Vec<String>,
    pub styles: Vec<String>,
}
