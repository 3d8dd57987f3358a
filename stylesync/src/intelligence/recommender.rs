use std::sync::Arc;

use crate::config::WardrobeConfig;
use crate::error::{Result, StyleSyncError};
use crate::llm::{complete_structured, prompts, GatewayRequest, ModelGateway};
use crate::models::{OutfitRecommendation, WardrobeItem};
use crate::services::Wardrobe;

/// Asks the model for outfits drawn from a wardrobe.
#[derive(Clone)]
pub struct RecommendationEngine {
    gateway: Arc<dyn ModelGateway>,
    default_max_items: usize,
    max_items_cap: usize,
}

impl RecommendationEngine {
    pub fn new(gateway: Arc<dyn ModelGateway>, config: &WardrobeConfig) -> Self {
        let max_items_cap = config.max_recommendations.max(1);
        Self {
            gateway,
            default_max_items: config.default_recommendations.clamp(1, max_items_cap),
            max_items_cap,
        }
    }

    pub fn default_max_items(&self) -> usize {
        self.default_max_items
    }

    /// Clamp a requested outfit count into `1..=MAX_RECOMMENDATIONS`.
    pub fn effective_max_items(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_max_items)
            .clamp(1, self.max_items_cap)
    }

    /// Generate a recommendation. An empty wardrobe short-circuits with
    /// [`StyleSyncError::EmptyWardrobe`] before the model is contacted.
    ///
    /// Ids in the result are whatever the model returned; use
    /// [`resolve_outfit`] to map them back onto the wardrobe.
    pub async fn recommend(
        &self,
        wardrobe: &Wardrobe,
        preferences: &str,
        max_items: Option<usize>,
    ) -> Result<OutfitRecommendation> {
        if wardrobe.is_empty() {
            return Err(StyleSyncError::EmptyWardrobe);
        }

        let max_items = self.effective_max_items(max_items);
        let system = prompts::outfit_recommendation_system_prompt(wardrobe.list(), max_items)
            .map_err(|e| StyleSyncError::Internal(format!("Failed to serialize wardrobe: {e}")))?;

        let request = GatewayRequest::new(
            prompts::OUTFIT_RECOMMENDATION_SCHEMA,
            system,
            prompts::outfit_recommendation_user_prompt(preferences),
        );

        tracing::debug!(
            wardrobe_items = wardrobe.len(),
            max_items,
            "Requesting outfit recommendation"
        );

        match complete_structured::<OutfitRecommendation>(self.gateway.as_ref(), &request).await {
            Ok(recommendation) => {
                tracing::info!(
                    recommended = recommendation.recommended_items.len(),
                    "Outfit recommendation generated"
                );
                Ok(recommendation)
            }
            Err(StyleSyncError::MissingCredential) => Err(StyleSyncError::MissingCredential),
            Err(error) => {
                tracing::error!(error = %error, "Error getting recommendations");
                Err(StyleSyncError::Recommendation(error.to_string()))
            }
        }
    }
}

/// Map recommended ids onto wardrobe items, in recommendation order.
/// Ids that are not in the wardrobe are skipped.
pub fn resolve_outfit(
    wardrobe: &Wardrobe,
    recommendation: &OutfitRecommendation,
) -> Vec<WardrobeItem> {
    recommendation
        .recommended_items
        .iter()
        .filter_map(|id| {
            let item = wardrobe.get_by_id(id.as_str());
            if item.is_none() {
                tracing::debug!(item_id = %id, "Skipping unknown recommended item");
            }
            item.cloned()
        })
        .collect()
}
