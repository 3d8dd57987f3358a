//! Prompt templates for the two model round-trips.
//!
//! Each prompt carries the JSON schema of the expected reply, generated from
//! the Rust record type, so the model's answer decodes directly into it.

use schemars::JsonSchema;

use crate::error::Result;
use crate::models::{ClothingItem, OutfitRecommendation, WardrobeItem};

pub const CLOTHING_ITEM_SCHEMA: &str = "ClothingItem";
pub const OUTFIT_RECOMMENDATION_SCHEMA: &str = "OutfitRecommendation";

pub const ANALYSIS_USER_PROMPT: &str = "Analyze this clothing item and extract its properties.";

/// Render the JSON schema for `T` as pretty JSON.
pub fn output_schema<T: JsonSchema>() -> String {
    let schema = schemars::schema_for!(T);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

fn output_contract<T: JsonSchema>() -> String {
    format!(
        "Respond with a single JSON object only, no prose or markdown, that conforms to this JSON schema. \
Every property is required.\n\n{}",
        output_schema::<T>()
    )
}

/// System instruction for extracting attributes from a clothing photo.
///
/// # Example
/// ```
/// use stylesync::llm::prompts::clothing_analysis_system_prompt;
///
/// let prompt = clothing_analysis_system_prompt();
/// assert!(prompt.contains("expert fashion analyst"));
/// assert!(prompt.contains("sleeve_length"));
/// ```
pub fn clothing_analysis_system_prompt() -> String {
    format!(
        r#"You are an expert fashion analyst. Analyze the clothing item in the image and extract detailed information about its properties.
Focus on identifying the category, colors, fabric type, pattern, fit, and other relevant fashion attributes.
Be specific and accurate in your analysis. If certain attributes are not clearly visible, make reasonable inferences based on what you can see.
Never omit a field.

{}"#,
        output_contract::<ClothingItem>()
    )
}

/// System instruction for recommending outfits from the current wardrobe.
///
/// The wardrobe is embedded verbatim as pretty-printed JSON.
pub fn outfit_recommendation_system_prompt(
    wardrobe: &[WardrobeItem],
    max_recommendations: usize,
) -> Result<String> {
    let wardrobe_json = serde_json::to_string_pretty(wardrobe)?;

    Ok(format!(
        r#"You are an expert fashion stylist. Based on the user's preferences and their wardrobe items, recommend complete outfits that match their needs. Consider color coordination, style compatibility, occasion appropriateness, and seasonal suitability.

User's Wardrobe:
{wardrobe_json}

Guidelines:
1. Recommend complete outfits (try to include both top and bottom wear when applicable)
2. Consider color harmony and style coherence
3. Match the occasion and season specified by the user
4. Provide practical styling advice
5. Maximum {max_recommendations} outfit recommendations
6. Only use item IDs that exist in the wardrobe

{}"#,
        output_contract::<OutfitRecommendation>()
    ))
}

pub fn outfit_recommendation_user_prompt(preferences: &str) -> String {
    format!("User preferences: {}", preferences.trim())
}
