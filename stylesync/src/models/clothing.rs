use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attributes the vision model extracts from a single clothing photo.
///
/// Every field is required: a model response that omits one is rejected
/// rather than stored half-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, utoipa::ToSchema)]
pub struct ClothingItem {
    /// Category of the clothing item (e.g., T-Shirt, Dress, Pants, Shorts)
    pub category: String,
    /// Detailed description of the clothing item
    pub description: String,
    /// Available colors of the clothing item
    pub color: Vec<String>,
    /// Gender suitability (Unisex, Male, Female)
    pub gender: String,
    /// Type of fabric used
    pub fabric: String,
    /// Pattern (Solid, Striped, Checked, Floral, etc.)
    pub pattern: String,
    /// Fit type (Regular Fit, Slim Fit, Loose Fit)
    pub fit: String,
    /// Sleeve length (Short, Long, 3/4, Sleeveless, N/A)
    pub sleeve_length: String,
    /// Neck type (Round, V-Neck, Collar, etc.)
    pub neck_type: String,
    /// Suitable occasions
    pub occasion: Vec<String>,
    /// Suitable seasons
    pub season: Vec<String>,
    /// Special features
    #[schema(value_type = Vec<String>)]
    pub features: BTreeSet<String>,
}

/// A clothing item stored in a wardrobe under its sequential id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, utoipa::ToSchema)]
pub struct WardrobeItem {
    /// Sequential identifier, starting at 1
    pub id: u64,
    #[serde(flatten)]
    pub item: ClothingItem,
}

impl WardrobeItem {
    pub fn new(id: u64, item: ClothingItem) -> Self {
        Self { id, item }
    }
}
