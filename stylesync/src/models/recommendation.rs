use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outfit suggestion returned by the model. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, utoipa::ToSchema)]
pub struct OutfitRecommendation {
    /// List of clothing item IDs for the recommended outfit
    pub recommended_items: Vec<String>,
    /// Explanation for why this outfit was recommended
    pub reasoning: String,
    /// Additional styling tips
    pub style_tips: Vec<String>,
}

pub const OCCASIONS: &[&str] = &[
    "Casual",
    "Work/Professional",
    "Party",
    "Date Night",
    "Beach/Pool",
    "Gym/Athletic",
    "Formal Event",
    "Travel",
];

pub const SEASONS: &[&str] = &["Spring", "Summer", "Fall", "Winter", "Any"];

pub const TIMES_OF_DAY: &[&str] = &["Morning", "Afternoon", "Evening", "Night", "Any"];

pub const STYLES: &[&str] = &[
    "Comfortable",
    "Stylish",
    "Professional",
    "Trendy",
    "Classic",
    "Minimalist",
    "Bold",
];

/// Structured preferences collected by the recommendation form.
///
/// Values are free text; the option lists above are suggestions only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePreferences {
    pub occasion: Option<String>,
    pub season: Option<String>,
    pub time_of_day: Option<String>,
    pub style: Option<String>,
    pub notes: Option<String>,
}

impl StylePreferences {
    pub fn is_empty(&self) -> bool {
        [
            &self.occasion,
            &self.season,
            &self.time_of_day,
            &self.style,
            &self.notes,
        ]
        .iter()
        .all(|value| value.as_deref().map_or(true, |v| v.trim().is_empty()))
    }

    /// Combine the form fields into the single preference string the
    /// recommender sends to the model. Every line is always present so the
    /// model sees the same layout regardless of which fields were filled.
    pub fn to_prompt_text(&self) -> String {
        fn field(value: &Option<String>) -> &str {
            value.as_deref().map(str::trim).unwrap_or("")
        }

        format!(
            "Occasion: {}\nSeason: {}\nTime of Day: {}\nStyle Preference: {}\nAdditional Notes: {}",
            field(&self.occasion),
            field(&self.season),
            field(&self.time_of_day),
            field(&self.style),
            field(&self.notes),
        )
    }
}
