pub mod extractor;
pub mod recommender;
pub mod stylist;

pub use extractor::AttributeExtractor;
pub use recommender::{resolve_outfit, RecommendationEngine};
pub use stylist::Stylist;
