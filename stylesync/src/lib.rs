//! StyleSync: photograph clothes, build a wardrobe, get outfit ideas.
//!
//! A multimodal model turns each photo into a [`models::ClothingItem`]; items
//! accumulate in a per-session [`services::Wardrobe`]; the same model then
//! recommends outfits drawn from it. The HTTP API and embedded UI live in
//! [`api`].

pub mod api;
pub mod config;
pub mod error;
pub mod intelligence;
pub mod llm;
pub mod models;
pub mod services;
