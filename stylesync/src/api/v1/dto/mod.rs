//! v1 API Data Transfer Objects.
//!
//! Wire types for the v1 REST API, kept apart from the domain models in
//! `src/models/`. Wardrobe items and recommendations are serialized as-is
//! (snake_case, the model's schema); request and wrapper types use
//! camelCase.

pub mod common;
pub mod items;
pub mod recommendations;
pub mod sessions;

pub use common::validate_request;
pub use items::*;
pub use recommendations::*;
pub use sessions::*;
