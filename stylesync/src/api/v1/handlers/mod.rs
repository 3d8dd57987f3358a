pub(crate) mod health;
pub mod items;
pub mod recommendations;
pub mod sessions;

pub use health::health_check;
