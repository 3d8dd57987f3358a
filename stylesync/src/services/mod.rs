mod sessions;
mod wardrobe;

pub use sessions::{Session, SessionRegistry, SessionSweeper};
pub use wardrobe::{parse_export, CategoryCount, Wardrobe, WardrobeStats, EXPORT_FILE_NAME};
