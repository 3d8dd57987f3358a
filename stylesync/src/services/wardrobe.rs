use serde::Serialize;

use crate::error::Result;
use crate::models::{ClothingItem, WardrobeItem};

/// File name offered for wardrobe downloads.
pub const EXPORT_FILE_NAME: &str = "my_wardrobe.json";

/// Per-category item count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeStats {
    pub total_items: usize,
    /// Ordered by count, most frequent first.
    pub categories: Vec<CategoryCount>,
}

/// A session's collection of analyzed clothing items.
///
/// Append-only: ids are `len + 1` at insertion, so they run `1..=N` in
/// insertion order with no gaps, and stored items never change.
#[derive(Debug, Clone, Default)]
pub struct Wardrobe {
    items: Vec<WardrobeItem>,
}

impl Wardrobe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: ClothingItem) -> u64 {
        let id = self.items.len() as u64 + 1;
        self.items.push(WardrobeItem::new(id, item));
        id
    }

    /// Look an item up by id in any textual form (`3`, `"3"`, `" 3 "`).
    pub fn get_by_id<K: ToString + ?Sized>(&self, id: &K) -> Option<&WardrobeItem> {
        let key = id.to_string();
        let key = key.trim();
        self.items.iter().find(|item| item.id.to_string() == key)
    }

    pub fn list(&self) -> &[WardrobeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Human-readable dump of every item, in insertion order.
    pub fn export(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    pub fn stats(&self) -> WardrobeStats {
        let mut categories: Vec<CategoryCount> = Vec::new();
        for item in &self.items {
            match categories
                .iter_mut()
                .find(|entry| entry.category == item.item.category)
            {
                Some(entry) => entry.count += 1,
                None => categories.push(CategoryCount {
                    category: item.item.category.clone(),
                    count: 1,
                }),
            }
        }
        // Stable sort keeps first-seen order among equal counts.
        categories.sort_by(|a, b| b.count.cmp(&a.count));

        WardrobeStats {
            total_items: self.items.len(),
            categories,
        }
    }
}

/// Decode a document produced by [`Wardrobe::export`].
pub fn parse_export(text: &str) -> Result<Vec<WardrobeItem>> {
    Ok(serde_json::from_str(text)?)
}
