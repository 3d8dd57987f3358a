use serde::Serialize;

use crate::models::WardrobeItem;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsResponse {
    /// Items in insertion order.
    pub items: Vec<WardrobeItem>,
    pub total: usize,
}
