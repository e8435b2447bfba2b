//! Menu Item Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub type MenuItemId = RecordId;

/// Catalog entry for a dish
///
/// Deleting an item is always the soft form (`is_available = false`): events
/// may still reference it by id, and those references must keep resolving
/// when documents are generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<MenuItemId>,
    pub category: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_name_gujarati: String,
    pub name: String,
    #[serde(default)]
    pub name_gujarati: String,
    #[serde(default)]
    pub description: String,
    /// Identifier carried over from the legacy catalog import
    #[serde(default)]
    pub original_id: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_veg: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Case-insensitive substring match across name, description, category
    /// and tags. `query` must already be lowercased.
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
            || self.category.to_lowercase().contains(query)
            || self
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(query))
    }
}

/// Create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub category: String,
    pub category_name: Option<String>,
    pub category_name_gujarati: Option<String>,
    pub name: String,
    pub name_gujarati: Option<String>,
    pub description: Option<String>,
    pub original_id: Option<String>,
    pub price: Option<f64>,
    pub is_veg: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub category: Option<String>,
    pub category_name: Option<String>,
    pub category_name_gujarati: Option<String>,
    pub name: Option<String>,
    pub name_gujarati: Option<String>,
    pub description: Option<String>,
    pub original_id: Option<String>,
    pub price: Option<f64>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub tags: Option<Vec<String>>,
}
