//! Menu Item Repository

use std::collections::BTreeSet;

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, now_millis, strip_table_prefix};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

const MENU_ITEM_TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

/// Merge patch for bulk availability updates
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityPatch {
    is_available: bool,
    updated_at: i64,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All catalog entries, including soft-deleted ones.
    ///
    /// Document assembly resolves selections against this set: an event may
    /// still reference an item that has since been made unavailable.
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Available entries only (the public listing)
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE isAvailable = true ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Available entries within one category
    pub async fn find_by_category(&self, category: &str) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE category = $category AND isAvailable = true ORDER BY name")
            .bind(("category", category.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Distinct category ids across available items, sorted
    pub async fn categories(&self) -> RepoResult<Vec<String>> {
        let items = self.find_available().await?;
        let categories: BTreeSet<String> = items.into_iter().map(|i| i.category).collect();
        Ok(categories.into_iter().collect())
    }

    /// Case-insensitive substring search across name, description, category
    /// and tags, restricted to available items.
    pub async fn search(&self, query: &str) -> RepoResult<Vec<MenuItem>> {
        let needle = query.trim().to_lowercase();
        let mut items = self.find_available().await?;
        if !needle.is_empty() {
            items.retain(|item| item.matches_query(&needle));
        }
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let key = strip_table_prefix(MENU_ITEM_TABLE, id);
        let item: Option<MenuItem> = self.base.db().select((MENU_ITEM_TABLE, key)).await?;
        Ok(item)
    }

    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let now = now_millis();
        let item = MenuItem {
            id: None,
            category: data.category,
            category_name: data.category_name.unwrap_or_default(),
            category_name_gujarati: data.category_name_gujarati.unwrap_or_default(),
            name: data.name,
            name_gujarati: data.name_gujarati.unwrap_or_default(),
            description: data.description.unwrap_or_default(),
            original_id: data.original_id.unwrap_or_default(),
            price: data.price.unwrap_or(0.0),
            is_veg: data.is_veg.unwrap_or(true),
            is_available: true,
            tags: data.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created: Option<MenuItem> = self
            .base
            .db()
            .create(MENU_ITEM_TABLE)
            .content(item)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let key = strip_table_prefix(MENU_ITEM_TABLE, id).to_string();
        let mut item = self
            .find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        if let Some(v) = data.category {
            item.category = v;
        }
        if let Some(v) = data.category_name {
            item.category_name = v;
        }
        if let Some(v) = data.category_name_gujarati {
            item.category_name_gujarati = v;
        }
        if let Some(v) = data.name {
            item.name = v;
        }
        if let Some(v) = data.name_gujarati {
            item.name_gujarati = v;
        }
        if let Some(v) = data.description {
            item.description = v;
        }
        if let Some(v) = data.original_id {
            item.original_id = v;
        }
        if let Some(v) = data.price {
            item.price = v;
        }
        if let Some(v) = data.is_veg {
            item.is_veg = v;
        }
        if let Some(v) = data.is_available {
            item.is_available = v;
        }
        if let Some(v) = data.tags {
            item.tags = v;
        }
        item.updated_at = now_millis();
        item.id = None; // addressed by key; the store re-attaches the id

        let updated: Option<MenuItem> = self
            .base
            .db()
            .update((MENU_ITEM_TABLE, key.as_str()))
            .content(item)
            .await?;

        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Soft delete: the record stays, listings stop including it.
    pub async fn soft_delete(&self, id: &str) -> RepoResult<MenuItem> {
        self.update(
            id,
            MenuItemUpdate {
                category: None,
                category_name: None,
                category_name_gujarati: None,
                name: None,
                name_gujarati: None,
                description: None,
                original_id: None,
                price: None,
                is_veg: None,
                is_available: Some(false),
                tags: None,
            },
        )
        .await
    }

    /// Apply one availability flag to exactly the given set of ids.
    ///
    /// Returns how many records were actually updated; unknown ids are
    /// skipped rather than failing the batch.
    pub async fn set_availability(&self, ids: &[String], is_available: bool) -> RepoResult<usize> {
        let mut modified = 0;
        for id in ids {
            let key = strip_table_prefix(MENU_ITEM_TABLE, id).to_string();
            let updated: Option<MenuItem> = self
                .base
                .db()
                .update((MENU_ITEM_TABLE, key.as_str()))
                .merge(AvailabilityPatch {
                    is_available,
                    updated_at: now_millis(),
                })
                .await?;
            if updated.is_some() {
                modified += 1;
            }
        }
        Ok(modified)
    }
}
