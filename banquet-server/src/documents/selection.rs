//! Selection classification and resolution
//!
//! Every selected item is classified exactly once into a [`Selection`] at
//! the start of document assembly: a catalog reference or a custom entry
//! whose display name is embedded in its synthetic id. The HTML builders
//! only ever see [`ResolvedItem`]s; nothing downstream re-inspects raw ids.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use crate::db::models::{MenuItem, SelectedItem};

/// Synthetic id prefix marking a custom (non-catalog) entry:
/// `__custom__:<categoryId>:<url-encoded-name>:<timestamp>`
pub const CUSTOM_ID_PREFIX: &str = "__custom__:";

/// A selected item, classified
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// References a catalog item by id (with an optional display-name
    /// snapshot taken when the selection was made)
    Catalog {
        id: String,
        embedded_name: Option<String>,
        sub_items: Vec<String>,
    },
    /// Ad-hoc entry with no catalog backing; contributes no price
    Custom {
        id: String,
        name: String,
        sub_items: Vec<String>,
    },
}

impl Selection {
    /// Classify a stored selection. Ids matching the custom pattern become
    /// [`Selection::Custom`] with their embedded name decoded; everything
    /// else (including malformed custom ids) is treated as a catalog
    /// reference so the row still renders.
    pub fn classify(item: &SelectedItem) -> Self {
        match decode_custom_name(&item.id) {
            Some(name) => Selection::Custom {
                id: item.id.clone(),
                name,
                sub_items: item.sub_items.clone(),
            },
            None => Selection::Catalog {
                id: item.id.clone(),
                embedded_name: item.name.clone(),
                sub_items: item.sub_items.clone(),
            },
        }
    }

    /// The selection's identity, used for set-like deduplication
    pub fn id(&self) -> &str {
        match self {
            Selection::Catalog { id, .. } | Selection::Custom { id, .. } => id,
        }
    }

    /// Resolve to a display form against the catalog index.
    ///
    /// Lookup misses degrade to the embedded name snapshot, then to a
    /// humanized form of the raw id: a selection never disappears from the
    /// document and a raw id is never shown verbatim.
    pub fn resolve(&self, index: &MenuIndex) -> ResolvedItem {
        match self {
            Selection::Custom {
                name, sub_items, ..
            } => ResolvedItem {
                name: name.clone(),
                name_gujarati: String::new(),
                sub_items: sub_items.clone(),
            },
            Selection::Catalog {
                id,
                embedded_name,
                sub_items,
            } => {
                let (name, name_gujarati) = match index.lookup(id) {
                    Some(item) => (item.name.clone(), item.name_gujarati.clone()),
                    None => (
                        embedded_name
                            .clone()
                            .filter(|n| !n.trim().is_empty())
                            .unwrap_or_else(|| humanize_id(id)),
                        String::new(),
                    ),
                };
                ResolvedItem {
                    name,
                    name_gujarati,
                    sub_items: sub_items.clone(),
                }
            }
        }
    }
}

/// Display form of a selection, ready for the HTML builders
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub name: String,
    pub name_gujarati: String,
    pub sub_items: Vec<String>,
}

/// Decode the display name out of a custom-item id.
///
/// Splits on `:` and rejoins everything between the category segment and the
/// final timestamp segment, so encoded names that themselves contain colons
/// survive; with only three segments the remainder is the name. The
/// timestamp-adjacent encoding is ambiguous for names ending in digit-only
/// colon segments. This mirrors the behavior selections were written with,
/// it does not try to repair it.
pub fn decode_custom_name(id: &str) -> Option<String> {
    if !id.starts_with(CUSTOM_ID_PREFIX) {
        return None;
    }
    let parts: Vec<&str> = id.split(':').collect();
    if parts.len() < 3 {
        return None;
    }
    let encoded = if parts.len() == 3 {
        parts[2].to_string()
    } else {
        parts[2..parts.len() - 1].join(":")
    };
    Some(percent_decode_str(&encoded).decode_utf8_lossy().into_owned())
}

/// Whether a category id denotes the synthetic custom bucket
pub fn is_custom_category(category_id: &str) -> bool {
    category_id == "custom" || category_id.starts_with("__custom__")
}

/// Human-readable fallback for an unresolvable id: separators become spaces
pub fn humanize_id(id: &str) -> String {
    id.chars()
        .map(|c| if matches!(c, '_' | '-' | ':') { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Catalog lookup index
///
/// Keyed by the record id string (`menu_item:x`), the bare key part, and the
/// legacy `originalId`, so selections written under any of those forms
/// resolve.
pub struct MenuIndex<'a> {
    by_id: HashMap<String, &'a MenuItem>,
    items: &'a [MenuItem],
}

impl<'a> MenuIndex<'a> {
    pub fn new(items: &'a [MenuItem]) -> Self {
        let mut by_id = HashMap::new();
        for item in items {
            if let Some(record_id) = &item.id {
                by_id.insert(record_id.to_string(), item);
                by_id.insert(record_id.key().to_string(), item);
            }
            if !item.original_id.is_empty() {
                by_id.insert(item.original_id.clone(), item);
            }
        }
        Self { by_id, items }
    }

    pub fn lookup(&self, id: &str) -> Option<&'a MenuItem> {
        self.by_id.get(id).copied()
    }

    /// Display label for a category: the category name recorded on the first
    /// catalog item of that category, else the humanized category id.
    pub fn category_label(&self, category_id: &str) -> (String, String) {
        match self.items.iter().find(|i| i.category == category_id) {
            Some(item) if !item.category_name.trim().is_empty() => (
                item.category_name.clone(),
                item.category_name_gujarati.clone(),
            ),
            Some(item) => (humanize_id(category_id), item.category_name_gujarati.clone()),
            None => (humanize_id(category_id), String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_item(id_key: &str, original_id: &str, name: &str) -> MenuItem {
        MenuItem {
            id: Some(("menu_item", id_key).into()),
            category: "starters".to_string(),
            category_name: "Starters".to_string(),
            category_name_gujarati: "સ્ટાર્ટર".to_string(),
            name: name.to_string(),
            name_gujarati: String::new(),
            description: String::new(),
            original_id: original_id.to_string(),
            price: 100.0,
            is_veg: true,
            is_available: true,
            tags: Vec::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn selected(id: &str) -> SelectedItem {
        SelectedItem::new(id)
    }

    #[test]
    fn decodes_simple_custom_name() {
        assert_eq!(
            decode_custom_name("__custom__:cat1:Grilled%20Paneer:1700000000000"),
            Some("Grilled Paneer".to_string())
        );
    }

    #[test]
    fn decodes_colon_bearing_encoded_name() {
        assert_eq!(
            decode_custom_name("__custom__:cat1:Soup%3A%20Tomato:1700000000000"),
            Some("Soup: Tomato".to_string())
        );
    }

    #[test]
    fn decodes_unencoded_colon_by_rejoining_segments() {
        assert_eq!(
            decode_custom_name("__custom__:cat1:Soup: Tomato:1700000000000"),
            Some("Soup: Tomato".to_string())
        );
    }

    #[test]
    fn decodes_three_segment_form() {
        assert_eq!(
            decode_custom_name("__custom__:cat1:Masala%20Chaas"),
            Some("Masala Chaas".to_string())
        );
    }

    #[test]
    fn non_custom_ids_do_not_decode() {
        assert_eq!(decode_custom_name("menu_item:abc"), None);
        assert_eq!(decode_custom_name("__custom__"), None);
    }

    #[test]
    fn custom_resolution_is_variant_independent() {
        let items: Vec<MenuItem> = Vec::new();
        let index = MenuIndex::new(&items);
        let selection =
            Selection::classify(&selected("__custom__:cat1:Grilled%20Paneer:1700000000000"));
        assert_eq!(selection.resolve(&index).name, "Grilled Paneer");
    }

    #[test]
    fn catalog_lookup_matches_record_id_and_original_id() {
        let items = vec![catalog_item("abc", "starter_7", "Paneer Tikka")];
        let index = MenuIndex::new(&items);

        for id in ["menu_item:abc", "abc", "starter_7"] {
            let resolved = Selection::classify(&selected(id)).resolve(&index);
            assert_eq!(resolved.name, "Paneer Tikka", "lookup by {id}");
        }
    }

    #[test]
    fn lookup_miss_prefers_embedded_name_then_humanized_id() {
        let items: Vec<MenuItem> = Vec::new();
        let index = MenuIndex::new(&items);

        let mut with_name = selected("menu_item:gone");
        with_name.name = Some("Dal Makhani".to_string());
        assert_eq!(
            Selection::classify(&with_name).resolve(&index).name,
            "Dal Makhani"
        );

        let resolved = Selection::classify(&selected("paneer_butter_masala")).resolve(&index);
        assert_eq!(resolved.name, "paneer butter masala");
    }

    #[test]
    fn humanize_replaces_separators() {
        assert_eq!(humanize_id("menu_item:veg_thali"), "menu item veg thali");
        assert_eq!(humanize_id("jeera-rice"), "jeera rice");
    }

    #[test]
    fn custom_category_detection() {
        assert!(is_custom_category("custom"));
        assert!(is_custom_category("__custom__:cat1"));
        assert!(!is_custom_category("starters"));
    }

    #[test]
    fn category_label_falls_back_to_humanized_id() {
        let items = vec![catalog_item("abc", "", "Paneer Tikka")];
        let index = MenuIndex::new(&items);

        assert_eq!(
            index.category_label("starters"),
            ("Starters".to_string(), "સ્ટાર્ટર".to_string())
        );
        assert_eq!(
            index.category_label("main_course"),
            ("main course".to_string(), String::new())
        );
    }
}
