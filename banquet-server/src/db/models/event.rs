//! Event Model
//!
//! An event owns an ordered list of sub-events (meals). Each sub-event
//! carries per-category menu selections, free-form custom entries and
//! nested sub-items.
//!
//! `total_amount` is derived: the write path recomputes it from the
//! sub-events on every save via [`compute_total`] and ignores whatever the
//! client supplied.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub type EventId = RecordId;

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// One selected entry in a sub-event's category list
///
/// Either a catalog reference (`id` points at a menu item, optionally with a
/// display name snapshot) or a custom entry whose synthetic id embeds the
/// display name (`__custom__:<category>:<url-encoded-name>:<timestamp>`).
/// `sub_items` are free-text nested bullets (garnish call-outs and the like)
/// attached to the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<String>,
}

// Older records stored a selection as a bare id string; normalize both
// shapes into the struct at the deserialization boundary so nothing
// downstream has to re-sniff.
impl<'de> Deserialize<'de> for SelectedItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Entry {
                id: String,
                #[serde(default)]
                name: Option<String>,
                #[serde(default, rename = "subItems")]
                sub_items: Vec<String>,
            },
            Id(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Id(id) => SelectedItem {
                id,
                name: None,
                sub_items: Vec::new(),
            },
            Raw::Entry {
                id,
                name,
                sub_items,
            } => SelectedItem {
                id,
                name,
                sub_items,
            },
        })
    }
}

impl SelectedItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            sub_items: Vec::new(),
        }
    }
}

/// Sub-event (one meal within an event)
///
/// `pax` and `price` are stored as the free-form strings the back office
/// enters; [`SubEvent::pax_count`] and [`SubEvent::unit_price`] are the only
/// place they are parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubEvent {
    /// Assigned server-side on first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub pax: String,
    #[serde(default)]
    pub price: String,
    /// Selections keyed by category id
    #[serde(default)]
    pub items: BTreeMap<String, Vec<SelectedItem>>,
    #[serde(default)]
    pub notes: String,
}

impl SubEvent {
    /// Head count, parsed with leading-digits semantics; invalid or missing
    /// values count as zero.
    pub fn pax_count(&self) -> u32 {
        parse_count(&self.pax)
    }

    /// Per-person price, parsed with leading-number semantics; invalid,
    /// missing or negative values count as zero.
    pub fn unit_price(&self) -> Decimal {
        parse_money(&self.price)
    }

    /// Row subtotal: pax × per-person price
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.pax_count()) * self.unit_price()
    }
}

/// Parse a non-negative integer from the leading digits of a string.
pub fn parse_count(value: &str) -> u32 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parse a non-negative decimal from the leading number of a string.
pub fn parse_money(value: &str) -> Decimal {
    let trimmed = value.trim();
    if let Ok(d) = Decimal::from_str(trimmed) {
        return if d.is_sign_negative() { Decimal::ZERO } else { d };
    }

    let mut seen_dot = false;
    let prefix: String = trimmed
        .chars()
        .take_while(|c| {
            if c.is_ascii_digit() {
                true
            } else if *c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                false
            }
        })
        .collect();
    Decimal::from_str(&prefix).unwrap_or(Decimal::ZERO)
}

/// Total amount for a set of sub-events: Σ pax × price.
///
/// Pure function invoked by the write path before persistence; the stored
/// `total_amount` is always the result of this computation.
pub fn compute_total(sub_events: &[SubEvent]) -> f64 {
    sub_events
        .iter()
        .map(SubEvent::subtotal)
        .sum::<Decimal>()
        .to_f64()
        .unwrap_or(0.0)
}

/// Set-like membership toggle on a category's selection list.
///
/// Removes the item if an entry with the same id is present, adds it
/// otherwise. A category whose list becomes empty is dropped entirely, so
/// toggling twice restores the map to its original contents.
pub fn toggle_selection(
    items: &mut BTreeMap<String, Vec<SelectedItem>>,
    category: &str,
    item: SelectedItem,
) {
    let list = items.entry(category.to_string()).or_default();
    let before = list.len();
    list.retain(|existing| existing.id != item.id);
    if list.len() == before {
        list.push(item);
    }
    if items.get(category).is_some_and(|list| list.is_empty()) {
        items.remove(category);
    }
}

/// Direction for a sub-event reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Adjacent position swap with no other side effects.
///
/// Returns `false` when the index is out of range; a move past either end of
/// the list is a no-op that still succeeds.
pub fn move_sub_event(sub_events: &mut [SubEvent], index: usize, direction: MoveDirection) -> bool {
    if index >= sub_events.len() {
        return false;
    }
    match direction {
        MoveDirection::Up if index > 0 => sub_events.swap(index, index - 1),
        MoveDirection::Down if index + 1 < sub_events.len() => sub_events.swap(index, index + 1),
        _ => {}
    }
    true
}

/// Event record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<EventId>,
    pub event_name: String,
    pub client_name: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub sub_events: Vec<SubEvent>,
    #[serde(default)]
    pub notes: String,
    /// Derived; see [`compute_total`]
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create payload
///
/// Deliberately has no `total_amount` field: whatever the client sends is
/// dropped during deserialization and the stored value is recomputed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreate {
    pub event_name: String,
    pub client_name: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub sub_events: Vec<SubEvent>,
    #[serde(default)]
    pub notes: String,
    pub status: Option<EventStatus>,
}

/// Update payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub event_name: Option<String>,
    pub client_name: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    pub sub_events: Option<Vec<SubEvent>>,
    pub notes: Option<String>,
    pub status: Option<EventStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_event(pax: &str, price: &str) -> SubEvent {
        SubEvent {
            id: None,
            name: "Lunch".to_string(),
            date: "2025-11-02".to_string(),
            pax: pax.to_string(),
            price: price.to_string(),
            items: BTreeMap::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn parse_count_defaults_to_zero() {
        assert_eq!(parse_count("50"), 50);
        assert_eq!(parse_count(" 50 "), 50);
        assert_eq!(parse_count("50 guests"), 50);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("approx"), 0);
        assert_eq!(parse_count("-5"), 0);
    }

    #[test]
    fn parse_money_defaults_to_zero() {
        assert_eq!(parse_money("200"), Decimal::from(200));
        assert_eq!(parse_money("150.50"), Decimal::from_str("150.50").unwrap());
        assert_eq!(parse_money("150.50/-"), Decimal::from_str("150.50").unwrap());
        assert_eq!(parse_money(""), Decimal::ZERO);
        assert_eq!(parse_money("TBD"), Decimal::ZERO);
        assert_eq!(parse_money("-80"), Decimal::ZERO);
    }

    #[test]
    fn total_is_sum_of_products() {
        let subs = vec![sub_event("50", "200"), sub_event("30", "150")];
        assert_eq!(compute_total(&subs), 14500.0);
    }

    #[test]
    fn total_treats_invalid_fields_as_zero() {
        let subs = vec![sub_event("50", "200"), sub_event("unknown", "150")];
        assert_eq!(compute_total(&subs), 10000.0);
        assert_eq!(compute_total(&[]), 0.0);
    }

    #[test]
    fn toggle_is_idempotent_over_two_applications() {
        let mut items = BTreeMap::new();
        let original = items.clone();

        toggle_selection(&mut items, "starters", SelectedItem::new("menu_item:a"));
        assert_eq!(items["starters"].len(), 1);

        toggle_selection(&mut items, "starters", SelectedItem::new("menu_item:a"));
        assert_eq!(items, original);
    }

    #[test]
    fn toggle_keeps_other_selections() {
        let mut items = BTreeMap::new();
        toggle_selection(&mut items, "starters", SelectedItem::new("menu_item:a"));
        toggle_selection(&mut items, "starters", SelectedItem::new("menu_item:b"));
        toggle_selection(&mut items, "starters", SelectedItem::new("menu_item:a"));

        let ids: Vec<_> = items["starters"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["menu_item:b"]);
    }

    #[test]
    fn move_swaps_adjacent_positions() {
        let mut subs = vec![sub_event("1", "1"), sub_event("2", "2"), sub_event("3", "3")];
        subs[0].name = "a".to_string();
        subs[1].name = "b".to_string();
        subs[2].name = "c".to_string();

        assert!(move_sub_event(&mut subs, 1, MoveDirection::Up));
        let names: Vec<_> = subs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);

        assert!(move_sub_event(&mut subs, 1, MoveDirection::Down));
        let names: Vec<_> = subs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn move_at_boundary_is_a_noop() {
        let mut subs = vec![sub_event("1", "1"), sub_event("2", "2")];
        subs[0].name = "a".to_string();
        subs[1].name = "b".to_string();

        assert!(move_sub_event(&mut subs, 0, MoveDirection::Up));
        assert!(move_sub_event(&mut subs, 1, MoveDirection::Down));
        let names: Vec<_> = subs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);

        assert!(!move_sub_event(&mut subs, 2, MoveDirection::Up));
    }

    #[test]
    fn selected_item_accepts_legacy_string_form() {
        let from_string: SelectedItem = serde_json::from_str("\"menu_item:a\"").unwrap();
        assert_eq!(from_string, SelectedItem::new("menu_item:a"));

        let from_object: SelectedItem = serde_json::from_str(
            r#"{"id":"menu_item:a","name":"Paneer Tikka","subItems":["Mint chutney"]}"#,
        )
        .unwrap();
        assert_eq!(from_object.name.as_deref(), Some("Paneer Tikka"));
        assert_eq!(from_object.sub_items, vec!["Mint chutney".to_string()]);
    }

    #[test]
    fn event_create_drops_client_total() {
        let payload: EventCreate = serde_json::from_str(
            r#"{
                "eventName": "Wedding",
                "clientName": "Mehta family",
                "subEvents": [{"name": "Lunch", "pax": "50", "price": "200"}],
                "totalAmount": 999999
            }"#,
        )
        .unwrap();
        assert_eq!(compute_total(&payload.sub_events), 10000.0);
    }
}
