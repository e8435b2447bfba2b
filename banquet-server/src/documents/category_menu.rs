//! Category-menu document
//!
//! Groups the selections of all sub-events combined by category,
//! deduplicating item ids contributed by multiple meals. Custom entries are
//! pulled out of their original categories into a synthesized "Custom Items"
//! pseudo-category at the end.

use std::collections::{BTreeMap, HashSet};

use super::html;
use super::selection::{MenuIndex, ResolvedItem, Selection, is_custom_category};
use super::{DocumentContext, company_header};
use crate::db::models::Event;

const STYLE: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Noto+Sans+Gujarati:wght@400;700&family=Poppins:wght@400;700&display=swap');
body { font-family: 'Poppins', sans-serif; color: #333; margin: 40px; font-size: 16px; background-color: #ffffff; }
.header { text-align: center; margin-bottom: 30px; padding: 20px 0; border-bottom: 2px solid #c62828; }
.header img { max-height: 150px; width: auto; display: block; margin: 0 auto; }
.company-name { font-size: 32px; font-weight: 700; color: #c62828; margin: 10px 0 5px 0; }
.company-tagline { font-size: 16px; color: #666; margin: 0; }
.event-details { background-color: #f9f9f9; border: 1px solid #eee; padding: 20px; margin: 0 auto 30px auto; text-align: center; border-radius: 8px; max-width: 760px; }
.event-details h1 { margin: 0; font-size: 28px; font-weight: 700; color: #c62828; }
.event-details h2 { margin: 5px 0 10px 0; font-size: 20px; color: #333; font-weight: 400; }
.event-details p { margin: 5px 0 0 0; font-size: 16px; color: #555; }
.category { margin-bottom: 35px; break-inside: avoid; }
.category-title { display: flex; align-items: baseline; border-bottom: 2px solid #e53935; padding-bottom: 8px; margin-bottom: 15px; }
.category-title h2 { font-size: 28px; font-weight: 700; color: #333; margin: 0; margin-right: 15px; }
.category-title .gujarati { font-family: 'Noto Sans Gujarati', sans-serif; font-size: 20px; color: #666; }
.item-list { columns: 2; column-gap: 40px; }
.item { display: block; padding: 10px 0; border-bottom: 1px dashed #ccc; break-inside: avoid; }
.item .name { font-size: 16px; font-weight: 600; color: #444; }
.item .gujarati-name { font-family: 'Noto Sans Gujarati', sans-serif; font-size: 14px; color: #777; }
.item .sub-items { margin: 5px 0 0 15px; padding: 0; list-style-type: disc; font-size: 0.9em; color: #666; }
.empty-state { padding: 20px; text-align: center; color: #888; font-style: italic; }
.notes { margin-top: 24px; }
.notes h3 { font-size: 18px; color: #c62828; margin: 0 0 8px 0; }
.notes ul { margin: 6px 0 0 18px; padding: 0; }
.notes li { margin: 4px 0; }
"#;

/// Custom pseudo-category labels
const CUSTOM_LABEL: &str = "Custom Items";
const CUSTOM_LABEL_GUJARATI: &str = "કસ્ટમ આઇટમ્સ";

/// Union of selections across all sub-events, deduplicated by item id.
///
/// Returns catalog groups keyed by category id (sorted) plus the custom
/// bucket: every custom entry lands there, regardless of which category it
/// was selected under.
fn aggregate(event: &Event, index: &MenuIndex) -> (BTreeMap<String, Vec<ResolvedItem>>, Vec<ResolvedItem>) {
    let mut groups: BTreeMap<String, Vec<ResolvedItem>> = BTreeMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut custom_items: Vec<ResolvedItem> = Vec::new();
    let mut custom_seen: HashSet<String> = HashSet::new();

    for sub_event in &event.sub_events {
        for (category_id, selections) in &sub_event.items {
            for raw in selections {
                let selection = Selection::classify(raw);
                let is_custom =
                    matches!(selection, Selection::Custom { .. }) || is_custom_category(category_id);
                if is_custom {
                    if custom_seen.insert(selection.id().to_string()) {
                        custom_items.push(selection.resolve(index));
                    }
                } else if seen.insert((category_id.clone(), selection.id().to_string())) {
                    groups
                        .entry(category_id.clone())
                        .or_default()
                        .push(selection.resolve(index));
                }
            }
        }
    }

    (groups, custom_items)
}

fn render_category(out: &mut String, label: &str, label_gujarati: &str, items: &[ResolvedItem]) {
    out.push_str(&format!(
        "<div class=\"category\"><div class=\"category-title\"><h2>{}</h2>\
         <span class=\"gujarati\">{}</span></div><div class=\"item-list\">",
        html::escape(label),
        html::escape(label_gujarati),
    ));

    for item in items {
        out.push_str(&format!(
            "<div class=\"item\"><div class=\"name\">{}</div>\
             <div class=\"gujarati-name\">{}</div>",
            html::escape(&item.name),
            html::escape(&item.name_gujarati),
        ));
        if !item.sub_items.is_empty() {
            out.push_str("<ul class=\"sub-items\">");
            for sub_item in &item.sub_items {
                out.push_str(&format!("<li>{}</li>", html::escape(sub_item)));
            }
            out.push_str("</ul>");
        }
        out.push_str("</div>");
    }

    out.push_str("</div></div>");
}

pub fn build(event: &Event, index: &MenuIndex, ctx: &DocumentContext) -> String {
    let (groups, custom_items) = aggregate(event, index);

    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">");
    let title_name = if event.event_name.is_empty() {
        &event.client_name
    } else {
        &event.event_name
    };
    out.push_str(&format!("<title>Menu for {}</title>", html::escape(title_name)));
    out.push_str(&format!("<style>{STYLE}</style></head><body>"));

    out.push_str(&company_header(ctx, false));

    out.push_str(&format!(
        "<div class=\"event-details\"><h1>{}</h1><h2>Client: {}</h2>\
         <p><strong>Date:</strong> {} | <strong>Location:</strong> {}</p></div>",
        html::escape(&event.event_name),
        html::escape(&event.client_name),
        html::format_display_date(&event.event_date),
        html::escape(&event.location),
    ));

    if groups.is_empty() && custom_items.is_empty() {
        out.push_str("<p class=\"empty-state\">No menu selections have been made yet.</p>");
    }

    for (category_id, items) in &groups {
        let (label, label_gujarati) = index.category_label(category_id);
        render_category(&mut out, &label, &label_gujarati, items);
    }
    if !custom_items.is_empty() {
        render_category(&mut out, CUSTOM_LABEL, CUSTOM_LABEL_GUJARATI, &custom_items);
    }

    let note_lines = html::bullet_lines(&event.notes);
    if !note_lines.is_empty() {
        out.push_str("<div class=\"notes\"><h3>Notes</h3><ul>");
        for line in note_lines {
            out.push_str(&format!("<li>{}</li>", html::escape(line)));
        }
        out.push_str("</ul></div>");
    }

    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::Branding;
    use crate::db::models::{Event, EventStatus, MenuItem, SelectedItem, SubEvent};

    fn catalog() -> Vec<MenuItem> {
        vec![
            MenuItem {
                id: Some(("menu_item", "tikka").into()),
                category: "starters".to_string(),
                category_name: "Starters".to_string(),
                category_name_gujarati: "સ્ટાર્ટર".to_string(),
                name: "Paneer Tikka".to_string(),
                name_gujarati: "પનીર ટીક્કા".to_string(),
                description: String::new(),
                original_id: String::new(),
                price: 180.0,
                is_veg: true,
                is_available: true,
                tags: Vec::new(),
                created_at: 0,
                updated_at: 0,
            },
            MenuItem {
                id: Some(("menu_item", "dal").into()),
                category: "mains".to_string(),
                category_name: "Main Course".to_string(),
                category_name_gujarati: String::new(),
                name: "Dal Makhani".to_string(),
                name_gujarati: String::new(),
                description: String::new(),
                original_id: String::new(),
                price: 220.0,
                is_veg: true,
                is_available: false,
                tags: Vec::new(),
                created_at: 0,
                updated_at: 0,
            },
        ]
    }

    fn sub_event_with(items: Vec<(&str, Vec<SelectedItem>)>) -> SubEvent {
        SubEvent {
            id: None,
            name: "Meal".to_string(),
            date: String::new(),
            pax: "10".to_string(),
            price: "100".to_string(),
            items: items
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
            notes: String::new(),
        }
    }

    fn event_with(sub_events: Vec<SubEvent>) -> Event {
        Event {
            id: None,
            event_name: "Mehta Wedding".to_string(),
            client_name: "Mehta family".to_string(),
            event_date: "2025-11-02".to_string(),
            location: "Junagadh".to_string(),
            contact_info: String::new(),
            sub_events,
            notes: String::new(),
            total_amount: 0.0,
            status: EventStatus::Pending,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn branding() -> Branding {
        Branding {
            company_name: "Banquet Caterers".to_string(),
            tagline: "Professional Catering Services".to_string(),
            phones: Vec::new(),
        }
    }

    #[test]
    fn deduplicates_items_selected_by_multiple_sub_events() {
        let catalog = catalog();
        let index = MenuIndex::new(&catalog);
        let event = event_with(vec![
            sub_event_with(vec![("starters", vec![SelectedItem::new("menu_item:tikka")])]),
            sub_event_with(vec![("starters", vec![SelectedItem::new("menu_item:tikka")])]),
        ]);

        let branding = branding();
        let ctx = DocumentContext {
            branding: &branding,
            logo_data_uri: "data:,",
        };
        let html_out = build(&event, &index, &ctx);

        assert_eq!(html_out.matches("Paneer Tikka").count(), 1);
        assert!(html_out.contains("પનીર ટીક્કા"));
        assert!(html_out.contains("Starters"));
        assert!(html_out.contains("સ્ટાર્ટર"));
    }

    #[test]
    fn soft_deleted_items_still_resolve() {
        let catalog = catalog();
        let index = MenuIndex::new(&catalog);
        let event = event_with(vec![sub_event_with(vec![(
            "mains",
            vec![SelectedItem::new("menu_item:dal")],
        )])]);

        let branding = branding();
        let ctx = DocumentContext {
            branding: &branding,
            logo_data_uri: "data:,",
        };
        let html_out = build(&event, &index, &ctx);
        assert!(html_out.contains("Dal Makhani"));
    }

    #[test]
    fn custom_entries_form_their_own_category() {
        let catalog = catalog();
        let index = MenuIndex::new(&catalog);
        let event = event_with(vec![sub_event_with(vec![(
            "starters",
            vec![
                SelectedItem::new("menu_item:tikka"),
                SelectedItem::new("__custom__:starters:Grilled%20Paneer:1700000000000"),
            ],
        )])]);

        let branding = branding();
        let ctx = DocumentContext {
            branding: &branding,
            logo_data_uri: "data:,",
        };
        let html_out = build(&event, &index, &ctx);

        assert!(html_out.contains("Custom Items"));
        assert!(html_out.contains("કસ્ટમ આઇટમ્સ"));
        assert!(html_out.contains("Grilled Paneer"));
        // The custom entry must not appear under Starters as well
        let custom_pos = html_out.find("Custom Items").unwrap();
        let item_pos = html_out.find("Grilled Paneer").unwrap();
        assert!(item_pos > custom_pos);
    }

    #[test]
    fn empty_selection_renders_placeholder() {
        let catalog = catalog();
        let index = MenuIndex::new(&catalog);
        let event = event_with(vec![sub_event_with(vec![])]);

        let branding = branding();
        let ctx = DocumentContext {
            branding: &branding,
            logo_data_uri: "data:,",
        };
        let html_out = build(&event, &index, &ctx);
        assert!(html_out.contains("No menu selections have been made yet."));
    }
}
