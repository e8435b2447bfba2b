//! Quotation document (per-sub-event layout)
//!
//! Preserves sub-event grouping: one section per meal in order, pax and
//! per-person price as the section subheading, followed by the flat list of
//! resolved selections with nested sub-items. Event-level notes render as a
//! trailing bullet section.

use super::html;
use super::selection::{MenuIndex, Selection};
use super::{DocumentContext, company_header};
use crate::db::models::Event;

const STYLE: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Poppins:wght@400;600;700&display=swap');
body { font-family: 'Poppins', sans-serif; margin: 40px; color: #333; background-color: #ffffff; font-size: 16px; }
.header { text-align: center; margin-bottom: 30px; padding: 20px 0; border-bottom: 2px solid #c62828; }
.header img { max-height: 120px; width: auto; display: block; margin: 0 auto 10px auto; }
.company-name { font-size: 32px; font-weight: 700; color: #c62828; margin: 6px 0 4px 0; }
.company-tagline { font-size: 16px; color: #666; margin: 0; }
.company-phones { font-size: 14px; color: #444; margin-top: 6px; }
.company-phones .sep { color: #999; margin: 0 8px; }
.estimate-badge { display: inline-block; background: #2e7d32; color: #fff; font-weight: 700; letter-spacing: 1px; padding: 6px 14px; border-radius: 14px; font-size: 13px; margin-bottom: 10px; }
.event-details { background-color: #f9f9f9; border: 1px solid #eee; padding: 20px; margin: 0 auto 30px auto; text-align: center; border-radius: 8px; max-width: 760px; }
.event-details h1 { margin: 0 0 10px 0; font-size: 28px; font-weight: 700; color: #c62828; }
.event-details .row { display: grid; grid-template-columns: auto auto; justify-content: center; column-gap: 12px; margin: 6px 0; }
.sub-event { margin-bottom: 40px; page-break-inside: avoid; }
.sub-event-header { display: flex; justify-content: space-between; align-items: flex-start; background-color: #fce4ec; border-left: 5px solid #D32F2F; padding: 10px 15px; }
.sub-event-header h2 { font-size: 22px; color: #D32F2F; margin: 0; }
.sub-event-header p { font-size: 16px; margin: 0; }
.sub-event-header .sub-date { font-size: 14px; color: #666; margin-top: 5px; }
.item-list { padding: 15px; }
.item-list ul { list-style-type: none; padding-left: 0; margin: 0; }
.item-list li { padding: 5px 0; border-bottom: 1px dashed #ccc; text-align: left; }
.item-list li::before { content: '\27A4'; margin-right: 10px; color: #555; }
.item-list .sub-items { list-style-type: circle; margin: 2px 0; padding-left: 20px; color: #555; font-size: 0.9em; }
.item-list .sub-items li { border-bottom: none; padding: 2px 0; }
.item-list .sub-items li::before { content: none; }
.empty-state { padding: 20px; text-align: center; color: #888; font-style: italic; }
.notes-section { margin-bottom: 40px; page-break-inside: avoid; }
.notes-header { background-color: #fce4ec; border-left: 5px solid #D32F2F; padding: 10px 15px; }
.notes-header h2 { font-size: 22px; color: #D32F2F; margin: 0; }
.notes-content { padding: 15px; }
.notes-content ul { list-style-type: none; padding-left: 0; margin: 0; }
.notes-content li { padding: 5px 0; border-bottom: 1px dashed #ccc; text-align: left; }
.notes-content li::before { content: '\27A4'; margin-right: 10px; color: #555; }
"#;

pub fn build(event: &Event, index: &MenuIndex, ctx: &DocumentContext) -> String {
    let event_date = html::format_display_date(&event.event_date);

    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">");
    out.push_str(&format!(
        "<title>Quotation for {}</title>",
        html::escape(&event.event_name)
    ));
    out.push_str(&format!("<style>{STYLE}</style></head><body>"));

    out.push_str(&company_header(ctx, true));

    out.push_str(&format!(
        "<div class=\"event-details\"><h1>{}</h1>\
         <div class=\"row\"><span><strong>Client Name:</strong></span><span>{}</span></div>\
         <div class=\"row\"><span><strong>Event Date:</strong></span><span>{}</span></div>\
         <div class=\"row\"><span><strong>Location:</strong></span><span>{}</span></div></div>",
        html::escape(&event.event_name),
        html::escape(&event.client_name),
        event_date,
        html::escape(&event.location),
    ));

    if event.sub_events.is_empty() {
        out.push_str("<p class=\"empty-state\">No sub-events have been added yet.</p>");
    }

    for sub_event in &event.sub_events {
        let date_source = if sub_event.date.trim().is_empty() {
            &event.event_date
        } else {
            &sub_event.date
        };
        out.push_str(&format!(
            "<div class=\"sub-event\"><div class=\"sub-event-header\"><div><h2>{}</h2>\
             <p class=\"sub-date\">Date: {}</p></div>\
             <p><strong>PAX - {}</strong> | <strong>P.P - {}/-</strong></p></div>\
             <div class=\"item-list\"><ul>",
            html::escape(&sub_event.name.to_uppercase()),
            html::format_display_date(date_source),
            html::escape(&sub_event.pax),
            html::escape(&sub_event.price),
        ));

        let mut wrote_item = false;
        for raw in sub_event.items.values().flatten() {
            wrote_item = true;
            let resolved = Selection::classify(raw).resolve(index);
            out.push_str(&format!("<li>{}", html::escape(&resolved.name)));
            if !resolved.sub_items.is_empty() {
                out.push_str("<ul class=\"sub-items\">");
                for sub_item in &resolved.sub_items {
                    out.push_str(&format!("<li>{}</li>", html::escape(sub_item)));
                }
                out.push_str("</ul>");
            }
            out.push_str("</li>");
        }
        if !wrote_item {
            out.push_str("<li>No items selected</li>");
        }

        out.push_str("</ul></div></div>");
    }

    let note_lines = html::bullet_lines(&event.notes);
    if !note_lines.is_empty() {
        out.push_str(
            "<div class=\"notes-section\"><div class=\"notes-header\"><h2>NOTES</h2></div>\
             <div class=\"notes-content\"><ul>",
        );
        for line in note_lines {
            out.push_str(&format!("<li>{}</li>", html::escape(line)));
        }
        out.push_str("</ul></div></div>");
    }

    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::Branding;
    use crate::db::models::{Event, EventStatus, SelectedItem, SubEvent};

    fn branding() -> Branding {
        Branding {
            company_name: "Banquet Caterers".to_string(),
            tagline: "Professional Catering Services".to_string(),
            phones: vec!["+91 90000 00000".to_string()],
        }
    }

    fn context(branding: &Branding) -> DocumentContext<'_> {
        DocumentContext {
            branding,
            logo_data_uri: "data:image/svg+xml;base64,",
        }
    }

    fn test_event() -> Event {
        let mut items = BTreeMap::new();
        items.insert(
            "starters".to_string(),
            vec![SelectedItem {
                id: "paneer_tikka".to_string(),
                name: None,
                sub_items: vec!["Mint chutney".to_string()],
            }],
        );
        Event {
            id: None,
            event_name: "Mehta Wedding".to_string(),
            client_name: "Mehta family <primary>".to_string(),
            event_date: "2025-11-02".to_string(),
            location: "Junagadh".to_string(),
            contact_info: "+91 90000 00000".to_string(),
            sub_events: vec![
                SubEvent {
                    id: None,
                    name: "Reception Dinner".to_string(),
                    date: String::new(),
                    pax: "50".to_string(),
                    price: "200".to_string(),
                    items,
                    notes: String::new(),
                },
                SubEvent {
                    id: None,
                    name: "Breakfast".to_string(),
                    date: "2025-11-03".to_string(),
                    pax: "30".to_string(),
                    price: "150".to_string(),
                    items: BTreeMap::new(),
                    notes: String::new(),
                },
            ],
            notes: "Extra seating\n\nServe on time".to_string(),
            total_amount: 14500.0,
            status: EventStatus::Pending,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn sections_follow_sub_event_order() {
        let branding = branding();
        let items: Vec<crate::db::models::MenuItem> = Vec::new();
        let index = MenuIndex::new(&items);
        let html_out = build(&test_event(), &index, &context(&branding));

        let first = html_out.find("RECEPTION DINNER").expect("first section");
        let second = html_out.find("BREAKFAST").expect("second section");
        assert!(first < second);
        assert!(html_out.contains("PAX - 50"));
        assert!(html_out.contains("P.P - 200/-"));
    }

    #[test]
    fn items_resolve_with_nested_sub_items() {
        let branding = branding();
        let items: Vec<crate::db::models::MenuItem> = Vec::new();
        let index = MenuIndex::new(&items);
        let html_out = build(&test_event(), &index, &context(&branding));

        // No catalog backing: the id humanizes rather than leaking verbatim
        assert!(html_out.contains("paneer tikka"));
        assert!(!html_out.contains("paneer_tikka"));
        assert!(html_out.contains("Mint chutney"));
    }

    #[test]
    fn user_strings_are_encoded_and_notes_become_bullets() {
        let branding = branding();
        let items: Vec<crate::db::models::MenuItem> = Vec::new();
        let index = MenuIndex::new(&items);
        let html_out = build(&test_event(), &index, &context(&branding));

        assert!(html_out.contains("Mehta family &lt;primary&gt;"));
        assert!(!html_out.contains("<primary>"));
        assert!(html_out.contains("<li>Extra seating</li>"));
        assert!(html_out.contains("<li>Serve on time</li>"));
    }

    #[test]
    fn empty_event_renders_placeholder() {
        let branding = branding();
        let items: Vec<crate::db::models::MenuItem> = Vec::new();
        let index = MenuIndex::new(&items);
        let mut event = test_event();
        event.sub_events.clear();
        event.notes.clear();

        let html_out = build(&event, &index, &context(&branding));
        assert!(html_out.contains("No sub-events have been added yet."));
        assert!(html_out.ends_with("</body></html>"));
    }
}
