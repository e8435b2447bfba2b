//! Billing document (tabular invoice)
//!
//! One row per sub-event with parsed pax and per-person price; the grand
//! total is the sum of the row subtotals and therefore always matches the
//! event's stored `totalAmount` for the same sub-event set. The catalog is
//! never consulted here.

use chrono_tz::Asia::Kolkata;
use rust_decimal::Decimal;

use super::html;
use super::{DocumentContext, company_header};
use crate::db::models::Event;

const STYLE: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Poppins:wght@400;600;700&display=swap');
body { font-family: 'Poppins', sans-serif; color: #333; margin: 40px; font-size: 14px; background-color: #ffffff; line-height: 1.4; }
.header { text-align: center; margin-bottom: 24px; padding: 16px 0; border-bottom: 3px solid #c62828; }
.header img { max-height: 120px; width: auto; display: block; margin: 0 auto 10px auto; }
.company-name { font-size: 32px; font-weight: 700; color: #c62828; margin: 6px 0 4px 0; }
.company-tagline { font-size: 16px; color: #666; margin: 0; }
.company-phones { font-size: 14px; color: #444; margin-top: 6px; }
.company-phones .sep { color: #999; margin: 0 8px; }
.estimate-badge { display: inline-block; background: #2e7d32; color: #fff; font-weight: 700; letter-spacing: 1px; padding: 6px 14px; border-radius: 14px; font-size: 13px; margin: 4px 0 10px 0; }
.bill-title { text-align: center; font-size: 28px; font-weight: 700; color: #c62828; margin: 18px 0; text-transform: uppercase; letter-spacing: 2px; }
.event-info { background-color: #f8f9fa; border: 1px solid #dee2e6; padding: 20px; margin: 0 auto 24px auto; border-radius: 8px; max-width: 760px; text-align: center; }
.event-info h2 { font-size: 24px; color: #c62828; margin: 0 0 12px 0; font-weight: 700; }
.event-info .row { display: grid; grid-template-columns: auto auto; justify-content: center; column-gap: 12px; margin: 6px 0; }
.billing-table { width: 100%; border-collapse: collapse; margin: 0 auto 24px auto; max-width: 900px; }
.billing-table th { background-color: #c62828; color: white; padding: 12px 10px; text-align: left; font-weight: 600; font-size: 16px; }
.billing-table td { padding: 10px; border-bottom: 1px solid #eee; }
.billing-table tbody tr:nth-child(even) { background-color: #fafafa; }
.billing-table .sub-event-name { font-weight: 600; color: #c62828; }
.billing-table .number { text-align: center; font-weight: 600; }
.billing-table .currency { text-align: right; font-weight: 600; }
.billing-table .empty { text-align: center; color: #888; font-style: italic; }
.grand-total { max-width: 900px; margin: 0 auto; background: linear-gradient(135deg, #c62828, #d32f2f); color: white; padding: 16px; border-radius: 8px; }
.grand-total .total-row { display: flex; justify-content: space-between; align-items: center; }
.grand-total .total-label { font-size: 22px; font-weight: 700; }
.grand-total .total-amount { font-size: 26px; font-weight: 700; }
.footer { text-align: center; margin-top: 28px; padding-top: 16px; border-top: 2px solid #dee2e6; color: #666; font-size: 12px; }
.footer p { margin: 5px 0; }
"#;

pub fn build(event: &Event, ctx: &DocumentContext) -> String {
    let event_date = html::format_display_date(&event.event_date);
    let bill_date = chrono::Utc::now()
        .with_timezone(&Kolkata)
        .format("%d/%m/%Y")
        .to_string();

    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">");
    let title_name = if event.event_name.is_empty() {
        &event.client_name
    } else {
        &event.event_name
    };
    out.push_str(&format!("<title>Bill for {}</title>", html::escape(title_name)));
    out.push_str(&format!("<style>{STYLE}</style></head><body>"));

    out.push_str(&company_header(ctx, true));
    out.push_str("<div class=\"bill-title\">CATERING BILL</div>");

    out.push_str(&format!(
        "<div class=\"event-info\"><h2>{}</h2>\
         <div class=\"row\"><span><strong>Client Name:</strong></span><span>{}</span></div>\
         <div class=\"row\"><span><strong>Event Date:</strong></span><span>{}</span></div>\
         <div class=\"row\"><span><strong>Location:</strong></span><span>{}</span></div>\
         <div class=\"row\"><span><strong>Bill Date:</strong></span><span>{}</span></div></div>",
        html::escape(&event.event_name),
        html::escape(&event.client_name),
        event_date,
        html::escape(&event.location),
        bill_date,
    ));

    out.push_str(
        "<table class=\"billing-table\"><thead><tr>\
         <th>Sub Event</th><th>Date</th><th>PAX</th>\
         <th>Price per Person</th><th>Total Amount</th>\
         </tr></thead><tbody>",
    );

    let mut grand_total = Decimal::ZERO;
    for sub_event in &event.sub_events {
        let date_source = if sub_event.date.trim().is_empty() {
            &event.event_date
        } else {
            &sub_event.date
        };
        let pax = sub_event.pax_count();
        let price = sub_event.unit_price();
        let row_total = sub_event.subtotal();
        grand_total += row_total;

        out.push_str(&format!(
            "<tr><td class=\"sub-event-name\">{}</td><td>{}</td>\
             <td class=\"number\">{}</td>\
             <td class=\"currency\">&#8377; {:.2}</td>\
             <td class=\"currency\">&#8377; {:.2}</td></tr>",
            html::escape(&sub_event.name),
            html::format_display_date(date_source),
            pax,
            price,
            row_total,
        ));
    }
    if event.sub_events.is_empty() {
        out.push_str("<tr><td class=\"empty\" colspan=\"5\">No sub-events to bill</td></tr>");
    }

    out.push_str("</tbody></table>");

    out.push_str(&format!(
        "<div class=\"grand-total\"><div class=\"total-row\">\
         <span class=\"total-label\">GRAND TOTAL:</span>\
         <span class=\"total-amount\">&#8377; {grand_total:.2}</span></div></div>"
    ));

    out.push_str(&format!(
        "<div class=\"footer\"><p><strong>Thank you for choosing {}!</strong></p>\
         <p>For any queries, please contact us | {}</p></div>",
        html::escape(&ctx.branding.company_name),
        html::escape(&ctx.branding.tagline),
    ));

    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::Branding;
    use crate::db::models::{Event, EventStatus, SubEvent, compute_total};

    fn sub_event(name: &str, pax: &str, price: &str) -> SubEvent {
        SubEvent {
            id: None,
            name: name.to_string(),
            date: "2025-11-02".to_string(),
            pax: pax.to_string(),
            price: price.to_string(),
            items: BTreeMap::new(),
            notes: String::new(),
        }
    }

    fn event_with(sub_events: Vec<SubEvent>) -> Event {
        let total_amount = compute_total(&sub_events);
        Event {
            id: None,
            event_name: "Mehta Wedding".to_string(),
            client_name: "Mehta family".to_string(),
            event_date: "2025-11-02".to_string(),
            location: "Junagadh".to_string(),
            contact_info: String::new(),
            sub_events,
            notes: String::new(),
            total_amount,
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
    fn grand_total_matches_stored_total() {
        let event = event_with(vec![
            sub_event("Reception Dinner", "50", "200"),
            sub_event("Breakfast", "30", "150"),
        ]);
        assert_eq!(event.total_amount, 14500.0);

        let branding = branding();
        let ctx = DocumentContext {
            branding: &branding,
            logo_data_uri: "data:,",
        };
        let html_out = build(&event, &ctx);

        assert!(html_out.contains("&#8377; 14500.00</span>"));
        assert!(html_out.contains("&#8377; 10000.00"));
        assert!(html_out.contains("&#8377; 4500.00"));
    }

    #[test]
    fn unparseable_fields_bill_as_zero() {
        let event = event_with(vec![sub_event("Lunch", "about fifty", "TBD")]);

        let branding = branding();
        let ctx = DocumentContext {
            branding: &branding,
            logo_data_uri: "data:,",
        };
        let html_out = build(&event, &ctx);

        assert!(html_out.contains("<td class=\"number\">0</td>"));
        assert!(html_out.contains("&#8377; 0.00</span>"));
    }

    #[test]
    fn empty_event_renders_placeholder_row() {
        let event = event_with(Vec::new());

        let branding = branding();
        let ctx = DocumentContext {
            branding: &branding,
            logo_data_uri: "data:,",
        };
        let html_out = build(&event, &ctx);

        assert!(html_out.contains("No sub-events to bill"));
        assert!(html_out.contains("&#8377; 0.00</span>"));
    }
}
