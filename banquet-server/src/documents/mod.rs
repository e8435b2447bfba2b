//! Document Assembler
//!
//! Pure transformation from an event record (plus, for two of the three
//! variants, the menu catalog) into a fully-formed HTML document ready for
//! PDF rasterization:
//!
//! - [`DocumentKind::Quotation`]: one section per sub-event, flat item list
//! - [`DocumentKind::CategoryMenu`]: selections across all sub-events,
//!   grouped by category
//! - [`DocumentKind::Billing`]: tabular invoice, no catalog involved

pub mod assets;
pub mod billing;
pub mod category_menu;
pub mod html;
pub mod quotation;
pub mod selection;

pub use selection::{MenuIndex, ResolvedItem, Selection};

use crate::core::Branding;
use crate::db::models::Event;

/// Which document to assemble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Quotation,
    CategoryMenu,
    Billing,
}

impl DocumentKind {
    /// Download filename for the generated PDF
    pub fn filename(&self, event: &Event) -> String {
        match self {
            DocumentKind::Quotation => format!(
                "Event-Quotation-{}.pdf",
                html::sanitize_filename(&event.event_name)
            ),
            DocumentKind::CategoryMenu => format!(
                "Category-Menu-{}.pdf",
                html::sanitize_filename(&event.event_name)
            ),
            DocumentKind::Billing => format!(
                "Bill-{}-{}.pdf",
                html::sanitize_filename(&event.event_name),
                html::sanitize_filename(&event.client_name)
            ),
        }
    }

    /// Only the quotation gets the fixed terms document appended
    pub fn appends_terms(&self) -> bool {
        matches!(self, DocumentKind::Quotation)
    }
}

/// Branding and assets threaded into every builder
pub struct DocumentContext<'a> {
    pub branding: &'a Branding,
    pub logo_data_uri: &'a str,
}

/// Assemble the HTML for the requested document kind
pub fn build_html(
    event: &Event,
    index: &MenuIndex,
    kind: DocumentKind,
    ctx: &DocumentContext,
) -> String {
    match kind {
        DocumentKind::Quotation => quotation::build(event, index, ctx),
        DocumentKind::CategoryMenu => category_menu::build(event, index, ctx),
        DocumentKind::Billing => billing::build(event, ctx),
    }
}

/// Shared company header: logo, optional ESTIMATE badge, name, tagline and
/// contact numbers.
fn company_header(ctx: &DocumentContext, with_badge: bool) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"header\">");
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"Logo\" />",
        ctx.logo_data_uri
    ));
    if with_badge {
        out.push_str("<div class=\"estimate-badge\">ESTIMATE</div>");
    }
    out.push_str(&format!(
        "<div class=\"company-name\">{}</div>",
        html::escape(&ctx.branding.company_name.to_uppercase())
    ));
    out.push_str(&format!(
        "<div class=\"company-tagline\">{}</div>",
        html::escape(&ctx.branding.tagline)
    ));
    if !ctx.branding.phones.is_empty() {
        let phones = ctx
            .branding
            .phones
            .iter()
            .map(|p| format!("<span>{}</span>", html::escape(p)))
            .collect::<Vec<_>>()
            .join("<span class=\"sep\">|</span>");
        out.push_str(&format!(
            "<div class=\"company-phones\">Contact: {phones}</div>"
        ));
    }
    out.push_str("</div>");
    out
}
