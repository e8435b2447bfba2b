//! HTML and formatting helpers shared by the document builders

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// HTML-encode user-supplied text before interpolation
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const DATE_ONLY_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parse a stored date string and reformat it as `DD/MM/YYYY`.
///
/// Dates are entered free-form; anything unparseable falls back to the
/// HTML-encoded raw string rather than an error.
pub fn format_display_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format("%d/%m/%Y").to_string();
    }
    for format in DATE_ONLY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%d/%m/%Y").to_string();
        }
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return dt.format("%d/%m/%Y").to_string();
        }
    }

    escape(trimmed)
}

/// Strip characters that are unsafe in a download filename
pub fn sanitize_filename(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        "Event".to_string()
    } else {
        cleaned
    }
}

/// Split free-text notes into bullet lines: one per non-blank line,
/// tolerating any newline convention.
pub fn bullet_lines(notes: &str) -> Vec<&str> {
    notes
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
