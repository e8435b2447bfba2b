//! Document assets
//!
//! Locates the company logo on disk and inlines it as a data URI so the
//! rendered HTML is self-contained. Falls back to an embedded SVG
//! placeholder when no logo file is present.

use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::core::Config;
use crate::documents::html;

const LOGO_CANDIDATES: &[&str] = &["logo.png", "logo.jpg", "logo.jpeg"];

/// Resolve the logo as a `data:` URI.
///
/// Checks `WORK_DIR/assets` first, then the work dir itself; PNG before
/// JPEG so transparency wins when both exist.
pub fn logo_data_uri(config: &Config) -> String {
    for dir in [config.assets_dir(), PathBuf::from(&config.work_dir)] {
        for name in LOGO_CANDIDATES {
            let path = dir.join(name);
            match std::fs::read(&path) {
                Ok(bytes) if !bytes.is_empty() => {
                    let mime = mime_guess::from_path(&path).first_or_octet_stream();
                    return format!(
                        "data:{};base64,{}",
                        mime.essence_str(),
                        STANDARD.encode(&bytes)
                    );
                }
                Ok(_) => {}
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), error = %e, "Error reading logo");
                }
                Err(_) => {}
            }
        }
    }

    tracing::warn!(
        "No logo found under {}, using placeholder",
        config.work_dir
    );
    placeholder_logo(&config.branding.company_name, &config.branding.tagline)
}

/// Simple SVG badge carrying the company name, used when no logo exists
fn placeholder_logo(company_name: &str, tagline: &str) -> String {
    let svg = format!(
        r#"<svg width="200" height="100" xmlns="http://www.w3.org/2000/svg">
  <rect width="200" height="100" fill="#c62828" stroke="#000" stroke-width="2"/>
  <text x="100" y="45" text-anchor="middle" fill="white" font-family="Arial, sans-serif" font-size="16" font-weight="bold">{}</text>
  <text x="100" y="70" text-anchor="middle" fill="white" font-family="Arial, sans-serif" font-size="9">{}</text>
</svg>"#,
        html::escape(&company_name.to_uppercase()),
        html::escape(tagline),
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_a_data_uri() {
        let uri = placeholder_logo("Banquet Caterers", "Catering");
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn logo_read_from_assets_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
        config.ensure_work_dir_structure().unwrap();

        // PNG signature followed by junk is enough for the mime guess (by
        // extension) and the non-empty check
        std::fs::write(config.assets_dir().join("logo.png"), b"\x89PNG\r\n\x1a\nxx").unwrap();

        let uri = logo_data_uri(&config);
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn missing_logo_falls_back_to_placeholder() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
        config.ensure_work_dir_structure().unwrap();

        let uri = logo_data_uri(&config);
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }
}
