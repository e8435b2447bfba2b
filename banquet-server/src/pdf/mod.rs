//! PDF rendering
//!
//! Rasterizes assembled HTML through a headless browser. One browser session
//! per request: the session is owned by the rendering closure and dropped on
//! every exit path, so failures cannot leak a browser process handle.

pub mod merge;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use crate::utils::AppError;

/// HTML → PDF renderer
#[derive(Debug, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render an HTML document to PDF bytes.
    ///
    /// The browser work is blocking, so it runs on the blocking pool; the
    /// request task just awaits the result. A renderer failure surfaces as a
    /// dependency error, since a partial document is useless to the caller.
    pub async fn render(&self, html: String) -> Result<Vec<u8>, AppError> {
        let result = tokio::task::spawn_blocking(move || render_blocking(&html))
            .await
            .map_err(|e| AppError::internal(format!("PDF render task failed: {e}")))?;

        result.map_err(|e| {
            tracing::error!(error = %e, "PDF rendering failed");
            AppError::dependency(format!("Failed to generate PDF: {e}"))
        })
    }
}

fn render_blocking(html: &str) -> anyhow::Result<Vec<u8>> {
    let browser = Browser::new(LaunchOptions {
        headless: true,
        sandbox: false,
        ..Default::default()
    })?;

    let tab = browser.new_tab()?;

    // Self-contained data URL; the assembled HTML inlines its assets
    let encoded = STANDARD.encode(html);
    tab.navigate_to(&format!("data:text/html;charset=utf-8;base64,{encoded}"))?;
    tab.wait_until_navigated()?;

    let bytes = tab.print_to_pdf(Some(a4_options()))?;
    Ok(bytes)
}

/// A4 portrait with print backgrounds and uniform margins (inches)
fn a4_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(8.27),
        paper_height: Some(11.69),
        margin_top: Some(0.25),
        margin_bottom: Some(0.25),
        margin_left: Some(0.25),
        margin_right: Some(0.25),
        ..Default::default()
    }
}
