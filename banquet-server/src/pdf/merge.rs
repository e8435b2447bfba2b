//! Terms-and-conditions append
//!
//! Quotation PDFs carry a fixed terms document at the end. The terms file
//! lives under the work directory; when it is missing or the merge fails the
//! original document is returned untouched; a quotation without terms beats
//! no quotation.

use std::path::PathBuf;

use lopdf::{Document, Object, ObjectId};

use crate::core::Config;

const TERMS_CANDIDATES: &[&str] = &["terms.pdf", "Terms.pdf"];

/// Locate the fixed terms document, if one is installed
pub fn find_terms_pdf(config: &Config) -> Option<PathBuf> {
    for dir in [config.assets_dir(), PathBuf::from(&config.work_dir)] {
        for name in TERMS_CANDIDATES {
            let path = dir.join(name);
            if path.is_file() {
                return Some(path);
            }
        }
    }
    None
}

/// Append the terms document to a rendered PDF. Non-fatal on every path.
pub fn append_terms(main: Vec<u8>, config: &Config) -> Vec<u8> {
    let Some(path) = find_terms_pdf(config) else {
        tracing::warn!("Terms PDF not found, returning document without terms");
        return main;
    };

    let merged = std::fs::read(&path)
        .map_err(anyhow::Error::from)
        .and_then(|terms| merge_documents(&main, &terms));

    match merged {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to append terms PDF, returning original document");
            main
        }
    }
}

/// Copy every page of `terms_bytes` onto the end of `main_bytes`.
fn merge_documents(main_bytes: &[u8], terms_bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut main = Document::load_mem(main_bytes)?;
    let mut terms = Document::load_mem(terms_bytes)?;

    // Shift the terms object ids past the main document's range
    terms.renumber_objects_with(main.max_id + 1);
    main.max_id = terms.max_id;

    let terms_pages: Vec<ObjectId> = terms.get_pages().into_values().collect();
    if terms_pages.is_empty() {
        anyhow::bail!("terms document has no pages");
    }

    let pages_id = main.catalog()?.get(b"Pages")?.as_reference()?;

    main.objects.extend(terms.objects);

    // Re-parent the copied pages under the main page tree
    for page_id in &terms_pages {
        if let Ok(Object::Dictionary(dict)) = main.get_object_mut(*page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let added = terms_pages.len() as i64;
    match main.get_object_mut(pages_id)? {
        Object::Dictionary(pages) => {
            let mut kids = pages
                .get(b"Kids")
                .and_then(|k| k.as_array())
                .map(|k| k.clone())
                .unwrap_or_default();
            let count = pages
                .get(b"Count")
                .and_then(|c| c.as_i64())
                .unwrap_or(kids.len() as i64);
            kids.extend(terms_pages.into_iter().map(Object::Reference));
            pages.set("Kids", kids);
            pages.set("Count", count + added);
        }
        _ => anyhow::bail!("main document page tree is not a dictionary"),
    }

    let mut out = Vec::new();
    main.save_to(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_terms_returns_original_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
        config.ensure_work_dir_structure().unwrap();

        let original = b"%PDF-1.4 fake".to_vec();
        assert_eq!(append_terms(original.clone(), &config), original);
    }

    #[test]
    fn unreadable_terms_returns_original_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
        config.ensure_work_dir_structure().unwrap();
        std::fs::write(config.assets_dir().join("terms.pdf"), b"not a pdf").unwrap();

        let original = b"%PDF-1.4 fake".to_vec();
        assert_eq!(append_terms(original.clone(), &config), original);
    }
}
