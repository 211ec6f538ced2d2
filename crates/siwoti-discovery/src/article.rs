//! Article context extraction.

use siwoti_config::ArticleSelectors;
use siwoti_protocols::{ArticleContext, DocumentScanner, ElementHandle, ScanRoot};
use tracing::{debug, warn};

/// Content blocks must be longer than this (trimmed chars) to be kept.
pub const ARTICLE_MIN_BLOCK_LEN: usize = 20;

const BLOCK_SEPARATOR: &str = "\n\n";

/// Build the context of the article a discussion belongs to.
///
/// The title falls back to the document title and the URL is always the
/// page URL, so even sites without article selectors get a usable context.
pub fn extract_article_context(
    doc: &dyn DocumentScanner,
    selectors: Option<&ArticleSelectors>,
) -> ArticleContext {
    let location = doc.location();
    let mut title = String::new();
    let mut content = String::new();

    if let Some(selectors) = selectors {
        let root = selectors
            .container
            .as_deref()
            .and_then(|selector| first_match(doc, ScanRoot::Document, selector))
            .map(ScanRoot::Element)
            .unwrap_or(ScanRoot::Document);

        if let Some(selector) = selectors.title.as_deref() {
            if let Some(element) = first_match(doc, root, selector) {
                title = doc.trimmed_text(element);
            }
        }

        if let Some(selector) = selectors.content.as_deref() {
            let blocks = match doc.query_all(root, selector) {
                Ok(elements) => elements,
                Err(e) => {
                    warn!("Skipping article content selector: {}", e);
                    Vec::new()
                }
            };
            content = blocks
                .into_iter()
                .map(|element| doc.trimmed_text(element))
                .filter(|text| text.chars().count() > ARTICLE_MIN_BLOCK_LEN)
                .filter(|text| !selectors.exclude.iter().any(|marker| text.contains(marker.as_str())))
                .collect::<Vec<_>>()
                .join(BLOCK_SEPARATOR);
        }
    }

    if title.is_empty() {
        title = location.title.trim().to_string();
    }

    debug!(
        title_len = title.len(),
        content_len = content.len(),
        "Article context extracted"
    );
    ArticleContext::new(title, content, location.url.clone())
}

fn first_match(doc: &dyn DocumentScanner, root: ScanRoot, selector: &str) -> Option<ElementHandle> {
    doc.query_first(root, selector).unwrap_or_else(|e| {
        warn!("Skipping article selector: {}", e);
        None
    })
}
