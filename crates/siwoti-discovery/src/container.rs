//! Anchor element for overlay placement.

use siwoti_protocols::{DocumentScanner, ElementHandle};

/// Upper bound (exclusive) on a container's trimmed text length.
pub const CONTAINER_MAX_TEXT_LEN: usize = 2000;

const INTERACTIVE_TAGS: [&str; 2] = ["a", "button"];

/// Nearest non-interactive ancestor-or-self of `element` whose trimmed text
/// is non-empty and shorter than [`CONTAINER_MAX_TEXT_LEN`].
///
/// The walk stops at `<body>`; if nothing qualifies, `element` itself is the
/// container.
pub fn safe_container(doc: &dyn DocumentScanner, element: ElementHandle) -> ElementHandle {
    let mut current = Some(element);
    while let Some(node) = current {
        let tag = doc.tag_name(node);
        if tag == "body" {
            break;
        }
        if !INTERACTIVE_TAGS.contains(&tag.as_str()) {
            let len = doc.trimmed_text(node).chars().count();
            if len > 0 && len < CONTAINER_MAX_TEXT_LEN {
                return node;
            }
        }
        current = doc.parent(node);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{parse_html, HtmlDocument};
    use siwoti_protocols::{PageLocation, ScanRoot};

    fn first(doc: &HtmlDocument<'_>, selector: &str) -> ElementHandle {
        doc.query_first(ScanRoot::Document, selector).unwrap().unwrap()
    }

    #[test]
    fn test_plain_element_is_its_own_container() {
        let html = parse_html(r#"<body><div class="c">Comment</div></body>"#);
        let doc = HtmlDocument::new(&html, PageLocation::default());
        let el = first(&doc, ".c");
        assert_eq!(safe_container(&doc, el), el);
    }

    #[test]
    fn test_skips_link_wrapper() {
        let html = parse_html(
            r#"<body><div class="card"><a href="/c/1"><span class="c"></span>Linked comment</a></div></body>"#,
        );
        let doc = HtmlDocument::new(&html, PageLocation::default());
        // Empty span, then the link is skipped, so the card is chosen.
        let span = first(&doc, ".c");
        assert_eq!(safe_container(&doc, span), first(&doc, ".card"));
    }

    #[test]
    fn test_oversized_ancestors_fall_back_to_element() {
        let long = "w ".repeat(CONTAINER_MAX_TEXT_LEN);
        let html = parse_html(&format!(
            r#"<body><div class="wrap"><button><i class="c"></i></button>{}</div></body>"#,
            long
        ));
        let doc = HtmlDocument::new(&html, PageLocation::default());
        let el = first(&doc, ".c");
        assert_eq!(safe_container(&doc, el), el);
    }
}
