//! Document access protocol.
//!
//! Discovery never owns document nodes. It works on [`ElementHandle`]s, plain
//! copyable references handed out by a [`DocumentScanner`], so the tiering
//! logic can run against a real page, a parsed HTML snapshot or a test fixture.

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Ownership-free reference to an element of a live document.
///
/// Two handles are equal exactly when they refer to the same element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementHandle(pub usize);

/// Scope of a selector query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanRoot {
    /// The light DOM of the whole document.
    Document,
    /// The shadow root attached to the given host element.
    ShadowOf(ElementHandle),
    /// Descendants of an element, within that element's own tree.
    Element(ElementHandle),
}

/// Layout rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the document was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    pub hostname: String,
    pub url: String,
    pub title: String,
}

/// Read-only access to a document and its shadow roots.
///
/// Implementations must return elements in document order. Queries never
/// pierce shadow roots on their own; [`DocumentScanner::query_deep`] does.
pub trait DocumentScanner {
    /// Location of the document.
    fn location(&self) -> &PageLocation;

    /// Elements under `root` matching `selector`, not crossing shadow boundaries.
    fn query_all(&self, root: ScanRoot, selector: &str) -> Result<Vec<ElementHandle>, DocumentError>;

    /// Elements under `root` that host a shadow root, not crossing shadow boundaries.
    fn shadow_hosts(&self, root: ScanRoot) -> Vec<ElementHandle>;

    /// Whether the element hosts a shadow root.
    fn has_shadow_root(&self, element: ElementHandle) -> bool;

    /// Visible text of the element, untrimmed.
    fn text(&self, element: ElementHandle) -> String;

    /// Lowercase tag name.
    fn tag_name(&self, element: ElementHandle) -> String;

    /// Class names from the `class` attribute, in attribute order.
    fn class_names(&self, element: ElementHandle) -> Vec<String>;

    /// Parent element. A shadow root's top-level elements report their host.
    fn parent(&self, element: ElementHandle) -> Option<ElementHandle>;

    /// Current layout rectangle in viewport coordinates.
    fn bounding_rect(&self, element: ElementHandle) -> Rect;

    /// Current page scroll offset.
    fn scroll_offset(&self) -> Point;

    /// Query `root` and, recursively, every shadow root nested below it.
    fn query_deep(&self, root: ScanRoot, selector: &str) -> Result<Vec<ElementHandle>, DocumentError> {
        let mut results = self.query_all(root, selector)?;
        for host in self.shadow_hosts(root) {
            results.extend(self.query_deep(ScanRoot::ShadowOf(host), selector)?);
        }
        Ok(results)
    }

    /// First light-DOM match under `root`.
    fn query_first(&self, root: ScanRoot, selector: &str) -> Result<Option<ElementHandle>, DocumentError> {
        Ok(self.query_all(root, selector)?.into_iter().next())
    }

    /// Visible text with surrounding whitespace removed.
    fn trimmed_text(&self, element: ElementHandle) -> String {
        self.text(element).trim().to_string()
    }
}
