//! [`DocumentScanner`] over a parsed HTML snapshot.
//!
//! Declarative shadow roots (`<template shadowrootmode="open">`) become the
//! shadow root of their parent element, so widgets that render comments into
//! a shadow tree can be captured with their markup intact. The HTML parser
//! flattens such templates into the host's light DOM, so [`parse_html`]
//! renames them to a [`SHADOW_ROOT_TAG`] element first.
//!
//! A static snapshot has no layout engine behind it. Elements are laid out
//! one row per element in document order, which keeps controls in the same
//! vertical order as the comments they belong to.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Selector};
use siwoti_protocols::{DocumentError, DocumentScanner, ElementHandle, PageLocation, Point, Rect, ScanRoot};

/// Height of one synthetic layout row.
pub const ROW_HEIGHT: f64 = 24.0;

/// Width of the synthetic viewport.
pub const VIEWPORT_WIDTH: f64 = 1280.0;

/// Elements whose text runs on without a separator.
const INLINE_TAGS: [&str; 12] = [
    "a", "abbr", "b", "cite", "code", "em", "i", "q", "small", "span", "strong", "time",
];

/// Element standing in for a declarative shadow root after [`parse_html`].
pub const SHADOW_ROOT_TAG: &str = "siwoti-shadow-root";

/// Elements that never contribute visible text.
const HIDDEN_TAGS: [&str; 5] = ["script", "style", "noscript", "template", SHADOW_ROOT_TAG];

static TEMPLATE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)template\b([^>]*)>").expect("valid template tag pattern"));

static SHADOW_ROOT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\sshadowroot(?:mode)?\s*=").expect("valid shadow root pattern"));

/// Parse a page, keeping declarative shadow roots as [`SHADOW_ROOT_TAG`]
/// elements under their hosts.
pub fn parse_html(source: &str) -> Html {
    Html::parse_document(&mark_shadow_roots(source))
}

/// Rename `<template shadowrootmode>` and its matching end tag. Inert
/// templates are left alone.
fn mark_shadow_roots(source: &str) -> Cow<'_, str> {
    let mut open: Vec<bool> = Vec::new();
    TEMPLATE_TAG.replace_all(source, |caps: &Captures| {
        if !caps[1].is_empty() {
            return if open.pop().unwrap_or(false) {
                format!("</{}>", SHADOW_ROOT_TAG)
            } else {
                caps[0].to_string()
            };
        }
        let shadow = SHADOW_ROOT_ATTR.is_match(&caps[2]);
        open.push(shadow);
        if shadow {
            format!("<{}{}>", SHADOW_ROOT_TAG, &caps[2])
        } else {
            caps[0].to_string()
        }
    })
}

/// Tree an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tree {
    Light,
    /// Shadow tree rooted at the template with this index.
    Shadow(usize),
}

#[derive(Debug, Clone)]
struct NodeInfo {
    parent: Option<usize>,
    tree: Tree,
    /// Template index of the shadow root this element hosts.
    shadow_root: Option<usize>,
    is_shadow_template: bool,
}

/// A parsed page, addressable through [`ElementHandle`]s.
///
/// Shadow roots are only recognised in documents parsed with [`parse_html`].
pub struct HtmlDocument<'a> {
    location: PageLocation,
    elements: Vec<ElementRef<'a>>,
    nodes: Vec<NodeInfo>,
}

impl<'a> HtmlDocument<'a> {
    /// Index `html`. An empty `location.title` is filled from `<title>`.
    pub fn new(html: &'a Html, mut location: PageLocation) -> Self {
        let mut doc = Self {
            location: PageLocation::default(),
            elements: Vec::new(),
            nodes: Vec::new(),
        };
        doc.index(html.root_element(), None, Tree::Light);

        if location.title.trim().is_empty() {
            if let Ok(Some(title)) = doc.query_first(ScanRoot::Document, "title") {
                location.title = doc.trimmed_text(title);
            }
        }
        doc.location = location;
        doc
    }

    /// Number of indexed elements, shadow trees included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Value of an attribute.
    pub fn attr(&self, element: ElementHandle, name: &str) -> Option<&'a str> {
        self.elements.get(element.0).and_then(|el| el.value().attr(name))
    }

    fn index(&mut self, element: ElementRef<'a>, parent: Option<usize>, tree: Tree) {
        let index = self.elements.len();
        let name = element.value().name();
        let is_template = name == "template";
        let is_shadow_template = name == SHADOW_ROOT_TAG
            || (is_template
                && (element.value().attr("shadowrootmode").is_some()
                    || element.value().attr("shadowroot").is_some()));

        self.elements.push(element);
        self.nodes.push(NodeInfo {
            parent,
            tree,
            shadow_root: None,
            is_shadow_template,
        });

        if is_shadow_template {
            // Only the first declarative root attaches, as in a browser.
            if let Some(host) = parent {
                if self.nodes[host].shadow_root.is_none() {
                    self.nodes[host].shadow_root = Some(index);
                }
            }
            for child in element.children().filter_map(ElementRef::wrap) {
                self.index(child, parent, Tree::Shadow(index));
            }
        } else if !is_template {
            for child in element.children().filter_map(ElementRef::wrap) {
                self.index(child, Some(index), tree);
            }
        }
    }

    fn node(&self, element: ElementHandle) -> Option<&NodeInfo> {
        self.nodes.get(element.0)
    }

    /// Tree and optional ancestor bounding a query under `root`.
    fn scope(&self, root: ScanRoot) -> Option<(Tree, Option<usize>)> {
        match root {
            ScanRoot::Document => Some((Tree::Light, None)),
            ScanRoot::ShadowOf(host) => self
                .node(host)
                .and_then(|info| info.shadow_root)
                .map(|template| (Tree::Shadow(template), None)),
            ScanRoot::Element(element) => self.node(element).map(|info| (info.tree, Some(element.0))),
        }
    }

    fn in_scope(&self, index: usize, tree: Tree, ancestor: Option<usize>) -> bool {
        let info = &self.nodes[index];
        if info.is_shadow_template || info.tree != tree {
            return false;
        }
        let Some(ancestor) = ancestor else {
            return true;
        };

        let mut current = info.parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            if self.nodes[parent].tree != tree {
                return false;
            }
            current = self.nodes[parent].parent;
        }
        false
    }

    fn scoped(&self, root: ScanRoot) -> impl Iterator<Item = usize> + '_ {
        let scope = self.scope(root);
        (0..self.elements.len()).filter(move |&index| match scope {
            Some((tree, ancestor)) => self.in_scope(index, tree, ancestor),
            None => false,
        })
    }

    fn collect_text(element: ElementRef<'a>, out: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(child_el) = ElementRef::wrap(child) {
                let name = child_el.value().name();
                if HIDDEN_TAGS.contains(&name) {
                    continue;
                }
                let block = !INLINE_TAGS.contains(&name);
                if block {
                    out.push(' ');
                }
                Self::collect_text(child_el, out);
                if block {
                    out.push(' ');
                }
            }
        }
    }
}

impl DocumentScanner for HtmlDocument<'_> {
    fn location(&self) -> &PageLocation {
        &self.location
    }

    fn query_all(&self, root: ScanRoot, selector: &str) -> Result<Vec<ElementHandle>, DocumentError> {
        let parsed = Selector::parse(selector)
            .map_err(|_| DocumentError::InvalidSelector(selector.to_string()))?;
        Ok(self
            .scoped(root)
            .filter(|&index| parsed.matches(&self.elements[index]))
            .map(ElementHandle)
            .collect())
    }

    fn shadow_hosts(&self, root: ScanRoot) -> Vec<ElementHandle> {
        self.scoped(root)
            .filter(|&index| self.nodes[index].shadow_root.is_some())
            .map(ElementHandle)
            .collect()
    }

    fn has_shadow_root(&self, element: ElementHandle) -> bool {
        self.node(element).is_some_and(|info| info.shadow_root.is_some())
    }

    /// Text with whitespace runs collapsed; shadow trees are not included.
    fn text(&self, element: ElementHandle) -> String {
        let Some(el) = self.elements.get(element.0) else {
            return String::new();
        };
        let mut raw = String::new();
        Self::collect_text(*el, &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn tag_name(&self, element: ElementHandle) -> String {
        self.elements
            .get(element.0)
            .map(|el| el.value().name().to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn class_names(&self, element: ElementHandle) -> Vec<String> {
        self.attr(element, "class")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn parent(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.node(element).and_then(|info| info.parent).map(ElementHandle)
    }

    fn bounding_rect(&self, element: ElementHandle) -> Rect {
        Rect::new(0.0, element.0 as f64 * ROW_HEIGHT, VIEWPORT_WIDTH, ROW_HEIGHT)
    }

    fn scroll_offset(&self) -> Point {
        Point::default()
    }
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
