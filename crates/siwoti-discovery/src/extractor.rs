//! Tiered comment extraction.
//!
//! Tiers run in a fixed order and only ever add candidates:
//!
//! 1. Shadow tier, when the site declares a shadow host tag.
//! 2. The site's declared comment selectors.
//! 3. Elements with `role="comment"`, while fewer than [`CANDIDATE_FLOOR`]
//!    candidates are known.
//! 4. Class clustering, under the same condition.
//!
//! A selector that fails to parse is logged and skipped; extraction itself
//! never fails.

use std::collections::{HashMap, HashSet};

use siwoti_config::SiteDescriptor;
use siwoti_protocols::{DocumentScanner, ElementHandle, ScanRoot};
use tracing::{debug, warn};

use crate::scorer;

/// Fallback tiers run while fewer candidates than this are known.
pub const CANDIDATE_FLOOR: usize = 5;

/// Upper bound (exclusive) on the text length of shadow-tier candidates.
pub const SHADOW_MAX_TEXT_LEN: usize = 2000;

/// Selectors tried inside every shadow root in addition to the site's own.
pub const SHADOW_GENERIC_SELECTOR: &str =
    r#"article, div[class*="comment"], li[class*="comment"], p[class*="comment"]"#;

pub const ROLE_SELECTOR: &str = r#"div[role="comment"], article[role="comment"]"#;
pub const ROLE_MIN_TEXT_LEN: usize = 10;
pub const ROLE_MAX_TEXT_LEN: usize = 1000;

pub const CLUSTER_SELECTOR: &str = r#"div[class*="comment"], li[class*="comment"], article[class*="comment"], div[class*="post"], li[class*="post"]"#;
/// Class name fragments (case-insensitive) that mark a comment-like class.
pub const CLUSTER_CLASS_HINTS: [&str; 3] = ["comment", "post", "reply"];
pub const CLUSTER_MIN_OCCURRENCES: usize = 3;
pub const CLUSTER_MAX_OCCURRENCES: usize = 100;
pub const CLUSTER_MIN_TEXT_LEN: usize = 20;
pub const CLUSTER_MAX_TEXT_LEN: usize = 800;
/// Links per word above which a cluster member is treated as navigation.
pub const CLUSTER_MAX_LINK_RATIO: f64 = 0.3;

/// A probable comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub element: ElementHandle,
    /// Trimmed text.
    pub text: String,
}

impl Candidate {
    pub fn score(&self) -> i32 {
        scorer::score(&self.text)
    }
}

/// Candidates keyed by element identity, in insertion order.
///
/// An element is recorded at most once; the first tier to find it wins.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
    seen: HashSet<ElementHandle>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a candidate. Returns `false` if the element is already present.
    pub fn insert(&mut self, element: ElementHandle, text: impl Into<String>) -> bool {
        if !self.seen.insert(element) {
            return false;
        }
        self.candidates.push(Candidate {
            element,
            text: text.into(),
        });
        true
    }

    pub fn contains(&self, element: ElementHandle) -> bool {
        self.seen.contains(&element)
    }

    pub fn get(&self, element: ElementHandle) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.element == element)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.text.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Find probable comments in `doc`.
///
/// Without a descriptor the site is unsupported and nothing is returned.
pub fn extract(doc: &dyn DocumentScanner, descriptor: Option<&SiteDescriptor>) -> CandidateSet {
    let mut set = CandidateSet::new();
    let Some(descriptor) = descriptor else {
        return set;
    };

    if let Some(host_tag) = descriptor.shadow_host.as_deref() {
        shadow_tier(doc, host_tag, &descriptor.comment_selectors, &mut set);
    }
    declared_tier(doc, &descriptor.comment_selectors, &mut set);

    if set.len() < CANDIDATE_FLOOR {
        role_tier(doc, &mut set);
    }
    if set.len() < CANDIDATE_FLOOR {
        cluster_tier(doc, &mut set);
    }

    debug!(hostname = %doc.location().hostname, count = set.len(), "Extraction finished");
    set
}

fn query(doc: &dyn DocumentScanner, root: ScanRoot, selector: &str, deep: bool) -> Vec<ElementHandle> {
    let result = if deep {
        doc.query_deep(root, selector)
    } else {
        doc.query_all(root, selector)
    };
    result.unwrap_or_else(|e| {
        warn!("Skipping selector: {}", e);
        Vec::new()
    })
}

fn text_len(text: &str) -> usize {
    text.chars().count()
}

fn shadow_tier(doc: &dyn DocumentScanner, host_tag: &str, selectors: &[String], set: &mut CandidateSet) {
    let hosts = query(doc, ScanRoot::Document, host_tag, true);
    let before = set.len();

    for host in hosts.into_iter().filter(|&h| doc.has_shadow_root(h)) {
        let selectors = selectors
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(SHADOW_GENERIC_SELECTOR));
        for selector in selectors {
            for element in query(doc, ScanRoot::ShadowOf(host), selector, true) {
                let text = doc.trimmed_text(element);
                let len = text_len(&text);
                if len > 0 && len < SHADOW_MAX_TEXT_LEN {
                    set.insert(element, text);
                }
            }
        }
    }

    debug!(host_tag, added = set.len() - before, "Shadow tier");
}

fn declared_tier(doc: &dyn DocumentScanner, selectors: &[String], set: &mut CandidateSet) {
    for selector in selectors {
        for element in query(doc, ScanRoot::Document, selector, false) {
            let text = doc.trimmed_text(element);
            if !text.is_empty() {
                set.insert(element, text);
            }
        }
    }
}

fn role_tier(doc: &dyn DocumentScanner, set: &mut CandidateSet) {
    for element in query(doc, ScanRoot::Document, ROLE_SELECTOR, false) {
        if set.contains(element) {
            continue;
        }
        let text = doc.trimmed_text(element);
        let len = text_len(&text);
        if (ROLE_MIN_TEXT_LEN..=ROLE_MAX_TEXT_LEN).contains(&len) {
            set.insert(element, text);
        }
    }
}

fn cluster_tier(doc: &dyn DocumentScanner, set: &mut CandidateSet) {
    // First comment-like class of each element, counted in discovery order.
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for element in query(doc, ScanRoot::Document, CLUSTER_SELECTOR, false) {
        let Some(class) = doc.class_names(element).into_iter().find(|c| is_comment_class(c)) else {
            continue;
        };
        let count = counts.entry(class.clone()).or_insert(0);
        if *count == 0 {
            order.push(class);
        }
        *count += 1;
    }

    for class in order {
        let occurrences = counts.get(&class).copied().unwrap_or(0);
        if !(CLUSTER_MIN_OCCURRENCES..=CLUSTER_MAX_OCCURRENCES).contains(&occurrences) {
            continue;
        }
        let selector = format!(".{}", css_escape(&class));
        for element in query(doc, ScanRoot::Document, &selector, false) {
            if set.contains(element) {
                continue;
            }
            let text = doc.trimmed_text(element);
            let len = text_len(&text);
            if !(CLUSTER_MIN_TEXT_LEN..=CLUSTER_MAX_TEXT_LEN).contains(&len) {
                continue;
            }
            let links = query(doc, ScanRoot::Element(element), "a", false).len();
            let words = text.split_whitespace().count().max(1);
            if links > 0 && links as f64 / words as f64 > CLUSTER_MAX_LINK_RATIO {
                continue;
            }
            set.insert(element, text);
        }
    }
}

fn is_comment_class(class: &str) -> bool {
    let lower = class.to_lowercase();
    CLUSTER_CLASS_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Escape a class name for use in a CSS class selector.
pub fn css_escape(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, c) in ident.chars().enumerate() {
        let leading_digit = c.is_ascii_digit()
            && (i == 0 || (i == 1 && ident.starts_with('-')));
        if leading_digit {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
