//! Site descriptors and hostname pattern matching.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ConfigError;

/// Selectors locating the article a discussion belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSelectors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Content blocks containing any of these markers are dropped (ad slots).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Declarative description of where comments live on one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDescriptor {
    /// Comment selectors, applied in order.
    #[serde(rename = "comments", default)]
    pub comment_selectors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleSelectors>,

    /// Tag of the custom element hosting the comment widget's shadow root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_host: Option<String>,
}

impl SiteDescriptor {
    pub fn new(comment_selectors: Vec<String>) -> Self {
        Self {
            comment_selectors,
            ..Default::default()
        }
    }

    /// Parse one table value: either the legacy bare selector array or a
    /// descriptor object.
    fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Array(_) => Ok(Self::new(serde_json::from_value(value)?)),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(ConfigError::InvalidFormat(format!(
                "expected selector array or descriptor object, got {}",
                other
            ))),
        }
    }
}

/// Translate a hostname glob into an anchored regex: `*` matches any run of
/// characters, everything else is literal.
fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{}$", body)).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Whether `hostname` matches the glob `pattern` as a whole.
///
/// A bare `*` matches every hostname.
pub fn matches(hostname: &str, pattern: &str) -> bool {
    compile_pattern(pattern)
        .map(|re| re.is_match(hostname))
        .unwrap_or(false)
}

#[derive(Debug, Clone)]
struct SiteEntry {
    pattern: String,
    regex: Regex,
    descriptor: SiteDescriptor,
}

/// Pattern to descriptor table, in document order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct SiteTable {
    entries: Vec<SiteEntry>,
}

impl SiteTable {
    /// Parse the site-configuration document.
    ///
    /// Entries whose value cannot be parsed are skipped with a warning; a
    /// document that is not a JSON object is an error.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let root: Map<String, Value> = serde_json::from_str(content)?;
        let mut entries = Vec::with_capacity(root.len());

        for (pattern, value) in root {
            let descriptor = match SiteDescriptor::from_value(value) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    warn!("Skipping site pattern '{}': {}", pattern, e);
                    continue;
                }
            };
            let regex = match compile_pattern(&pattern) {
                Ok(regex) => regex,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };
            entries.push(SiteEntry { pattern, regex, descriptor });
        }

        Ok(Self { entries })
    }

    /// Build a table from `(pattern, descriptor)` pairs, keeping their order.
    pub fn from_entries(
        pairs: impl IntoIterator<Item = (String, SiteDescriptor)>,
    ) -> Result<Self, ConfigError> {
        let entries = pairs
            .into_iter()
            .map(|(pattern, descriptor)| {
                let regex = compile_pattern(&pattern)?;
                Ok(SiteEntry { pattern, regex, descriptor })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { entries })
    }

    /// Descriptor of the first pattern matching `hostname`.
    pub fn resolve(&self, hostname: &str) -> Option<&SiteDescriptor> {
        self.entries
            .iter()
            .find(|entry| entry.regex.is_match(hostname))
            .map(|entry| &entry.descriptor)
    }

    /// Pattern that [`SiteTable::resolve`] would pick for `hostname`.
    pub fn matching_pattern(&self, hostname: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.regex.is_match(hostname))
            .map(|entry| entry.pattern.as_str())
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "site_tests.rs"]
mod tests;
