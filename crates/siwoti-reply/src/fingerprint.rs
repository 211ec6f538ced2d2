//! Cache fingerprints.

use siwoti_protocols::{ArticleContext, Tone};

use crate::language::Language;

/// Deterministic cache key for a reply request.
///
/// The comment is trimmed, lowercased and has its whitespace runs collapsed,
/// so trivially different copies of one comment share an entry. The key is
/// the BLAKE3 hex digest of the combined fields.
pub fn fingerprint(
    comment: &str,
    tone: Tone,
    language: Language,
    article: Option<&ArticleContext>,
) -> String {
    let normalized = comment
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let identity = article.map(ArticleContext::identity).unwrap_or_default();
    let material = format!("{}|{}|{}|{}", normalized, tone.as_str(), language.code(), identity);
    blake3::hash(material.as_bytes()).to_hex().to_string()
}
