//! Normalized fingerprints and the near-duplicate similarity rule.
//!
//! Content items may carry template placeholders (`::x::`, `::something::`)
//! standing in for an arbitrary word. Two items differing only in placeholder
//! or case are the same phrase for deduplication purposes.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::ContentItem;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*::\w+::\s*").expect("placeholder pattern is valid"));

/// Lower-case the text and collapse every placeholder token to ` x `.
pub fn normalize(text: &str) -> String {
    PLACEHOLDER
        .replace_all(&text.to_lowercase(), " x ")
        .trim()
        .to_string()
}

/// Deduplication key for an item: the normalized form of its primary field.
pub fn fingerprint(item: &ContentItem) -> String {
    normalize(item.primary_text())
}

/// Whether two items are near-duplicates.
///
/// Exact equality on the primary field, or normalized equality on either the
/// primary or secondary textual field.
pub fn similar(a: &ContentItem, b: &ContentItem) -> bool {
    if a.primary_text() == b.primary_text() || a.secondary_text() == b.secondary_text() {
        return true;
    }

    normalize(a.primary_text()) == normalize(b.primary_text())
        || normalize(a.secondary_text()) == normalize(b.secondary_text())
}
