use daily_idioms::content::fingerprint::{fingerprint, normalize, similar};
use daily_idioms::core::models::{ContentItem, Expression, Idiom};

/// Tests for normalization and the near-duplicate similarity rule.

fn expression(indonesian: &str, english: &str) -> ContentItem {
    ContentItem::Expression(Expression {
        id: None,
        indonesian: indonesian.to_string(),
        english: english.to_string(),
        examples: String::new(),
        alt_phrases: None,
    })
}

fn idiom(phrase: &str, meaning: &str) -> ContentItem {
    ContentItem::Idiom(Idiom {
        id: None,
        phrase: phrase.to_string(),
        meaning: meaning.to_string(),
        examples: String::new(),
    })
}

#[test]
fn test_normalize_lowercases_and_collapses_placeholders() {
    assert_eq!(normalize("Kebal ::X::"), "kebal x");
    assert_eq!(normalize("Baru ::x:: udah ::y::"), "baru x udah x");
    assert_eq!(normalize("  Mager  "), "mager");
}

#[test]
fn test_placeholder_variants_share_a_fingerprint() {
    let a = expression("Kebal ::X::", "Immune to sarcasm");
    let b = expression("kebal ::Y::", "Immune to criticism");

    assert_eq!(fingerprint(&a), fingerprint(&b));
}

#[test]
fn test_placeholder_and_case_variants_are_similar() {
    let a = expression("Kebal ::X::", "Immune to sarcasm");
    let b = expression("kebal ::Y::", "Immune to criticism");

    assert!(
        similar(&a, &b),
        "Items differing only in placeholder and case must be near-duplicates"
    );
}

#[test]
fn test_exact_primary_match_is_similar() {
    let a = expression("Mager", "Can't be bothered");
    let b = expression("Mager", "Too lazy to move");

    assert!(similar(&a, &b));
}

#[test]
fn test_secondary_field_match_is_similar() {
    let a = expression("Ngga ngeh", "It didn't click");
    let b = expression("Ngga mudeng", "It didn't click");

    assert!(
        similar(&a, &b),
        "Equal translations should flag items as near-duplicates"
    );
}

#[test]
fn test_distinct_items_are_not_similar() {
    let a = idiom("Break the ice", "To ease tension in a group");
    let b = idiom("Cut corners", "To sacrifice quality for speed");

    assert!(!similar(&a, &b));
}

#[test]
fn test_idiom_fingerprint_uses_phrase() {
    let item = idiom("Once in a Blue Moon", "Very rarely");

    assert_eq!(fingerprint(&item), "once in a blue moon");
}
