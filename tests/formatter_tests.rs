use daily_idioms::core::models::{ContentItem, ContentKind, Expression, Idiom};
use daily_idioms::discord::formatter::{
    MAX_MESSAGE_LENGTH, chunk_blocks, format_batch, render_item,
};

/// Tests for message rendering and chunking under the length ceiling.

fn idiom(phrase: &str, meaning: &str, examples: &str) -> ContentItem {
    ContentItem::Idiom(Idiom {
        id: None,
        phrase: phrase.to_string(),
        meaning: meaning.to_string(),
        examples: examples.to_string(),
    })
}

fn expression(indonesian: &str, english: &str, alt: Option<&str>) -> ContentItem {
    ContentItem::Expression(Expression {
        id: None,
        indonesian: indonesian.to_string(),
        english: english.to_string(),
        examples: "🇬🇧 example\n🇮🇩 contoh".to_string(),
        alt_phrases: alt.map(str::to_string),
    })
}

#[test]
fn test_idiom_block_contains_all_fields() {
    let item = idiom("Break the ice", "To ease tension", "🇬🇧 He broke the ice.");

    let block = render_item(&item, 2);

    assert!(block.starts_with("2. **Break the ice**"));
    assert!(block.contains("💡 To ease tension"));
    assert!(block.contains("📝 Example:\n🇬🇧 He broke the ice."));
}

#[test]
fn test_expression_block_includes_alt_phrases_line() {
    let item = expression("Mager", "Can't be bothered", Some("Males gerak"));

    let block = render_item(&item, 1);

    assert!(block.starts_with("1. **Mager**: Can't be bothered"));
    assert!(block.contains("📝 Examples:"));
    assert!(block.contains("💫 Alternative phrases:\n   🇮🇩 Males gerak"));
}

#[test]
fn test_expression_block_omits_absent_alt_phrases() {
    let item = expression("Garing", "That fell flat", None);

    let block = render_item(&item, 1);

    assert!(!block.contains("Alternative phrases"));
}

#[test]
fn test_single_chunk_when_under_the_limit() {
    let blocks = vec!["a".repeat(100), "b".repeat(100)];

    let chunks = chunk_blocks("title\n", &blocks, MAX_MESSAGE_LENGTH);

    assert_eq!(chunks.len(), 1);
    assert!(!chunks[0].starts_with("Part"), "Single chunk gets no part prefix");
    assert!(chunks[0].starts_with("title\n"));
}

#[test]
fn test_blocks_exceeding_the_limit_split_into_bounded_chunks() {
    let blocks: Vec<String> = (0..5).map(|_| "x".repeat(700)).collect();

    let chunks = chunk_blocks("", &blocks, 1800);

    assert!(chunks.len() > 1, "3500 chars cannot fit one 1800-char chunk");
    for chunk in &chunks {
        let body = chunk
            .split_once("\n\n")
            .map(|(_, rest)| rest)
            .unwrap_or(chunk);
        assert!(
            body.chars().count() <= 1800,
            "Chunk body exceeds the ceiling: {} chars",
            body.chars().count()
        );
    }
}

#[test]
fn test_multi_chunk_output_gets_part_prefixes() {
    let blocks: Vec<String> = (0..3).map(|_| "y".repeat(900)).collect();

    let chunks = chunk_blocks("", &blocks, 1000);

    assert_eq!(chunks.len(), 3);
    assert!(chunks[0].starts_with("Part 1/3\n\n"));
    assert!(chunks[1].starts_with("Part 2/3\n\n"));
    assert!(chunks[2].starts_with("Part 3/3\n\n"));
}

#[test]
fn test_oversized_block_is_emitted_alone_not_split() {
    let big = "z".repeat(2500);
    let blocks = vec!["a".repeat(100), big.clone(), "b".repeat(100)];

    let chunks = chunk_blocks("", &blocks, 1800);

    assert!(
        chunks.iter().any(|chunk| chunk.contains(&big)),
        "The oversized block must survive intact in a single chunk"
    );
}

#[test]
fn test_item_block_is_never_split_across_chunks() {
    let blocks: Vec<String> = (0..4)
        .map(|i| format!("[{i}-start]{}[{i}-end]", "m".repeat(600)))
        .collect();

    let chunks = chunk_blocks("", &blocks, 1300);

    for (i, _) in blocks.iter().enumerate() {
        let containing: Vec<&String> = chunks
            .iter()
            .filter(|chunk| chunk.contains(&format!("[{i}-start]")))
            .collect();
        assert_eq!(containing.len(), 1);
        assert!(
            containing[0].contains(&format!("[{i}-end]")),
            "Block {i} was split across chunks"
        );
    }
}

#[test]
fn test_format_batch_produces_one_chunk_for_a_small_batch() {
    let items = vec![
        idiom("Break the ice", "To ease tension", "🇬🇧 one"),
        idiom("Cut corners", "To sacrifice quality", "🇬🇧 two"),
        idiom("Under the weather", "Feeling unwell", "🇬🇧 three"),
    ];

    let chunks = format_batch(ContentKind::Idiom, &items);

    assert_eq!(chunks.len(), 1, "Three short idioms fit a single message");
    assert!(chunks[0].starts_with("**"), "Message opens with the title line");
    assert!(chunks[0].contains("1. **Break the ice**"));
    assert!(chunks[0].contains("3. **Under the weather**"));
}
