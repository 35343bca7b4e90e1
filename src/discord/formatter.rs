//! Renders a batch of content items into one or more message strings under
//! a hard length ceiling.

use chrono::Utc;
use chrono_tz::Asia::Jakarta;
use rand::seq::IndexedRandom;

use crate::core::models::{ContentItem, ContentKind};

/// Conservative ceiling below Discord's 2000-character limit, leaving margin
/// for the part prefix.
pub const MAX_MESSAGE_LENGTH: usize = 1800;

const IDIOM_TITLES: &[&str] = &[
    "🎯 Yo yo! Here's your idiom dose for",
    "🌟 Hot off the press! New set of idioms for",
    "📚 Time to level up your English! Daily idioms for",
    "💫 Fresh batch of idioms coming through for",
    "🎨 Spice up your English with these idioms for",
    "🚀 Your daily idioms adventure begins for",
    "✨ Ready for some cool idioms? Here's today's pick for",
    "🌈 New day, new idioms! Here's your set for",
    "🎪 Step right up! Get your daily idioms for",
    "🎭 Today's featured idioms performance for",
    "🌺 Freshly picked idioms just for you on",
    "🎪 Roll up, roll up! Today's idiom show for",
    "🎨 Painting your day with idioms for",
    "🎯 Bulls-eye! Your targeted idioms for",
    "🌟 Stellar idioms coming your way for",
];

const EXPRESSION_TITLES: &[&str] = &[
    "💭 Your daily Indonesian expression for",
    "🗣️ Today's phrase from Indonesia for",
    "🌟 Learn to speak like a local! Phrase for",
    "💫 Fresh Indonesian expression coming up for",
    "🎯 Today's must-know Indonesian phrase for",
    "✨ Level up your Indonesian! Daily phrase for",
    "🌈 Colorful Indonesian expressions for",
    "📝 Your Indonesian language moment for",
    "🎭 Express yourself in Indonesian for",
    "🌺 Beautiful Indonesian phrase of the day for",
    "💡 Spark your Indonesian vocabulary for",
    "🎪 Roll up! Indonesian phrase showcase for",
    "🚀 Boost your Indonesian skills for",
    "🎨 Paint your thoughts in Indonesian for",
    "🌟 Star Indonesian phrase of the day for",
];

/// Render a batch into sequential message chunks, each within
/// [`MAX_MESSAGE_LENGTH`] except for a single oversized item rendered alone.
pub fn format_batch(kind: ContentKind, items: &[ContentItem]) -> Vec<String> {
    let blocks: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(index, item)| render_item(item, index + 1))
        .collect();

    chunk_blocks(&random_title(kind), &blocks, MAX_MESSAGE_LENGTH)
}

/// One rendered block per item: index, bold primary phrase, meaning or
/// translation, examples, optional alternate-phrasing line.
pub fn render_item(item: &ContentItem, index: usize) -> String {
    match item {
        ContentItem::Idiom(idiom) => {
            let mut block = format!("{index}. **{}**\n💡 {}\n\n", idiom.phrase, idiom.meaning);
            if !idiom.examples.is_empty() {
                block.push_str(&format!("📝 Example:\n{}\n\n", idiom.examples));
            }
            block
        }
        ContentItem::Expression(expression) => {
            let mut block = format!(
                "{index}. **{}**: {}\n\n",
                expression.indonesian, expression.english
            );
            if !expression.examples.is_empty() {
                block.push_str(&format!("   📝 Examples:\n   {}\n", expression.examples));
            }
            if let Some(alt) = expression.alt_phrases.as_deref().filter(|s| !s.is_empty()) {
                block.push_str(&format!("\n   💫 Alternative phrases:\n   🇮🇩 {alt}\n"));
            }
            block.push('\n');
            block
        }
    }
}

/// Pack blocks into chunks with a running buffer. A block is never split
/// across chunks; a block longer than `max_length` on its own is emitted as
/// an oversized chunk rather than corrupted. Multi-chunk output gains
/// `Part i/N` prefixes.
pub fn chunk_blocks(header: &str, blocks: &[String], max_length: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = header.to_string();

    for block in blocks {
        let would_overflow =
            current.chars().count() + block.chars().count() > max_length;
        if would_overflow && !current.is_empty() {
            chunks.push(current);
            current = String::new();
        }
        current.push_str(block);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    if chunks.len() > 1 {
        let total = chunks.len();
        chunks = chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| format!("Part {}/{total}\n\n{chunk}", index + 1))
            .collect();
    }

    chunks
}

/// A randomly chosen greeting line carrying the current date.
fn random_title(kind: ContentKind) -> String {
    let titles = match kind {
        ContentKind::Idiom => IDIOM_TITLES,
        ContentKind::Expression => EXPRESSION_TITLES,
    };
    let title = titles.choose(&mut rand::rng()).copied().unwrap_or("");

    format!("**{title} {}**\n\n", formatted_date())
}

/// Long-form date in the audience's timezone, e.g. `Friday, August 7, 2026`.
fn formatted_date() -> String {
    Utc::now()
        .with_timezone(&Jakarta)
        .format("%A, %B %-d, %Y")
        .to_string()
}
