use serde::{Deserialize, Serialize};

/// The two kinds of content the service delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Idiom,
    Expression,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Idiom => "idiom",
            ContentKind::Expression => "expression",
        }
    }
}

/// An English idiom with its meaning and example usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idiom {
    /// Stable catalog identifier, when the item came from a catalog store.
    pub id: Option<String>,
    pub phrase: String,
    pub meaning: String,
    pub examples: String,
}

/// A colloquial Indonesian expression with its English equivalent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    /// Stable catalog identifier, when the item came from a catalog store.
    pub id: Option<String>,
    pub indonesian: String,
    pub english: String,
    pub examples: String,
    pub alt_phrases: Option<String>,
}

/// A single piece of deliverable content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Idiom(Idiom),
    Expression(Expression),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Idiom(_) => ContentKind::Idiom,
            ContentItem::Expression(_) => ContentKind::Expression,
        }
    }

    /// The field that identifies this item for deduplication.
    pub fn primary_text(&self) -> &str {
        match self {
            ContentItem::Idiom(idiom) => &idiom.phrase,
            ContentItem::Expression(expression) => &expression.indonesian,
        }
    }

    /// The translation/meaning field, used by the similarity rule.
    pub fn secondary_text(&self) -> &str {
        match self {
            ContentItem::Idiom(idiom) => &idiom.meaning,
            ContentItem::Expression(expression) => &expression.english,
        }
    }

    /// Catalog identifier, if the item is backed by a catalog record.
    pub fn id(&self) -> Option<&str> {
        match self {
            ContentItem::Idiom(idiom) => idiom.id.as_deref(),
            ContentItem::Expression(expression) => expression.id.as_deref(),
        }
    }
}
