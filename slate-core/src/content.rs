use std::fmt;

use serde::{Deserialize, Serialize};

/// DOM identity hint for a block or page. Sample content mixes integers and
/// strings, and ids repeat across pages, so this is never used as a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BlockId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Number(n) => write!(f, "{}", n),
            BlockId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for BlockId {
    fn from(value: i64) -> Self {
        BlockId::Number(value)
    }
}

impl From<i32> for BlockId {
    fn from(value: i32) -> Self {
        BlockId::Number(value.into())
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        BlockId::Text(value.to_string())
    }
}

/// One unit of page content, discriminated by its `type` tag.
///
/// Adding a kind means adding a variant here and an arm in
/// [`crate::render::Renderer::render`]. Tags outside the known set land in
/// [`ContentBlock::Unknown`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Heading {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<BlockId>,
        level: i64,
        content: String,
    },
    #[serde(alias = "text")]
    Paragraph {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<BlockId>,
        content: String,
    },
    Quote {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<BlockId>,
        content: String,
        author: String,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<BlockId>,
        src: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Link {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<BlockId>,
        href: String,
        content: String,
    },
    List {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<BlockId>,
        #[serde(default)]
        ordered: bool,
        items: Vec<String>,
    },
    Card {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<BlockId>,
        items: Vec<ContentBlock>,
    },
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    pub fn heading(level: i64, content: impl Into<String>) -> Self {
        ContentBlock::Heading {
            id: None,
            level,
            content: content.into(),
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        ContentBlock::Paragraph {
            id: None,
            content: content.into(),
        }
    }

    pub fn link(href: impl Into<String>, content: impl Into<String>) -> Self {
        ContentBlock::Link {
            id: None,
            href: href.into(),
            content: content.into(),
        }
    }

    pub fn list<I, S>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentBlock::List {
            id: None,
            ordered,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn card(items: Vec<ContentBlock>) -> Self {
        ContentBlock::Card { id: None, items }
    }

    /// Attach an id, replacing any existing one. No-op for unknown blocks.
    pub fn with_id(mut self, new_id: impl Into<BlockId>) -> Self {
        if let Some(slot) = self.id_slot() {
            *slot = Some(new_id.into());
        }
        self
    }

    pub fn id(&self) -> Option<&BlockId> {
        match self {
            ContentBlock::Heading { id, .. }
            | ContentBlock::Paragraph { id, .. }
            | ContentBlock::Quote { id, .. }
            | ContentBlock::Image { id, .. }
            | ContentBlock::Link { id, .. }
            | ContentBlock::List { id, .. }
            | ContentBlock::Card { id, .. } => id.as_ref(),
            ContentBlock::Unknown => None,
        }
    }

    fn id_slot(&mut self) -> Option<&mut Option<BlockId>> {
        match self {
            ContentBlock::Heading { id, .. }
            | ContentBlock::Paragraph { id, .. }
            | ContentBlock::Quote { id, .. }
            | ContentBlock::Image { id, .. }
            | ContentBlock::Link { id, .. }
            | ContentBlock::List { id, .. }
            | ContentBlock::Card { id, .. } => Some(id),
            ContentBlock::Unknown => None,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Heading { .. } => BlockKind::Heading,
            ContentBlock::Paragraph { .. } => BlockKind::Paragraph,
            ContentBlock::Quote { .. } => BlockKind::Quote,
            ContentBlock::Image { .. } => BlockKind::Image,
            ContentBlock::Link { .. } => BlockKind::Link,
            ContentBlock::List { .. } => BlockKind::List,
            ContentBlock::Card { .. } => BlockKind::Card,
            ContentBlock::Unknown => BlockKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    Heading,
    Paragraph,
    Quote,
    Image,
    Link,
    List,
    Card,
    Unknown,
}

impl BlockKind {
    pub const KNOWN: [BlockKind; 7] = [
        BlockKind::Heading,
        BlockKind::Paragraph,
        BlockKind::Quote,
        BlockKind::Image,
        BlockKind::Link,
        BlockKind::List,
        BlockKind::Card,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Quote => "quote",
            BlockKind::Image => "image",
            BlockKind::Link => "link",
            BlockKind::List => "list",
            BlockKind::Card => "card",
            BlockKind::Unknown => "unknown",
        }
    }

    /// Parse a block tag. `text` maps to paragraph, as it does in content files.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(BlockKind::Paragraph),
            _ => Self::KNOWN.into_iter().find(|k| k.as_str() == tag),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A routable page. Pages are assembled once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlockId>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl Page {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            slug: slug.into(),
            content: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: Vec<ContentBlock>) -> Self {
        self.content = content;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_every_block_kind() {
        let json = r#"[
            {"id": 1, "type": "heading", "level": 1, "content": "Welcome"},
            {"id": 2, "type": "paragraph", "content": "Body"},
            {"id": 3, "type": "quote", "content": "Said", "author": "John Doe"},
            {"id": 4, "type": "image", "src": "a.jpg", "alt": "A", "caption": "Cap"},
            {"id": 5, "type": "link", "href": "https://example.com", "content": "Visit"},
            {"id": 6, "type": "list", "ordered": true, "items": ["a", "b"]},
            {"id": 7, "type": "card", "items": [{"type": "heading", "level": 2, "content": "T"}]}
        ]"#;

        let blocks: Vec<ContentBlock> = serde_json::from_str(json).unwrap();
        let kinds: Vec<BlockKind> = blocks.iter().map(ContentBlock::kind).collect();
        assert_eq!(kinds, BlockKind::KNOWN.to_vec());
        assert_eq!(blocks[6].id(), Some(&BlockId::Number(7)));
    }

    #[test]
    fn test_text_tag_is_a_paragraph() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"type": "text", "content": "Hi"}"#).unwrap();
        assert_eq!(block, ContentBlock::paragraph("Hi"));
    }

    #[test]
    fn test_unrecognized_tag_becomes_unknown() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"type": "video", "src": "clip.mp4"}"#).unwrap();
        assert_eq!(block, ContentBlock::Unknown);
        assert_eq!(block.id(), None);
    }

    #[test]
    fn test_ids_can_be_strings_or_missing() {
        let page: Page = serde_json::from_str(
            r#"{"id": "our-services", "title": "Our Services", "slug": "/our-services",
                "content": [{"type": "paragraph", "content": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(page.id, Some(BlockId::from("our-services")));
        assert_eq!(page.content[0].id(), None);
    }

    #[test]
    fn test_list_defaults_to_unordered() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"type": "list", "items": ["x"]}"#).unwrap();
        assert_eq!(block, ContentBlock::list(false, ["x"]));
    }

    #[test]
    fn test_block_kind_from_tag() {
        assert_eq!(BlockKind::from_tag("heading"), Some(BlockKind::Heading));
        assert_eq!(BlockKind::from_tag("text"), Some(BlockKind::Paragraph));
        assert_eq!(BlockKind::from_tag("unknown"), None);
        assert_eq!(BlockKind::from_tag("video"), None);
    }

    #[test]
    fn test_with_id_on_unknown_is_noop() {
        assert_eq!(ContentBlock::Unknown.with_id(3), ContentBlock::Unknown);
        assert_eq!(
            ContentBlock::paragraph("x").with_id(3).id(),
            Some(&BlockId::Number(3))
        );
    }
}
