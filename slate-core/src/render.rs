use crate::content::{BlockId, ContentBlock};
use crate::node::{Element, Node, render_nodes_to_html};
use crate::style::StyleSheet;

pub const MIN_HEADING_LEVEL: i64 = 1;
pub const MAX_HEADING_LEVEL: i64 = 6;

pub fn clamp_heading_level(level: i64) -> i64 {
    level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL)
}

/// Maps content blocks to nodes. The default renderer is unstyled.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    styles: StyleSheet,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_styles(styles: StyleSheet) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Render a single block. Unrecognized blocks render as nothing.
    pub fn render(&self, block: &ContentBlock) -> Option<Node> {
        let kind = block.kind();
        let mut element = match block {
            ContentBlock::Heading { id, level, content } => {
                Element::new(format!("h{}", clamp_heading_level(*level)))
                    .attr_opt("id", id.as_ref())
                    .text(content)
            }
            ContentBlock::Paragraph { id, content } => {
                Element::new("p").attr_opt("id", id.as_ref()).text(content)
            }
            ContentBlock::Quote {
                id,
                content,
                author,
            } => Element::new("div")
                .attr_opt("id", id.as_ref())
                .class("quote")
                .child(Element::new("p").class("quote-text").text(content))
                .child(Element::new("p").class("quote-author").text(author)),
            ContentBlock::Image {
                id,
                src,
                alt,
                caption,
            } => render_image(id.as_ref(), src, alt, caption.as_deref()),
            ContentBlock::Link { id, href, content } => Element::new("a")
                .attr_opt("id", id.as_ref())
                .attr("href", href)
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .attr("referrerpolicy", "origin")
                .text(content),
            ContentBlock::List { id, ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                Element::new(tag)
                    .attr_opt("id", id.as_ref())
                    .children(items.iter().enumerate().map(|(index, item)| {
                        Element::new("li")
                            .attr("data-index", index.to_string())
                            .text(item)
                            .into()
                    }))
            }
            ContentBlock::Card { id, items } => Element::new("section")
                .attr_opt("id", id.as_ref())
                .class("card")
                .children(self.render_blocks(items)),
            ContentBlock::Unknown => {
                tracing::debug!("Skipping content block with unrecognized type");
                return None;
            }
        };

        self.styles.apply(kind, &mut element);
        Some(element.into())
    }

    /// Render blocks in order, omitting the ones that render as nothing.
    pub fn render_blocks(&self, blocks: &[ContentBlock]) -> Vec<Node> {
        blocks.iter().filter_map(|block| self.render(block)).collect()
    }
}

fn render_image(id: Option<&BlockId>, src: &str, alt: &str, caption: Option<&str>) -> Element {
    let img = Element::new("img").attr("src", src).attr("alt", alt);

    match caption {
        Some(caption) if !caption.is_empty() => Element::new("figure")
            .attr_opt("id", id)
            .child(img)
            .child(Element::new("figcaption").text(caption)),
        _ => img.attr_opt("id", id),
    }
}

pub fn render_block(block: &ContentBlock) -> Option<Node> {
    Renderer::new().render(block)
}

pub fn render_blocks(blocks: &[ContentBlock]) -> Vec<Node> {
    Renderer::new().render_blocks(blocks)
}

pub fn render_blocks_to_html(blocks: &[ContentBlock]) -> String {
    render_nodes_to_html(&render_blocks(blocks))
}
