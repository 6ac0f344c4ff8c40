//! Construction-time checks on page content.
//!
//! Nothing here rejects content. Problems are reported as diagnostics and
//! rendering proceeds with its usual fallbacks (clamped headings, skipped
//! unknown blocks, first-registered slug wins).

use std::collections::HashSet;
use std::fmt;

use crate::content::{BlockId, ContentBlock, Page};
use crate::render::{MAX_HEADING_LEVEL, MIN_HEADING_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HeadingLevelOutOfRange(i64),
    EmptyLinkTarget,
    EmptyImageSource,
    UnknownBlockType,
    DuplicateSlug,
    SlugWithoutLeadingSlash,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::HeadingLevelOutOfRange(level) => write!(
                f,
                "heading level {} is outside {}..={} and will be clamped",
                level, MIN_HEADING_LEVEL, MAX_HEADING_LEVEL
            ),
            Issue::EmptyLinkTarget => write!(f, "link has an empty href"),
            Issue::EmptyImageSource => write!(f, "image has an empty src"),
            Issue::UnknownBlockType => write!(f, "block type is not recognized and will not render"),
            Issue::DuplicateSlug => write!(f, "slug is already registered by an earlier page"),
            Issue::SlugWithoutLeadingSlash => write!(f, "slug does not start with '/'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub slug: String,
    /// Position of the block within its page, with card nesting as extra
    /// indexes. Empty for page-level issues.
    pub path: Vec<usize>,
    pub block_id: Option<BlockId>,
    pub issue: Issue,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}", self.slug)?;
        if !self.path.is_empty() {
            let path: Vec<String> = self.path.iter().map(ToString::to_string).collect();
            write!(f, ", block {}", path.join("."))?;
        }
        if let Some(id) = &self.block_id {
            write!(f, " (id {})", id)?;
        }
        write!(f, ": {}", self.issue)
    }
}

pub fn validate_pages(pages: &[Page]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen = HashSet::new();

    for page in pages {
        if !page.slug.starts_with('/') {
            diagnostics.push(page_diagnostic(page, Issue::SlugWithoutLeadingSlash));
        }
        if !seen.insert(page.slug.as_str()) {
            diagnostics.push(page_diagnostic(page, Issue::DuplicateSlug));
        }

        let mut path = Vec::new();
        validate_blocks(&page.slug, &page.content, &mut path, &mut diagnostics);
    }

    diagnostics
}

fn page_diagnostic(page: &Page, issue: Issue) -> Diagnostic {
    Diagnostic {
        slug: page.slug.clone(),
        path: Vec::new(),
        block_id: None,
        issue,
    }
}

fn validate_blocks(
    slug: &str,
    blocks: &[ContentBlock],
    path: &mut Vec<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (index, block) in blocks.iter().enumerate() {
        path.push(index);

        let issue = match block {
            ContentBlock::Heading { level, .. }
                if !(MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(level) =>
            {
                Some(Issue::HeadingLevelOutOfRange(*level))
            }
            ContentBlock::Link { href, .. } if href.trim().is_empty() => {
                Some(Issue::EmptyLinkTarget)
            }
            ContentBlock::Image { src, .. } if src.trim().is_empty() => {
                Some(Issue::EmptyImageSource)
            }
            ContentBlock::Unknown => Some(Issue::UnknownBlockType),
            ContentBlock::Card { items, .. } => {
                validate_blocks(slug, items, path, diagnostics);
                None
            }
            _ => None,
        };

        if let Some(issue) = issue {
            diagnostics.push(Diagnostic {
                slug: slug.to_string(),
                path: path.clone(),
                block_id: block.id().cloned(),
                issue,
            });
        }

        path.pop();
    }
}

/// Log every diagnostic as a warning.
pub fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        tracing::warn!(
            slug = %diagnostic.slug,
            issue = %diagnostic.issue,
            "{}",
            diagnostic
        );
    }
}
