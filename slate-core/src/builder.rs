use std::path::{Path, PathBuf};

use crate::card::{CardSet, compose_cards};
use crate::config::{Config, SiteConfig};
use crate::content::Page;
use crate::nav::NavItem;
use crate::render::Renderer;
use crate::router::Router;
use crate::scanner::SiteContent;
use crate::site::Site;
use crate::style::StyleSheet;
use crate::template::{TemplateError, TemplateRenderer};
use crate::validate::{report, validate_pages};
use crate::viewport::Breakpoint;

#[derive(Debug)]
pub enum BuildError {
    UnknownCardPage(String),
    TemplateError(TemplateError),
}

impl From<TemplateError> for BuildError {
    fn from(err: TemplateError) -> Self {
        BuildError::TemplateError(err)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::UnknownCardPage(slug) => {
                write!(f, "Card set targets a page that does not exist: {}", slug)
            }
            BuildError::TemplateError(e) => write!(f, "Template error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

pub struct SiteBuilder {
    site: SiteConfig,
    styles: StyleSheet,
    theme_dir: Option<PathBuf>,
    pages: Vec<Page>,
    card_sets: Vec<CardSet>,
    dev_mode: bool,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            site: SiteConfig::default(),
            styles: StyleSheet::default(),
            theme_dir: None,
            pages: Vec::new(),
            card_sets: Vec::new(),
            dev_mode: false,
        }
    }

    // Configuration
    pub fn site_config(mut self, config: SiteConfig) -> Self {
        self.site = config;
        self
    }

    /// Site settings plus the `[styles]` table.
    pub fn config(self, config: &Config) -> Self {
        self.site_config(config.site.clone())
            .styles(StyleSheet::from_config(&config.styles))
    }

    pub fn breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.site.breakpoint = breakpoint;
        self
    }

    pub fn styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    pub fn theme_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.theme_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Include the live-reload and menu-control scripts served by the dev server.
    pub fn dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    // Content management
    pub fn add_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn add_pages(mut self, pages: Vec<Page>) -> Self {
        self.pages.extend(pages);
        self
    }

    pub fn add_card_set(mut self, card_set: CardSet) -> Self {
        self.card_sets.push(card_set);
        self
    }

    pub fn content(mut self, content: SiteContent) -> Self {
        self.pages.extend(content.pages);
        self.card_sets.extend(content.card_sets);
        self
    }

    // Build the site
    pub fn build(self) -> Result<Site, BuildError> {
        let mut pages = self.pages;

        for set in &self.card_sets {
            let page = pages
                .iter_mut()
                .find(|p| p.slug == set.page)
                .ok_or_else(|| BuildError::UnknownCardPage(set.page.clone()))?;
            page.content
                .extend(compose_cards(&set.records, &set.title_field));
        }

        let diagnostics = validate_pages(&pages);
        report(&diagnostics);

        let mut templates = match &self.theme_dir {
            Some(dir) => TemplateRenderer::with_theme(dir)?,
            None => TemplateRenderer::new()?,
        };
        templates.add_to_context("site", &self.site);
        templates.add_to_context("dev_mode", &self.dev_mode);

        let router = Router::new(pages);
        let navigation = navigation_items(router.pages());

        tracing::info!(
            pages = router.pages().len(),
            diagnostics = diagnostics.len(),
            "Site assembled"
        );

        Ok(Site::new(
            router,
            navigation,
            Renderer::with_styles(self.styles),
            templates,
            self.site,
            diagnostics,
        ))
    }
}

/// One nav item per routable page; later pages reusing a slug are skipped.
fn navigation_items(pages: &[Page]) -> Vec<NavItem> {
    let mut items: Vec<NavItem> = Vec::with_capacity(pages.len());
    for item in NavItem::from_pages(pages) {
        if !items.iter().any(|existing| existing.link == item.link) {
            items.push(item);
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Record;
    use crate::content::{BlockKind, ContentBlock};
    use crate::validate::Issue;

    #[test]
    fn test_card_sets_append_to_target_page() {
        let site = SiteBuilder::new()
            .add_page(Page::new("Movies", "/movies").with_content(vec![ContentBlock::heading(1, "Movies")]))
            .add_card_set(CardSet {
                page: "/movies".into(),
                title_field: "name".into(),
                records: vec![Record::new().field("name", "X").field("year", 1994)],
            })
            .build()
            .unwrap();

        let content = &site.pages()[0].content;
        assert_eq!(content.len(), 2);
        assert_eq!(
            content[1],
            ContentBlock::card(vec![ContentBlock::heading(2, "X"), ContentBlock::paragraph("Year: 1994")]).with_id(1)
        );
    }

    #[test]
    fn test_card_set_for_missing_page_fails() {
        let result = SiteBuilder::new()
            .add_card_set(CardSet {
                page: "/nowhere".into(),
                title_field: "name".into(),
                records: Vec::new(),
            })
            .build();
        assert!(matches!(result, Err(BuildError::UnknownCardPage(slug)) if slug == "/nowhere"));
    }

    #[test]
    fn test_diagnostics_do_not_fail_build() {
        let site = SiteBuilder::new()
            .add_page(Page::new("Home", "/").with_content(vec![ContentBlock::Unknown]))
            .build()
            .unwrap();
        assert_eq!(site.diagnostics()[0].issue, Issue::UnknownBlockType);
    }

    #[test]
    fn test_navigation_skips_duplicate_slugs() {
        let pages = vec![Page::new("Home", "/"), Page::new("Shadow", "/"), Page::new("About", "/about")];
        let items = navigation_items(&pages);
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Home", "About"]);
    }

    #[test]
    fn test_config_applies_styles_and_breakpoint() {
        let config: Config = toml::from_str(
            r#"
            [site]
            breakpoint = 1024
            [styles]
            heading = "color: white"
            "#,
        )
        .unwrap();

        let site = SiteBuilder::new().config(&config).build().unwrap();
        assert_eq!(site.breakpoint(), Breakpoint(1024));
        assert!(site.renderer().styles().rule(BlockKind::Heading).is_some());
    }
}
