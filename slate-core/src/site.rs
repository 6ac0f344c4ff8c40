use std::path::{Component, Path, PathBuf};

use tera::Context;

use crate::config::SiteConfig;
use crate::content::Page;
use crate::nav::{MenuState, NavItem, Navigation};
use crate::node::{Element, Node};
use crate::render::Renderer;
use crate::router::{Route, Router, render_route};
use crate::template::{TemplateError, TemplateRenderer};
use crate::validate::Diagnostic;
use crate::viewport::Breakpoint;

/// Default stylesheet for the structural classes the renderer emits.
pub const STYLESHEET: &str = include_str!("../assets/styles.css");

#[derive(Debug)]
pub enum RenderError {
    TemplateError(TemplateError),
    IoError(std::io::Error),
}

impl From<TemplateError> for RenderError {
    fn from(err: TemplateError) -> Self {
        RenderError::TemplateError(err)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::TemplateError(e) => write!(f, "Template error: {}", e),
            RenderError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

/// The UI inputs that are not page content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub narrow: bool,
    pub menu: MenuState,
}

impl ViewState {
    pub fn for_width(width: u32, breakpoint: Breakpoint) -> Self {
        Self {
            narrow: breakpoint.is_narrow(width),
            menu: MenuState::default(),
        }
    }

    pub fn with_menu(mut self, menu: MenuState) -> Self {
        self.menu = menu;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub found: bool,
    pub html: String,
}

pub struct Site {
    router: Router,
    navigation: Vec<NavItem>,
    renderer: Renderer,
    templates: TemplateRenderer,
    config: SiteConfig,
    diagnostics: Vec<Diagnostic>,
}

impl Site {
    pub(crate) fn new(
        router: Router,
        navigation: Vec<NavItem>,
        renderer: Renderer,
        templates: TemplateRenderer,
        config: SiteConfig,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            router,
            navigation,
            renderer,
            templates,
            config,
            diagnostics,
        }
    }

    pub fn pages(&self) -> &[Page] {
        self.router.pages()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.config.breakpoint
    }

    /// Construction-time content problems; the site renders regardless.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn navigation(&self, current: &str) -> Navigation {
        Navigation::new(self.navigation.clone()).current(current)
    }

    /// The whole app view for `path`: navigation above the routed page.
    pub fn render_view(&self, path: &str, view: &ViewState) -> Node {
        self.render_route_view(&self.router.resolve(path), view, false)
    }

    /// `static_output` pre-renders the closed menu for pages served without
    /// a live server to re-render them.
    fn render_route_view(&self, route: &Route<'_>, view: &ViewState, static_output: bool) -> Node {
        let current = match route {
            Route::Page(page) => page.slug.as_str(),
            Route::NotFound(_) => "",
        };

        Element::new("div")
            .class("app")
            .child(
                self.navigation(current)
                    .prerender_menu(static_output)
                    .render(view.narrow, &view.menu),
            )
            .child(Element::new("main").child(render_route(route, &self.renderer)))
            .into()
    }

    pub fn render_document(&self, path: &str, view: &ViewState) -> Result<RenderedPage, RenderError> {
        self.render_route_document(&self.router.resolve(path), view, false)
    }

    fn render_route_document(
        &self,
        route: &Route<'_>,
        view: &ViewState,
        static_output: bool,
    ) -> Result<RenderedPage, RenderError> {
        let body = self.render_route_view(route, view, static_output).to_html();

        let mut context = Context::new();
        context.insert("page_title", route.title());
        context.insert("body", &body);
        let html = self.templates.render_layout(&context)?;

        Ok(RenderedPage {
            title: route.title().to_string(),
            found: route.is_found(),
            html,
        })
    }

    /// Write every page, a generic `404.html` and the stylesheet under `out_dir`.
    pub fn render_all(&self, out_dir: &Path, view: &ViewState) -> Result<(), RenderError> {
        std::fs::create_dir_all(out_dir)?;

        for page in self.pages() {
            let Some(out_path) = page_out_path(&page.slug) else {
                tracing::warn!(slug = %page.slug, "Skipping page whose slug cannot be a file path");
                continue;
            };

            // Shadowed duplicates would overwrite the page that owns the route.
            if !matches!(self.router.resolve(&page.slug), Route::Page(owner) if std::ptr::eq(owner, page)) {
                continue;
            }

            let rendered = self.render_route_document(&Route::Page(page), view, true)?;
            write_file(&out_dir.join(out_path), &rendered.html)?;
            tracing::debug!(slug = %page.slug, "Rendered page");
        }

        let not_found = self.render_route_document(&Route::NotFound(""), view, true)?;
        write_file(&out_dir.join("404.html"), &not_found.html)?;
        write_file(&out_dir.join("styles.css"), STYLESHEET)?;

        Ok(())
    }
}

/// Output file for a slug: `/` maps to `index.html`, `/a/b` to
/// `a/b/index.html`. Slugs that would escape the output directory map to
/// nothing.
pub fn page_out_path(slug: &str) -> Option<PathBuf> {
    let relative = Path::new(slug.trim_start_matches('/'));
    let mut out = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(out.join("index.html"))
}

fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
