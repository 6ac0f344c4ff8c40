use std::collections::HashMap;

use crate::content::Page;
use crate::node::{Element, Node};
use crate::render::Renderer;

pub const NOT_FOUND_TITLE: &str = "Page not found";

#[derive(Debug, PartialEq)]
pub enum Route<'a> {
    Page(&'a Page),
    NotFound(&'a str),
}

impl Route<'_> {
    pub fn is_found(&self) -> bool {
        matches!(self, Route::Page(_))
    }

    pub fn title(&self) -> &str {
        match self {
            Route::Page(page) => &page.title,
            Route::NotFound(_) => NOT_FOUND_TITLE,
        }
    }
}

/// Exact-match mapping from slug to page.
#[derive(Debug, Clone, Default)]
pub struct Router {
    pages: Vec<Page>,
    routes: HashMap<String, usize>,
}

impl Router {
    /// Register every page by slug. When slugs repeat the first page wins.
    pub fn new(pages: Vec<Page>) -> Self {
        let mut routes = HashMap::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            routes.entry(page.slug.clone()).or_insert(index);
        }
        Self { pages, routes }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn resolve<'a>(&'a self, path: &'a str) -> Route<'a> {
        match self.routes.get(path) {
            Some(&index) => Route::Page(&self.pages[index]),
            None => Route::NotFound(path),
        }
    }

    /// Render the page at `path`: its title as a top-level heading followed by
    /// its content. Unregistered paths render the not-found state.
    pub fn render(&self, path: &str, renderer: &Renderer) -> Node {
        render_route(&self.resolve(path), renderer)
    }
}

pub fn render_route(route: &Route<'_>, renderer: &Renderer) -> Node {
    match route {
        Route::Page(page) => {
            let mut nodes = Vec::with_capacity(page.content.len() + 1);
            nodes.push(Element::new("h1").text(&page.title).into());
            nodes.extend(renderer.render_blocks(&page.content));
            Node::Fragment(nodes)
        }
        Route::NotFound(path) => {
            tracing::debug!(path = %path, "No page registered for path");
            let message = Element::new("p").class("not-found");
            // An empty path is the generic page served for any miss.
            let message = if path.is_empty() {
                message.text("The requested page does not exist.")
            } else {
                message
                    .text("No page is registered at ")
                    .child(Element::new("code").text(*path))
                    .text(".")
            };
            Node::Fragment(vec![Element::new("h1").text(NOT_FOUND_TITLE).into(), message.into()])
        }
    }
}
