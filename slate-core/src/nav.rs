use serde::Serialize;

use crate::content::Page;
use crate::node::{Element, Node};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub text: String,
    pub link: String,
}

impl NavItem {
    pub fn from_pages(pages: &[Page]) -> Vec<NavItem> {
        pages
            .iter()
            .map(|page| NavItem {
                text: page.title.clone(),
                link: page.slug.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Toggle,
    Close,
}

impl MenuAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAction::Toggle => "toggle-menu",
            MenuAction::Close => "close-menu",
        }
    }
}

/// Open/closed state of the collapsible menu. Starts closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn open() -> Self {
        Self { open: true }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn apply(&mut self, action: MenuAction) {
        self.open = match action {
            MenuAction::Toggle => !self.open,
            MenuAction::Close => false,
        };
    }
}

/// Navigation bar listing every page, inline on wide viewports and behind a
/// hamburger toggle on narrow ones.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    items: Vec<NavItem>,
    current: Option<String>,
    prerender_menu: bool,
}

impl Navigation {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self {
            items,
            current: None,
            prerender_menu: false,
        }
    }

    /// Mark the link whose target equals `path` as the current page.
    pub fn current(mut self, path: impl Into<String>) -> Self {
        self.current = Some(path.into());
        self
    }

    /// Emit the menu overlay even while closed, marked `hidden`, so a page
    /// without a server behind it can open the menu client-side.
    pub fn prerender_menu(mut self, enabled: bool) -> Self {
        self.prerender_menu = enabled;
        self
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Exactly one of the two layouts is emitted for any input.
    pub fn render(&self, narrow: bool, menu: &MenuState) -> Node {
        let body = if narrow {
            self.render_collapsible(menu)
        } else {
            self.render_inline()
        };

        Element::new("nav").class("navbar").child(body).into()
    }

    fn render_inline(&self) -> Element {
        Element::new("ul").class("navbar-nav").children(
            self.items
                .iter()
                .map(|item| Element::new("li").class("nav-item").child(self.link(item)).into()),
        )
    }

    fn render_collapsible(&self, menu: &MenuState) -> Element {
        let toggle = Element::new("button")
            .class("navbar-toggler")
            .attr("type", "button")
            .attr("data-action", MenuAction::Toggle.as_str())
            .attr("aria-expanded", menu.is_open().to_string())
            .attr("aria-label", "Toggle navigation")
            .child(Element::new("span").class("navbar-toggler-icon").text("\u{2630}"));

        let hamburger = Element::new("div").class("hamburger").child(toggle);
        if !menu.is_open() && !self.prerender_menu {
            return hamburger;
        }

        let close = Element::new("button")
            .class("close")
            .attr("type", "button")
            .attr("data-action", MenuAction::Close.as_str())
            .attr("aria-label", "Close navigation");

        let links = Element::new("ul").children(
            self.items
                .iter()
                .map(|item| Element::new("li").child(self.link(item)).into()),
        );

        let overlay = Element::new("div")
            .class("menu-overlay")
            .child(Element::new("div").class("menu").child(close).child(links));
        let overlay = if menu.is_open() {
            overlay
        } else {
            overlay.attr("hidden", "")
        };

        hamburger.child(overlay)
    }

    fn link(&self, item: &NavItem) -> Element {
        let link = Element::new("a").attr("href", &item.link).text(&item.text);
        if self.current.as_deref() == Some(item.link.as_str()) {
            link.attr("aria-current", "page")
        } else {
            link
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigation() -> Navigation {
        Navigation::new(vec![
            NavItem {
                text: "Homepage".into(),
                link: "/".into(),
            },
            NavItem {
                text: "About Us".into(),
                link: "/about".into(),
            },
        ])
    }

    fn layouts(node: &Node) -> (usize, usize) {
        (
            node.find_by_class("navbar-nav").len(),
            node.find_by_class("hamburger").len(),
        )
    }

    #[test]
    fn test_exactly_one_layout_for_every_state() {
        let nav = navigation();
        for narrow in [false, true] {
            for menu in [MenuState::default(), MenuState::open()] {
                let (inline, collapsible) = layouts(&nav.render(narrow, &menu));
                assert_eq!(inline + collapsible, 1, "narrow={narrow} menu={menu:?}");
                assert_eq!(collapsible == 1, narrow);
            }
        }
    }

    #[test]
    fn test_wide_lists_every_page_inline() {
        let node = navigation().render(false, &MenuState::default());
        let items = node.find_by_class("nav-item");
        assert_eq!(items.len(), 2);

        let hrefs: Vec<&str> = node.find_by_tag("a").iter().filter_map(|a| a.get_attr("href")).collect();
        assert_eq!(hrefs, vec!["/", "/about"]);
    }

    #[test]
    fn test_closed_menu_shows_only_toggle() {
        let node = navigation().render(true, &MenuState::default());
        assert_eq!(node.find_by_class("navbar-toggler").len(), 1);
        assert!(node.find_by_class("menu-overlay").is_empty());
        assert!(node.find_by_tag("a").is_empty());
    }

    #[test]
    fn test_open_menu_shows_overlay_with_links() {
        let node = navigation().render(true, &MenuState::open());
        assert_eq!(node.find_by_class("menu-overlay").len(), 1);
        assert_eq!(node.find_by_class("close").len(), 1);
        assert_eq!(node.find_by_tag("a").len(), 2);
        assert_eq!(
            node.find_by_class("navbar-toggler")[0].get_attr("aria-expanded"),
            Some("true")
        );
    }

    #[test]
    fn test_prerendered_menu_is_hidden_until_opened() {
        let nav = navigation().prerender_menu(true);

        let closed = nav.render(true, &MenuState::default());
        let overlay = closed.find_by_class("menu-overlay");
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay[0].get_attr("hidden"), Some(""));
        assert_eq!(closed.find_by_tag("a").len(), 2);

        let open = nav.render(true, &MenuState::open());
        assert_eq!(open.find_by_class("menu-overlay")[0].get_attr("hidden"), None);

        let wide = nav.render(false, &MenuState::default());
        assert!(wide.find_by_class("menu-overlay").is_empty());
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let mut menu = MenuState::default();
        assert!(!menu.is_open());

        menu.apply(MenuAction::Toggle);
        assert!(menu.is_open());
        menu.apply(MenuAction::Toggle);
        assert!(!menu.is_open());

        menu.apply(MenuAction::Toggle);
        menu.apply(MenuAction::Close);
        assert!(!menu.is_open());
        menu.apply(MenuAction::Close);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_current_page_is_marked() {
        let node = navigation().current("/about").render(false, &MenuState::default());
        let current: Vec<&str> = node
            .find_all(&|el| el.get_attr("aria-current") == Some("page"))
            .iter()
            .filter_map(|a| a.get_attr("href"))
            .collect();
        assert_eq!(current, vec!["/about"]);
    }

    #[test]
    fn test_items_follow_page_order() {
        let pages = vec![Page::new("Homepage", "/"), Page::new("Our Services", "/our-services")];
        let items = NavItem::from_pages(&pages);
        assert_eq!(items[1].text, "Our Services");
        assert_eq!(items[1].link, "/our-services");
    }
}
