use std::rc::Rc;

use crate::nav::{MenuAction, MenuState};
use crate::node::Node;
use crate::site::{Site, ViewState};
use crate::viewport::{ViewportObserver, ViewportSource};

/// One mounted view of a site for an event-driven host.
///
/// Route changes, menu actions and viewport resizes each update a single
/// piece of state; [`Session::render`] always reflects the latest of each.
/// Dropping the session releases its viewport subscription.
pub struct Session<'a, S: ViewportSource> {
    site: &'a Site,
    viewport: ViewportObserver<S>,
    menu: MenuState,
    path: String,
}

impl<'a, S: ViewportSource> Session<'a, S> {
    pub fn mount(site: &'a Site, source: Rc<S>, path: impl Into<String>) -> Self {
        Self {
            site,
            viewport: ViewportObserver::mount(source, site.breakpoint()),
            menu: MenuState::default(),
            path: path.into(),
        }
    }

    pub fn navigate(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn apply(&mut self, action: MenuAction) {
        self.menu.apply(action);
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_narrow(&self) -> bool {
        self.viewport.is_narrow()
    }

    pub fn viewport(&self) -> &ViewportObserver<S> {
        &self.viewport
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            narrow: self.viewport.is_narrow(),
            menu: self.menu,
        }
    }

    pub fn render(&self) -> Node {
        self.site.render_view(&self.path, &self.view_state())
    }
}
