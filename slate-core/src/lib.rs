pub mod builder;
pub mod card;
pub mod config;
pub mod content;
pub mod nav;
pub mod node;
pub mod render;
pub mod router;
pub mod sample;
pub mod scanner;
pub mod session;
pub mod site;
pub mod style;
pub mod template;
pub mod validate;
pub mod viewport;

// Re-export main types
pub use builder::{BuildError, SiteBuilder};
pub use card::{CardSet, Record, Scalar, compose_card};
pub use content::{BlockId, BlockKind, ContentBlock, Page};
pub use nav::{MenuAction, MenuState, NavItem, Navigation};
pub use node::{Element, Node};
pub use render::{Renderer, render_block, render_blocks};
pub use router::{Route, Router};
pub use scanner::{ContentScanner, ScanError, SiteContent};
pub use session::Session;
pub use site::{RenderError, RenderedPage, Site, ViewState};
pub use template::{TemplateError, TemplateRenderer};
pub use viewport::{Breakpoint, SimulatedViewport, ViewportObserver, ViewportSource};
