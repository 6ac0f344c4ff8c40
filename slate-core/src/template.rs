use std::path::Path;
use serde::Serialize;
use tera::{Context, Tera};

pub const LAYOUT_TEMPLATE: &str = "layout.html";

const DEFAULT_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ page_title }} | {{ site.title }}</title>
<link rel="stylesheet" href="{{ site.stylesheet }}">
</head>
<body>
{{ body | safe }}
<script>
(function() {
    document.addEventListener('click', function(event) {
        const control = event.target.closest('[data-action]');
        if (!control) {
            return;
        }
        const opening = control.dataset.action === 'toggle-menu'
            && control.getAttribute('aria-expanded') !== 'true';

        const overlay = document.querySelector('.menu-overlay');
        if (overlay) {
            overlay.hidden = !opening;
            document.querySelectorAll('.navbar-toggler').forEach(function(toggler) {
                toggler.setAttribute('aria-expanded', String(opening));
            });
            return;
        }
{%- if dev_mode %}
        const params = new URLSearchParams(location.search);
        params.set('width', window.innerWidth);
        params.set('menu', opening ? 'open' : 'closed');
        location.search = params.toString();
{%- endif %}
    });
{%- if dev_mode %}

    const breakpoint = {{ site.breakpoint }};
    function syncViewport() {
        const renderedNarrow = document.querySelector('.hamburger') !== null;
        if ((window.innerWidth < breakpoint) !== renderedNarrow) {
            const params = new URLSearchParams(location.search);
            params.set('width', window.innerWidth);
            params.delete('menu');
            location.search = params.toString();
        }
    }
    window.addEventListener('resize', syncViewport);
    syncViewport();

    const socket = new WebSocket('ws://' + location.host + '/__livereload');
    socket.onmessage = function(event) {
        if (event.data === 'reload') {
            location.reload();
        }
    };
{%- endif %}
})();
</script>
</body>
</html>
"#;

#[derive(Debug)]
pub enum TemplateError {
    TeraError(tera::Error),
    IoError(std::io::Error),
}

impl From<tera::Error> for TemplateError {
    fn from(err: tera::Error) -> Self {
        TemplateError::TeraError(err)
    }
}

impl From<std::io::Error> for TemplateError {
    fn from(err: std::io::Error) -> Self {
        TemplateError::IoError(err)
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::TeraError(e) => write!(f, "Template error: {}", e),
            TemplateError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for TemplateError {}

/// Wraps rendered page bodies in the document layout.
pub struct TemplateRenderer {
    tera: Tera,
    context: Context,
}

impl TemplateRenderer {
    /// Use the built-in layout.
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(LAYOUT_TEMPLATE, DEFAULT_LAYOUT)?;

        Ok(Self {
            tera,
            context: Context::new(),
        })
    }

    /// Load every `.html` template from a theme directory. A theme without its
    /// own `layout.html` falls back to the built-in one.
    pub fn with_theme(theme_dir: &Path) -> Result<Self, TemplateError> {
        if !theme_dir.is_dir() {
            return Err(TemplateError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("theme directory not found: {}", theme_dir.display()),
            )));
        }

        let glob = theme_dir.join("**").join("*.html");
        let mut tera = Tera::new(&glob.to_string_lossy())?;
        if !tera.get_template_names().any(|name| name == LAYOUT_TEMPLATE) {
            tera.add_raw_template(LAYOUT_TEMPLATE, DEFAULT_LAYOUT)?;
        }

        Ok(Self {
            tera,
            context: Context::new(),
        })
    }

    /// Add a value shared by every render
    pub fn add_to_context<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.context.insert(key, value);
    }

    /// Render a template with the shared context extended by `context`
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String, TemplateError> {
        let mut full = self.context.clone();
        full.extend(context.clone());
        Ok(self.tera.render(template, &full)?)
    }

    pub fn render_layout(&self, context: &Context) -> Result<String, TemplateError> {
        self.render_with_context(LAYOUT_TEMPLATE, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_context(title: &str, body: &str) -> Context {
        let mut context = Context::new();
        context.insert("page_title", title);
        context.insert("body", body);
        context.insert("dev_mode", &false);
        context
    }

    fn site() -> crate::config::SiteConfig {
        crate::config::SiteConfig::default()
    }

    #[test]
    fn test_builtin_layout_wraps_body() {
        let mut renderer = TemplateRenderer::new().unwrap();
        renderer.add_to_context("site", &site());

        let html = renderer.render_layout(&page_context("About Us", "<h1>About Us</h1>")).unwrap();
        assert!(html.contains("<title>About Us | Slate</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"&#x2F;styles.css\">"));
        assert!(html.contains("<h1>About Us</h1>"));
        assert!(!html.contains("__livereload"));
        assert!(html.contains("overlay.hidden = !opening"));
    }

    #[test]
    fn test_dev_scripts_are_optional() {
        let mut renderer = TemplateRenderer::new().unwrap();
        renderer.add_to_context("site", &site());

        let mut context = page_context("Home", "");
        context.insert("dev_mode", &true);
        let html = renderer.render_layout(&context).unwrap();
        assert!(html.contains("__livereload"));
        assert!(html.contains("const breakpoint = 768;"));
        assert!(html.contains("addEventListener('resize', syncViewport)"));
    }

    #[test]
    fn test_theme_layout_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("layout.html"), "<main>{{ body | safe }}</main>").unwrap();

        let renderer = TemplateRenderer::with_theme(dir.path()).unwrap();
        let html = renderer.render_layout(&page_context("Home", "<p>x</p>")).unwrap();
        assert_eq!(html, "<main><p>x</p></main>");
    }

    #[test]
    fn test_missing_theme_dir_is_io_error() {
        let result = TemplateRenderer::with_theme(Path::new("/no/such/theme"));
        assert!(matches!(result, Err(TemplateError::IoError(_))));
    }
}
