use anyhow::Result;
use axum::{
    Router,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use serde::Deserialize;
use slate_core::{Breakpoint, MenuState, Site, ViewState, site::STYLESHEET};
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::{RwLock, broadcast};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Client hint carrying the viewport width in CSS pixels.
pub const VIEWPORT_WIDTH_HEADER: &str = "sec-ch-viewport-width";

/// Rebuilds the site from its sources. Called once at startup and again after
/// every watched change.
pub type SiteLoader = Arc<dyn Fn() -> Result<Site> + Send + Sync>;

/// Configuration for the development server
#[derive(Debug, Clone)]
pub struct LiveServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to serve on
    pub port: u16,
    /// Auto-open browser
    pub open: bool,
    /// Files and directories whose changes trigger a rebuild
    pub watch: Vec<PathBuf>,
    /// Directory served under `/assets`
    pub assets: Option<PathBuf>,
}

impl Default for LiveServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            open: false,
            watch: vec![],
            assets: None,
        }
    }
}

/// Serves pages straight from a [`Site`], rebuilding it when sources change
pub struct LiveServer {
    config: LiveServerConfig,
    loader: SiteLoader,
}

impl LiveServer {
    pub fn new(config: LiveServerConfig, loader: SiteLoader) -> Self {
        Self { config, loader }
    }

    /// Run the server until it fails
    pub async fn run(self) -> Result<()> {
        let site = load_site(&self.loader).await?;
        let (reload_tx, _) = broadcast::channel::<String>(100);
        let state = AppState::new(site, reload_tx.clone());

        let watch_paths: Vec<PathBuf> = self
            .config
            .watch
            .iter()
            .filter(|p| p.exists())
            .cloned()
            .collect();
        if !watch_paths.is_empty() {
            let watcher_state = state.clone();
            let loader = Arc::clone(&self.loader);
            tokio::spawn(async move {
                if let Err(e) = watch_sources(watch_paths, watcher_state, loader).await {
                    tracing::error!("Source watcher error: {}", e);
                }
            });
        }

        let mut app = app(state);
        if let Some(assets) = &self.config.assets {
            app = app.nest_service("/assets", ServeDir::new(assets));
        }

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;

        tracing::info!("Serving at http://{}", addr);
        tracing::info!("Live reload enabled at ws://{}/__livereload", addr);

        if self.config.open {
            if let Err(e) = open::that(format!("http://{}", addr)) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    site: Arc<RwLock<Site>>,
    reload_tx: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(site: Site, reload_tx: broadcast::Sender<String>) -> Self {
        Self {
            site: Arc::new(RwLock::new(site)),
            reload_tx,
        }
    }
}

/// Routes for the live server: reload socket, stylesheet, and every other
/// path resolved against the site's pages.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/__livereload", get(websocket_handler))
        .route("/styles.css", get(stylesheet_handler))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query parameters that stand in for client-side UI state.
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    pub width: Option<u32>,
    pub menu: Option<String>,
}

/// Viewport width comes from the `width` parameter, then the client hint
/// header. Without either the view is treated as wide.
pub fn view_state(params: &ViewParams, headers: &HeaderMap, breakpoint: Breakpoint) -> ViewState {
    let width = params.width.or_else(|| {
        headers
            .get(VIEWPORT_WIDTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok())
    });

    let menu = match params.menu.as_deref() {
        Some("open") => MenuState::open(),
        _ => MenuState::default(),
    };

    ViewState {
        narrow: width.is_some_and(|w| breakpoint.is_narrow(w)),
        menu,
    }
}

async fn page_handler(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<ViewParams>,
    headers: HeaderMap,
) -> Response {
    let site = state.site.read().await;
    let view = view_state(&params, &headers, site.breakpoint());

    match site.render_document(uri.path(), &view) {
        Ok(page) => {
            let status = if page.found {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            };
            (status, Html(page.html)).into_response()
        }
        Err(e) => {
            tracing::error!(path = %uri.path(), "Render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| websocket_connection(socket, state.reload_tx))
}

async fn websocket_connection(mut socket: WebSocket, reload_tx: broadcast::Sender<String>) {
    let mut rx = reload_tx.subscribe();

    if socket
        .send(Message::Text("connected".to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Ok(reload_msg) => {
                        if socket.send(Message::Text(reload_msg.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            msg = socket.recv() => {
                if msg.is_none() {
                    break;
                }
            }
        }
    }
}

async fn watch_sources(paths: Vec<PathBuf>, state: AppState, loader: SiteLoader) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                for event in events {
                    let _ = tx.blocking_send(event.path);
                }
            }
        },
    )?;

    for path in &paths {
        let mode = if path.is_dir() {
            notify::RecursiveMode::Recursive
        } else {
            notify::RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(path, mode)?;
        tracing::info!("Watching {}", path.display());
    }

    while let Some(path) = rx.recv().await {
        tracing::info!("Source changed: {}", path.display());

        if let Err(e) = rebuild(&state, &loader).await {
            tracing::error!("Rebuild failed, keeping previous site: {}", e);
        }
    }

    Ok(())
}

/// Run the loader on the blocking pool; it scans files and loads templates.
async fn load_site(loader: &SiteLoader) -> Result<Site> {
    let loader = Arc::clone(loader);
    tokio::task::spawn_blocking(move || loader()).await?
}

/// Swap in a freshly loaded site and tell connected pages to reload.
async fn rebuild(state: &AppState, loader: &SiteLoader) -> Result<()> {
    let site = load_site(loader).await?;
    *state.site.write().await = site;
    let _ = state.reload_tx.send("reload".to_string());
    tracing::info!("Site rebuilt");
    Ok(())
}
