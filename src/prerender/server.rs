//! Local content server over the static build output.
//!
//! Serves files by path with a content type inferred from the extension and
//! falls back to the root document for extension-less paths (client-side
//! routing).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

struct ServerState {
    root: PathBuf,
    /// Root document as it was when the server started
    index: Option<Vec<u8>>,
}

/// A running local server. Stop it with [`StaticServer::stop`].
pub struct StaticServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl StaticServer {
    /// Bind `127.0.0.1:<port>` (0 picks a free port) and start serving `root`.
    ///
    /// The root document is read once here, so pages written into `root`
    /// while the server runs never replace the fallback shell.
    pub async fn start(root: &Path, port: u16) -> Result<Self> {
        let index = match tokio::fs::read(root.join("index.html")).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("No index.html in {}: {}", root.display(), e);
                None
            }
        };

        let state = Arc::new(ServerState {
            root: root.to_path_buf(),
            index,
        });
        let app = router(state);

        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("Failed to bind local server to port {}", port))?;
        let addr = listener
            .local_addr()
            .context("Failed to read local server address")?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                error!("Local server error: {}", e);
            }
        });

        info!("Server running on http://localhost:{}", addr.port());

        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.addr.port())
    }

    /// Shut the server down and wait until the port is released.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            error!("Local server task failed: {}", e);
        }
        info!("Local server stopped");
    }
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .fallback(serve_path)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve_path(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    let relative = uri.path().trim_start_matches('/');

    if relative.is_empty() {
        return serve_index(&state);
    }

    if relative.split('/').any(|segment| segment == "..") {
        return not_found();
    }

    let file = state.root.join(relative);
    if tokio::fs::metadata(&file)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
    {
        match tokio::fs::read(&file).await {
            Ok(bytes) => {
                return (
                    [(header::CONTENT_TYPE, content_type_for(relative))],
                    bytes,
                )
                    .into_response();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", file.display(), e);
                return not_found();
            }
        }
    }

    if Path::new(relative).extension().is_none() {
        debug!("SPA fallback for /{}", relative);
        return serve_index(&state);
    }

    not_found()
}

fn serve_index(state: &ServerState) -> Response {
    match &state.index {
        Some(index) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            index.clone(),
        )
            .into_response(),
        None => not_found(),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Not found",
    )
        .into_response()
}

/// Content type for a file path, by extension. Unknown extensions are served as binary.
pub fn content_type_for(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        _ => "application/octet-stream",
    }
}
