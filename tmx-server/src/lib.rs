//! Serves a rendered chart directory over HTTP.
//!
//! `/` maps to `index.html`; every other path is looked up under the root.
//! Anything that cannot be read answers `404` with a plain-text body naming
//! the requested path.

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use log::{debug, info};
use std::{
    net::SocketAddr,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

const INDEX: &str = "index.html";

/// Content type for a file, chosen from its extension.
///
/// Extensions are matched exactly as written; anything outside the table is
/// served as `application/octet-stream`.
pub fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("png") => "image/png",
        Some("jpg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Map a request path onto a file under `root`.
///
/// Returns `None` for paths that would leave the root.
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    if request_path == "/" || request_path.is_empty() {
        return Some(root.join(INDEX));
    }
    let mut resolved = root.to_path_buf();
    for component in Path::new(request_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

/// Outcome of one static file request.
#[derive(Debug, PartialEq, Eq)]
pub enum AssetResponse {
    Found {
        content_type: &'static str,
        body: Vec<u8>,
    },
    NotFound {
        request_path: String,
    },
}

impl IntoResponse for AssetResponse {
    fn into_response(self) -> Response {
        match self {
            AssetResponse::Found { content_type, body } => {
                (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            AssetResponse::NotFound { request_path } => (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("404: File Not Found -> {}", request_path),
            )
                .into_response(),
        }
    }
}

/// Read the file behind `request_path`.
pub async fn respond(root: &Path, request_path: &str) -> AssetResponse {
    let not_found = || AssetResponse::NotFound {
        request_path: request_path.to_string(),
    };
    let Some(path) = resolve(root, request_path) else {
        debug!("Rejected path outside the root: {}", request_path);
        return not_found();
    };
    match tokio::fs::read(&path).await {
        Ok(body) => AssetResponse::Found {
            content_type: mime_for(&path),
            body,
        },
        Err(e) => {
            debug!("Cannot read {}: {}", path.display(), e);
            not_found()
        }
    }
}

#[derive(Debug)]
struct AssetRoot {
    root: PathBuf,
}

async fn serve_asset(State(state): State<Arc<AssetRoot>>, uri: Uri) -> AssetResponse {
    respond(&state.root, uri.path()).await
}

/// Router answering GET for every path under `root`.
pub fn router(root: impl Into<PathBuf>) -> Router {
    let state = Arc::new(AssetRoot { root: root.into() });
    Router::new()
        .route("/", get(serve_asset))
        .route("/*path", get(serve_asset))
        .with_state(state)
}

/// Bind `addr` and serve `root` until the process is stopped.
pub async fn serve(addr: SocketAddr, root: impl Into<PathBuf>) -> anyhow::Result<()> {
    let root = root.into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving {}", root.display());
    info!("Server running at http://{}/", listener.local_addr()?);
    axum::serve(listener, router(root)).await?;
    Ok(())
}
