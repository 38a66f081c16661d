//! Static handbook server.
//!
//! Route surface:
//! - `/assets/*` served verbatim.
//! - `/dist/handbook/{file}` served from the rendered output, with `.js`
//!   forced to the script content type.
//! - `/handbook/{file}` returns the raw markdown file for `.md` requests
//!   (read fresh on every request), the shell document otherwise.
//! - Everything else falls back to the shell (client-side routing
//!   catch-all).

use std::net::SocketAddr;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

/// Configuration for the handbook server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory served verbatim under `/assets`.
    pub assets_dir: PathBuf,

    /// Rendered output directory, exposed under `/dist/handbook` and the
    /// home of the shell document.
    pub dist_dir: PathBuf,

    /// Directory holding the raw markdown resources.
    pub docs_dir: PathBuf,

    /// Host to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Open the browser on start.
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            dist_dir: PathBuf::from("dist/handbook"),
            docs_dir: PathBuf::from("handbook"),
            host: "127.0.0.1".to_string(),
            port: 3000,
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {0}: {1}")]
    Bind(SocketAddr, String),

    #[error("Invalid address {0}:{1}")]
    Address(String, u16),
}

struct ServerState {
    config: ServerConfig,
}

/// The handbook static server.
pub struct HandbookServer {
    config: ServerConfig,
}

impl HandbookServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Build the axum router. Exposed separately so tests can drive
    /// handlers without binding a socket.
    pub fn router(&self) -> Router {
        let state = Arc::new(ServerState {
            config: self.config.clone(),
        });

        Router::new()
            .route("/dist/handbook/{file}", get(dist_handler))
            .route("/handbook/{file}", get(handbook_handler))
            .nest_service("/assets", ServeDir::new(&self.config.assets_dir))
            .fallback(shell_handler)
            .with_state(state)
    }

    /// Bind and serve until shutdown.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| ServerError::Address(self.config.host.clone(), self.config.port))?;

        let app = self.router();

        tracing::info!("Serving handbook at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}/handbook", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        Ok(())
    }
}

/// Serve a rendered file, forcing the script content type for `.js`.
async fn dist_handler(
    State(state): State<Arc<ServerState>>,
    Path(file): Path<String>,
) -> Response {
    let Some(path) = resolve_file(&state.config.dist_dir, &file) else {
        return not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(body) => {
            let content_type = if file.ends_with(".js") {
                "application/javascript"
            } else {
                content_type_for(&file)
            };
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(_) => not_found(),
    }
}

/// Serve raw markdown for `.md` requests, the shell for anything else.
async fn handbook_handler(
    State(state): State<Arc<ServerState>>,
    Path(file): Path<String>,
) -> Response {
    if !file.ends_with(".md") {
        return shell_response(&state).await;
    }

    let Some(path) = resolve_file(&state.config.docs_dir, &file) else {
        return not_found();
    };

    // Read fresh on every request so edits show up without a restart.
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            body,
        )
            .into_response(),
        Err(_) => not_found(),
    }
}

/// Client-side routing catch-all.
async fn shell_handler(State(state): State<Arc<ServerState>>) -> Response {
    shell_response(&state).await
}

async fn shell_response(state: &ServerState) -> Response {
    let path = state.config.dist_dir.join("handbook.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Html(body).into_response(),
        Err(_) => {
            tracing::error!("Shell document missing: {}", path.display());
            not_found()
        }
    }
}

/// Join a requested file name onto a root directory, rejecting anything
/// that could escape it.
fn resolve_file(root: &FsPath, file: &str) -> Option<PathBuf> {
    if file.contains("..") || file.contains('/') || file.contains('\\') {
        return None;
    }

    Some(root.join(file))
}

fn content_type_for(file: &str) -> &'static str {
    match file.rsplit('.').next() {
        Some("css") => "text/css",
        Some("html") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    fn test_server() -> (HandbookServer, TempDir) {
        let temp = tempdir().unwrap();

        let dist = temp.path().join("dist");
        let docs = temp.path().join("docs");
        fs::create_dir_all(&dist).unwrap();
        fs::create_dir_all(&docs).unwrap();

        fs::write(dist.join("handbook.html"), "<html>shell</html>").unwrap();
        fs::write(dist.join("handbook.js"), "export {};").unwrap();
        fs::write(docs.join("flight-sim.md"), "# Flight sim").unwrap();

        let server = HandbookServer::new(ServerConfig {
            assets_dir: temp.path().join("assets"),
            dist_dir: dist,
            docs_dir: docs,
            open: false,
            ..ServerConfig::default()
        });

        (server, temp)
    }

    async fn get_response(server: &HandbookServer, uri: &str) -> (StatusCode, String, String) {
        let response = server
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap_or("").to_string())
            .unwrap_or_default();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn markdown_requests_return_the_raw_file() {
        let (server, _temp) = test_server();

        let (status, content_type, body) = get_response(&server, "/handbook/flight-sim.md").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/markdown"));
        assert_eq!(body, "# Flight sim");
    }

    #[tokio::test]
    async fn non_markdown_handbook_requests_get_the_shell() {
        let (server, _temp) = test_server();

        let (status, _, body) = get_response(&server, "/handbook/flight-sim").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>shell</html>");
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_the_shell() {
        let (server, _temp) = test_server();

        let (status, _, body) = get_response(&server, "/anything/else").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>shell</html>");
    }

    #[tokio::test]
    async fn rendered_scripts_get_the_script_content_type() {
        let (server, _temp) = test_server();

        let (status, content_type, _) =
            get_response(&server, "/dist/handbook/handbook.js").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/javascript");
    }

    #[tokio::test]
    async fn missing_rendered_files_are_404() {
        let (server, _temp) = test_server();

        let (status, _, _) = get_response(&server, "/dist/handbook/ghost.js").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_markdown_is_404() {
        let (server, _temp) = test_server();

        let (status, _, _) = get_response(&server, "/handbook/ghost.md").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
