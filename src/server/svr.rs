use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, Uri, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use std::{io, net::SocketAddr, path::PathBuf, sync::Arc};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::io::ReaderStream;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::server::mime;
use crate::server::resolve::resolve;

const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate";

/// Server knobs; the defaults reproduce the front-end dev setup
/// (port 8000, current directory, CORS on, access log on).
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub root: PathBuf,
    pub port: u16,
    pub cors: bool,
    pub quiet: bool,
}

/// Listener startup failure, split so the operator can tell an occupied
/// port from a privileged one.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("port {0} is already in use")]
    PortInUse(u16),
    #[error("permission denied binding port {0}")]
    PermissionDenied(u16),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn classify_bind_error(err: io::Error, port: u16) -> BindError {
    match err.kind() {
        io::ErrorKind::AddrInUse => BindError::PortInUse(port),
        io::ErrorKind::PermissionDenied => BindError::PermissionDenied(port),
        _ => BindError::Io(err),
    }
}

struct AppState {
    root: PathBuf,
}

async fn serve_path(State(state): State<Arc<AppState>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = match resolve(&state.root, uri.path()) {
        Some(path) => path,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    // Open succeeds on directories too; only plain files are served
    match file.metadata().await {
        Ok(meta) if meta.is_file() => {}
        _ => return StatusCode::NOT_FOUND.into_response(),
    }

    let stream = ReaderStream::with_capacity(file, 64 * 1024);
    let body = Body::from_stream(stream);

    ([(header::CONTENT_TYPE, mime::from_path(&path))], body).into_response()
}

async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    tracing::info!("{} {} -> {}", method, path, response.status().as_u16());
    response
}

fn build_app(config: &ServeConfig) -> Router {
    let state = Arc::new(AppState {
        root: config.root.clone(),
    });

    let mut router = Router::new().fallback(serve_path).with_state(state);

    if !config.quiet {
        router = router.layer(middleware::from_fn(access_log));
    }

    if config.cors {
        router = router
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE]),
            )
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static(CACHE_CONTROL_VALUE),
            ));
    }

    router
}

pub struct StaticServer {
    listener: TcpListener,
    app: Router,
}

impl StaticServer {
    pub async fn bind(config: &ServeConfig) -> Result<Self, BindError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| classify_bind_error(err, config.port))?;

        Ok(Self {
            listener,
            app: build_app(config),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until the process receives an interrupt
    pub async fn serve(self) -> io::Result<()> {
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for interrupt: {}", err);
        std::future::pending::<()>().await;
    }
}

pub async fn startup(config: ServeConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let port = config.port;
    let server = StaticServer::bind(&config).await?;

    println!("Server running at http://localhost:{}/", port);
    println!("Press Ctrl+C to stop");

    server.serve().await?;

    println!("\nServer stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn site_fixture() -> TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<html>ranker</html>").unwrap();
        std::fs::create_dir_all(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js/app.js"), b"console.log('covers')").unwrap();
        dir
    }

    fn config_for(dir: &TempDir) -> ServeConfig {
        ServeConfig {
            root: dir.path().to_path_buf(),
            port: 0,
            cors: true,
            quiet: true,
        }
    }

    // The listener binds 0.0.0.0; requests go to loopback on the bound port
    async fn spawn(config: ServeConfig) -> String {
        let server = StaticServer::bind(&config).await.unwrap();
        let port = server.local_addr().unwrap().port();
        tokio::spawn(server.serve());
        format!("127.0.0.1:{}", port)
    }

    #[tokio::test]
    async fn test_root_serves_index_document() {
        let dir = site_fixture();
        let addr = &spawn(config_for(&dir)).await;

        let root = reqwest::get(format!("http://{}/", addr)).await.unwrap();
        assert_eq!(root.status(), 200);
        assert_eq!(
            root.headers()["content-type"].to_str().unwrap(),
            "text/html; charset=utf-8"
        );
        let root_bytes = root.bytes().await.unwrap();

        let index = reqwest::get(format!("http://{}/index.html", addr))
            .await
            .unwrap();
        let index_bytes = index.bytes().await.unwrap();

        assert_eq!(root_bytes, index_bytes);
        assert_eq!(&root_bytes[..], b"<html>ranker</html>");
    }

    #[tokio::test]
    async fn test_nested_file_is_served() {
        let dir = site_fixture();
        let addr = &spawn(config_for(&dir)).await;

        let response = reqwest::get(format!("http://{}/js/app.js", addr))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/javascript; charset=utf-8"
        );
        assert_eq!(&response.bytes().await.unwrap()[..], b"console.log('covers')");
    }

    #[tokio::test]
    async fn test_cors_and_cache_headers_on_every_response() {
        let dir = site_fixture();
        let addr = &spawn(config_for(&dir)).await;

        for path in ["/", "/js/app.js", "/nope.png"] {
            let response = reqwest::get(format!("http://{}{}", addr, path))
                .await
                .unwrap();
            assert_eq!(
                response.headers()["access-control-allow-origin"]
                    .to_str()
                    .unwrap(),
                "*",
                "missing CORS header on {}",
                path
            );
            assert_eq!(
                response.headers()["cache-control"].to_str().unwrap(),
                CACHE_CONTROL_VALUE
            );
        }
    }

    #[tokio::test]
    async fn test_headers_absent_when_cors_disabled() {
        let dir = site_fixture();
        let mut config = config_for(&dir);
        config.cors = false;
        let addr = &spawn(config).await;

        let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
        assert!(response.headers().get("access-control-allow-origin").is_none());
        assert!(response.headers().get("cache-control").is_none());
    }

    #[tokio::test]
    async fn test_missing_file_and_directory_are_not_found() {
        let dir = site_fixture();
        let addr = &spawn(config_for(&dir)).await;

        let missing = reqwest::get(format!("http://{}/nope.js", addr)).await.unwrap();
        assert_eq!(missing.status(), 404);

        // Directories other than the root have no index rewrite
        let directory = reqwest::get(format!("http://{}/js", addr)).await.unwrap();
        assert_eq!(directory.status(), 404);
    }

    #[tokio::test]
    async fn test_bind_on_occupied_port_is_classified() {
        let dir = site_fixture();
        let first = StaticServer::bind(&config_for(&dir)).await.unwrap();
        let port = first.local_addr().unwrap().port();

        let mut config = config_for(&dir);
        config.port = port;
        let second = StaticServer::bind(&config).await;

        match second {
            Err(BindError::PortInUse(p)) => assert_eq!(p, port),
            other => panic!("expected PortInUse, got {:?}", other.map(|_| ())),
        }
    }
}
