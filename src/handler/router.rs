//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch
//! to the static file handler, and access-log emission.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling.
///
/// The request body is never read, so this is generic over the body type.
/// Never fails: every error condition is mapped to a response, so a bad
/// request cannot take down the connection task or its neighbors.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let response = if let Some(resp) = check_http_method(&method) {
        resp
    } else {
        let ctx = RequestContext {
            path: &path,
            is_head,
        };
        static_files::serve_spa(&ctx, &state.config.spa).await
    };

    if state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed)
    {
        let entry = access_log_entry(&req, &response, peer_addr, method.as_str(), &path);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method; GET and HEAD pass through, OPTIONS and everything
/// else get an immediate response
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    if *method == Method::GET || *method == Method::HEAD {
        return None;
    }
    if *method == Method::OPTIONS {
        return Some(http::build_options_response());
    }
    logger::log_warning(&format!("Method not allowed: {method}"));
    Some(http::build_405_response())
}

/// Assemble an access log entry from the request/response pair
fn access_log_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    method: &str,
    path: &str,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        method.to_string(),
        path.to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
        .unwrap_or(usize::MAX);
    entry.referer = header_string(req, "referer");
    entry.user_agent = header_string(req, "user-agent");
    entry
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, PerformanceConfig, ServerConfig, SpaConfig};
    use http_body_util::BodyExt;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn test_state(root: &std::path::Path) -> Arc<AppState> {
        let cfg = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "common".to_string(),
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            spa: SpaConfig {
                root_dir: root.to_string_lossy().into_owned(),
                index_file: "index.html".to_string(),
            },
        };
        Arc::new(AppState::new(&cfg))
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn root_serves_index_document() {
        let dir = TempDir::new().unwrap();
        std_fs::write(dir.path().join("index.html"), "<html>A</html>").unwrap();
        let state = test_state(dir.path());

        let resp = handle_request(request(Method::GET, "/"), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/html");
        assert_eq!(body_bytes(resp).await, Bytes::from("<html>A</html>"));
    }

    #[tokio::test]
    async fn script_request_gets_exact_bytes_and_type() {
        let dir = TempDir::new().unwrap();
        std_fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        let state = test_state(dir.path());

        let resp = handle_request(request(Method::GET, "/app.js"), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/javascript"
        );
        assert_eq!(body_bytes(resp).await, Bytes::from("console.log(1)"));
    }

    #[tokio::test]
    async fn unknown_route_falls_back_to_index() {
        let dir = TempDir::new().unwrap();
        std_fs::write(dir.path().join("index.html"), "<html>A</html>").unwrap();
        let state = test_state(dir.path());

        let resp = handle_request(request(Method::GET, "/nonexistent/route"), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/html");
        assert_eq!(body_bytes(resp).await, Bytes::from("<html>A</html>"));
    }

    #[tokio::test]
    async fn repeated_requests_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        std_fs::write(dir.path().join("index.html"), "<html>A</html>").unwrap();
        let state = test_state(dir.path());

        let first = handle_request(request(Method::GET, "/route"), Arc::clone(&state), peer())
            .await
            .unwrap();
        let second = handle_request(request(Method::GET, "/route"), state, peer())
            .await
            .unwrap();

        assert_eq!(first.status(), second.status());
        assert_eq!(body_bytes(first).await, body_bytes(second).await);
    }

    #[tokio::test]
    async fn post_is_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(dir.path());

        let resp = handle_request(request(Method::POST, "/"), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn options_answers_allowed_methods() {
        let dir = TempDir::new().unwrap();
        let state = test_state(dir.path());

        let resp = handle_request(request(Method::OPTIONS, "/"), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn head_mirrors_get_headers_without_body() {
        let dir = TempDir::new().unwrap();
        std_fs::write(dir.path().join("style.css"), "body{}").unwrap();
        let state = test_state(dir.path());

        let resp = handle_request(request(Method::HEAD, "/style.css"), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/css");
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "6");
        assert!(body_bytes(resp).await.is_empty());
    }
}
