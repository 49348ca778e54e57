//! Static file serving module
//!
//! Maps request paths to files under the SPA root directory and serves
//! their bytes, substituting the index document when no file matches.

use crate::config::SpaConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Resolve a request path to the filesystem path to serve.
///
/// The leading slash is stripped and `..` sequences are neutralized
/// before joining under `root`. If the joined path is an existing regular
/// file it is served as-is; anything else (unknown route, directory,
/// traversal attempt) resolves to the index document so the client-side
/// router can interpret the path.
pub fn resolve_request_path(root: &Path, request_path: &str, index_file: &str) -> PathBuf {
    let clean_path = request_path.trim_start_matches('/').replace("..", "");
    // Removing ".." can leave another leading slash; joining an absolute
    // path would escape the root
    let clean_path = clean_path.trim_start_matches('/');

    let candidate = root.join(clean_path);
    if candidate.is_file() {
        candidate
    } else {
        root.join(index_file)
    }
}

/// Serve a request against the SPA root directory.
///
/// Any read failure, including a missing index document, is a 500 for
/// this request only.
pub async fn serve_spa(ctx: &RequestContext<'_>, spa: &SpaConfig) -> Response<Full<Bytes>> {
    let root = Path::new(&spa.root_dir);
    let file_path = resolve_request_path(root, ctx.path, &spa.index_file);

    match fs::read(&file_path).await {
        Ok(content) => {
            let content_type = mime::content_type_for(&file_path);
            http::build_file_response(Bytes::from(content), content_type, ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read '{}': {e}", file_path.display()));
            http::build_500_response()
        }
    }
}
