//! Static file serving module
//!
//! Only called for paths the path cache has confirmed, so the file exists
//! with exactly the requested casing.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::PathBuf;
use tokio::fs;

use crate::config::AppState;
use crate::error::{NotFoundHint, RequestError};
use crate::http;

/// Deliver the file at URL path `path`
///
/// The content type is checked before the file is read, so a disabled
/// extension never touches the disk.
pub async fn serve_file(state: &AppState, path: &str) -> Result<Response<Full<Bytes>>, RequestError> {
    let content_type = state
        .types
        .content_type(path)
        .ok_or(RequestError::UnsupportedType)?;

    let content = fs::read(disk_path(state, path)).await.map_err(|e| match e.kind() {
        // Removed from disk after it was cached
        io::ErrorKind::NotFound => RequestError::NotFound(NotFoundHint::Case),
        _ => RequestError::Io(e),
    })?;

    Ok(http::build_content_response(content, content_type))
}

/// Location on disk of URL path `path` under the site root
pub fn disk_path(state: &AppState, path: &str) -> PathBuf {
    state.config.site.root.join(path.trim_start_matches('/'))
}
