//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Every request is classified as a
//! static file, a dynamic page, a bulk data endpoint, or not found. The method
//! is not checked; everything is handled like a GET.

use crate::config::AppState;
use crate::error::{NotFoundHint, RequestError};
use crate::handler::{data, pages, static_files};
use crate::http::{self, query};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let uri = req.uri();
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());

    let response = match route_request(target, &state).await {
        Ok(resp) => resp,
        Err(e) => http::build_error_response(&e),
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.map_or_else(|| "-".to_string(), |a| a.ip().to_string()),
            req.method().to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Classify and answer one request target (path plus optional query)
pub async fn route_request(
    target: &str,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, RequestError> {
    let (raw_path, raw_query) = query::split_target(target);

    let path = if raw_path.ends_with('/') {
        format!("{raw_path}{}", state.config.site.default_document)
    } else {
        raw_path.to_string()
    };

    // A dynamic page with parameters is never served as a plain file
    let page = state.pages.get(path.as_str()).copied();
    let page_request = page.zip(raw_query);

    if page_request.is_none() && state.paths.resolve(&path).await? {
        return static_files::serve_file(state, &path).await;
    }

    if let Some((page, raw_query)) = page_request {
        return pages::handle(page, &path, raw_query, state).await;
    }

    if let Some(&endpoint) = state.endpoints.get(target) {
        return data::handle(endpoint, &state.store).await;
    }

    logger::log_debug(&format!("[Router] No match for {target}"));
    Err(RequestError::NotFound(NotFoundHint::Case))
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
