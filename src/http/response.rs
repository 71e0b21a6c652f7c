//! HTTP response building module
//!
//! Builders for every status the server answers with. Failure bodies are
//! short `text/plain` descriptions; nothing internal goes over the wire.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;

use crate::error::RequestError;

/// Body of every 500 response
const INTERNAL_ERROR_TEXT: &str = "Internal server error";

/// Build 200 response carrying content of the given type
pub fn build_content_response(content: impl Into<Bytes>, content_type: &str) -> Response<Full<Bytes>> {
    let body: Bytes = content.into();
    let content_length = body.len();

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 JSON response from serializable rows
pub fn build_json_response<T: Serialize>(body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => build_content_response(json, "application/json"),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_text_response(500, INTERNAL_ERROR_TEXT)
        }
    }
}

/// Build a plain-text response with the given status
pub fn build_text_response(status: u16, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(text.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::from_static(text.as_bytes())))
        })
}

/// Map a request failure to its client-facing response
///
/// Storage and I/O failures are logged here with their details and answered
/// with a generic 500.
pub fn build_error_response(error: &RequestError) -> Response<Full<Bytes>> {
    match error {
        RequestError::NotFound(hint) => build_text_response(404, hint.message()),
        RequestError::UnsupportedType => build_text_response(415, "File type not supported"),
        RequestError::Storage(_) | RequestError::Io(_) => {
            crate::logger::log_error(&error.to_string());
            build_text_response(500, INTERNAL_ERROR_TEXT)
        }
    }
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NotFoundHint, StoreError};
    use http_body_util::BodyExt;

    async fn body_text(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_hints() {
        let resp = build_error_response(&RequestError::NotFound(NotFoundHint::Params));
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(body_text(resp).await, "URL not found (check params)");
    }

    #[tokio::test]
    async fn test_unsupported_type() {
        let resp = build_error_response(&RequestError::UnsupportedType);
        assert_eq!(resp.status(), 415);
        assert_eq!(body_text(resp).await, "File type not supported");
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let err = RequestError::Storage(StoreError::Sqlite(rusqlite::Error::InvalidQuery));
        let resp = build_error_response(&err);
        assert_eq!(resp.status(), 500);
        assert_eq!(body_text(resp).await, INTERNAL_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_content_response_headers() {
        let resp = build_content_response("<html/>", crate::http::mime::HTML);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/xhtml+xml");
        assert_eq!(resp.headers()["Content-Length"], "7");
    }
}
