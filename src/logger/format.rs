//! Access log format module
//!
//! Supports `combined`, `common`, `json`, and custom patterns built from
//! `$variables`.

use chrono::Local;
use serde::Serialize;

use crate::template;

/// One served request
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method as sent; every method is served like GET
    pub method: String,
    /// Request path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            request_time_us: 0,
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    fn request_line(&self) -> String {
        format!(
            "{} {} HTTP/{}",
            self.method,
            self.request_uri(),
            self.http_version
        )
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => format!(
                "{} - - [{}] \"{}\" {} {} {}us",
                self.remote_addr,
                self.time_local(),
                self.request_line(),
                self.status,
                self.body_bytes,
                self.request_time_us,
            ),
            "common" => format!(
                "{} - - [{}] \"{}\" {} {}",
                self.remote_addr,
                self.time_local(),
                self.request_line(),
                self.status,
                self.body_bytes,
            ),
            "json" => serde_json::to_string(self).unwrap_or_else(|_| self.format("common")),
            custom => self.format_custom(custom),
        }
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables: `$remote_addr`, `$time_local`, `$time_iso8601`,
    /// `$request`, `$request_method`, `$request_uri`, `$request_time`
    /// (seconds, 3 decimals), `$status`, `$body_bytes_sent`.
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time = format!("{:.3}", self.request_time_us as f64 / 1_000_000.0);
        let time_local = self.time_local();
        let time_iso = self.time.to_rfc3339();
        let request_line = self.request_line();
        let request_uri = self.request_uri();
        let status = self.status.to_string();
        let body_bytes = self.body_bytes.to_string();

        // `$request_*` variables before `$request`
        template::substitute(
            pattern,
            &[
                ("$remote_addr", self.remote_addr.as_str()),
                ("$time_local", time_local.as_str()),
                ("$time_iso8601", time_iso.as_str()),
                ("$request_time", request_time.as_str()),
                ("$request_method", self.method.as_str()),
                ("$request_uri", request_uri.as_str()),
                ("$request", request_line.as_str()),
                ("$status", status.as_str()),
                ("$body_bytes_sent", body_bytes.as_str()),
            ],
        )
    }
}
