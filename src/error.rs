//! Error types
//!
//! `RequestError` is recovered per request and mapped to a status code by
//! `http::response::build_error_response`. `StartupError` is fatal: `main`
//! prints it and exits with status 1.

use std::io;
use std::path::PathBuf;

/// Hint attached to a 404 so the developer knows what to look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundHint {
    /// Static path or endpoint did not match with exact casing
    Case,
    /// Dynamic page parameters did not match a known row or shape
    Params,
}

impl NotFoundHint {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Case => "URL not found (check case)",
            Self::Params => "URL not found (check params)",
        }
    }
}

/// Failure of a store query
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Per-request failure
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{}", .0.message())]
    NotFound(NotFoundHint),

    #[error("File type not supported")]
    UnsupportedType,

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),

    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
}

impl RequestError {
    pub const fn status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::UnsupportedType => 415,
            Self::Storage(_) | Self::Io(_) => 500,
        }
    }
}

/// Fatal startup failure
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("site root {} is not accessible: {source}", path.display())]
    MissingRoot { path: PathBuf, source: io::Error },

    #[error("default document {} is not accessible: {source}", path.display())]
    MissingDefaultDocument { path: PathBuf, source: io::Error },

    #[error("cannot open database {}: {source}", path.display())]
    Database {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("cannot initialize database: {0}")]
    Schema(StoreError),

    #[error("cannot open log file: {0}")]
    Logger(io::Error),

    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: io::Error,
    },

    #[error("runtime error: {0}")]
    Runtime(io::Error),
}
