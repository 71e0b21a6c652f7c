//! Request handler module
//!
//! Routing dispatch plus the static file, dynamic page and bulk data
//! handlers it delegates to.

pub mod data;
pub mod pages;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, route_request};
