//! HTTP protocol layer module
//!
//! Content types, query strings and response builders, independent of the
//! site's routing.

pub mod mime;
pub mod query;
pub mod response;

pub use mime::TypeTable;
pub use response::{
    build_content_response, build_error_response, build_json_response, build_text_response,
};
