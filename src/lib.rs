//! Local web server for a small Pokémon site.
//!
//! Serves static files from a site root with case-exact path matching,
//! renders two templated pages from a `SQLite` table, and answers a handful
//! of JSON data endpoints.

pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod paths;
pub mod server;
pub mod template;
