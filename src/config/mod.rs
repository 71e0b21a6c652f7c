// Configuration module entry point
// Loads the server configuration and builds the per-process application state

mod state;
mod types;

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub use state::AppState;
pub use types::{Config, DatabaseConfig, LoggingConfig, ServerConfig, SiteConfig};

use crate::error::StartupError;

/// Config file looked up when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables prefixed with `POKESITE`
    /// override it, using `__` between nesting levels
    /// (`POKESITE_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("POKESITE").separator("__"))
            .set_default("server.port", 8080)?
            .set_default("site.root", "./public")?
            .set_default("site.default_document", "index.html")?
            .set_default("database.path", "./data.db")?
            .set_default("database.initialize", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .build()?;

        settings.try_deserialize()
    }

    /// Loopback address the listener binds to
    pub fn get_socket_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.server.port))
    }

    /// Address printed in the startup banner
    pub fn public_address(&self) -> String {
        if self.server.port == 80 {
            "http://localhost".to_string()
        } else {
            format!("http://localhost:{}", self.server.port)
        }
    }

    /// Path of the default document inside the site root
    pub fn default_document_path(&self) -> PathBuf {
        self.site.root.join(&self.site.default_document)
    }

    /// Fail fast when the site folder or its default document is missing
    pub fn check_site(&self) -> Result<(), StartupError> {
        std::fs::metadata(&self.site.root).map_err(|source| StartupError::MissingRoot {
            path: self.site.root.clone(),
            source,
        })?;
        let document = self.default_document_path();
        std::fs::metadata(&document).map_err(|source| StartupError::MissingDefaultDocument {
            path: document.clone(),
            source,
        })?;
        Ok(())
    }
}
