// Application state module
// Everything a request needs, built once at startup and shared through Arc

use std::collections::HashMap;

use super::types::Config;
use crate::db::Store;
use crate::handler::data::{DataEndpoint, REGISTERED_ENDPOINTS};
use crate::handler::pages::{Page, DYNAMIC_PAGES};
use crate::http::TypeTable;
use crate::paths::PathCache;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Case-exact paths under the site root
    pub paths: PathCache,
    pub types: TypeTable,
    /// Bulk data URLs, matched against the full request target
    pub endpoints: HashMap<&'static str, DataEndpoint>,
    /// Page paths answered by a page handler when a query string is present
    pub pages: HashMap<&'static str, Page>,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        let paths = PathCache::new(config.site.root.clone());
        Self::with_paths(config, store, paths)
    }

    /// State with a caller-built path cache
    pub fn with_paths(config: Config, store: Store, paths: PathCache) -> Self {
        Self {
            config,
            paths,
            types: TypeTable::new(),
            endpoints: REGISTERED_ENDPOINTS.iter().copied().collect(),
            pages: DYNAMIC_PAGES.iter().copied().collect(),
            store,
        }
    }
}
