//! Case-sensitive path cache
//!
//! Holds every URL path confirmed to exist under the site root with exactly
//! that casing. Directories are stored with a trailing `/`. Entries are only
//! ever added; a directory is listed at most once, the first time a request
//! walks through it.

use parking_lot::RwLock;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use super::lister::{DirectoryLister, FsLister};
use crate::logger;

/// Top-level pages known before any listing happens
pub const SEED_PATHS: &[&str] = &[
    "/",
    "/chatroom.html",
    "/mainpage.html",
    "/pokemon.html",
    "/pokesearch.html",
];

/// Lazily expanded set of case-exact site paths
pub struct PathCache {
    root: PathBuf,
    lister: Box<dyn DirectoryLister>,
    known: RwLock<HashSet<String>>,
    expanded: RwLock<HashSet<String>>,
}

impl PathCache {
    /// Cache over the real filesystem, seeded with [`SEED_PATHS`]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_lister(root, FsLister, SEED_PATHS)
    }

    /// Cache with a custom lister and seed set; `/` is always seeded
    pub fn with_lister(
        root: impl Into<PathBuf>,
        lister: impl DirectoryLister + 'static,
        seeds: &[&str],
    ) -> Self {
        let mut known: HashSet<String> = seeds.iter().map(ToString::to_string).collect();
        known.insert("/".to_string());

        Self {
            root: root.into(),
            lister: Box::new(lister),
            known: RwLock::new(known),
            expanded: RwLock::new(HashSet::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contains(&self, path: &str) -> bool {
        self.known.read().contains(path)
    }

    pub fn len(&self) -> usize {
        self.known.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.read().is_empty()
    }

    fn is_expanded(&self, dir: &str) -> bool {
        self.expanded.read().contains(dir)
    }

    /// Check whether `path` exists under the root with exactly this casing
    ///
    /// `path` must start with `/` and carry no query string. A trailing `/`
    /// refers to a directory. Absence at any level is `Ok(false)`; only a
    /// failed listing is an error.
    pub async fn resolve(&self, path: &str) -> io::Result<bool> {
        if self.contains(path) {
            return Ok(true);
        }
        let Some(parent) = parent_dir(path) else {
            return Ok(false);
        };

        // Collect the ancestors that still need a listing, deepest first
        let mut pending = Vec::new();
        let mut dir = parent;
        while !self.is_expanded(dir) {
            pending.push(dir);
            match parent_dir(dir) {
                Some(up) => dir = up,
                None => break,
            }
        }

        // Expand top-down; a folder missing from its parent's listing ends the walk
        for dir in pending.into_iter().rev() {
            if !self.contains(dir) {
                return Ok(false);
            }
            self.expand(dir).await?;
        }

        Ok(self.contains(path))
    }

    /// List one directory and merge its children into the set
    async fn expand(&self, dir: &str) -> io::Result<()> {
        let entries = self.lister.list(&self.disk_path(dir)).await?;
        let count = entries.len();

        {
            // Set union: a second listing of the same folder changes nothing
            let mut known = self.known.write();
            for entry in entries {
                let mut path = format!("{dir}{}", entry.name);
                if entry.is_dir {
                    path.push('/');
                }
                known.insert(path);
            }
        }
        self.expanded.write().insert(dir.to_string());

        logger::log_debug(&format!("[PathCache] Listed {dir} ({count} entries)"));
        Ok(())
    }

    fn disk_path(&self, dir: &str) -> PathBuf {
        self.root.join(dir.trim_matches('/'))
    }
}

/// Parent directory of a URL path, including its trailing `/`
///
/// The separator is searched strictly before the final character, so the
/// parent of `/a/B/` is `/a/`. Returns `None` for `/` and for paths without a
/// leading separator.
pub fn parent_dir(path: &str) -> Option<&str> {
    let (last, _) = path.char_indices().next_back()?;
    let n = path[..last].rfind('/')?;
    Some(&path[..=n])
}
