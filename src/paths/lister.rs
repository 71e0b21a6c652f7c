//! Single-level directory listing
//!
//! The path cache only ever asks for the immediate children of a directory it
//! has already confirmed, so a lister never re-checks that its input exists.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// One entry of a directory, with its exact on-disk name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Reads one directory level
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    /// List the immediate entries of `dir`
    ///
    /// I/O errors are returned to the caller untouched.
    async fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;
}

/// Lister over the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

#[async_trait]
impl DirectoryLister for FsLister {
    async fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut read_dir = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = read_dir.next_entry().await? {
            // A name that is not UTF-8 can never match a URL path
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            // metadata() follows symlinks, so a link to a folder is a folder
            let metadata = tokio::fs::metadata(entry.path()).await?;
            entries.push(DirEntry {
                name,
                is_dir: metadata.is_dir(),
            });
        }

        Ok(entries)
    }
}
