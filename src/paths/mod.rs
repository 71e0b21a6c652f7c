//! Case-sensitive path resolution
//!
//! Makes a case-insensitive host filesystem behave as case-sensitive by
//! discovering real on-disk names one directory level at a time and
//! remembering them for the life of the process.

pub mod cache;
pub mod lister;

pub use cache::{parent_dir, PathCache, SEED_PATHS};
pub use lister::{DirEntry, DirectoryLister, FsLister};
