//! s3glob-core: Core library for the s3glob CLI
//!
//! This crate provides everything between the command line and the storage SDK:
//! - Parsing `s3://bucket/pattern` paths
//! - Literal prefix extraction for server-side narrowing
//! - Glob matching with recursive `**` support
//! - The `ObjectStore` trait and a paginated listing driver
//!
//! It is independent of any specific S3 SDK so the whole pipeline can be
//! tested against an in-memory store.

pub mod error;
pub mod listing;
pub mod path;
pub mod pattern;
pub mod search;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use error::{BackendError, Error, Result};
pub use listing::{PAGE_SIZE, list_keys};
pub use path::{GlobPath, SCHEME, literal_prefix, parse_path};
pub use pattern::KeyMatcher;
pub use search::{GlobSearch, glob_search};
pub use traits::{ListOptions, ListResult, ObjectInfo, ObjectStore};
