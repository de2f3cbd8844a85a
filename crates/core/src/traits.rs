//! ObjectStore trait definition
//!
//! The listing driver only needs one capability from a backend: fetching a
//! single page of keys under a prefix. Backends implement this trait so the
//! driver can be exercised without a network.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::Serialize;

use crate::error::Result;

/// One object returned by a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    /// Full object key
    pub key: String,
    /// Size in bytes, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    /// Last modification time, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
}

impl ObjectInfo {
    /// Create an entry with only a key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size_bytes: None,
            last_modified: None,
        }
    }

    /// Create an entry with a key and size
    pub fn file(key: impl Into<String>, size: i64) -> Self {
        Self {
            size_bytes: Some(size),
            ..Self::new(key)
        }
    }
}

/// Options for a single listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only return keys starting with this prefix
    pub prefix: Option<String>,
    /// Maximum number of keys per page
    pub max_keys: Option<i32>,
    /// Token from the previous page
    pub continuation_token: Option<String>,
}

/// One page of a listing
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    /// Objects in backend order
    pub items: Vec<ObjectInfo>,
    /// Whether more pages follow
    pub truncated: bool,
    /// Token to request the next page
    pub continuation_token: Option<String>,
}

/// Read-only access to the keys of a bucket
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of objects in `bucket`
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult>;

    /// Short backend name used in log output
    fn backend_name(&self) -> &'static str {
        "object-store"
    }
}
