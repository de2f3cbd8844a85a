//! In-memory `ObjectStore` for unit tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{BackendError, Result};
use crate::traits::{ListOptions, ListResult, ObjectInfo, ObjectStore};

/// Serves a fixed key list in insertion order, paginated like S3
pub(crate) struct MemoryStore {
    keys: Vec<String>,
    page_size: usize,
    requests: Mutex<Vec<ListOptions>>,
}

impl MemoryStore {
    pub(crate) fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            page_size: 1000,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Every request received so far
    pub(crate) fn requests(&self) -> Vec<ListOptions> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(&self, _bucket: &str, options: ListOptions) -> Result<ListResult> {
        self.requests.lock().unwrap().push(options.clone());

        let start = match &options.continuation_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| BackendError::Network(format!("bad token {token}")))?,
            None => 0,
        };
        let prefix = options.prefix.unwrap_or_default();

        let matching: Vec<&String> = self.keys.iter().filter(|k| k.starts_with(&prefix)).collect();
        let end = (start + self.page_size).min(matching.len());
        let items = matching[start..end]
            .iter()
            .map(|k| ObjectInfo::file(k.as_str(), 0))
            .collect();

        let truncated = end < matching.len();
        Ok(ListResult {
            items,
            truncated,
            continuation_token: truncated.then(|| end.to_string()),
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
