//! Glob search over a bucket
//!
//! Combines the pieces: the literal prefix narrows the listing on the server,
//! the full pattern decides each key on the client.

use futures::{Stream, TryStreamExt, future};

use crate::error::Result;
use crate::listing::list_keys;
use crate::path::GlobPath;
use crate::pattern::KeyMatcher;
use crate::traits::{ObjectInfo, ObjectStore};

/// A validated search, ready to run against a store
///
/// Building one compiles the pattern without touching a backend, so callers
/// can reject a bad pattern before they set up a client.
#[derive(Debug, Clone)]
pub struct GlobSearch<'p> {
    path: &'p GlobPath,
    matcher: KeyMatcher,
}

impl<'p> GlobSearch<'p> {
    /// Compile the pattern of `path`
    pub fn new(path: &'p GlobPath) -> Result<Self> {
        let matcher = KeyMatcher::new(&path.pattern)?;
        Ok(Self { path, matcher })
    }

    /// The path being searched
    pub fn path(&self) -> &'p GlobPath {
        self.path
    }

    /// Stream the objects of the bucket whose keys match the pattern
    ///
    /// Matches are yielded in backend listing order.
    pub fn into_stream<'a, S>(self, store: &'a S) -> impl Stream<Item = Result<ObjectInfo>> + 'a
    where
        S: ObjectStore + ?Sized,
        'p: 'a,
    {
        let Self { path, matcher } = self;
        let prefix = path.prefix();

        tracing::debug!(
            bucket = %path.bucket,
            pattern = matcher.as_str(),
            prefix,
            "Starting glob search"
        );

        list_keys(store, &path.bucket, prefix)
            .try_filter(move |object| future::ready(matcher.matches(&object.key)))
    }
}

/// Stream the objects of `path.bucket` whose keys match `path.pattern`
///
/// The pattern is validated before any request is made.
pub fn glob_search<'a, S>(
    store: &'a S,
    path: &'a GlobPath,
) -> Result<impl Stream<Item = Result<ObjectInfo>> + 'a>
where
    S: ObjectStore + ?Sized,
{
    Ok(GlobSearch::new(path)?.into_stream(store))
}
