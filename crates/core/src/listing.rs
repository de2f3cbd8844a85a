//! Paginated listing driver
//!
//! Turns page-at-a-time `ObjectStore` calls into a lazy stream of objects.

use futures::{Stream, TryStreamExt, stream};

use crate::error::{Error, Result};
use crate::traits::{ListOptions, ObjectInfo, ObjectStore};

/// Keys requested per page
pub const PAGE_SIZE: i32 = 1000;

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Stream every object in `bucket` whose key starts with `prefix`
///
/// Pages are fetched on demand, so dropping the stream stops the listing.
/// Each call starts a fresh listing. The first backend error is yielded and
/// ends the stream. An empty prefix lists the whole bucket.
pub fn list_keys<'a, S>(
    store: &'a S,
    bucket: &'a str,
    prefix: &'a str,
) -> impl Stream<Item = Result<ObjectInfo>> + 'a
where
    S: ObjectStore + ?Sized,
{
    stream::try_unfold(Cursor::Start, move |cursor| async move {
        let continuation_token = match cursor {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::Done => return Ok::<_, Error>(None),
        };

        let options = ListOptions {
            prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
            max_keys: Some(PAGE_SIZE),
            continuation_token,
        };

        let page = store.list_objects(bucket, options).await?;
        tracing::debug!(
            backend = store.backend_name(),
            bucket,
            prefix,
            items = page.items.len(),
            truncated = page.truncated,
            "Fetched listing page"
        );

        let next = match (page.truncated, page.continuation_token) {
            (true, Some(token)) => Cursor::Next(token),
            (true, None) => {
                tracing::warn!(bucket, "Truncated page without continuation token, stopping");
                Cursor::Done
            }
            (false, _) => Cursor::Done,
        };

        Ok(Some((stream::iter(page.items.into_iter().map(Ok::<_, Error>)), next)))
    })
    .try_flatten()
}
