//! Glob path parsing
//!
//! Splits `s3://bucket/pattern` into its bucket and glob pattern, and derives
//! the literal prefix used to narrow the server-side listing.

use std::fmt;

use crate::error::{Error, Result};

/// Scheme every path must start with
pub const SCHEME: &str = "s3://";

/// Pattern used when the path names only a bucket
const MATCH_ALL: &str = "**";

/// Characters that end the literal part of a glob pattern
const WILDCARDS: [char; 5] = ['*', '?', '[', '{', '\\'];

/// A bucket plus the glob pattern to match its keys against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPath {
    /// Bucket name, never empty
    pub bucket: String,
    /// Glob pattern, never empty
    pub pattern: String,
}

impl GlobPath {
    /// Literal part of the pattern before the first wildcard
    pub fn prefix(&self) -> &str {
        literal_prefix(&self.pattern)
    }

    /// Canonical URL of a key in this bucket
    pub fn url_for(&self, key: &str) -> String {
        format!("{SCHEME}{}/{key}", self.bucket)
    }
}

impl fmt::Display for GlobPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.bucket, self.pattern)
    }
}

/// Parse an `s3://bucket/pattern` argument
///
/// An empty pattern (`s3://bucket` or `s3://bucket/`) matches every key at
/// any depth.
pub fn parse_path(input: &str) -> Result<GlobPath> {
    let rest = input
        .strip_prefix(SCHEME)
        .ok_or_else(|| Error::InvalidPath(format!("path must start with {SCHEME}")))?;

    let (bucket, pattern) = rest.split_once('/').unwrap_or((rest, ""));

    if bucket.is_empty() {
        return Err(Error::InvalidPath("bucket name is missing".to_string()));
    }

    let pattern = if pattern.is_empty() {
        MATCH_ALL
    } else {
        pattern
    };

    Ok(GlobPath {
        bucket: bucket.to_string(),
        pattern: pattern.to_string(),
    })
}

/// Return the part of `pattern` before the first `*`, `?`, `[`, `{` or `\`
///
/// A pattern without wildcards is returned whole.
pub fn literal_prefix(pattern: &str) -> &str {
    match pattern.find(WILDCARDS) {
        Some(idx) => &pattern[..idx],
        None => pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path() {
        let path = parse_path("s3://mybucket/logs/**/*.txt").unwrap();
        assert_eq!(path.bucket, "mybucket");
        assert_eq!(path.pattern, "logs/**/*.txt");
    }

    #[test]
    fn test_parse_path_bucket_only() {
        let path = parse_path("s3://mybucket").unwrap();
        assert_eq!(path.bucket, "mybucket");
        assert_eq!(path.pattern, "**");

        let path = parse_path("s3://mybucket/").unwrap();
        assert_eq!(path.pattern, "**");
    }

    #[test]
    fn test_parse_path_keeps_extra_slashes() {
        let path = parse_path("s3://mybucket//nested").unwrap();
        assert_eq!(path.bucket, "mybucket");
        assert_eq!(path.pattern, "/nested");
    }

    #[test]
    fn test_parse_path_missing_scheme() {
        for input in ["", "mybucket/key", "gs://mybucket/key", "S3://mybucket", "s3:/mybucket"] {
            assert!(
                matches!(parse_path(input), Err(Error::InvalidPath(_))),
                "expected InvalidPath for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_path_empty_bucket() {
        for input in ["s3://", "s3:///", "s3:///key.txt"] {
            assert!(
                matches!(parse_path(input), Err(Error::InvalidPath(_))),
                "expected InvalidPath for {input:?}"
            );
        }
    }

    #[test]
    fn test_literal_prefix() {
        assert_eq!(literal_prefix("logs/**/*.txt"), "logs/");
        assert_eq!(literal_prefix("data/file?.log"), "data/file");
        assert_eq!(literal_prefix("data/[ab].csv"), "data/");
        assert_eq!(literal_prefix("*.csv"), "");
        assert_eq!(literal_prefix("**"), "");
    }

    #[test]
    fn test_literal_prefix_stops_at_braces_and_escapes() {
        assert_eq!(literal_prefix("data/{a,b}/x.csv"), "data/");
        assert_eq!(literal_prefix("logs{,-old}/*.gz"), "logs");
        assert_eq!(literal_prefix(r"data/\*.csv"), "data/");
    }

    #[test]
    fn test_literal_prefix_without_wildcards() {
        assert_eq!(literal_prefix("exact/key.txt"), "exact/key.txt");
        assert_eq!(literal_prefix(""), "");
    }

    #[test]
    fn test_glob_path_display() {
        let path = parse_path("s3://mybucket/a/*.csv").unwrap();
        assert_eq!(path.to_string(), "s3://mybucket/a/*.csv");
        assert_eq!(path.prefix(), "a/");
        assert_eq!(path.url_for("a/b.csv"), "s3://mybucket/a/b.csv");
    }
}
