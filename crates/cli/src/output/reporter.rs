//! Match reporter
//!
//! Prints each match as `s3://bucket/key` as soon as it arrives. JSON mode
//! collects matches and writes a single document when the listing ends.

use std::io::{self, Write};

use s3glob_core::{GlobPath, ObjectInfo};
use serde::Serialize;

use super::Formatter;

/// Printed when a listing finishes without a single match
pub const NO_MATCHES_MESSAGE: &str = "No objects found matching the pattern.";

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    bucket: &'a str,
    pattern: &'a str,
    matches: Vec<MatchInfo>,
    total_count: usize,
}

#[derive(Debug, Serialize)]
struct MatchInfo {
    url: String,
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
}

/// Streams matches of one glob path to `out`
pub struct Reporter<'p, W: Write> {
    out: W,
    formatter: Formatter,
    path: &'p GlobPath,
    long: bool,
    count: usize,
    collected: Vec<MatchInfo>,
}

impl<'p, W: Write> Reporter<'p, W> {
    /// Create a reporter; `long` adds size and modification time to lines
    pub fn new(out: W, formatter: Formatter, path: &'p GlobPath, long: bool) -> Self {
        Self {
            out,
            formatter,
            path,
            long,
            count: 0,
            collected: Vec::new(),
        }
    }

    /// Report one matching object
    pub fn report(&mut self, object: &ObjectInfo) -> io::Result<()> {
        self.count += 1;
        let url = self.path.url_for(&object.key);

        if self.formatter.is_json() {
            self.collected.push(MatchInfo {
                url,
                key: object.key.clone(),
                size_bytes: object.size_bytes,
                size_human: object.size_bytes.map(format_size),
                last_modified: object.last_modified.map(|t| t.to_string()),
            });
            return Ok(());
        }

        if self.formatter.is_quiet() {
            return Ok(());
        }

        if self.long {
            let date = object
                .last_modified
                .map(|t| t.strftime("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "-".to_string());
            let size = object
                .size_bytes
                .map(format_size)
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                self.out,
                "[{}] {} {}",
                self.formatter.style_date(&date),
                self.formatter.style_size(&format!("{size:>10}")),
                self.formatter.style_url(&url)
            )
        } else {
            writeln!(self.out, "{}", self.formatter.style_url(&url))
        }
    }

    /// Finish the listing and return the number of matches
    pub fn finish(mut self) -> io::Result<usize> {
        if self.formatter.is_json() {
            let output = ListOutput {
                bucket: &self.path.bucket,
                pattern: &self.path.pattern,
                total_count: self.count,
                matches: std::mem::take(&mut self.collected),
            };
            serde_json::to_writer_pretty(&mut self.out, &output)?;
            writeln!(self.out)?;
        } else if self.count == 0 && !self.formatter.is_quiet() {
            writeln!(
                self.out,
                "{}",
                self.formatter.style_notice(NO_MATCHES_MESSAGE)
            )?;
        }

        self.out.flush()?;
        Ok(self.count)
    }
}

fn format_size(size: i64) -> String {
    humansize::format_size(size.max(0) as u64, humansize::BINARY)
}
