//! list command - List objects matching a glob pattern
//!
//! Narrows the listing with the pattern's literal prefix, matches every
//! returned key against the full pattern and prints the matches.

use std::fmt;
use std::io::{self, Write};

use clap::Args;
use clap::builder::FalseyValueParser;
use futures::StreamExt;
use s3glob_core::{GlobSearch, ObjectStore, parse_path};
use s3glob_s3::{ClientOptions, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Reporter};

/// List objects matching a glob pattern
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Bucket and glob pattern (s3://bucket/pattern)
    pub path: String,

    /// Show size and last modification time
    #[arg(short, long)]
    pub long: bool,

    /// AWS region (default: from the AWS config chain, then us-east-1)
    #[arg(long, env = "S3GLOB_REGION")]
    pub region: Option<String>,

    /// Endpoint URL for S3-compatible servers (e.g., `http://localhost:9000`)
    #[arg(long, env = "S3GLOB_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long, env = "S3GLOB_PROFILE")]
    pub profile: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long, env = "S3GLOB_PATH_STYLE", value_parser = FalseyValueParser::new())]
    pub path_style: bool,
}

impl ListArgs {
    fn client_options(&self) -> ClientOptions {
        ClientOptions {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            profile: self.profile.clone(),
            force_path_style: self.path_style,
        }
    }
}

/// Execute the list command
pub async fn execute(args: ListArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_path(&args.path) {
        Ok(p) => p,
        Err(e) => return fail(&formatter, &e),
    };

    // Reject bad patterns before touching the credential chain
    let search = match GlobSearch::new(&path) {
        Ok(s) => s,
        Err(e) => return fail(&formatter, &e),
    };

    tracing::info!(path = %path, "Listing matching objects");

    let client = S3Client::new(&args.client_options()).await;
    let reporter = Reporter::new(io::stdout().lock(), formatter.clone(), &path, args.long);

    exit_code(list_matches(search, &client, reporter).await, &formatter)
}

/// Why a listing stopped before reaching the end
#[derive(Debug)]
enum ListFailure {
    Search(s3glob_core::Error),
    Write(io::Error),
}

impl fmt::Display for ListFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFailure::Search(e) => write!(f, "{e}"),
            ListFailure::Write(e) => write!(f, "Failed to write output: {e}"),
        }
    }
}

/// Drive a search against `store` into `reporter`, returning the match count
async fn list_matches<S, W>(
    search: GlobSearch<'_>,
    store: &S,
    mut reporter: Reporter<'_, W>,
) -> Result<usize, ListFailure>
where
    S: ObjectStore + ?Sized,
    W: Write,
{
    let mut matches = std::pin::pin!(search.into_stream(store));

    while let Some(object) = matches.next().await {
        let object = object.map_err(ListFailure::Search)?;
        reporter.report(&object).map_err(ListFailure::Write)?;
    }

    reporter.finish().map_err(ListFailure::Write)
}

fn exit_code(outcome: Result<usize, ListFailure>, formatter: &Formatter) -> ExitCode {
    match outcome {
        Ok(count) => {
            tracing::debug!(count, "Listing complete");
            ExitCode::Success
        }
        Err(ListFailure::Write(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("Output closed, stopping");
            ExitCode::Success
        }
        Err(e) => fail(formatter, &e),
    }
}

fn failure_message(error: &dyn fmt::Display) -> String {
    format!("Failed to list objects: {error}")
}

fn fail(formatter: &Formatter, error: &dyn fmt::Display) -> ExitCode {
    formatter.error(&failure_message(error));
    ExitCode::Failure
}
