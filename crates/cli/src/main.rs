//! s3glob - list S3 objects whose keys match a glob pattern
//!
//! Supports `*`, `?`, `[...]`, `{a,b}` alternatives and the recursive `**`
//! wildcard.

mod commands;
mod exit_code;
mod output;

use std::ffi::OsStr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::list::{self, ListArgs};
use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

const EXAMPLES: &str = "\
Examples:
  s3glob \"s3://my-bucket/logs/**/*.log\"
  s3glob \"s3://my-bucket/data/*.csv\"
  s3glob \"s3://my-bucket\"";

/// List S3 objects whose keys match a glob pattern
#[derive(Parser, Debug)]
#[command(name = "s3glob", version, after_help = EXAMPLES)]
struct Cli {
    #[command(flatten)]
    args: ListArgs,

    /// Output a single JSON document
    #[arg(long)]
    json: bool,

    /// Disable colored output (also set by a non-empty NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported through clap as well
            let code = if e.use_stderr() {
                ExitCode::Failure
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            return code.into();
        }
    };

    init_tracing(cli.debug);

    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color || no_color_requested(std::env::var_os("NO_COLOR").as_deref()),
        quiet: cli.quiet,
    };

    list::execute(cli.args, output_config).await.into()
}

/// Any non-empty `NO_COLOR` disables color, whatever its value
fn no_color_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Filter used when `RUST_LOG` is not set
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "warn,s3glob=debug,s3glob_core=debug,s3glob_s3=debug"
    } else {
        // Missing profile files are normal for env or instance credentials
        "warn,aws_config=error"
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--debug`
fn init_tracing(debug: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
