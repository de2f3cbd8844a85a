//! Output handling
//!
//! Human-readable and JSON rendering of matches and errors.

mod formatter;
mod reporter;

pub use formatter::Formatter;
pub use reporter::Reporter;

/// Output configuration collected from global flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Emit a single JSON document instead of lines
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
