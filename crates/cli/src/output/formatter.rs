//! Output formatter for human-readable and JSON output
//!
//! Holds the color theme and the error channel shared by the command and
//! the reporter.

use console::Style;

use super::OutputConfig;

/// Color theme for styled output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Object URLs - cyan
    pub url: Style,
    /// Object sizes - green
    pub size: Style,
    /// Timestamps - dim
    pub date: Style,
    /// Status messages - yellow
    pub notice: Style,
    /// Error messages - red
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            url: Style::new().cyan(),
            size: Style::new().green(),
            date: Style::new().dim(),
            notice: Style::new().yellow(),
            error: Style::new().red(),
        }
    }
}

impl Theme {
    /// Returns a theme with no styling (for no-color mode)
    pub fn plain() -> Self {
        Self {
            url: Style::new(),
            size: Style::new(),
            date: Style::new(),
            notice: Style::new(),
            error: Style::new(),
        }
    }
}

/// Formatter for CLI output
///
/// When JSON mode is enabled, output is strict JSON without colors.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
    theme: Theme,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        let theme = if config.no_color || config.json {
            Theme::plain()
        } else {
            Theme::default()
        };
        Self { config, theme }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    // ========== Style helper methods ==========

    /// Style an object URL (cyan)
    pub fn style_url(&self, text: &str) -> String {
        self.theme.url.apply_to(text).to_string()
    }

    /// Style an object size (green)
    pub fn style_size(&self, text: &str) -> String {
        self.theme.size.apply_to(text).to_string()
    }

    /// Style a timestamp (dim)
    pub fn style_date(&self, text: &str) -> String {
        self.theme.date.apply_to(text).to_string()
    }

    /// Style a status message (yellow)
    pub fn style_notice(&self, text: &str) -> String {
        self.theme.notice.apply_to(text).to_string()
    }

    // ========== Output methods ==========

    /// Output an error message to stderr
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render_error(message));
    }

    fn render_error(&self, message: &str) -> String {
        if self.config.json {
            let error = serde_json::json!({
                "error": message
            });
            serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
        } else {
            let cross = self.theme.error.apply_to("✗");
            format!("{cross} {message}")
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
