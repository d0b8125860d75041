//! Output formatting and status reporting

use console::{style, Term};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CliResult;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Pretty-printed, human-readable
    #[default]
    Text,
    /// Single-line JSON
    Json,
}

impl OutputFormat {
    /// Render a JSON value in this format
    pub fn render(self, value: &Value) -> CliResult<String> {
        Ok(match self {
            Self::Text => serde_json::to_string_pretty(value)?,
            Self::Json => serde_json::to_string(value)?,
        })
    }
}

/// Status line reporter on stderr; stdout stays reserved for results
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line(&success_line(message, self.use_color));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // failures print even in quiet mode
        self.line(&failure_line(message, self.use_color));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        self.line(&format!("{prefix} {message}"));
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

fn success_line(message: &str, use_color: bool) -> String {
    let prefix = if use_color {
        style("✓").green().bold().to_string()
    } else {
        "OK".to_string()
    };
    format!("{prefix} {message}")
}

fn failure_line(message: &str, use_color: bool) -> String {
    let prefix = if use_color {
        style("✗").red().bold().to_string()
    } else {
        "FAIL".to_string()
    };
    format!("{prefix} {message}")
}
