//! Log subscriber setup.
//!
//! Logs go to stderr. `RUST_LOG` overrides the filter derived from `-v`/`-q`.

use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, Verbosity};
use crate::output::OutputFormat;

/// Filter for a verbosity level, unless `RUST_LOG` is set
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(config: &CliConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.verbosity))
        .with_writer(std::io::stderr)
        .with_target(config.verbosity.is_debug());

    let result = match config.format {
        OutputFormat::Json => builder.json().try_init(),
        OutputFormat::Text => builder
            .with_ansi(config.color.should_color())
            .without_time()
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}
