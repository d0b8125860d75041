//! Consent poller configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::phrases::DEFAULT_CONSENT_PHRASES;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default total time spent looking for an overlay (6 seconds)
pub const DEFAULT_CONSENT_BUDGET_MS: u64 = 6_000;

/// Default pause between sweeps (300ms)
pub const DEFAULT_CONSENT_BACKOFF_MS: u64 = 300;

// =============================================================================
// CONSENT OPTIONS
// =============================================================================

/// Options for consent dismissal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentOptions {
    /// Total budget in milliseconds
    pub budget_ms: u64,
    /// Pause between sweeps in milliseconds
    pub backoff_ms: u64,
    /// Accept phrases, in priority order
    pub phrases: Vec<String>,
    /// Press Escape after a sweep that found nothing
    pub escape_fallback: bool,
    /// Search attached frames after the main document
    pub search_frames: bool,
    /// Deepest frame nesting level searched (1 = direct children only).
    /// `None` searches every attached frame.
    pub max_frame_depth: Option<usize>,
}

impl Default for ConsentOptions {
    fn default() -> Self {
        Self {
            budget_ms: DEFAULT_CONSENT_BUDGET_MS,
            backoff_ms: DEFAULT_CONSENT_BACKOFF_MS,
            phrases: DEFAULT_CONSENT_PHRASES
                .iter()
                .map(ToString::to_string)
                .collect(),
            escape_fallback: true,
            search_frames: true,
            max_frame_depth: None,
        }
    }
}

impl ConsentOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total budget in milliseconds
    #[must_use]
    pub const fn with_budget_ms(mut self, budget_ms: u64) -> Self {
        self.budget_ms = budget_ms;
        self
    }

    /// Set the pause between sweeps in milliseconds
    #[must_use]
    pub const fn with_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.backoff_ms = backoff_ms;
        self
    }

    /// Replace the accept phrases
    #[must_use]
    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable the Escape key fallback
    #[must_use]
    pub const fn with_escape_fallback(mut self, enabled: bool) -> Self {
        self.escape_fallback = enabled;
        self
    }

    /// Enable or disable frame search
    #[must_use]
    pub const fn with_frame_search(mut self, enabled: bool) -> Self {
        self.search_frames = enabled;
        self
    }

    /// Limit frame search to `depth` levels below the page
    #[must_use]
    pub const fn with_max_frame_depth(mut self, depth: usize) -> Self {
        self.max_frame_depth = Some(depth);
        self
    }

    /// Budget as Duration
    #[must_use]
    pub const fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }

    /// Backoff as Duration
    #[must_use]
    pub const fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}
