//! Time-bounded consent overlay dismissal.
//!
//! Each sweep searches the page, then every attached frame depth-first, for
//! an accept control: first by accessible role and name, then by button
//! text. A sweep that finds nothing presses Escape and backs off. The run
//! ends as soon as a control is clicked or the budget is spent; neither
//! outcome is an error.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::Instrument;

use super::options::ConsentOptions;
use super::phrases::ConsentPhrases;
use super::root::{AriaRole, ConsentRoot, ElementHandle};
use crate::clock::{Clock, SharedClock, TokioClock};
use crate::result::{ProbeError, ProbeResult};

/// Key sent when a sweep finds no control
pub const ESCAPE_KEY: &str = "Escape";

/// Tag searched by the text fallback
const BUTTON_TAG: &str = "button";

/// Poller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsentState {
    /// Still looking
    Searching,
    /// A control was clicked (terminal)
    FoundAndClicked,
    /// Budget spent without a click (terminal)
    TimedOut,
}

impl ConsentState {
    /// Whether the run is over
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Searching)
    }

    /// State name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Searching => "searching",
            Self::FoundAndClicked => "found_and_clicked",
            Self::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for ConsentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which search located the clicked control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// Accessible role `button` with a matching name
    AccessibleName,
    /// `<button>` whose visible text contains a phrase
    ButtonText,
}

/// Result of one search in one root.
///
/// Interaction failures fold into `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptResult {
    /// A control was clicked
    Found(MatchStrategy),
    /// Nothing clickable this time
    NotFound,
}

impl AttemptResult {
    /// Whether a control was clicked
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Summary of a poller run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentOutcome {
    /// Terminal state
    pub state: ConsentState,
    /// Sweeps performed
    pub attempts: u32,
    /// Time spent, per the poller's clock
    pub elapsed: Duration,
    /// How the control was found, when one was clicked
    pub strategy: Option<MatchStrategy>,
    /// Root the control was clicked in
    pub location: Option<String>,
}

impl ConsentOutcome {
    fn dismissed(attempts: u32, elapsed: Duration, strategy: MatchStrategy, location: String) -> Self {
        Self {
            state: ConsentState::FoundAndClicked,
            attempts,
            elapsed,
            strategy: Some(strategy),
            location: Some(location),
        }
    }

    fn timed_out(attempts: u32, elapsed: Duration) -> Self {
        Self {
            state: ConsentState::TimedOut,
            attempts,
            elapsed,
            strategy: None,
            location: None,
        }
    }

    /// Whether an overlay control was clicked
    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        self.state == ConsentState::FoundAndClicked
    }
}

/// Best-effort consent overlay dismissal
#[derive(Debug, Clone)]
pub struct ConsentPoller {
    options: ConsentOptions,
    phrases: ConsentPhrases,
    clock: SharedClock,
}

impl ConsentPoller {
    /// Create a poller on the tokio clock
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Config`] if the phrase list is empty or
    /// the backoff is zero.
    pub fn new(options: ConsentOptions) -> ProbeResult<Self> {
        Self::with_clock(options, TokioClock::shared())
    }

    /// Create a poller on a custom clock
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProbeError::Config`] if the phrase list is empty or
    /// the backoff is zero.
    pub fn with_clock(options: ConsentOptions, clock: SharedClock) -> ProbeResult<Self> {
        if options.backoff_ms == 0 {
            return Err(ProbeError::config("consent backoff must be at least 1ms"));
        }
        let phrases = ConsentPhrases::new(&options.phrases)?;
        Ok(Self {
            options,
            phrases,
            clock,
        })
    }

    /// Options in use
    #[must_use]
    pub const fn options(&self) -> &ConsentOptions {
        &self.options
    }

    /// Compiled phrases in use
    #[must_use]
    pub const fn phrases(&self) -> &ConsentPhrases {
        &self.phrases
    }

    /// Run until a control is clicked or the budget is spent.
    pub async fn run(&self, page: &dyn ConsentRoot) -> ConsentOutcome {
        let span = tracing::debug_span!("consent", root = %page.describe(), budget_ms = self.options.budget_ms);
        self.run_inner(page).instrument(span).await
    }

    async fn run_inner(&self, page: &dyn ConsentRoot) -> ConsentOutcome {
        let start = self.clock.now_ms();
        let budget = self.options.budget_ms;
        let mut attempts = 0_u32;

        loop {
            let elapsed = self.clock.now_ms().saturating_sub(start);
            if elapsed >= budget {
                tracing::debug!(attempts, elapsed_ms = elapsed, "no consent overlay found");
                return ConsentOutcome::timed_out(attempts, Duration::from_millis(elapsed));
            }
            attempts += 1;

            if let Some((strategy, location)) = self.sweep(page).await {
                let elapsed = self.clock.now_ms().saturating_sub(start);
                tracing::info!(attempts, elapsed_ms = elapsed, %location, ?strategy, "dismissed consent overlay");
                return ConsentOutcome::dismissed(
                    attempts,
                    Duration::from_millis(elapsed),
                    strategy,
                    location,
                );
            }

            if self.options.escape_fallback {
                if let Err(err) = page.press_key(ESCAPE_KEY).await {
                    tracing::debug!(error = %err, "escape key press failed");
                }
            }

            let elapsed = self.clock.now_ms().saturating_sub(start);
            let remaining = budget.saturating_sub(elapsed);
            if remaining > 0 {
                self.clock
                    .sleep(Duration::from_millis(self.options.backoff_ms.min(remaining)))
                    .await;
            }
        }
    }

    /// One pass over the page and its frames
    async fn sweep(&self, page: &dyn ConsentRoot) -> Option<(MatchStrategy, String)> {
        if let AttemptResult::Found(strategy) = self.attempt_in(page).await {
            return Some((strategy, page.describe()));
        }
        if !self.options.search_frames || self.options.max_frame_depth == Some(0) {
            return None;
        }

        // depth-first, in document order
        let mut stack: Vec<(Arc<dyn ConsentRoot>, usize)> = self
            .frames_of(page)
            .await
            .into_iter()
            .rev()
            .map(|f| (f, 1))
            .collect();

        while let Some((frame, depth)) = stack.pop() {
            if let AttemptResult::Found(strategy) = self.attempt_in(frame.as_ref()).await {
                return Some((strategy, frame.describe()));
            }
            if !matches!(self.options.max_frame_depth, Some(max) if depth >= max) {
                let children = self.frames_of(frame.as_ref()).await;
                stack.extend(children.into_iter().rev().map(|f| (f, depth + 1)));
            }
        }
        None
    }

    /// Role search, then text search, in a single root
    pub async fn attempt_in(&self, root: &dyn ConsentRoot) -> AttemptResult {
        match root
            .find_by_role(AriaRole::Button, self.phrases.role_name_pattern())
            .await
        {
            Ok(Some(element)) => {
                if self.click_if_visible(root, &element).await {
                    return AttemptResult::Found(MatchStrategy::AccessibleName);
                }
            }
            Ok(None) => {}
            Err(err) => tracing::debug!(root = %root.describe(), error = %err, "role query failed"),
        }

        match root
            .find_by_text(BUTTON_TAG, self.phrases.text_pattern())
            .await
        {
            Ok(Some(element)) => {
                if self.click_if_visible(root, &element).await {
                    return AttemptResult::Found(MatchStrategy::ButtonText);
                }
            }
            Ok(None) => {}
            Err(err) => tracing::debug!(root = %root.describe(), error = %err, "text query failed"),
        }

        AttemptResult::NotFound
    }

    async fn click_if_visible(&self, root: &dyn ConsentRoot, element: &ElementHandle) -> bool {
        match root.is_visible(element).await {
            Ok(true) => {}
            Ok(false) => return false,
            Err(err) => {
                tracing::debug!(element = %element.id, error = %err, "visibility check failed");
                return false;
            }
        }
        match root.click(element).await {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(element = %element.id, error = %err, "click failed");
                false
            }
        }
    }

    async fn frames_of(&self, root: &dyn ConsentRoot) -> Vec<Arc<dyn ConsentRoot>> {
        root.child_frames().await.unwrap_or_else(|err| {
            tracing::debug!(root = %root.describe(), error = %err, "frame listing failed");
            Vec::new()
        })
    }
}

/// Dismiss a consent overlay with default options, if one shows up.
pub async fn accept_cookies_if_present(page: &dyn ConsentRoot) -> ConsentOutcome {
    match ConsentPoller::new(ConsentOptions::default()) {
        Ok(poller) => poller.run(page).await,
        Err(err) => {
            tracing::warn!(error = %err, "consent poller misconfigured");
            ConsentOutcome::timed_out(0, Duration::ZERO)
        }
    }
}
