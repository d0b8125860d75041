//! Cookie consent overlay dismissal.
//!
//! Best effort only: a page without an overlay costs the full budget and
//! yields [`ConsentState::TimedOut`], never an error.

mod options;
mod phrases;
mod poller;
mod root;

pub use options::{ConsentOptions, DEFAULT_CONSENT_BACKOFF_MS, DEFAULT_CONSENT_BUDGET_MS};
pub use phrases::{ConsentPhrases, DEFAULT_CONSENT_PHRASES};
pub use poller::{
    accept_cookies_if_present, AttemptResult, ConsentOutcome, ConsentPoller, ConsentState,
    MatchStrategy, ESCAPE_KEY,
};
pub use root::{AriaRole, ConsentRoot, ElementHandle, MockElement, MockRoot};
