//! Storeprobe: support library for end-to-end tests of a demo e-commerce store
//!
//! Four small pieces the test suites lean on:
//!
//! - [`decode_body`]: JSON decoding that survives HTML-wrapped responses
//! - [`FormBody`] / [`to_form_urlencoded`]: ordered form bodies
//! - [`ConsentPoller`]: time-bounded cookie overlay dismissal over any
//!   [`ConsentRoot`] (page or frame)
//! - [`api::StoreApiClient`]: typed store REST client (feature `api`)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  STOREPROBE Architecture                 │
//! ├──────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌─────────────┐    │
//! │   │ api client │───►│  decoder   │    │   consent   │    │
//! │   │ (reqwest)  │    │ strict ->  │    │   poller    │    │
//! │   │            │─┐  │ embedded   │    │ Clock +     │    │
//! │   └────────────┘ │  └────────────┘    │ ConsentRoot │    │
//! │                  │  ┌────────────┐    └─────────────┘    │
//! │                  └─►│ form body  │                       │
//! │                     └────────────┘                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use storeprobe::{decode_body, FormBody};
//!
//! let json = decode_body(r#"<html>{"responseCode": 200}</html>"#).unwrap();
//! assert_eq!(json["responseCode"], 200);
//!
//! let body = FormBody::new()
//!     .field("search_product", "top")
//!     .field("page", None::<u32>);
//! assert_eq!(body.encode(), "search_product=top");
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod clock;
mod consent;
mod decode;
mod form;
mod result;

/// Store REST API client
#[cfg(feature = "api")]
pub mod api;

pub use clock::{Clock, FakeClock, SharedClock, TokioClock};
pub use consent::{
    accept_cookies_if_present, AriaRole, AttemptResult, ConsentOptions, ConsentOutcome,
    ConsentPhrases, ConsentPoller, ConsentRoot, ConsentState, ElementHandle, MatchStrategy,
    MockElement, MockRoot, DEFAULT_CONSENT_BACKOFF_MS, DEFAULT_CONSENT_BUDGET_MS,
    DEFAULT_CONSENT_PHRASES, ESCAPE_KEY,
};
pub use decode::{
    decode_as, decode_body, decode_with_source, embedded_span, Decoded, MAX_NESTING_DEPTH,
};
pub use form::{to_form_urlencoded, FormBody, FormValue, FORM_URLENCODED_CONTENT_TYPE};
pub use result::{ProbeError, ProbeResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::consent::*;
    pub use super::{
        decode_body, decode_with_source, to_form_urlencoded, Clock, Decoded, FormBody, FormValue,
        ProbeError, ProbeResult, TokioClock,
    };

    #[cfg(feature = "api")]
    pub use super::api::{ApiConfig, ApiResponse, StoreApiClient};
}
