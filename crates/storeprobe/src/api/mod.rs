//! Typed access to the demo store's REST API.
//!
//! ```text
//! StoreApiClient ──reqwest──► https://automationexercise.com/api/...
//!       │
//!       └─► ApiResponse { status, body, decoded }  (tolerant decoder)
//! ```

mod client;
mod config;
mod types;

pub use client::{endpoints, StoreApiClient};
pub use config::{
    join_endpoint, ApiConfig, BASE_URL_ENV, DEFAULT_API_TIMEOUT_MS, DEFAULT_BASE_URL, TIMEOUT_ENV,
};
pub use types::{
    messages, AccountForm, AddressUpdate, ApiResponse, Brand, Category, Product, UserDetail,
    UserType,
};

pub use reqwest::Method;
