//! Command handlers - kept out of main.rs for testability
//!
//! Each handler module holds the execution logic for one CLI command plus
//! its pure helpers and tests.

pub mod api;
pub mod decode;
pub mod encode;

pub use api::{call, client_config, execute_api, render_response, status_line};
pub use decode::{decode_text, execute_decode, read_input};
pub use encode::{build_form, execute_encode, parse_field, render_form};
