//! Shared utilities for the Nemesis client workspace.
//!
//! This crate holds the small pieces every other crate leans on:
//!
//! - **error location capture**: every error variant in the workspace
//!   carries the file/line/column it was raised from
//! - **secret handling**: passwords travel as [`RedactedSecret`] so they
//!   never leak through `Debug`, `Display` or serde
//! - **HTTP status categorization**: status-code checks live here instead
//!   of being re-derived from error message strings

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
