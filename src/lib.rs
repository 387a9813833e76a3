//! dynjson - a hand-written JSON deserializer.
//!
//! Converts JSON text into a dynamic [`Value`] tree of objects, arrays,
//! strings, numbers, booleans and null. Typical callers hand over a complete
//! HTTP response body and type-test the result, e.g. to read the
//! `access_token` field of a token response.
//!
//! # Architecture
//!
//! - [`json`] - Value tree, lexer, recursive descent parser, limits, options
//! - [`error`] - Numbered error codes
//! - [`conformance`] - JSON corpus of test vectors and a runner for it
//!
//! # Failure policies
//!
//! By default every error is returned to the caller. With
//! [`Recovery::NullOnError`] a structural error only nulls out the node it
//! occurred in; malformed numbers and limit violations still fail the call.

// Library code must avoid unwrap/expect/panic.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod json;

// Re-export commonly used types
pub use error::{ErrorCode, ParseResult};
pub use json::{
    deserialize, deserialize_opt, deserialize_with, Limits, Map, ParseOptions, Recovery, Value,
};
