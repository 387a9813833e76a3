//! JSON deserialization into a dynamic value tree.
//!
//! # Architecture
//!
//! - [`types`] - The [`Value`] tree
//! - [`lexer`] - Cursor and token classifier
//! - [`parser`] - Recursive descent parser
//! - [`limits`] - Resource limits
//! - [`options`] - Failure policy and limits for one call
//!
//! # Example
//!
//! ```
//! use dynjson::json::{deserialize, Value};
//!
//! let value = deserialize(r#"{"access_token":"abc","expires_in":1200}"#).unwrap();
//! assert_eq!(value.get("access_token").and_then(Value::as_str), Some("abc"));
//! assert_eq!(value.get("expires_in"), Some(&Value::Integer(1200)));
//! ```
//!
//! Lenient parsing turns structural errors into `null` nodes instead of
//! failing the call:
//!
//! ```
//! use dynjson::json::{deserialize_with, ParseOptions, Value};
//!
//! let value = deserialize_with(r#"{"a":oops,"b":2}"#, ParseOptions::lenient()).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::Null));
//! assert_eq!(value.get("b"), Some(&Value::Integer(2)));
//! ```

pub mod lexer;
pub mod limits;
pub mod options;
pub mod parser;
pub mod types;

// Re-export commonly used items
pub use limits::Limits;
pub use options::{ParseOptions, Recovery};
pub use parser::{deserialize, deserialize_opt, deserialize_with};
pub use types::{Map, Value};
