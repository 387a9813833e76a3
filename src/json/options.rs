//! Parse configuration.
//!
//! [`ParseOptions`] bundles the failure policy with the resource
//! [`Limits`]. The default is strict: every error reaches the caller.

use super::limits::Limits;

/// What the parser does with a structural error (codes 100..=106).
///
/// Content errors (malformed numbers, bad `\u` escapes) and limit errors
/// always propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recovery {
    /// Abort the whole call with the error.
    #[default]
    Propagate,
    /// Replace the failing node with `Null`, attach it to its parent and
    /// keep parsing. An unterminated string ends at end of input and
    /// trailing content after the root value is ignored.
    NullOnError,
}

/// Options for a single deserialize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Failure policy for structural errors
    pub recovery: Recovery,
    /// Resource limits
    pub limits: Limits,
}

impl ParseOptions {
    /// Strict parsing with standard limits.
    pub const fn strict() -> Self {
        Self {
            recovery: Recovery::Propagate,
            limits: Limits::standard(),
        }
    }

    /// Null-on-error parsing with standard limits.
    pub const fn lenient() -> Self {
        Self {
            recovery: Recovery::NullOnError,
            limits: Limits::standard(),
        }
    }

    /// Replace the limits.
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns true when structural errors are absorbed.
    pub fn is_lenient(&self) -> bool {
        self.recovery == Recovery::NullOnError
    }
}
