//! Resource limits for JSON parsing.
//!
//! Parsing is recursive, so nesting depth maps directly onto stack usage.
//! These caps let callers bound time and memory before handing over
//! untrusted input such as an HTTP response body.
//!
//! - E110_InputTooLarge: Total input size limit
//! - E111_NestingTooDeep: Maximum nesting depth
//! - E112_StringTooLong: Maximum decoded string length
//! - E113_TooManyFields: Maximum object fields
//! - E114_ArrayTooLong: Maximum array length

/// Resource limits for JSON parsing.
///
/// Exceeding any limit is a hard error regardless of the recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total input size in bytes (E110)
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects (E111)
    pub max_nesting_depth: u64,
    /// Maximum decoded string length in bytes (E112)
    pub max_string_length: u64,
    /// Maximum number of fields in an object (E113)
    pub max_object_fields: u64,
    /// Maximum number of elements in an array (E114)
    pub max_array_length: u64,
}

impl Limits {
    /// Default limits: generous sizes, nesting capped well below the point
    /// where recursion would exhaust a default thread stack.
    pub const fn standard() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024,    // 64 MiB
            max_nesting_depth: 512,              // 512 levels
            max_string_length: 16 * 1024 * 1024, // 16 MiB
            max_object_fields: 1_000_000,        // 1M fields
            max_array_length: 10_000_000,        // 10M elements
        }
    }

    /// No limits at all. Deeply nested input may overflow the stack.
    pub const fn unbounded() -> Self {
        Self {
            max_input_size: u64::MAX,
            max_nesting_depth: u64::MAX,
            max_string_length: u64::MAX,
            max_object_fields: u64::MAX,
            max_array_length: u64::MAX,
        }
    }

    /// Same limits with a different nesting cap.
    pub const fn with_max_depth(mut self, depth: u64) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}
