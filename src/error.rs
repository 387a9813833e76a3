//! Error codes for the deserializer.
//!
//! Every failure the parser can report is one variant of [`ErrorCode`].
//! Codes are grouped by class:
//!
//! - 100..=106: structural errors (a grammar token was expected but not found)
//! - 107..=108: content errors (a literal could not be converted)
//! - 110..=114: resource limits (see [`crate::json::Limits`])
//!
//! Structural errors are the only ones the parser may absorb when running
//! with [`crate::json::Recovery::NullOnError`]; everything else always
//! propagates to the caller.

use thiserror::Error;

/// Result type for deserialization.
pub type ParseResult<T> = Result<T, ErrorCode>;

/// All error codes reported by the deserializer.
///
/// Positions are byte offsets into the input text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// A token appeared where the grammar does not allow it (code 100)
    #[error("E100_UnexpectedToken({0}, {1})")]
    E100_UnexpectedToken(/* found */ String, /* position */ u64),

    /// An object key was not followed by `:` (code 101)
    #[error("E101_MissingColon({0})")]
    E101_MissingColon(/* position */ u64),

    /// Input ended before the closing `}` (code 102)
    #[error("E102_UnterminatedObject({0})")]
    E102_UnterminatedObject(/* position */ u64),

    /// Input ended before the closing `]` (code 103)
    #[error("E103_UnterminatedArray({0})")]
    E103_UnterminatedArray(/* position */ u64),

    /// Input ended before the closing quote (code 104)
    #[error("E104_UnterminatedString({0})")]
    E104_UnterminatedString(/* position */ u64),

    /// A bare word that is not `true`, `false` or `null` (code 105)
    #[error("E105_UnknownLiteral({0}, {1})")]
    E105_UnknownLiteral(/* word */ String, /* position */ u64),

    /// Non-whitespace input after the root value (code 106)
    #[error("E106_TrailingCharacters({0})")]
    E106_TrailingCharacters(/* position */ u64),

    /// A numeric literal that is not a valid i64 or f64 (code 107)
    #[error("E107_MalformedNumber({0}, {1})")]
    E107_MalformedNumber(/* literal */ String, /* position */ u64),

    /// A `\u` escape not followed by four hex digits (code 108)
    #[error("E108_InvalidUnicodeEscape({0}, {1})")]
    E108_InvalidUnicodeEscape(/* digits */ String, /* position */ u64),

    /// Input exceeds the configured size (code 110)
    #[error("E110_InputTooLarge({0}, {1})")]
    E110_InputTooLarge(/* len */ u64, /* max */ u64),

    /// Arrays/objects nested deeper than allowed (code 111)
    #[error("E111_NestingTooDeep({0}, {1})")]
    E111_NestingTooDeep(/* depth */ u64, /* max */ u64),

    /// A decoded string longer than allowed (code 112)
    #[error("E112_StringTooLong({0}, {1})")]
    E112_StringTooLong(/* len */ u64, /* max */ u64),

    /// An object with more fields than allowed (code 113)
    #[error("E113_TooManyFields({0}, {1})")]
    E113_TooManyFields(/* count */ u64, /* max */ u64),

    /// An array with more elements than allowed (code 114)
    #[error("E114_ArrayTooLong({0}, {1})")]
    E114_ArrayTooLong(/* count */ u64, /* max */ u64),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_UnexpectedToken(_, _) => 100,
            ErrorCode::E101_MissingColon(_) => 101,
            ErrorCode::E102_UnterminatedObject(_) => 102,
            ErrorCode::E103_UnterminatedArray(_) => 103,
            ErrorCode::E104_UnterminatedString(_) => 104,
            ErrorCode::E105_UnknownLiteral(_, _) => 105,
            ErrorCode::E106_TrailingCharacters(_) => 106,
            ErrorCode::E107_MalformedNumber(_, _) => 107,
            ErrorCode::E108_InvalidUnicodeEscape(_, _) => 108,
            ErrorCode::E110_InputTooLarge(_, _) => 110,
            ErrorCode::E111_NestingTooDeep(_, _) => 111,
            ErrorCode::E112_StringTooLong(_, _) => 112,
            ErrorCode::E113_TooManyFields(_, _) => 113,
            ErrorCode::E114_ArrayTooLong(_, _) => 114,
        }
    }

    /// Get the variant name, e.g. `"E107_MalformedNumber"`.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_UnexpectedToken(_, _) => "E100_UnexpectedToken",
            ErrorCode::E101_MissingColon(_) => "E101_MissingColon",
            ErrorCode::E102_UnterminatedObject(_) => "E102_UnterminatedObject",
            ErrorCode::E103_UnterminatedArray(_) => "E103_UnterminatedArray",
            ErrorCode::E104_UnterminatedString(_) => "E104_UnterminatedString",
            ErrorCode::E105_UnknownLiteral(_, _) => "E105_UnknownLiteral",
            ErrorCode::E106_TrailingCharacters(_) => "E106_TrailingCharacters",
            ErrorCode::E107_MalformedNumber(_, _) => "E107_MalformedNumber",
            ErrorCode::E108_InvalidUnicodeEscape(_, _) => "E108_InvalidUnicodeEscape",
            ErrorCode::E110_InputTooLarge(_, _) => "E110_InputTooLarge",
            ErrorCode::E111_NestingTooDeep(_, _) => "E111_NestingTooDeep",
            ErrorCode::E112_StringTooLong(_, _) => "E112_StringTooLong",
            ErrorCode::E113_TooManyFields(_, _) => "E113_TooManyFields",
            ErrorCode::E114_ArrayTooLong(_, _) => "E114_ArrayTooLong",
        }
    }

    /// Returns true for grammar violations (codes 100..=106).
    ///
    /// Only these may be absorbed into a `Null` node by lenient parsing.
    pub fn is_structural(&self) -> bool {
        (100..=106).contains(&self.code())
    }
}
