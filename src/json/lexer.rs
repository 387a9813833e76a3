//! JSON lexer/token classifier.
//!
//! The lexer is a cursor over the input text. It reports which token class
//! begins at the cursor without always consuming it:
//!
//! - Closing punctuation, commas and colons are consumed on classification.
//! - `{`, `[`, `"`, digits and `-` are left in place for the parser, which
//!   reads the container or literal body itself.
//! - Bare words are consumed whole and matched against `true`, `false`
//!   and `null`.

use std::fmt;

use super::limits::Limits;
use crate::error::{ErrorCode, ParseResult};

/// Structural characters that end a bare word or numeric literal.
pub const WORD_BREAK: &str = "{}[],:\"";

/// Returns true for characters in the word-break set (structural punctuation
/// plus any whitespace).
pub fn is_word_break(c: char) -> bool {
    c.is_whitespace() || WORD_BREAK.contains(c)
}

/// Token classes reported by [`Lexer::classify_next_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `{`, left in place
    ObjectOpen,
    /// `}`, consumed
    ObjectClose,
    /// `[`, left in place
    ArrayOpen,
    /// `]`, consumed
    ArrayClose,
    /// `,`, consumed
    Comma,
    /// `:`, consumed
    Colon,
    /// Opening `"`, left in place
    StringStart,
    /// Digit or `-`, left in place
    NumberStart,
    /// `true`, consumed
    True,
    /// `false`, consumed
    False,
    /// `null`, consumed
    Null,
    /// Any other bare word, consumed
    Unrecognized(String),
    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::ObjectOpen => f.write_str("{"),
            Token::ObjectClose => f.write_str("}"),
            Token::ArrayOpen => f.write_str("["),
            Token::ArrayClose => f.write_str("]"),
            Token::Comma => f.write_str(","),
            Token::Colon => f.write_str(":"),
            Token::StringStart => f.write_str("string"),
            Token::NumberStart => f.write_str("number"),
            Token::True => f.write_str("true"),
            Token::False => f.write_str("false"),
            Token::Null => f.write_str("null"),
            Token::Unrecognized(word) => f.write_str(word),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

/// Cursor over JSON text.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str, limits: &Limits) -> ParseResult<Self> {
        // Check input size limit (E110)
        if input.len() as u64 > limits.max_input_size {
            return Err(ErrorCode::E110_InputTooLarge(
                input.len() as u64,
                limits.max_input_size,
            ));
        }

        Ok(Self {
            input,
            pos: 0,
            token_start: 0,
        })
    }

    /// Current byte offset into the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset where the most recently classified token began.
    pub fn token_position(&self) -> usize {
        self.token_start
    }

    /// Unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Returns true once every character has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the next character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Consume the maximal run of characters outside the word-break set.
    ///
    /// Used for bare literals and numbers. May return an empty slice.
    pub fn read_word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_word_break(c) {
                break;
            }
            self.advance();
        }
        &self.input[start..self.pos]
    }

    /// Skip whitespace and classify the token that starts at the cursor.
    pub fn classify_next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.token_start = self.pos;

        let Some(c) = self.peek() else {
            return Token::Eof;
        };

        match c {
            '{' => Token::ObjectOpen,
            '[' => Token::ArrayOpen,
            '"' => Token::StringStart,
            '-' | '0'..='9' => Token::NumberStart,
            '}' => self.consume(Token::ObjectClose),
            ']' => self.consume(Token::ArrayClose),
            ',' => self.consume(Token::Comma),
            ':' => self.consume(Token::Colon),
            _ => match self.read_word() {
                "true" => Token::True,
                "false" => Token::False,
                "null" => Token::Null,
                word => Token::Unrecognized(word.to_string()),
            },
        }
    }

    fn consume(&mut self, token: Token) -> Token {
        self.advance();
        token
    }
}
