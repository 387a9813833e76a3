//! Recursive descent JSON parser.
//!
//! The parser owns a [`Lexer`] and dispatches on the token it classifies.
//! Each production is a method, so the cursor is threaded through the
//! recursion as the receiver. Recursion depth equals nesting depth.
//!
//! Grammar quirks worth knowing:
//!
//! - Commas are consumed wherever they appear and never validated, so
//!   `[1 2]`, `[,1]` and `{"a":1 "b":2}` all parse.
//! - A bare scalar is a valid root value.
//! - Empty or whitespace-only input is `null`.
//!
//! Structural errors either abort the call or become `Null` nodes depending
//! on [`Recovery`](super::options::Recovery).

use tracing::{debug, trace};

use super::lexer::{Lexer, Token};
use super::options::ParseOptions;
use super::types::{Map, Value};
use crate::error::{ErrorCode, ParseResult};

/// Recursive descent parser over a single input.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: ParseOptions,
    depth: u64,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a str, options: ParseOptions) -> ParseResult<Self> {
        let lexer = Lexer::new(input, &options.limits)?;
        Ok(Self {
            lexer,
            options,
            depth: 0,
        })
    }

    /// Parse the root value.
    pub fn parse(&mut self) -> ParseResult<Value> {
        let value = match self.lexer.classify_next_token() {
            Token::Eof => Value::Null,
            token => self.parse_value(token)?,
        };

        if !self.options.is_lenient() {
            self.lexer.skip_whitespace();
            if !self.lexer.is_at_end() {
                return Err(ErrorCode::E106_TrailingCharacters(
                    self.lexer.position() as u64,
                ));
            }
        }

        Ok(value)
    }

    /// Parse the value that starts with an already classified token.
    fn parse_value(&mut self, token: Token) -> ParseResult<Value> {
        match token {
            Token::StringStart => self.parse_string().map(Value::String),
            Token::NumberStart => self.parse_number(),
            Token::ObjectOpen => self.parse_object(),
            Token::ArrayOpen => self.parse_array(),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::Null => Ok(Value::Null),
            Token::Unrecognized(word) => {
                let pos = self.lexer.token_position() as u64;
                self.recover(ErrorCode::E105_UnknownLiteral(word, pos))
            }
            other => {
                let pos = self.lexer.token_position() as u64;
                self.recover(ErrorCode::E100_UnexpectedToken(other.to_string(), pos))
            }
        }
    }

    /// Apply the recovery policy to an error raised by the current node.
    fn recover(&self, err: ErrorCode) -> ParseResult<Value> {
        if self.options.is_lenient() && err.is_structural() {
            debug!(code = err.code(), error = %err, "structural error replaced with null");
            return Ok(Value::Null);
        }
        Err(err)
    }

    /// Enter a container, checking the nesting limit (E111).
    fn enter(&mut self) -> ParseResult<()> {
        let max = self.options.limits.max_nesting_depth;
        if self.depth >= max {
            return Err(ErrorCode::E111_NestingTooDeep(self.depth + 1, max));
        }
        self.depth += 1;
        Ok(())
    }

    /// Parse a JSON object. The cursor is on `{`.
    fn parse_object(&mut self) -> ParseResult<Value> {
        self.enter()?;
        let start = self.lexer.position() as u64;

        // Consume opening brace
        self.lexer.advance();

        let result = self.parse_members(start);
        self.depth -= 1;
        match result {
            Ok(map) => Ok(Value::Object(map)),
            Err(err) => self.recover(err),
        }
    }

    fn parse_members(&mut self, start: u64) -> ParseResult<Map> {
        let max_fields = self.options.limits.max_object_fields;
        let mut map = Map::new();

        loop {
            match self.lexer.classify_next_token() {
                Token::ObjectClose => return Ok(map),
                Token::Eof => return Err(ErrorCode::E102_UnterminatedObject(start)),
                Token::Comma => continue,
                Token::StringStart => {}
                other => {
                    return Err(ErrorCode::E100_UnexpectedToken(
                        other.to_string(),
                        self.lexer.token_position() as u64,
                    ))
                }
            }

            let key = self.parse_string()?;

            match self.lexer.classify_next_token() {
                Token::Colon => {}
                Token::Eof => return Err(ErrorCode::E102_UnterminatedObject(start)),
                _ => {
                    return Err(ErrorCode::E101_MissingColon(
                        self.lexer.token_position() as u64,
                    ))
                }
            }

            let value = match self.lexer.classify_next_token() {
                Token::Eof => return Err(ErrorCode::E102_UnterminatedObject(start)),
                token => self.parse_value(token)?,
            };

            // Last write wins on duplicate keys
            map.insert(key, value);

            if map.len() as u64 > max_fields {
                return Err(ErrorCode::E113_TooManyFields(map.len() as u64, max_fields));
            }
        }
    }

    /// Parse a JSON array. The cursor is on `[`.
    fn parse_array(&mut self) -> ParseResult<Value> {
        self.enter()?;
        let start = self.lexer.position() as u64;

        // Consume opening bracket
        self.lexer.advance();

        let result = self.parse_elements(start);
        self.depth -= 1;
        match result {
            Ok(items) => Ok(Value::Array(items)),
            Err(err) => self.recover(err),
        }
    }

    fn parse_elements(&mut self, start: u64) -> ParseResult<Vec<Value>> {
        let max_len = self.options.limits.max_array_length;
        let mut items = Vec::new();
        let mut pending = None;

        loop {
            let token = match pending.take() {
                Some(token) => token,
                None => self.lexer.classify_next_token(),
            };
            let value = match token {
                Token::ArrayClose => return Ok(items),
                Token::Eof => return Err(ErrorCode::E103_UnterminatedArray(start)),
                Token::Comma if self.options.is_lenient() => {
                    // A word after a comma is read as an element and nulled alone
                    match self.lexer.classify_next_token() {
                        word @ Token::Unrecognized(_) => self.parse_value(word)?,
                        next => {
                            pending = Some(next);
                            continue;
                        }
                    }
                }
                Token::Comma => continue,
                // An unknown word the array loop sees fails the whole array
                Token::Unrecognized(word) => {
                    return Err(ErrorCode::E105_UnknownLiteral(
                        word,
                        self.lexer.token_position() as u64,
                    ))
                }
                token => self.parse_value(token)?,
            };

            items.push(value);

            if items.len() as u64 > max_len {
                return Err(ErrorCode::E114_ArrayTooLong(items.len() as u64, max_len));
            }
        }
    }

    /// Parse a string. The cursor is on the opening quote.
    fn parse_string(&mut self) -> ParseResult<String> {
        let start = self.lexer.position() as u64;
        let max_len = self.options.limits.max_string_length;

        // Consume opening quote
        self.lexer.advance();

        let mut result = String::new();
        loop {
            let Some(c) = self.lexer.advance() else {
                self.end_of_input_in_string(start)?;
                break;
            };

            match c {
                '"' => break,
                '\\' => {
                    let Some(escaped) = self.lexer.advance() else {
                        self.end_of_input_in_string(start)?;
                        break;
                    };
                    match escaped {
                        '"' | '\\' | '/' => result.push(escaped),
                        'b' => result.push('\x08'),
                        'f' => result.push('\x0C'),
                        'n' => result.push('\n'),
                        'r' => result.push('\r'),
                        't' => result.push('\t'),
                        'u' => result.push(self.parse_unicode_escape()?),
                        // Unknown escapes are dropped
                        _ => {}
                    }
                }
                c => result.push(c),
            }

            // Check string length limit (E112)
            if result.len() as u64 > max_len {
                return Err(ErrorCode::E112_StringTooLong(result.len() as u64, max_len));
            }
        }

        Ok(result)
    }

    /// Input ran out inside a string. Lenient parsing ends the string there.
    fn end_of_input_in_string(&self, start: u64) -> ParseResult<()> {
        if self.options.is_lenient() {
            debug!(start, "unterminated string closed at end of input");
            return Ok(());
        }
        Err(ErrorCode::E104_UnterminatedString(start))
    }

    /// Decode the four hex digits after `\u`.
    ///
    /// A high surrogate directly followed by a `\u` low surrogate decodes to
    /// the supplementary-plane character they encode. Any other surrogate
    /// becomes U+FFFD since `String` cannot hold it.
    fn parse_unicode_escape(&mut self) -> ParseResult<char> {
        let unit = self.read_hex4()?;

        if (0xD800..=0xDBFF).contains(&unit) {
            if let Some(low) = self.take_low_surrogate() {
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }

        Ok(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Read exactly four hex digits (E108 otherwise).
    fn read_hex4(&mut self) -> ParseResult<u32> {
        let pos = self.lexer.position() as u64;
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            match self.lexer.advance() {
                Some(c) if c.is_ascii_hexdigit() => digits.push(c),
                Some(c) => {
                    digits.push(c);
                    return Err(ErrorCode::E108_InvalidUnicodeEscape(digits, pos));
                }
                None => return Err(ErrorCode::E108_InvalidUnicodeEscape(digits, pos)),
            }
        }
        u32::from_str_radix(&digits, 16)
            .map_err(|_| ErrorCode::E108_InvalidUnicodeEscape(digits.clone(), pos))
    }

    /// Consume a following `\uDC00`..`\uDFFF` escape if there is one.
    fn take_low_surrogate(&mut self) -> Option<u32> {
        let digits = self.lexer.rest().strip_prefix("\\u")?.get(..4)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let low = u32::from_str_radix(digits, 16).ok()?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return None;
        }
        for _ in 0..6 {
            self.lexer.advance();
        }
        Some(low)
    }

    /// Parse a number. The literal runs to the next word break; it is an
    /// i64 unless it contains `.`, in which case it is an f64.
    fn parse_number(&mut self) -> ParseResult<Value> {
        let pos = self.lexer.position() as u64;
        let literal = self.lexer.read_word();
        let malformed = || ErrorCode::E107_MalformedNumber(literal.to_string(), pos);

        if literal.contains('.') {
            literal.parse::<f64>().map(Value::Float).map_err(|_| malformed())
        } else {
            literal.parse::<i64>().map(Value::Integer).map_err(|_| malformed())
        }
    }
}

/// Deserialize JSON text with default (strict) options.
pub fn deserialize(text: &str) -> ParseResult<Value> {
    deserialize_with(text, ParseOptions::default())
}

/// Deserialize JSON text with custom options.
pub fn deserialize_with(text: &str, options: ParseOptions) -> ParseResult<Value> {
    trace!(len = text.len(), lenient = options.is_lenient(), "deserialize");
    let mut parser = Parser::new(text, options)?;
    parser.parse()
}

/// Deserialize optional JSON text. `None` is `Value::Null`.
pub fn deserialize_opt(text: Option<&str>) -> ParseResult<Value> {
    match text {
        Some(text) => deserialize(text),
        None => Ok(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::Limits;

    fn parse_lenient(input: &str) -> ParseResult<Value> {
        deserialize_with(input, ParseOptions::lenient())
    }

    fn object(entries: &[(&str, Value)]) -> Value {
        Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(deserialize("null").unwrap(), Value::Null);
        assert_eq!(deserialize("true").unwrap(), Value::Bool(true));
        assert_eq!(deserialize("false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(deserialize("").unwrap(), Value::Null);
        assert_eq!(deserialize("  \n").unwrap(), Value::Null);
        assert_eq!(deserialize_opt(None).unwrap(), Value::Null);
        assert_eq!(deserialize_opt(Some("1")).unwrap(), Value::Integer(1));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(deserialize("42").unwrap(), Value::Integer(42));
        assert_eq!(deserialize("-3").unwrap(), Value::Integer(-3));
        assert_eq!(deserialize("42.0").unwrap(), Value::Float(42.0));
        assert_eq!(deserialize("-0.5").unwrap(), Value::Float(-0.5));
        assert_eq!(deserialize("1.5e3").unwrap(), Value::Float(1500.0));
        assert_eq!(
            deserialize("9223372036854775807").unwrap(),
            Value::Integer(i64::MAX)
        );
    }

    #[test]
    fn test_malformed_numbers() {
        for input in ["1x", "-", "1e5", "1.2.3", "9223372036854775808", "--1"] {
            let err = deserialize(input).unwrap_err();
            assert_eq!(err.code(), 107, "input {input:?}");
        }
    }

    #[test]
    fn test_malformed_number_is_hard_in_lenient_mode() {
        let err = parse_lenient("[1x]").unwrap_err();
        assert_eq!(err, ErrorCode::E107_MalformedNumber("1x".to_string(), 1));
    }

    #[test]
    fn test_parse_string_escapes() {
        assert_eq!(
            deserialize(r#""a\nb""#).unwrap(),
            Value::from("a\nb")
        );
        assert_eq!(
            deserialize(r#""\"\\\/\b\f\n\r\t""#).unwrap(),
            Value::from("\"\\/\x08\x0C\n\r\t")
        );
        assert_eq!(deserialize(r#""\u0041""#).unwrap(), Value::from("A"));
        assert_eq!(deserialize(r#""\u00e9""#).unwrap(), Value::from("é"));
    }

    #[test]
    fn test_unknown_escape_dropped() {
        assert_eq!(deserialize(r#""a\qb""#).unwrap(), Value::from("ab"));
    }

    #[test]
    fn test_surrogates() {
        assert_eq!(
            deserialize(r#""\uD83D\uDE00""#).unwrap(),
            Value::from("\u{1F600}")
        );
        assert_eq!(
            deserialize(r#""\uD83Dx""#).unwrap(),
            Value::from("\u{FFFD}x")
        );
        assert_eq!(
            deserialize(r#""\uDE00""#).unwrap(),
            Value::from("\u{FFFD}")
        );
        assert_eq!(
            deserialize(r#""\uD83D\u0041""#).unwrap(),
            Value::from("\u{FFFD}A")
        );
    }

    #[test]
    fn test_invalid_unicode_escape() {
        let err = deserialize(r#""\u00G1""#).unwrap_err();
        assert_eq!(err, ErrorCode::E108_InvalidUnicodeEscape("00G".to_string(), 3));

        let err = parse_lenient(r#""\u12"#).unwrap_err();
        assert_eq!(err.code(), 108);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            deserialize(r#""abc"#).unwrap_err(),
            ErrorCode::E104_UnterminatedString(0)
        );
        assert_eq!(parse_lenient(r#""abc"#).unwrap(), Value::from("abc"));
        assert_eq!(parse_lenient(r#""abc\"#).unwrap(), Value::from("abc"));
    }

    #[test]
    fn test_parse_array() {
        assert_eq!(deserialize("[]").unwrap(), Value::Array(vec![]));
        assert_eq!(
            deserialize("[1, 2, 3]").unwrap(),
            Value::Array(vec![
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3),
            ])
        );
    }

    #[test]
    fn test_parse_object() {
        assert_eq!(deserialize("{}").unwrap(), Value::Object(Map::new()));
        assert_eq!(
            deserialize(r#"{"a": 1, "b": "x"}"#).unwrap(),
            object(&[("a", Value::Integer(1)), ("b", Value::from("x"))])
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        assert_eq!(
            deserialize(r#"{"k":1,"k":2}"#).unwrap(),
            object(&[("k", Value::Integer(2))])
        );
    }

    #[test]
    fn test_escaped_keys() {
        let value = deserialize(r#"{"a\u0062":true}"#).unwrap();
        assert_eq!(value.get("ab"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_commas_not_validated() {
        let expected = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(deserialize("[1 2]").unwrap(), expected);
        assert_eq!(deserialize("[,1,,2,]").unwrap(), expected);
        assert_eq!(
            deserialize(r#"{"a":1 "b":2,}"#).unwrap(),
            object(&[("a", Value::Integer(1)), ("b", Value::Integer(2))])
        );
    }

    #[test]
    fn test_literals_inside_containers() {
        assert_eq!(
            deserialize("[true,false,null]").unwrap(),
            Value::Array(vec![Value::Bool(true), Value::Bool(false), Value::Null])
        );
    }

    #[test]
    fn test_structural_errors_strict() {
        let cases = [
            (r#"{"a" 1}"#, 101),
            ("{1:2}", 100),
            (r#"{"a":1"#, 102),
            (r#"{"a":"#, 102),
            ("[1, 2", 103),
            ("[1, nope]", 105),
            ("nope", 105),
            ("}", 100),
            (r#"{"a":]}"#, 100),
            ("1 2", 106),
            ("{} x", 106),
        ];
        for (input, code) in cases {
            let err = deserialize(input).unwrap_err();
            assert_eq!(err.code(), code, "input {input:?}: {err}");
        }
    }

    #[test]
    fn test_structural_errors_lenient() {
        assert_eq!(parse_lenient("nope").unwrap(), Value::Null);
        assert_eq!(parse_lenient("[1, 2").unwrap(), Value::Null);
        assert_eq!(
            parse_lenient("[1, nope]").unwrap(),
            Value::Array(vec![Value::Integer(1), Value::Null])
        );
        assert_eq!(parse_lenient("1 2").unwrap(), Value::Integer(1));
        assert_eq!(
            parse_lenient(r#"{"a":nope,"b":2}"#).unwrap(),
            object(&[("a", Value::Null), ("b", Value::Integer(2))])
        );
        // The object gives up at the missing colon; its leftovers `1}` are
        // then read as array elements.
        assert_eq!(
            parse_lenient(r#"[{"a" 1}, 7]"#).unwrap(),
            Value::Array(vec![
                Value::Null,
                Value::Integer(1),
                Value::Null,
                Value::Integer(7),
            ])
        );
    }

    #[test]
    fn test_unknown_word_in_array_lenient() {
        assert_eq!(
            parse_lenient("[1, nope, 3]").unwrap(),
            Value::Array(vec![Value::Integer(1), Value::Null, Value::Integer(3)])
        );
        assert_eq!(
            parse_lenient("[1,,nope]").unwrap(),
            Value::Array(vec![Value::Integer(1), Value::Null])
        );
        assert_eq!(
            parse_lenient("[1,]").unwrap(),
            Value::Array(vec![Value::Integer(1)])
        );
        // Without a comma in front the word fails the array
        assert_eq!(parse_lenient("[nope]").unwrap(), Value::Null);
        assert_eq!(parse_lenient("[1 nope]").unwrap(), Value::Null);
        assert_eq!(
            deserialize("[1, nope]").unwrap_err(),
            ErrorCode::E105_UnknownLiteral("nope".to_string(), 4)
        );
    }

    #[test]
    fn test_nesting_depth_limit() {
        let limits = Limits::standard().with_max_depth(2);
        let options = ParseOptions::strict().with_limits(limits);

        // Depth 2 is allowed
        assert!(deserialize_with("[[1]]", options).is_ok());

        // Depth 3 exceeds limit
        assert_eq!(
            deserialize_with("[[[1]]]", options).unwrap_err(),
            ErrorCode::E111_NestingTooDeep(3, 2)
        );

        // Limits are hard errors even when lenient
        let lenient = ParseOptions::lenient().with_limits(limits);
        assert_eq!(deserialize_with(r#"{"a":[{}]}"#, lenient).unwrap_err().code(), 111);
    }

    #[test]
    fn test_object_field_limit() {
        let mut limits = Limits::standard();
        limits.max_object_fields = 2;
        let options = ParseOptions::strict().with_limits(limits);

        assert!(deserialize_with(r#"{"a": 1, "b": 2, "a": 3}"#, options).is_ok());
        let err = deserialize_with(r#"{"a": 1, "b": 2, "c": 3}"#, options).unwrap_err();
        assert_eq!(err, ErrorCode::E113_TooManyFields(3, 2));
    }

    #[test]
    fn test_array_length_limit() {
        let mut limits = Limits::standard();
        limits.max_array_length = 2;
        let options = ParseOptions::strict().with_limits(limits);

        let err = deserialize_with("[1, 2, 3]", options).unwrap_err();
        assert_eq!(err, ErrorCode::E114_ArrayTooLong(3, 2));
    }

    #[test]
    fn test_string_length_limit() {
        let mut limits = Limits::standard();
        limits.max_string_length = 3;
        let options = ParseOptions::strict().with_limits(limits);

        assert!(deserialize_with(r#""abc""#, options).is_ok());
        assert_eq!(
            deserialize_with(r#""abcd""#, options).unwrap_err().code(),
            112
        );
    }

    #[test]
    fn test_nested_structure() {
        let result = deserialize(r#"{"arr": [1, {"nested": true}], "num": 42.5}"#).unwrap();
        assert!(result.is_object());
        let arr = result.get("arr").unwrap();
        assert!(arr.is_array());
        assert_eq!(
            arr.get_index(1).and_then(|v| v.get("nested")),
            Some(&Value::Bool(true))
        );
        assert_eq!(result.get("num"), Some(&Value::Float(42.5)));
    }
}
