//! Error types for the GraphQL lexer and parser.
//!
//! Provides detailed, context-rich error messages for malformed query text.

use super::syntax::SyntaxKind;
use thiserror::Error;

/// The kind of syntax error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter,
    /// String literal without a closing quote on the same line.
    UnterminatedString,
    /// Block string without closing `"""`.
    UnterminatedBlockString,
    /// Unknown escape sequence in a string.
    InvalidEscapeSequence,
    /// Malformed `\u` escape.
    InvalidUnicodeEscape,
    /// Malformed numeric literal.
    InvalidNumber,
    /// Encountered an unexpected token.
    UnexpectedToken,
    /// Reached end of input unexpectedly.
    UnexpectedEof,
    /// Expected a specific keyword.
    ExpectedKeyword,
    /// Variable used where only constant values are allowed.
    VariableInConstValue,
    /// `on` used as a fragment name.
    ReservedFragmentName,
    /// `true`, `false` or `null` used as an enum value.
    ReservedEnumValueName,
    /// Description in front of an operation or fragment.
    UnexpectedDescription,
    /// Unknown name after `on` in a directive definition.
    UnknownDirectiveLocation,
}

impl ParseErrorKind {
    /// Returns a human-readable description of this error kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedBlockString => "unterminated block string",
            Self::InvalidEscapeSequence => "invalid character escape sequence",
            Self::InvalidUnicodeEscape => "invalid unicode escape sequence",
            Self::InvalidNumber => "invalid number",
            Self::UnexpectedToken => "unexpected token",
            Self::UnexpectedEof => "unexpected end of input",
            Self::ExpectedKeyword => "expected keyword",
            Self::VariableInConstValue => "variables are not allowed in constant values",
            Self::ReservedFragmentName => "unexpected fragment name",
            Self::ReservedEnumValueName => "reserved enum value name",
            Self::UnexpectedDescription => "unexpected description",
            Self::UnknownDirectiveLocation => "unknown directive location",
        }
    }

    /// Returns a suggested fix for this error kind.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnterminatedString => Some("add a closing \" before the end of the line"),
            Self::UnterminatedBlockString => Some("add a closing \"\"\""),
            Self::InvalidEscapeSequence => {
                Some("use a valid escape: \\\", \\\\, \\/, \\b, \\f, \\n, \\r, \\t or \\uXXXX")
            }
            Self::ReservedFragmentName => Some("`on` cannot be used as a fragment name"),
            Self::ReservedEnumValueName => Some("`true`, `false` and `null` cannot be enum values"),
            Self::UnexpectedDescription => {
                Some("descriptions are supported only on type system definitions")
            }
            _ => None,
        }
    }
}

/// A detailed syntax error with context information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.to_message())]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Byte offset in the query text where the error occurred.
    pub position: usize,
    /// What tokens/constructs were expected.
    pub expected: Vec<String>,
    /// What was actually found.
    pub found: Option<String>,
    /// Optional help text for fixing the error.
    pub help: Option<String>,
}

impl ParseError {
    /// Creates a new syntax error.
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        let help = kind.suggestion().map(str::to_string);
        Self {
            kind,
            position,
            expected: Vec::new(),
            found: None,
            help,
        }
    }

    /// Creates an "unexpected character" error.
    pub fn unexpected_character(position: usize, found: char) -> Self {
        Self::new(ParseErrorKind::UnexpectedCharacter, position).with_found(&format!("{found:?}"))
    }

    /// Creates an "unexpected token" error.
    pub fn unexpected_token(position: usize, expected: &[&str], found: &str) -> Self {
        let kind = if found == SyntaxKind::Eof.describe() {
            ParseErrorKind::UnexpectedEof
        } else {
            ParseErrorKind::UnexpectedToken
        };
        Self::new(kind, position)
            .with_expected(expected)
            .with_found(found)
    }

    /// Creates an "expected keyword" error.
    pub fn expected_keyword(position: usize, keyword: &str, found: &str) -> Self {
        Self::new(ParseErrorKind::ExpectedKeyword, position)
            .with_expected(&[&format!("\"{keyword}\"")])
            .with_found(found)
    }

    /// Creates an "unexpected description" error for the definition keyword `found`.
    pub fn unexpected_description(position: usize, found: &str) -> Self {
        Self::new(ParseErrorKind::UnexpectedDescription, position)
            .with_expected(&["\"schema\"", "\"scalar\"", "\"type\"", "\"interface\"", "\"union\"", "\"enum\"", "\"input\"", "\"directive\""])
            .with_found(found)
    }

    /// Adds expected tokens to the error.
    pub fn with_expected(mut self, expected: &[&str]) -> Self {
        self.expected = expected.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Adds the found token to the error.
    pub fn with_found(mut self, found: &str) -> Self {
        self.found = Some(found.to_string());
        self
    }

    /// Adds help text to the error.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Converts the error to a user-friendly message.
    ///
    /// The help text is not part of the message; code frames print it on
    /// their own line.
    pub fn to_message(&self) -> String {
        let mut msg = format!("GraphQL syntax error at position {}: ", self.position);

        msg.push_str(self.kind.description());

        if let Some(ref found) = self.found {
            msg.push_str(&format!(", found {found}"));
        }

        if !self.expected.is_empty() {
            if self.expected.len() == 1 {
                msg.push_str(&format!(", expected {}", self.expected[0]));
            } else {
                msg.push_str(&format!(", expected one of: {}", self.expected.join(", ")));
            }
        }

        msg
    }
}

/// Result type for GraphQL lexing and parsing.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message() {
        let err = ParseError::unexpected_token(12, &["Name"], "\"}\"");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        let msg = err.to_message();
        assert!(msg.contains("position 12"));
        assert!(msg.contains("unexpected token"));
        assert!(msg.contains("found \"}\""));
        assert!(msg.contains("expected Name"));
    }

    #[test]
    fn test_eof_is_its_own_kind() {
        let err = ParseError::unexpected_token(3, &["\"}\""], "<EOF>");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert!(err.to_message().contains("unexpected end of input"));
    }

    #[test]
    fn test_multiple_expected() {
        let err = ParseError::unexpected_description(0, "Name \"query\"");
        let msg = err.to_message();
        assert!(msg.contains("expected one of:"));
        assert!(msg.contains("\"type\""));
    }

    #[test]
    fn test_message_leaves_help_to_the_frame() {
        let err = ParseError::unexpected_description(0, "Name \"query\"");
        assert!(err.help.is_some());
        assert!(!err.to_message().contains("help:"));
        assert_eq!(err.to_string(), err.to_message());
    }

    #[test]
    fn test_suggestion_is_default_help() {
        let err = ParseError::new(ParseErrorKind::UnterminatedBlockString, 0);
        assert_eq!(err.help.as_deref(), Some("add a closing \"\"\""));

        let err = ParseError::new(ParseErrorKind::UnexpectedToken, 0);
        assert!(err.help.is_none());
    }

    #[test]
    fn test_with_help_overrides() {
        let err = ParseError::new(ParseErrorKind::InvalidNumber, 4).with_help("numbers cannot be followed by names");
        assert_eq!(err.help.as_deref(), Some("numbers cannot be followed by names"));
    }

    #[test]
    fn test_unexpected_character_found_text() {
        let err = ParseError::unexpected_character(7, '?');
        assert_eq!(err.found.as_deref(), Some("'?'"));
    }
}
