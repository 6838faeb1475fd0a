//! Lexer for GraphQL source text.
//!
//! The lexer produces significant tokens on demand. Whitespace, line
//! terminators, commas, comments and the byte order mark are skipped.
//! String tokens carry their decoded value; block strings are dedented the
//! same way graphql-js does it.

use super::errors::{ParseError, ParseErrorKind, ParseResult};
use super::syntax::SyntaxKind;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// Source text for names and numbers, decoded value for strings.
    pub value: String,
    /// Byte offset where this token starts.
    pub start: usize,
    /// Byte offset just past the end of this token.
    pub end: usize,
}

impl Token {
    /// Returns the token text used in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            SyntaxKind::Name | SyntaxKind::Int | SyntaxKind::Float => {
                format!("{} \"{}\"", self.kind.describe(), self.value)
            }
            SyntaxKind::String | SyntaxKind::BlockString => {
                format!("{} {:?}", self.kind.describe(), self.value)
            }
            kind => kind.describe().to_string(),
        }
    }
}

/// The lexer for GraphQL input.
pub struct Lexer<'a> {
    /// The input text.
    input: &'a str,
    /// Current byte position in the input.
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input from the current position.
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Peeks at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Advances the position by n bytes.
    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Consumes the next character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.advance(c.len_utf8());
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if pred(c) {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    /// Tokenizes the entire input, ending with an `Eof` token.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == SyntaxKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Returns the next significant token.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_ignored();

        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(self.token(SyntaxKind::Eof, String::new(), start));
        };

        if let Some(kind) = SyntaxKind::from_punctuator(c) {
            self.advance(1);
            return Ok(self.token(kind, String::new(), start));
        }

        match c {
            '.' => {
                if self.remaining().starts_with("...") {
                    self.advance(3);
                    Ok(self.token(SyntaxKind::Spread, String::new(), start))
                } else {
                    Err(ParseError::unexpected_character(start, c)
                        .with_help("did you mean \"...\"?"))
                }
            }
            '"' if self.remaining().starts_with("\"\"\"") => self.lex_block_string(start),
            '"' => self.lex_string(start),
            c if is_name_start(c) => {
                let name = self.consume_while(is_name_continue);
                Ok(self.token(SyntaxKind::Name, name.to_string(), start))
            }
            c if c == '-' || c.is_ascii_digit() => self.lex_number(start),
            c => Err(ParseError::unexpected_character(start, c)),
        }
    }

    fn token(&self, kind: SyntaxKind, value: String, start: usize) -> Token {
        Token {
            kind,
            value,
            start,
            end: self.pos,
        }
    }

    /// Skips whitespace, line terminators, commas, comments and the BOM.
    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\u{feff}' | '\t' | ' ' | ',' | '\n' | '\r' => self.advance(c.len_utf8()),
                '#' => {
                    self.consume_while(|c| c != '\n' && c != '\r');
                }
                _ => break,
            }
        }
    }

    /// Lexes an Int or Float token.
    fn lex_number(&mut self, start: usize) -> ParseResult<Token> {
        let mut is_float = false;

        if self.peek() == Some('-') {
            self.advance(1);
        }

        if self.peek() == Some('0') {
            self.advance(1);
            if let Some(c) = self.peek()
                && c.is_ascii_digit()
            {
                return Err(ParseError::new(ParseErrorKind::InvalidNumber, self.pos)
                    .with_found(&format!("{c:?}"))
                    .with_help("leading zeros are not allowed"));
            }
        } else {
            self.read_digits()?;
        }

        if self.peek() == Some('.') {
            is_float = true;
            self.advance(1);
            self.read_digits()?;
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.advance(1);
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance(1);
            }
            self.read_digits()?;
        }

        if let Some(c) = self.peek()
            && (c == '.' || is_name_start(c))
        {
            return Err(ParseError::new(ParseErrorKind::InvalidNumber, self.pos)
                .with_found(&format!("{c:?}")));
        }

        let kind = if is_float {
            SyntaxKind::Float
        } else {
            SyntaxKind::Int
        };
        let text = self.input[start..self.pos].to_string();
        Ok(self.token(kind, text, start))
    }

    fn read_digits(&mut self) -> ParseResult<()> {
        let digits = self.consume_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            let found = self
                .peek()
                .map(|c| format!("{c:?}"))
                .unwrap_or_else(|| SyntaxKind::Eof.describe().to_string());
            return Err(ParseError::new(ParseErrorKind::InvalidNumber, self.pos)
                .with_expected(&["digit"])
                .with_found(&found));
        }
        Ok(())
    }

    /// Lexes a single-line string, decoding escape sequences.
    fn lex_string(&mut self, start: usize) -> ParseResult<Token> {
        self.advance(1);
        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some('\n' | '\r') => {
                    return Err(ParseError::new(ParseErrorKind::UnterminatedString, self.pos));
                }
                Some('"') => {
                    self.advance(1);
                    return Ok(self.token(SyntaxKind::String, value, start));
                }
                Some('\\') => {
                    let escape_start = self.pos;
                    self.advance(1);
                    value.push(self.read_escape(escape_start)?);
                }
                Some(c) => {
                    value.push(c);
                    self.advance(c.len_utf8());
                }
            }
        }
    }

    fn read_escape(&mut self, escape_start: usize) -> ParseResult<char> {
        let c = self.bump().ok_or_else(|| {
            ParseError::new(ParseErrorKind::UnterminatedString, self.pos)
        })?;
        Ok(match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.read_unicode_escape(escape_start),
            c => {
                return Err(ParseError::new(ParseErrorKind::InvalidEscapeSequence, escape_start)
                    .with_found(&format!("\\{c}")));
            }
        })
    }

    /// Reads `\uXXXX`, `\u{X...}` and surrogate pairs. The leading `\u` has been consumed.
    fn read_unicode_escape(&mut self, escape_start: usize) -> ParseResult<char> {
        let invalid = |pos: usize, lexer: &Self| {
            ParseError::new(ParseErrorKind::InvalidUnicodeEscape, pos)
                .with_found(&lexer.input[pos..lexer.pos.min(lexer.input.len())])
        };

        if self.peek() == Some('{') {
            self.advance(1);
            let hex = self.consume_while(|c| c.is_ascii_hexdigit());
            if self.peek() != Some('}') || hex.is_empty() {
                return Err(invalid(escape_start, self));
            }
            self.advance(1);
            return u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| invalid(escape_start, self));
        }

        let lead = self.read_hex4().ok_or_else(|| invalid(escape_start, self))?;
        if (0xD800..=0xDBFF).contains(&lead) {
            if self.remaining().starts_with("\\u") {
                self.advance(2);
                let trail = self.read_hex4().ok_or_else(|| invalid(escape_start, self))?;
                if (0xDC00..=0xDFFF).contains(&trail) {
                    let code = 0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00);
                    return char::from_u32(code).ok_or_else(|| invalid(escape_start, self));
                }
            }
            return Err(invalid(escape_start, self));
        }

        char::from_u32(lead).ok_or_else(|| invalid(escape_start, self))
    }

    fn read_hex4(&mut self) -> Option<u32> {
        let hex = self.remaining().get(..4)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        self.advance(4);
        u32::from_str_radix(hex, 16).ok()
    }

    /// Lexes a `"""` block string.
    fn lex_block_string(&mut self, start: usize) -> ParseResult<Token> {
        self.advance(3);
        let mut raw = String::new();

        loop {
            let remaining = self.remaining();
            if remaining.starts_with("\"\"\"") {
                self.advance(3);
                return Ok(self.token(SyntaxKind::BlockString, dedent_block_string(&raw), start));
            }
            if remaining.starts_with("\\\"\"\"") {
                raw.push_str("\"\"\"");
                self.advance(4);
                continue;
            }
            match self.bump() {
                Some(c) => raw.push(c),
                None => {
                    return Err(ParseError::new(ParseErrorKind::UnterminatedBlockString, self.pos));
                }
            }
        }
    }
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Produces the value of a block string from its raw contents.
///
/// Removes the common indentation of all lines but the first, then drops
/// leading and trailing blank lines.
pub fn dedent_block_string(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut common_indent = usize::MAX;
    let mut first_non_empty = None;
    let mut last_non_empty = 0;

    for (i, line) in lines.iter().enumerate() {
        let indent = line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count();
        if indent == line.len() {
            continue;
        }
        first_non_empty.get_or_insert(i);
        last_non_empty = i;
        if i != 0 && indent < common_indent {
            common_indent = indent;
        }
    }

    let Some(first_non_empty) = first_non_empty else {
        return String::new();
    };

    lines
        .iter()
        .enumerate()
        .skip(first_non_empty)
        .take(last_non_empty + 1 - first_non_empty)
        .map(|(i, line)| {
            if i == 0 {
                *line
            } else {
                &line[common_indent.min(line.len())..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(input: &str) -> Vec<(SyntaxKind, String)> {
        Lexer::new(input)
            .tokenize()
            .expect("lexing should succeed")
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        lex(input).into_iter().map(|(k, _)| k).collect()
    }

    fn lex_err(input: &str) -> ParseError {
        Lexer::new(input).tokenize().expect_err("lexing should fail")
    }

    #[test]
    fn test_punctuators() {
        assert_eq!(
            kinds("! $ & ( ) ... : = @ [ ] { | }"),
            vec![
                SyntaxKind::Bang,
                SyntaxKind::Dollar,
                SyntaxKind::Amp,
                SyntaxKind::LParen,
                SyntaxKind::RParen,
                SyntaxKind::Spread,
                SyntaxKind::Colon,
                SyntaxKind::Eq,
                SyntaxKind::At,
                SyntaxKind::LBracket,
                SyntaxKind::RBracket,
                SyntaxKind::LBrace,
                SyntaxKind::Pipe,
                SyntaxKind::RBrace,
                SyntaxKind::Eof,
            ]
        );
    }

    #[test]
    fn test_ignored_tokens() {
        let tokens = lex("\u{feff} a,,b # comment\r\n\tc");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::Name, "a".to_string()),
                (SyntaxKind::Name, "b".to_string()),
                (SyntaxKind::Name, "c".to_string()),
                (SyntaxKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_token_offsets() {
        let tokens = Lexer::new("  query  {").tokenize().unwrap();
        assert_eq!((tokens[0].start, tokens[0].end), (2, 7));
        assert_eq!((tokens[1].start, tokens[1].end), (9, 10));
        assert_eq!((tokens[2].start, tokens[2].end), (10, 10));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex("4 -4 0 4.123 -4.123 0.123 123e4 123E-4 -1.123e+4"),
            vec![
                (SyntaxKind::Int, "4".to_string()),
                (SyntaxKind::Int, "-4".to_string()),
                (SyntaxKind::Int, "0".to_string()),
                (SyntaxKind::Float, "4.123".to_string()),
                (SyntaxKind::Float, "-4.123".to_string()),
                (SyntaxKind::Float, "0.123".to_string()),
                (SyntaxKind::Float, "123e4".to_string()),
                (SyntaxKind::Float, "123E-4".to_string()),
                (SyntaxKind::Float, "-1.123e+4".to_string()),
                (SyntaxKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(lex_err("00").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(lex_err("1.").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(lex_err("1.a").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(lex_err("1e").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(lex_err("12abc").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(lex_err("-").kind, ParseErrorKind::InvalidNumber);
    }

    #[test]
    fn test_strings() {
        assert_eq!(lex("\"simple\"")[0], (SyntaxKind::String, "simple".to_string()));
        assert_eq!(
            lex(r#""quote \" slash \\ \/ \n\t""#)[0].1,
            "quote \" slash \\ / \n\t"
        );
        assert_eq!(lex(r#""é""#)[0].1, "é");
        assert_eq!(lex(r#""\u{1F600}""#)[0].1, "\u{1F600}");
        assert_eq!(lex(r#""😀""#)[0].1, "\u{1F600}");
    }

    #[test]
    fn test_string_errors() {
        assert_eq!(lex_err("\"open").kind, ParseErrorKind::UnterminatedString);
        assert_eq!(lex_err("\"line\nbreak\"").kind, ParseErrorKind::UnterminatedString);
        assert_eq!(lex_err(r#""\x""#).kind, ParseErrorKind::InvalidEscapeSequence);
        assert_eq!(lex_err(r#""\u12""#).kind, ParseErrorKind::InvalidUnicodeEscape);
        assert_eq!(lex_err(r#""\uD83D""#).kind, ParseErrorKind::InvalidUnicodeEscape);
    }

    #[test]
    fn test_block_string() {
        let tokens = lex("\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n  \"\"\"");
        assert_eq!(tokens[0].0, SyntaxKind::BlockString);
        assert_eq!(tokens[0].1, "Hello,\n  World!\n\nYours,\n  GraphQL.");
    }

    #[test]
    fn test_block_string_escaped_quotes() {
        let tokens = lex(r#""""contains \""" triple""""#);
        assert_eq!(tokens[0].1, "contains \"\"\" triple");
    }

    #[test]
    fn test_block_string_unterminated() {
        assert_eq!(
            lex_err("\"\"\"never closed").kind,
            ParseErrorKind::UnterminatedBlockString
        );
    }

    #[test]
    fn test_dedent_keeps_first_line() {
        assert_eq!(dedent_block_string("  first\n    second\n    third"), "  first\nsecond\nthird");
        assert_eq!(dedent_block_string("   \n  \n"), "");
    }

    #[test]
    fn test_unexpected_characters() {
        let err = lex_err("query ?");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
        assert_eq!(err.position, 6);

        let err = lex_err("..");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
    }

    #[test]
    fn test_token_describe() {
        let tokens = Lexer::new("name 12 \"s\" {").tokenize().unwrap();
        assert_eq!(tokens[0].describe(), "Name \"name\"");
        assert_eq!(tokens[1].describe(), "Int \"12\"");
        assert_eq!(tokens[2].describe(), "String \"s\"");
        assert_eq!(tokens[3].describe(), "\"{\"");
    }
}
