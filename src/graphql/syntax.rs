//! Token kinds for GraphQL source text.

/// All token kinds produced by the GraphQL lexer.
///
/// Ignored tokens (whitespace, commas, comments, the byte order mark) never
/// reach the parser and have no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SyntaxKind {
    // Punctuators
    /// `!`
    Bang,
    /// `$`
    Dollar,
    /// `&`
    Amp,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `...`
    Spread,
    /// `:`
    Colon,
    /// `=`
    Eq,
    /// `@`
    At,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `|`
    Pipe,
    /// `}`
    RBrace,

    // Lexical tokens
    /// `/[_A-Za-z][_0-9A-Za-z]*/`
    Name,
    /// Integer literal.
    Int,
    /// Float literal.
    Float,
    /// Double-quoted string.
    String,
    /// Triple-quoted block string.
    BlockString,

    /// End of input.
    Eof,
}

impl SyntaxKind {
    /// Returns the text used for this kind in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Bang => "\"!\"",
            Self::Dollar => "\"$\"",
            Self::Amp => "\"&\"",
            Self::LParen => "\"(\"",
            Self::RParen => "\")\"",
            Self::Spread => "\"...\"",
            Self::Colon => "\":\"",
            Self::Eq => "\"=\"",
            Self::At => "\"@\"",
            Self::LBracket => "\"[\"",
            Self::RBracket => "\"]\"",
            Self::LBrace => "\"{\"",
            Self::Pipe => "\"|\"",
            Self::RBrace => "\"}\"",
            Self::Name => "Name",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::BlockString => "BlockString",
            Self::Eof => "<EOF>",
        }
    }

    /// Returns true for punctuator tokens.
    pub fn is_punctuator(self) -> bool {
        (self as u8) <= (Self::RBrace as u8)
    }

    /// Maps a single punctuator character to its kind.
    pub(crate) fn from_punctuator(c: char) -> Option<Self> {
        Some(match c {
            '!' => Self::Bang,
            '$' => Self::Dollar,
            '&' => Self::Amp,
            '(' => Self::LParen,
            ')' => Self::RParen,
            ':' => Self::Colon,
            '=' => Self::Eq,
            '@' => Self::At,
            '[' => Self::LBracket,
            ']' => Self::RBracket,
            '{' => Self::LBrace,
            '|' => Self::Pipe,
            '}' => Self::RBrace,
            _ => return None,
        })
    }
}
