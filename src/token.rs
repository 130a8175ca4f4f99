//! The token definition for the LOOK query language.

use std::fmt;

/// A token is a single unit of the language, with a specific kind, its
/// source spelling and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source spelling. Keywords keep their casing.
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    Illegal, // An illegal/unknown character
    Eof,     // End of input
    Whitespace,

    // Literals
    /// Letter-initial words and digit-initial runs (digits and dots).
    Ident,

    // Punctuation
    Quote,       // '
    Comma,       // ,
    LParen,      // (
    RParen,      // )
    Colon,       // :
    LBrace,      // {
    RBrace,      // }
    LBracket,    // [
    RBracket,    // ]
    Dot,         // .
    DoubleQuote, // "
    Hyphen,      // -
    AngleRight,  // >

    // Keywords
    Look,
    Total,
    Condition,
    At,
    Eq,
    Neq,
    Pf,
    Sf,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl TokenKind {
    /// Maps a single punctuation character to its kind.
    pub fn punctuation(c: char) -> Option<TokenKind> {
        let kind = match c {
            '\'' => TokenKind::Quote,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ':' => TokenKind::Colon,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '.' => TokenKind::Dot,
            '"' => TokenKind::DoubleQuote,
            '-' => TokenKind::Hyphen,
            '>' => TokenKind::AngleRight,
            _ => return None,
        };
        Some(kind)
    }

    /// Looks up a word in the keyword table, ignoring ASCII case.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word.to_ascii_uppercase().as_str() {
            "LOOK" => TokenKind::Look,
            "TOTAL" => TokenKind::Total,
            "CONDITION" => TokenKind::Condition,
            "AT" => TokenKind::At,
            "EQ" => TokenKind::Eq,
            "NEQ" => TokenKind::Neq,
            "PF" => TokenKind::Pf,
            "SF" => TokenKind::Sf,
            "GT" => TokenKind::Gt,
            "GTE" => TokenKind::Gte,
            "LT" => TokenKind::Lt,
            "LTE" => TokenKind::Lte,
            _ => return None,
        };
        Some(kind)
    }

    /// Human readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Illegal => "illegal character",
            TokenKind::Eof => "end of input",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Ident => "identifier",
            TokenKind::Quote => "'",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Colon => ":",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Dot => ".",
            TokenKind::DoubleQuote => "\"",
            TokenKind::Hyphen => "-",
            TokenKind::AngleRight => ">",
            TokenKind::Look => "LOOK",
            TokenKind::Total => "TOTAL",
            TokenKind::Condition => "CONDITION",
            TokenKind::At => "AT",
            TokenKind::Eq => "EQ",
            TokenKind::Neq => "NEQ",
            TokenKind::Pf => "PF",
            TokenKind::Sf => "SF",
            TokenKind::Gt => "GT",
            TokenKind::Gte => "GTE",
            TokenKind::Lt => "LT",
            TokenKind::Lte => "LTE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Represents a span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// The starting byte offset.
    pub start: usize,
    /// The ending byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
