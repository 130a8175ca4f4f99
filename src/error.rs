//! Parse error type.

use thiserror::Error;

use crate::token::{Span, Token};

/// The one error a parse can produce: a token that does not belong where
/// it was found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("found {found:?}, expected {expected}{}", location(.span))]
pub struct ParseError {
    /// Source text of the offending token.
    pub found: String,
    /// The token class that was required.
    pub expected: String,
    pub span: Option<Span>,
}

impl ParseError {
    pub fn new(found: impl Into<String>, expected: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            found: found.into(),
            expected: expected.into(),
            span,
        }
    }

    pub fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        Self::new(token.text.clone(), expected, Some(token.span))
    }
}

fn location(span: &Option<Span>) -> String {
    span.map(|s| format!(" at {s}")).unwrap_or_default()
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_display_with_span() {
        let token = Token::new(TokenKind::Ident, "CONDTION", Span::new(14, 22));
        let err = ParseError::unexpected(&token, "CONDITION");
        assert_eq!(err.to_string(), r#"found "CONDTION", expected CONDITION at 14..22"#);
    }

    #[test]
    fn test_display_without_span() {
        let err = ParseError::new("", "end of input", None);
        assert_eq!(err.to_string(), r#"found "", expected end of input"#);
    }
}
