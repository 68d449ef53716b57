//! Token kinds recognised by the automaton
use crate::utils::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories reported by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Input exhausted; returned by every call once the end is reached
    EndOfStream,
    /// One or more spaces
    Whitespace,
    /// One or more lowercase letters that are not exactly the keyword
    Identifier,
    /// The reserved keyword `int`
    Keyword,
}

impl TokenKind {
    /// Short label used by the driver output
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::EndOfStream => "EOF",
            TokenKind::Whitespace => "WS",
            TokenKind::Identifier => "ID",
            TokenKind::Keyword => "INT",
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, TokenKind::EndOfStream)
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified token with its source location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// End-of-stream marker positioned at the end of input
    pub fn end_of_stream(at: Position) -> Self {
        Self::new(TokenKind::EndOfStream, Span::empty(at))
    }

    /// Source text covered by this token
    pub fn lexeme<'a>(&self, input: &'a str) -> &'a str {
        self.span.slice(input)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.kind, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(TokenKind::Whitespace.label(), "WS");
        assert_eq!(TokenKind::Identifier.label(), "ID");
        assert_eq!(TokenKind::Keyword.label(), "INT");
        assert_eq!(TokenKind::EndOfStream.to_string(), "EOF");
    }

    #[test]
    fn test_lexeme() {
        let token = Token::new(TokenKind::Keyword, Span::from_offsets(5, 8));
        assert_eq!(token.lexeme("i in int intx"), "int");
    }

    #[test]
    fn test_end_of_stream_is_empty() {
        let token = Token::end_of_stream(Position::at_offset(4));
        assert!(token.kind.is_end());
        assert!(token.span.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let token = Token::new(TokenKind::Identifier, Span::from_offsets(0, 1));
        let json = serde_json::to_string(&token).unwrap();
        assert!(json.contains("\"kind\":\"identifier\""));
    }
}
