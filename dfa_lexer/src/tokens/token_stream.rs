//! Collected scanner output

use super::token::{Token, TokenKind};
use crate::utils::Span;
use serde::Serialize;

/// All tokens of one input, terminated by an end-of-stream token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenStream {
    tokens: Vec<Token>,
    end: Token,
}

impl TokenStream {
    /// `tokens` must not contain the end-of-stream token itself
    pub fn new(tokens: Vec<Token>, end: Token) -> Self {
        debug_assert!(tokens.iter().all(|t| !t.kind.is_end()));
        debug_assert!(end.kind.is_end());
        Self { tokens, end }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn end(&self) -> Token {
        self.end
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token kinds in order, end-of-stream included
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens
            .iter()
            .map(|t| t.kind)
            .chain(std::iter::once(self.end.kind))
            .collect()
    }

    /// Tokens other than whitespace
    pub fn significant(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.kind.is_trivia())
    }

    /// Span covering all tokens
    pub fn span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => self.end.span,
        }
    }

    pub fn counts(&self) -> TokenCounts {
        let mut counts = TokenCounts::default();
        for token in &self.tokens {
            counts.total += 1;
            match token.kind {
                TokenKind::Whitespace => counts.whitespace += 1,
                TokenKind::Identifier => counts.identifiers += 1,
                TokenKind::Keyword => counts.keywords += 1,
                TokenKind::EndOfStream => {}
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Token distribution of a stream
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub total: usize,
    pub whitespace: usize,
    pub identifiers: usize,
    pub keywords: usize,
}

impl TokenCounts {
    /// Count of tokens excluding whitespace
    pub fn significant_tokens(&self) -> usize {
        self.total - self.whitespace
    }
}
