//! Token model produced by the scanner
//!
//! Tokens are classifications only: a [`TokenKind`] plus the [`Span`] of
//! input it covers. No lexeme text is captured; callers that need it slice
//! their own input with the span.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::{TokenCounts, TokenStream};

pub use crate::utils::{Position, Span};
