//! Typed scanner errors

use crate::automaton::{AutomatonDefect, Divergence, State};
use crate::config::compile_time::lexical::{MAX_INPUT_LENGTH, MAX_TOKEN_COUNT};
use crate::logging::{codes, Code};
use crate::utils::Position;

/// Errors returned by `Scanner::next_token` and the tokenize functions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Illegal character {character:?} at {position} (state {state})")]
    IllegalCharacter {
        state: State,
        character: char,
        position: Position,
    },

    /// The dead state was reached before any accepting state
    #[error("No token matches at {position}: {character:?} leads to the dead state from {state}")]
    NoTokenMatched {
        state: State,
        character: char,
        position: Position,
    },

    #[error("Input too large: {length} characters (max {MAX_INPUT_LENGTH})")]
    InputTooLarge { length: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexError {
    pub fn error_code(&self) -> Code {
        match self {
            LexError::IllegalCharacter { .. } => codes::lexical::ILLEGAL_CHARACTER,
            LexError::NoTokenMatched { .. } => codes::lexical::NO_TOKEN_MATCHED,
            LexError::InputTooLarge { .. } => codes::lexical::INPUT_TOO_LARGE,
            LexError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    /// Where scanning stopped, for the character-level variants
    pub fn position(&self) -> Option<Position> {
        match self {
            LexError::IllegalCharacter { position, .. }
            | LexError::NoTokenMatched { position, .. } => Some(*position),
            LexError::InputTooLarge { .. } | LexError::TooManyTokens { .. } => None,
        }
    }
}

/// Failures when checking the two strategies against each other
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StrategyError {
    /// Both strategies failed with the same error
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("{automaton} automaton is invalid: {defect}")]
    Defect {
        automaton: &'static str,
        defect: AutomatonDefect,
    },

    #[error("Automata diverge: {0}")]
    Divergence(#[from] Divergence),

    #[error("Strategies disagree at token {index}: explicit {explicit}, table {table}")]
    TokenMismatch {
        index: usize,
        explicit: String,
        table: String,
    },

    #[error("Strategies disagree on the outcome: explicit {explicit}, table {table}")]
    OutcomeMismatch { explicit: String, table: String },
}

impl StrategyError {
    pub fn error_code(&self) -> Code {
        match self {
            StrategyError::Lex(e) => e.error_code(),
            StrategyError::Defect { defect, .. } => defect.error_code(),
            StrategyError::Divergence(_)
            | StrategyError::TokenMismatch { .. }
            | StrategyError::OutcomeMismatch { .. } => codes::automaton::STRATEGY_DIVERGENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let illegal = LexError::IllegalCharacter {
            state: State::Start,
            character: 'Q',
            position: Position::at_offset(3),
        };
        assert_eq!(illegal.error_code(), codes::lexical::ILLEGAL_CHARACTER);
        assert_eq!(illegal.position(), Some(Position::at_offset(3)));

        let too_large = LexError::InputTooLarge { length: 10 };
        assert_eq!(too_large.error_code(), codes::lexical::INPUT_TOO_LARGE);
        assert_eq!(too_large.position(), None);

        let mismatch = StrategyError::OutcomeMismatch {
            explicit: "ok".into(),
            table: "error".into(),
        };
        assert_eq!(mismatch.error_code(), codes::automaton::STRATEGY_DIVERGENCE);
    }

    #[test]
    fn test_messages_carry_location() {
        let error = LexError::IllegalCharacter {
            state: State::Identifier,
            character: '\n',
            position: Position::at_offset(4),
        };
        let message = error.to_string();
        assert!(message.contains("'\\n'"));
        assert!(message.contains("1:5"));
        assert!(message.contains("Identifier"));
    }
}
