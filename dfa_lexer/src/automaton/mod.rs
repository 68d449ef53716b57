//! Automaton description for the scanner
//!
//! The DFA recognises three token kinds over the alphabet of lowercase
//! letters and the space character:
//!
//! - `WS`  = `" "+`
//! - `ID`  = `[a-z]+`
//! - `INT` = `int`
//!
//! ```text
//! Start      --sp-->  Whitespace     Whitespace --sp--> Whitespace
//! Start      --i--->  KeywordI       KeywordI   --n---> KeywordIn
//! Start      --*--->  Identifier     KeywordIn  --t---> KeywordInt
//! any letter state --other letter--> Identifier
//! everything unspecified           --> Dead
//! ```
//!
//! The same function is provided twice: [`ExplicitAutomaton`] branches on
//! the current state, [`TableAutomaton`] indexes a dense transition table.
//! Both implement [`Automaton`] and the scanner is generic over it.

pub mod explicit;
pub mod state;
pub mod symbol;
pub mod table;
pub mod validate;

use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use explicit::ExplicitAutomaton;
pub use state::State;
pub use symbol::{is_legal_input, SymbolClass, END_MARKER, END_SENTINEL};
pub use table::TableAutomaton;
pub use validate::{compare, validate, AutomatonDefect, AutomatonReport, Divergence};

/// A fixed, pre-computed DFA
///
/// Implementations are pure lookups with no side effects.
pub trait Automaton {
    /// Name used in log events and diagnostics
    fn name(&self) -> &'static str;

    fn start(&self) -> State {
        State::Start
    }

    /// Classify a character; `None` means it is outside the alphabet
    fn classify(&self, ch: char) -> Option<SymbolClass>;

    /// The unique successor of `state` on `class`
    fn step(&self, state: State, class: SymbolClass) -> State;

    /// Token kind reported by an accepting state
    fn accepts(&self, state: State) -> Option<TokenKind>;
}

impl<A: Automaton + ?Sized> Automaton for &A {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn start(&self) -> State {
        (**self).start()
    }

    fn classify(&self, ch: char) -> Option<SymbolClass> {
        (**self).classify(ch)
    }

    fn step(&self, state: State, class: SymbolClass) -> State {
        (**self).step(state, class)
    }

    fn accepts(&self, state: State) -> Option<TokenKind> {
        (**self).accepts(state)
    }
}

/// Which transition function implementation drives a scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Explicit,
    Table,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Explicit, Strategy::Table];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Explicit => "explicit",
            Strategy::Table => "table",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown strategy '{0}' (expected 'explicit' or 'table')")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "explicit" | "branching" => Ok(Strategy::Explicit),
            "table" | "table-driven" => Ok(Strategy::Table),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
