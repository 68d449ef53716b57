//! DFA-driven lexical scanner
//!
//! A fixed deterministic automaton recognises whitespace runs, lowercase
//! identifiers and the keyword `int`. The scanner takes the longest match,
//! pushes back the character that ended it, and detects end of input with a
//! `$$` sentinel. The automaton comes in an explicit (branching) and a
//! table-driven form behind the [`automaton::Automaton`] trait.

pub mod logging;
pub mod automaton;
pub mod config;
pub mod lexical;
pub mod tokens;
pub mod utils;

pub use automaton::{Automaton, ExplicitAutomaton, Strategy, TableAutomaton};
pub use lexical::{
    compare_strategies, tokenize, tokenize_with, validate_automata, LexError, Scanner,
    StrategyError,
};
pub use tokens::{Token, TokenKind, TokenStream};
