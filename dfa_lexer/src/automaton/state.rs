//! DFA states

use serde::Serialize;
use std::fmt;

/// States of the scanner automaton
///
/// The `Keyword*` states track a partial match of `int` along the
/// identifier path; each of them is accepting in its own right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum State {
    Start = 0,
    Identifier = 1,
    KeywordI = 2,
    KeywordIn = 3,
    KeywordInt = 4,
    Whitespace = 5,
    /// Sink; entering it ends the current token
    Dead = 6,
}

impl State {
    pub const COUNT: usize = 7;

    pub const ALL: [State; State::COUNT] = [
        State::Start,
        State::Identifier,
        State::KeywordI,
        State::KeywordIn,
        State::KeywordInt,
        State::Whitespace,
        State::Dead,
    ];

    /// Row index into transition tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_dead(self) -> bool {
        self == State::Dead
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.index(), self)
    }
}
