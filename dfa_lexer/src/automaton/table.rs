//! Table-driven automaton: the transition function is a dense 2-D table
//! (rows = states, columns = symbol classes) and classification is a lookup
//! over the ASCII range.

use super::state::State;
use super::symbol::{SymbolClass, END_MARKER};
use super::Automaton;
use crate::tokens::TokenKind;

pub type TransitionTable = [[State; SymbolClass::COUNT]; State::COUNT];

const START: State = State::Start;
const ID: State = State::Identifier;
const KW_I: State = State::KeywordI;
const KW_IN: State = State::KeywordIn;
const KW_INT: State = State::KeywordInt;
const WS: State = State::Whitespace;
const DEAD: State = State::Dead;

/// Transitions of the scanner DFA
#[rustfmt::skip]
pub const TRANSITIONS: TransitionTable = [
    //               $     sp    i     n      t       *
    /* Start      */ [DEAD, WS,   KW_I, ID,    ID,     ID],
    /* Identifier */ [DEAD, DEAD, ID,   ID,    ID,     ID],
    /* KeywordI   */ [DEAD, DEAD, ID,   KW_IN, ID,     ID],
    /* KeywordIn  */ [DEAD, DEAD, ID,   ID,    KW_INT, ID],
    /* KeywordInt */ [DEAD, DEAD, ID,   ID,    ID,     ID],
    /* Whitespace */ [DEAD, WS,   DEAD, DEAD,  DEAD,   DEAD],
    /* Dead       */ [DEAD, DEAD, DEAD, DEAD,  DEAD,   DEAD],
];

const fn build_class_map() -> [Option<SymbolClass>; 128] {
    let mut map = [None; 128];
    let mut ch = b'a';
    while ch <= b'z' {
        map[ch as usize] = Some(SymbolClass::OtherLower);
        ch += 1;
    }
    map[b'i' as usize] = Some(SymbolClass::LetterI);
    map[b'n' as usize] = Some(SymbolClass::LetterN);
    map[b't' as usize] = Some(SymbolClass::LetterT);
    map[b' ' as usize] = Some(SymbolClass::Space);
    map[END_MARKER as usize] = Some(SymbolClass::EndOfInput);
    map
}

/// Column lookup for every ASCII character
pub const CLASS_MAP: [Option<SymbolClass>; 128] = build_class_map();

#[derive(Debug, Clone, Copy)]
pub struct TableAutomaton {
    table: TransitionTable,
}

impl TableAutomaton {
    pub fn new() -> Self {
        Self { table: TRANSITIONS }
    }

    /// Build from an arbitrary table; used to validate hand-edited tables
    pub fn with_table(table: TransitionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }
}

impl Default for TableAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton for TableAutomaton {
    fn name(&self) -> &'static str {
        "table"
    }

    fn start(&self) -> State {
        START
    }

    fn classify(&self, ch: char) -> Option<SymbolClass> {
        CLASS_MAP.get(ch as usize).copied().flatten()
    }

    #[inline]
    fn step(&self, state: State, class: SymbolClass) -> State {
        self.table[state.index()][class.index()]
    }

    fn accepts(&self, state: State) -> Option<TokenKind> {
        match state {
            State::Identifier => Some(TokenKind::Identifier),
            State::KeywordI => Some(TokenKind::Identifier),
            State::KeywordIn => Some(TokenKind::Identifier),
            State::KeywordInt => Some(TokenKind::Keyword),
            State::Whitespace => Some(TokenKind::Whitespace),
            State::Start => None,
            State::Dead => None,
        }
    }
}
