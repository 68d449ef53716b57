//! Explicit automaton: one match arm per state, each with an inline
//! conditional chain over the input symbol.

use super::state::State;
use super::symbol::{SymbolClass, END_MARKER};
use super::Automaton;
use crate::tokens::TokenKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitAutomaton;

impl ExplicitAutomaton {
    pub fn new() -> Self {
        Self
    }
}

impl Automaton for ExplicitAutomaton {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn classify(&self, ch: char) -> Option<SymbolClass> {
        if ch == END_MARKER {
            Some(SymbolClass::EndOfInput)
        } else if ch == ' ' {
            Some(SymbolClass::Space)
        } else if ch == 'i' {
            Some(SymbolClass::LetterI)
        } else if ch == 'n' {
            Some(SymbolClass::LetterN)
        } else if ch == 't' {
            Some(SymbolClass::LetterT)
        } else if ch.is_ascii_lowercase() {
            Some(SymbolClass::OtherLower)
        } else {
            None
        }
    }

    fn step(&self, state: State, class: SymbolClass) -> State {
        use SymbolClass::*;

        match state {
            State::Start => {
                if class == EndOfInput {
                    State::Dead
                } else if class == Space {
                    State::Whitespace
                } else if class == LetterI {
                    State::KeywordI
                } else {
                    State::Identifier
                }
            }

            // Identifier, and every keyword state once the keyword path is left
            State::Identifier => {
                if class == EndOfInput || class == Space {
                    State::Dead
                } else {
                    State::Identifier
                }
            }

            State::KeywordI => {
                if class == EndOfInput || class == Space {
                    State::Dead
                } else if class == LetterN {
                    State::KeywordIn
                } else {
                    State::Identifier
                }
            }

            State::KeywordIn => {
                if class == EndOfInput || class == Space {
                    State::Dead
                } else if class == LetterT {
                    State::KeywordInt
                } else {
                    State::Identifier
                }
            }

            // Any further letter demotes the keyword back to an identifier
            State::KeywordInt => {
                if class == EndOfInput || class == Space {
                    State::Dead
                } else {
                    State::Identifier
                }
            }

            State::Whitespace => {
                if class == Space {
                    State::Whitespace
                } else {
                    State::Dead
                }
            }

            State::Dead => State::Dead,
        }
    }

    fn accepts(&self, state: State) -> Option<TokenKind> {
        match state {
            State::Identifier | State::KeywordI | State::KeywordIn => Some(TokenKind::Identifier),
            State::KeywordInt => Some(TokenKind::Keyword),
            State::Whitespace => Some(TokenKind::Whitespace),
            State::Start | State::Dead => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(word: &str) -> State {
        let dfa = ExplicitAutomaton::new();
        word.chars().fold(dfa.start(), |state, ch| {
            dfa.step(state, dfa.classify(ch).unwrap())
        })
    }

    #[test]
    fn test_keyword_path() {
        assert_eq!(run("i"), State::KeywordI);
        assert_eq!(run("in"), State::KeywordIn);
        assert_eq!(run("int"), State::KeywordInt);
        assert_eq!(run("intx"), State::Identifier);
        assert_eq!(run("it"), State::Identifier);
    }

    #[test]
    fn test_whitespace_cycle() {
        assert_eq!(run("   "), State::Whitespace);
        assert_eq!(run(" a"), State::Dead);
        assert_eq!(run("a "), State::Dead);
    }

    #[test]
    fn test_classify_rejects_outside_alphabet() {
        let dfa = ExplicitAutomaton::new();
        assert_eq!(dfa.classify('A'), None);
        assert_eq!(dfa.classify('7'), None);
        assert_eq!(dfa.classify('\n'), None);
        assert_eq!(dfa.classify('z'), Some(SymbolClass::OtherLower));
        assert_eq!(dfa.classify('$'), Some(SymbolClass::EndOfInput));
    }

    #[test]
    fn test_accepting_map() {
        let dfa = ExplicitAutomaton::new();
        assert_eq!(dfa.accepts(State::KeywordIn), Some(TokenKind::Identifier));
        assert_eq!(dfa.accepts(State::KeywordInt), Some(TokenKind::Keyword));
        assert_eq!(dfa.accepts(State::Start), None);
        assert_eq!(dfa.accepts(State::Dead), None);
    }

    #[test]
    fn test_dead_is_a_sink() {
        let dfa = ExplicitAutomaton::new();
        for class in SymbolClass::ALL {
            assert_eq!(dfa.step(State::Dead, class), State::Dead);
        }
    }
}
