//! Structural checks over an automaton
//!
//! A table edited by hand can contain a live, non-accepting state from which
//! no token can ever be completed. Scanning into such a state would only be
//! detected once the dead state is reached with nothing accepted, so it is
//! checked up front instead. [`compare`] cross-checks two strategies over
//! every `(state, class)` pair.

use super::state::State;
use super::symbol::SymbolClass;
use super::Automaton;
use crate::logging::codes;
use crate::tokens::TokenKind;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonDefect {
    #[error("Dead state leaves itself on '{class}' (goes to {target})")]
    DeadStateEscapes { class: SymbolClass, target: State },

    #[error("State {state} accepts but must not")]
    UnexpectedAccepting { state: State },

    #[error("Start state does not terminate on end of input (goes to {target})")]
    StartDoesNotTerminate { target: State },

    #[error("State {state} consumes the end-of-input marker (goes to {target})")]
    EndOfInputConsumed { state: State, target: State },

    #[error("State {state} is live and non-accepting but can never reach an accepting state")]
    StrandedState { state: State },

    #[error("State {state} is unreachable from the start state")]
    UnreachableState { state: State },
}

impl AutomatonDefect {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::automaton::INVALID_AUTOMATON
    }
}

/// Summary of a successfully validated automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutomatonReport {
    pub name: &'static str,
    pub live_states: usize,
    pub accepting_states: usize,
    /// Transitions between live states
    pub live_transitions: usize,
}

/// First point at which two automata disagree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Divergence {
    #[error("Classification of {character:?} differs: {left:?} vs {right:?}")]
    Classification {
        character: char,
        left: Option<SymbolClass>,
        right: Option<SymbolClass>,
    },

    #[error("Transition from {state} on '{class}' differs: {left} vs {right}")]
    Transition {
        state: State,
        class: SymbolClass,
        left: State,
        right: State,
    },

    #[error("Accepting kind of {state} differs: {left:?} vs {right:?}")]
    Accepting {
        state: State,
        left: Option<TokenKind>,
        right: Option<TokenKind>,
    },
}

/// Check the structural invariants the scanner relies on
pub fn validate<A: Automaton>(automaton: &A) -> Result<AutomatonReport, AutomatonDefect> {
    for class in SymbolClass::ALL {
        let target = automaton.step(State::Dead, class);
        if !target.is_dead() {
            return Err(AutomatonDefect::DeadStateEscapes { class, target });
        }
    }

    let start = automaton.start();
    for state in [start, State::Dead] {
        if automaton.accepts(state).is_some() {
            return Err(AutomatonDefect::UnexpectedAccepting { state });
        }
    }

    let target = automaton.step(start, SymbolClass::EndOfInput);
    if !target.is_dead() {
        return Err(AutomatonDefect::StartDoesNotTerminate { target });
    }

    for state in live_states() {
        let target = automaton.step(state, SymbolClass::EndOfInput);
        if !target.is_dead() {
            return Err(AutomatonDefect::EndOfInputConsumed { state, target });
        }
    }

    for state in live_states() {
        if automaton.accepts(state).is_none() && !can_reach_accepting(automaton, state) {
            return Err(AutomatonDefect::StrandedState { state });
        }
    }

    let reachable = reachable_from(automaton, start);
    if let Some(state) = live_states().find(|s| !reachable[s.index()]) {
        return Err(AutomatonDefect::UnreachableState { state });
    }

    let live_transitions = live_states()
        .flat_map(|s| SymbolClass::ALL.into_iter().map(move |c| (s, c)))
        .filter(|&(s, c)| !automaton.step(s, c).is_dead())
        .count();

    Ok(AutomatonReport {
        name: automaton.name(),
        live_states: live_states().count(),
        accepting_states: live_states()
            .filter(|s| automaton.accepts(*s).is_some())
            .count(),
        live_transitions,
    })
}

/// Exhaustively compare two automata
pub fn compare<L: Automaton, R: Automaton>(left: &L, right: &R) -> Result<(), Divergence> {
    // ASCII plus a few characters past the lookup range
    let characters = (0u8..128)
        .map(char::from)
        .chain(['\u{80}', '\u{e9}', '\u{3bb}', '\u{1F600}']);
    for character in characters {
        let (l, r) = (left.classify(character), right.classify(character));
        if l != r {
            return Err(Divergence::Classification {
                character,
                left: l,
                right: r,
            });
        }
    }

    for state in State::ALL {
        for class in SymbolClass::ALL {
            let (l, r) = (left.step(state, class), right.step(state, class));
            if l != r {
                return Err(Divergence::Transition {
                    state,
                    class,
                    left: l,
                    right: r,
                });
            }
        }

        let (l, r) = (left.accepts(state), right.accepts(state));
        if l != r {
            return Err(Divergence::Accepting {
                state,
                left: l,
                right: r,
            });
        }
    }

    Ok(())
}

fn live_states() -> impl Iterator<Item = State> {
    State::ALL.into_iter().filter(|s| !s.is_dead())
}

fn reachable_from<A: Automaton>(automaton: &A, from: State) -> [bool; State::COUNT] {
    let mut seen = [false; State::COUNT];
    let mut queue = VecDeque::from([from]);
    seen[from.index()] = true;

    while let Some(state) = queue.pop_front() {
        for class in SymbolClass::ALL {
            let next = automaton.step(state, class);
            if !seen[next.index()] {
                seen[next.index()] = true;
                queue.push_back(next);
            }
        }
    }

    seen
}

fn can_reach_accepting<A: Automaton>(automaton: &A, from: State) -> bool {
    let reachable = reachable_from(automaton, from);
    State::ALL
        .into_iter()
        .any(|s| reachable[s.index()] && automaton.accepts(s).is_some())
}
