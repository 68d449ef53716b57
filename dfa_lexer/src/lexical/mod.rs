//! Lexical analysis: the longest-match scanner and its entry points
//!
//! The scanner is generic over [`Automaton`]; [`tokenize`] picks the
//! implementation from a [`Strategy`] at runtime.

pub mod error;
pub mod scanner;

use crate::automaton::{
    compare, validate, Automaton, AutomatonReport, ExplicitAutomaton, Strategy, TableAutomaton,
};
use crate::config::runtime::ScannerPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenStream};
use crate::{log_error, log_success};

pub use error::{LexError, StrategyError};
pub use scanner::{ScanMetrics, ScanState, Scanner};

/// Tokenize `input` with the chosen automaton
pub fn tokenize(input: &str, strategy: Strategy) -> Result<TokenStream, LexError> {
    tokenize_with_preferences(input, strategy, ScannerPreferences::default())
}

pub fn tokenize_with_preferences(
    input: &str,
    strategy: Strategy,
    preferences: ScannerPreferences,
) -> Result<TokenStream, LexError> {
    match strategy {
        Strategy::Explicit => {
            Scanner::with_preferences(input, ExplicitAutomaton::new(), preferences).tokenize()
        }
        Strategy::Table => {
            Scanner::with_preferences(input, TableAutomaton::new(), preferences).tokenize()
        }
    }
}

/// Tokenize with any automaton
pub fn tokenize_with<A: Automaton>(input: &str, automaton: A) -> Result<TokenStream, LexError> {
    Scanner::with_automaton(input, automaton).tokenize()
}

/// Run both strategies over `input` and require identical results
///
/// Identical errors are passed through as [`StrategyError::Lex`].
pub fn compare_strategies(input: &str) -> Result<TokenStream, StrategyError> {
    let explicit = tokenize(input, Strategy::Explicit);
    let table = tokenize(input, Strategy::Table);

    let result = match (explicit, table) {
        (Ok(explicit), Ok(table)) => match first_mismatch(&explicit, &table) {
            None => Ok(table),
            Some((index, explicit, table)) => Err(StrategyError::TokenMismatch {
                index,
                explicit: describe(explicit),
                table: describe(table),
            }),
        },
        (Err(explicit), Err(table)) if explicit == table => Err(StrategyError::Lex(table)),
        (explicit, table) => Err(StrategyError::OutcomeMismatch {
            explicit: describe_outcome(&explicit),
            table: describe_outcome(&table),
        }),
    };

    match &result {
        Ok(stream) => {
            log_success!(codes::success::STRATEGIES_AGREE, "Strategies agree",
                "tokens" => stream.len()
            );
        }
        Err(StrategyError::Lex(_)) => {}
        Err(e) => {
            log_error!(e.error_code(), &e.to_string());
        }
    }

    result
}

/// Validate both shipped automata and check they describe the same DFA
pub fn validate_automata() -> Result<[AutomatonReport; 2], StrategyError> {
    let explicit = ExplicitAutomaton::new();
    let table = TableAutomaton::new();

    let reports = [validate_one(&explicit)?, validate_one(&table)?];

    if let Err(divergence) = compare(&explicit, &table) {
        let error = StrategyError::from(divergence);
        log_error!(error.error_code(), &error.to_string());
        return Err(error);
    }

    log_success!(codes::success::STRATEGIES_AGREE, "Explicit and table automata agree",
        "live_states" => reports[0].live_states,
        "live_transitions" => reports[0].live_transitions
    );

    Ok(reports)
}

fn validate_one<A: Automaton>(automaton: &A) -> Result<AutomatonReport, StrategyError> {
    match validate(automaton) {
        Ok(report) => {
            log_success!(codes::success::AUTOMATON_VALIDATED, "Automaton validated",
                "automaton" => report.name,
                "accepting_states" => report.accepting_states
            );
            Ok(report)
        }
        Err(defect) => {
            log_error!(defect.error_code(), &defect.to_string(),
                "automaton" => automaton.name()
            );
            Err(StrategyError::Defect {
                automaton: automaton.name(),
                defect,
            })
        }
    }
}

fn first_mismatch(
    left: &TokenStream,
    right: &TokenStream,
) -> Option<(usize, Option<Token>, Option<Token>)> {
    let longest = left.len().max(right.len());
    (0..=longest).find_map(|index| {
        let l = token_at(left, index);
        let r = token_at(right, index);
        (l != r).then_some((index, l, r))
    })
}

/// Token `index` of the stream, with the end-of-stream token last
fn token_at(stream: &TokenStream, index: usize) -> Option<Token> {
    match index.cmp(&stream.len()) {
        std::cmp::Ordering::Less => stream.tokens().get(index).copied(),
        std::cmp::Ordering::Equal => Some(stream.end()),
        std::cmp::Ordering::Greater => None,
    }
}

fn describe(token: Option<Token>) -> String {
    token
        .map(|t| t.to_string())
        .unwrap_or_else(|| "nothing".to_string())
}

fn describe_outcome(result: &Result<TokenStream, LexError>) -> String {
    match result {
        Ok(stream) => format!("{} tokens", stream.len()),
        Err(e) => e.to_string(),
    }
}
