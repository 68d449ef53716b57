//! Longest-match scanner driven by an [`Automaton`]
//!
//! Each call to [`Scanner::next_token`] runs the automaton from the start
//! state until it dies, remembering the end of the longest accepted prefix.
//! When the dead state is reached the cursor is rewound to that end (the
//! pushback) and the recorded token is returned. The input buffer carries a
//! `$$` sentinel, and the first sentinel character always ends the scan.

use super::error::LexError;
use crate::automaton::{
    is_legal_input, validate, Automaton, State, SymbolClass, TableAutomaton, END_MARKER,
    END_SENTINEL,
};
use crate::config::compile_time::lexical::{MAX_INPUT_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::ScannerPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};
use serde::Serialize;

/// Per-call scan cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    pub state: State,
    pub last_accepting: Option<TokenKind>,
    /// Offset of the next character to read
    pub cursor: usize,
    /// End of the longest accepted prefix so far
    pub accepted_end: usize,
}

impl ScanState {
    fn new(start: State, cursor: usize) -> Self {
        Self {
            state: start,
            last_accepting: None,
            cursor,
            accepted_end: cursor,
        }
    }
}

/// Counters gathered while scanning
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub whitespace_tokens: usize,
    pub identifier_tokens: usize,
    pub keyword_tokens: usize,
    pub transitions: usize,
    /// Characters read past the end of a returned token and pushed back
    pub pushbacks: usize,
    pub chars_consumed: usize,
}

impl ScanMetrics {
    fn record_token(&mut self, token: &Token) {
        match token.kind {
            TokenKind::Whitespace => self.whitespace_tokens += 1,
            TokenKind::Identifier => self.identifier_tokens += 1,
            TokenKind::Keyword => self.keyword_tokens += 1,
            TokenKind::EndOfStream => return,
        }
        self.total_tokens += 1;
        self.chars_consumed += token.span.len();
    }
}

pub struct Scanner<A = TableAutomaton> {
    automaton: A,
    buffer: Vec<char>,
    input_len: usize,
    cursor: usize,
    preferences: ScannerPreferences,
    metrics: ScanMetrics,
    /// Set once end-of-stream or an error has been yielded by the iterator
    exhausted: bool,
}

impl Scanner<TableAutomaton> {
    /// Scanner over the table-driven automaton
    pub fn new(input: &str) -> Self {
        Self::with_automaton(input, TableAutomaton::new())
    }
}

impl<A: Automaton> Scanner<A> {
    pub fn with_automaton(input: &str, automaton: A) -> Self {
        Self::with_preferences(input, automaton, ScannerPreferences::default())
    }

    pub fn with_preferences(input: &str, automaton: A, preferences: ScannerPreferences) -> Self {
        if cfg!(debug_assertions) {
            if let Err(defect) = validate(&automaton) {
                log_error!(defect.error_code(), "Scanner built over an invalid automaton",
                    "automaton" => automaton.name(),
                    "defect" => &defect
                );
            }
        }

        let mut buffer: Vec<char> = input.chars().collect();
        let input_len = buffer.len();
        buffer.extend(END_SENTINEL.chars());

        Self {
            automaton,
            buffer,
            input_len,
            cursor: 0,
            preferences,
            metrics: ScanMetrics::default(),
            exhausted: false,
        }
    }

    /// Scan the next token
    ///
    /// Returns `EndOfStream` once the input is consumed, on this and every
    /// later call. After an error the cursor does not move, so calling again
    /// reports the same error.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.automaton.start();
        let mut scan = ScanState::new(start, self.cursor);

        if self.at_end_marker(scan.cursor)
            && self.automaton.step(start, SymbolClass::EndOfInput).is_dead()
        {
            return Ok(Token::end_of_stream(Position::at_offset(self.input_len)));
        }

        loop {
            let character = self.char_at(scan.cursor);
            let Some(class) = self.classify_at(scan.cursor, character) else {
                return Err(self.illegal_character(&scan, character));
            };
            let mut next = self.automaton.step(scan.state, class);
            self.trace(&scan, class, next);

            // Tokens never extend into the sentinel
            if self.at_end_marker(scan.cursor) {
                next = State::Dead;
            }

            if self.preferences.collect_metrics {
                self.metrics.transitions += 1;
            }

            if next.is_dead() {
                return self.finish_token(&scan, character);
            }

            scan.state = next;
            scan.cursor += 1;
            if let Some(kind) = self.automaton.accepts(next) {
                scan.last_accepting = Some(kind);
                scan.accepted_end = scan.cursor;
            }
        }
    }

    /// Drain the scanner into a token stream
    pub fn tokenize(&mut self) -> Result<TokenStream, LexError> {
        if self.input_len > MAX_INPUT_LENGTH {
            let error = LexError::InputTooLarge {
                length: self.input_len,
            };
            log_error!(error.error_code(), "Input exceeds the length limit",
                "length" => self.input_len,
                "max" => MAX_INPUT_LENGTH
            );
            return Err(error);
        }

        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token.kind.is_end() {
                log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
                    "automaton" => self.automaton.name(),
                    "tokens" => tokens.len(),
                    "characters" => self.input_len
                );
                return Ok(TokenStream::new(tokens, token));
            }

            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexError::TooManyTokens {
                    count: tokens.len() + 1,
                };
                log_error!(error.error_code(), "Token count exceeds the limit",
                    "count" => tokens.len() + 1,
                    "max" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }
            tokens.push(token);
        }
    }

    /// Position of the next unread character
    pub fn position(&self) -> Position {
        Position::at_offset(self.cursor)
    }

    /// Characters of the caller's input not yet scanned
    pub fn remaining(&self) -> usize {
        self.input_len.saturating_sub(self.cursor)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.input_len
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &ScannerPreferences {
        &self.preferences
    }

    pub fn automaton(&self) -> &A {
        &self.automaton
    }

    fn char_at(&self, offset: usize) -> char {
        self.buffer.get(offset).copied().unwrap_or(END_MARKER)
    }

    fn at_end_marker(&self, offset: usize) -> bool {
        offset >= self.input_len
    }

    /// `$` is only the end marker inside the sentinel
    fn classify_at(&self, offset: usize, character: char) -> Option<SymbolClass> {
        if offset < self.input_len && !is_legal_input(character) {
            None
        } else {
            self.automaton.classify(character)
        }
    }

    fn finish_token(&mut self, scan: &ScanState, character: char) -> Result<Token, LexError> {
        let Some(kind) = scan.last_accepting else {
            let position = Position::at_offset(scan.cursor);
            let error = LexError::NoTokenMatched {
                state: scan.state,
                character,
                position,
            };
            self.report(&error, position, character, scan.state);
            return Err(error);
        };

        let token = Token::new(kind, Span::from_offsets(self.cursor, scan.accepted_end));
        if self.preferences.collect_metrics {
            self.metrics.pushbacks += scan.cursor + 1 - scan.accepted_end;
            self.metrics.record_token(&token);
        }

        self.cursor = scan.accepted_end;
        Ok(token)
    }

    fn illegal_character(&self, scan: &ScanState, character: char) -> LexError {
        let position = Position::at_offset(scan.cursor);
        let error = LexError::IllegalCharacter {
            state: scan.state,
            character,
            position,
        };
        self.report(&error, position, character, scan.state);
        error
    }

    fn report(&self, error: &LexError, position: Position, character: char, state: State) {
        let character = format!("{:?}", character);
        if self.preferences.include_position_in_errors {
            let span = Span::new(position, Position::at_offset(position.offset + 1));
            log_error!(error.error_code(), &error.to_string(), span = span,
                "automaton" => self.automaton.name(),
                "character" => character,
                "state" => state
            );
        } else {
            log_error!(error.error_code(), &error.to_string(),
                "automaton" => self.automaton.name(),
                "character" => character,
                "state" => state
            );
        }
    }

    fn trace(&self, scan: &ScanState, class: SymbolClass, next: State) {
        if self.preferences.trace_transitions {
            log_debug!("Transition",
                "automaton" => self.automaton.name(),
                "offset" => scan.cursor,
                "from" => scan.state,
                "class" => class,
                "to" => next
            );
        }
    }
}

impl<A: Automaton> Iterator for Scanner<A> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let result = self.next_token();
        if !matches!(&result, Ok(token) if !token.kind.is_end()) {
            self.exhausted = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::table::TRANSITIONS;
    use crate::automaton::ExplicitAutomaton;
    use crate::logging;
    use assert_matches::assert_matches;

    fn kinds_of<A: Automaton>(mut scanner: Scanner<A>) -> Vec<TokenKind> {
        let mut kinds = Vec::new();
        loop {
            let token = scanner.next_token().unwrap();
            kinds.push(token.kind);
            if token.kind.is_end() {
                return kinds;
            }
        }
    }

    fn quiet() -> ScannerPreferences {
        ScannerPreferences {
            trace_transitions: false,
            collect_metrics: true,
            ..ScannerPreferences::default()
        }
    }

    #[test]
    fn test_keyword() {
        let mut scanner = Scanner::new("int");
        let token = scanner.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Keyword);
        assert_eq!(token.span, Span::from_offsets(0, 3));
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::EndOfStream);
    }

    #[test]
    fn test_longest_match_demotes_keyword() {
        let mut scanner = Scanner::new("intx");
        let token = scanner.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.span.len(), 4);
        assert!(scanner.next_token().unwrap().kind.is_end());
    }

    #[test]
    fn test_keyword_prefixes_are_identifiers() {
        use TokenKind::*;
        assert_eq!(kinds_of(Scanner::new("i")), vec![Identifier, EndOfStream]);
        assert_eq!(kinds_of(Scanner::new("in")), vec![Identifier, EndOfStream]);
        assert_eq!(kinds_of(Scanner::new("x")), vec![Identifier, EndOfStream]);
    }

    #[test]
    fn test_mixed_input() {
        use TokenKind::*;
        assert_eq!(
            kinds_of(Scanner::new("i in int intx")),
            vec![
                Identifier, Whitespace, Identifier, Whitespace, Keyword, Whitespace, Identifier,
                EndOfStream
            ]
        );
    }

    #[test]
    fn test_whitespace_run_is_one_token() {
        let mut scanner = Scanner::new("   ");
        let token = scanner.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Whitespace);
        assert_eq!(token.span.len(), 3);
        assert!(scanner.next_token().unwrap().kind.is_end());
    }

    #[test]
    fn test_empty_input() {
        let mut scanner = Scanner::new("");
        assert!(scanner.is_finished());
        let token = scanner.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::EndOfStream);
        assert_eq!(token.span, Span::empty(Position::at_offset(0)));
    }

    #[test]
    fn test_end_of_stream_is_sticky() {
        let mut scanner = Scanner::new("ab");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Identifier);
        for _ in 0..3 {
            assert_eq!(scanner.next_token().unwrap().kind, TokenKind::EndOfStream);
        }
        assert_eq!(scanner.remaining(), 0);
    }

    #[test]
    fn test_pushback_leaves_boundary_unconsumed() {
        let mut scanner = Scanner::with_preferences("ab cd", TableAutomaton::new(), quiet());

        let first = scanner.next_token().unwrap();
        assert_eq!(first.span, Span::from_offsets(0, 2));
        assert_eq!(scanner.position(), Position::at_offset(2));

        let second = scanner.next_token().unwrap();
        assert_eq!(second.kind, TokenKind::Whitespace);
        assert_eq!(second.span, Span::from_offsets(2, 3));

        let third = scanner.next_token().unwrap();
        assert_eq!(third.span, Span::from_offsets(3, 5));
        assert_eq!(scanner.metrics().pushbacks, 3);
    }

    #[test]
    fn test_illegal_character_mid_stream() {
        let memory = logging::capture();
        let mut scanner = Scanner::new("ab Cd");

        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Identifier);
        // The pending whitespace token is abandoned, not returned
        let error = scanner.next_token().unwrap_err();
        assert_eq!(
            error,
            LexError::IllegalCharacter {
                state: State::Whitespace,
                character: 'C',
                position: Position::at_offset(3),
            }
        );
        assert!(memory.has_error_with_code(codes::lexical::ILLEGAL_CHARACTER));

        // The cursor does not move past the offending character
        assert_eq!(scanner.next_token(), Err(error));
    }

    #[test]
    fn test_illegal_character_inside_token() {
        let result = Scanner::new("abc1").next_token();
        assert_matches!(
            result,
            Err(LexError::IllegalCharacter {
                state: State::Identifier,
                character: '1',
                ..
            })
        );
    }

    #[test]
    fn test_dollar_in_input_is_illegal() {
        let mut scanner = Scanner::with_automaton("a$b", ExplicitAutomaton::new());
        assert_matches!(
            scanner.next_token(),
            Err(LexError::IllegalCharacter {
                character: '$',
                position,
                ..
            }) if position.offset == 1
        );
        assert_matches!(
            Scanner::new("$").next_token(),
            Err(LexError::IllegalCharacter { character: '$', .. })
        );
    }

    #[test]
    fn test_newline_and_uppercase_are_illegal() {
        for input in ["\n", "A", "a\tb", "é"] {
            let result = Scanner::new(input).tokenize();
            assert_matches!(result, Err(LexError::IllegalCharacter { .. }), "{input:?}");
        }
    }

    #[test]
    fn test_no_token_matched() {
        let memory = logging::capture();
        let mut table = TRANSITIONS;
        table[State::Start.index()][SymbolClass::OtherLower.index()] = State::Dead;
        let mut scanner = Scanner::with_automaton("ix x", TableAutomaton::with_table(table));

        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Identifier);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Whitespace);
        assert_eq!(
            scanner.next_token(),
            Err(LexError::NoTokenMatched {
                state: State::Start,
                character: 'x',
                position: Position::at_offset(3),
            })
        );
        assert!(memory.has_error_with_code(codes::lexical::NO_TOKEN_MATCHED));
    }

    #[test]
    fn test_stranded_automaton_fails_at_sentinel() {
        let mut table = TRANSITIONS;
        table[State::Start.index()][SymbolClass::OtherLower.index()] = State::Start;
        let result = Scanner::with_automaton("xx", TableAutomaton::with_table(table)).next_token();

        assert_eq!(
            result,
            Err(LexError::NoTokenMatched {
                state: State::Start,
                character: END_MARKER,
                position: Position::at_offset(2),
            })
        );
    }

    #[test]
    fn test_sentinel_consuming_automaton_stops_at_input_end() {
        let mut table = TRANSITIONS;
        table[State::Identifier.index()][SymbolClass::EndOfInput.index()] = State::Identifier;
        let mut scanner = Scanner::with_automaton("ab", TableAutomaton::with_table(table));

        let token = scanner.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.span, Span::from_offsets(0, 2));
        assert_eq!(token.lexeme("ab"), "ab");
        assert_eq!(scanner.position(), Position::at_offset(2));
        assert!(scanner.next_token().unwrap().kind.is_end());
    }

    #[test]
    fn test_start_state_consuming_sentinel_matches_nothing() {
        let mut table = TRANSITIONS;
        table[State::Start.index()][SymbolClass::EndOfInput.index()] = State::Identifier;
        table[State::Identifier.index()][SymbolClass::EndOfInput.index()] = State::Identifier;
        let mut scanner = Scanner::with_automaton("a", TableAutomaton::with_table(table));

        let token = scanner.next_token().unwrap();
        assert_eq!(token.span, Span::from_offsets(0, 1));
        assert_eq!(
            scanner.next_token(),
            Err(LexError::NoTokenMatched {
                state: State::Start,
                character: END_MARKER,
                position: Position::at_offset(1),
            })
        );
        assert_eq!(scanner.position(), Position::at_offset(1));
    }

    #[test]
    fn test_metrics() {
        let mut scanner =
            Scanner::with_preferences("int xs", ExplicitAutomaton::new(), quiet());
        scanner.tokenize().unwrap();

        let metrics = scanner.metrics();
        assert_eq!(metrics.total_tokens, 3);
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.whitespace_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 1);
        assert_eq!(metrics.chars_consumed, 6);
        // One step per character plus the step into the dead state per token
        assert_eq!(metrics.transitions, 6 + 3);
        assert_eq!(metrics.pushbacks, 3);
    }

    #[test]
    fn test_metrics_disabled() {
        let preferences = ScannerPreferences {
            collect_metrics: false,
            ..ScannerPreferences::default()
        };
        let mut scanner = Scanner::with_preferences("int", TableAutomaton::new(), preferences);
        scanner.tokenize().unwrap();
        assert_eq!(scanner.metrics(), &ScanMetrics::default());
    }

    #[test]
    fn test_transition_tracing() {
        let memory = logging::capture();
        let preferences = ScannerPreferences {
            trace_transitions: true,
            ..ScannerPreferences::default()
        };
        let mut scanner = Scanner::with_preferences("qz", TableAutomaton::new(), preferences);
        scanner.tokenize().unwrap();

        assert!(memory.get_events().iter().any(|e| {
            e.is_debug()
                && e.message == "Transition"
                && e.context.get("offset").map(String::as_str) == Some("1")
        }));
    }

    #[test]
    fn test_tokenize_collects_stream() {
        let stream = Scanner::new("int a").tokenize().unwrap();
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.end().span, Span::empty(Position::at_offset(5)));
        assert_eq!(stream.span(), Span::from_offsets(0, 5));
    }

    #[test]
    fn test_iterator_stops_after_end() {
        let results: Vec<_> = Scanner::new("a b").collect();
        assert_eq!(results.len(), 4);
        assert_matches!(results.last(), Some(Ok(token)) if token.kind.is_end());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let results: Vec<_> = Scanner::new("a B c").collect();
        assert_eq!(results.len(), 2);
        assert_matches!(results.last(), Some(Err(LexError::IllegalCharacter { .. })));
    }

    #[test]
    fn test_input_too_large() {
        let input = "a".repeat(MAX_INPUT_LENGTH + 1);
        let result = Scanner::new(&input).tokenize();
        assert_eq!(
            result,
            Err(LexError::InputTooLarge {
                length: MAX_INPUT_LENGTH + 1
            })
        );
    }

    #[test]
    fn test_too_many_tokens() {
        // Alternating letters and spaces: one token per character
        let count = MAX_TOKEN_COUNT + 1;
        if count > MAX_INPUT_LENGTH {
            return;
        }
        let input: String = (0..count).map(|i| if i % 2 == 0 { 'a' } else { ' ' }).collect();
        let result = Scanner::new(&input).tokenize();
        assert_eq!(result, Err(LexError::TooManyTokens { count }));
    }
}
