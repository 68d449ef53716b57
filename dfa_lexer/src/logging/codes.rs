//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the scanner logs.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const ILLEGAL_CHARACTER: Code = Code::new("E020");
    pub const NO_TOKEN_MATCHED: Code = Code::new("E021");
    pub const INPUT_TOO_LARGE: Code = Code::new("E022");
    pub const TOO_MANY_TOKENS: Code = Code::new("E023");
}

/// Automaton consistency error codes
pub mod automaton {
    use super::Code;

    pub const INVALID_AUTOMATON: Code = Code::new("E030");
    pub const STRATEGY_DIVERGENCE: Code = Code::new("E031");
}

/// Configuration error codes
pub mod config {
    use super::Code;

    pub const CONFIG_LOAD_FAILED: Code = Code::new("E040");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const AUTOMATON_VALIDATED: Code = Code::new("I021");
    pub const STRATEGIES_AGREE: Code = Code::new("I022");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration and environment variables",
            ),
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::High,
                false,
                true,
                "Character outside the scanner alphabet",
                "Restrict input to lowercase ASCII letters and spaces",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::High,
                false,
                true,
                "Dead state reached before any accepting state",
                "Check the automaton with validate(); the input cannot start a token",
            ),
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "Input exceeds the compile-time length limit",
                "Split the input or raise max_input_length in the build profile",
            ),
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "Token count exceeds the compile-time limit",
                "Split the input or raise max_token_count in the build profile",
            ),
            ErrorMetadata::new(
                "E030",
                "Automaton",
                Severity::Critical,
                false,
                true,
                "Automaton violates a structural invariant",
                "Fix the transition table before scanning with it",
            ),
            ErrorMetadata::new(
                "E031",
                "Automaton",
                Severity::Critical,
                false,
                true,
                "Explicit and table-driven strategies disagree",
                "Compare both automata with compare() and fix the differing entry",
            ),
            ErrorMetadata::new(
                "E040",
                "Configuration",
                Severity::Medium,
                true,
                false,
                "Runtime configuration could not be loaded",
                "Check the configuration file path and TOML syntax",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let error_codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            lexical::ILLEGAL_CHARACTER,
            lexical::NO_TOKEN_MATCHED,
            lexical::INPUT_TOO_LARGE,
            lexical::TOO_MANY_TOKENS,
            automaton::INVALID_AUTOMATON,
            automaton::STRATEGY_DIVERGENCE,
            config::CONFIG_LOAD_FAILED,
        ];

        for code in error_codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_lexical_classification() {
        let code = lexical::ILLEGAL_CHARACTER.as_str();
        assert_eq!(get_category(code), "Lexical");
        assert_eq!(get_severity(code), Severity::High);
        assert!(requires_halt(code));
        assert!(!is_recoverable(code));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_action("X999"), "No specific action available");
        assert!(is_recoverable("X999"));
    }
}
