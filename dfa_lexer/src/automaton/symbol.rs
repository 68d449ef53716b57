//! Input symbol classes

use serde::Serialize;
use std::fmt;

/// Character appended (twice) to every input buffer to mark its end
pub const END_MARKER: char = '$';

/// Sentinel appended to the caller's text
pub const END_SENTINEL: &str = "$$";

/// Disjoint classes the input alphabet is partitioned into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum SymbolClass {
    EndOfInput = 0,
    Space = 1,
    LetterI = 2,
    LetterN = 3,
    LetterT = 4,
    /// Any lowercase letter other than `i`, `n`, `t`
    OtherLower = 5,
}

impl SymbolClass {
    pub const COUNT: usize = 6;

    pub const ALL: [SymbolClass; SymbolClass::COUNT] = [
        SymbolClass::EndOfInput,
        SymbolClass::Space,
        SymbolClass::LetterI,
        SymbolClass::LetterN,
        SymbolClass::LetterT,
        SymbolClass::OtherLower,
    ];

    /// Column index into transition tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SymbolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolClass::EndOfInput => "$",
            SymbolClass::Space => "sp",
            SymbolClass::LetterI => "i",
            SymbolClass::LetterN => "n",
            SymbolClass::LetterT => "t",
            SymbolClass::OtherLower => "*",
        };
        f.write_str(name)
    }
}

/// Characters callers may pass in their input text
pub fn is_legal_input(ch: char) -> bool {
    ch == ' ' || ch.is_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_alphabet() {
        assert!(is_legal_input(' '));
        assert!(is_legal_input('q'));
        assert!(!is_legal_input('Q'));
        assert!(!is_legal_input(END_MARKER));
        assert!(!is_legal_input('\t'));
        assert!(!is_legal_input('é'));
    }

    #[test]
    fn test_sentinel_is_two_markers() {
        assert_eq!(END_SENTINEL.chars().count(), 2);
        assert!(END_SENTINEL.chars().all(|c| c == END_MARKER));
    }
}
