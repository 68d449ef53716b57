//! Shared primitive types used by the automaton, scanner and logging layers.

pub mod span;

pub use span::{Position, Span};
