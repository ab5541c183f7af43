//! # lexdfa
//!
//! A small deterministic finite automaton engine for recognizing patterns in character streams.
//!
//! This library provides functionality to:
//! - Run a DFA over a complete input and report whether it is accepted
//! - Build an automaton accepting exactly one word
//! - Build an automaton accepting a single `//` line comment or `/* */` block comment
//! - Verify that a transition table is total and its trap state absorbing
//! - Save and load automata as json
//! - Visualize the automata state machine

// Re-export the modules
pub mod classifier;
pub mod comment;
pub mod dfa;
pub mod fa;
pub mod visualizer;
pub mod word;

// Re-export commonly used functions for convenience
pub use comment::construct_comment_dfa;
pub use dfa::{load_dfa, DFAError, DFA};
pub use fa::{Symbol, FA};
pub use visualizer::visualize;
pub use word::construct_word_dfa;
