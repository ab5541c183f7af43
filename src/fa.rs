use bitvec::prelude::BitVec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An input symbol as seen by the transition table. Characters the automaton
/// does not distinguish are all folded into `Other` before lookup.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Char(char),
    Other,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char('\n') => write!(f, "\\n"),
            Symbol::Char('\t') => write!(f, "\\t"),
            Symbol::Char(' ') => write!(f, "' '"),
            Symbol::Char(ch) => write!(f, "{}", ch),
            Symbol::Other => write!(f, "ANY"),
        }
    }
}

pub trait FA {
    fn get_num_states(&self) -> usize;
    fn get_start_state(&self) -> usize;
    fn get_trap_state(&self) -> Option<usize>;
    fn get_alphabet(&self) -> Vec<Symbol>;
    fn get_acceptor_states(&self) -> &BitVec<u8>;
    fn get_state_transitions(&self, state_id: usize) -> Vec<(&Symbol, &usize)>;
}
