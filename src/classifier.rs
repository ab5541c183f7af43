/* Symbol classification applied to every input character before the transition lookup. A
 * classifier keeps a small set of distinguished characters; anything outside that set is
 * collapsed into Symbol::Other so the transition table only needs one column for it. */

use crate::fa::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classifier {
    distinguished: BTreeSet<char>,
}

impl Classifier {
    /// Create a classifier which keeps the provided characters apart and collapses every other
    /// character into Symbol::Other.
    pub fn new<I>(distinguished: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Classifier {
            distinguished: distinguished.into_iter().collect(),
        }
    }

    /// Map an input character to the symbol used as the transition table key
    pub fn classify(&self, ch: char) -> Symbol {
        if self.is_distinguished(ch) {
            Symbol::Char(ch)
        } else {
            Symbol::Other
        }
    }

    pub fn is_distinguished(&self, ch: char) -> bool {
        self.distinguished.contains(&ch)
    }

    /// Every symbol the classifier can produce, distinguished characters in order followed by
    /// Symbol::Other.
    pub fn get_alphabet(&self) -> Vec<Symbol> {
        let mut alphabet: Vec<Symbol> = self.distinguished.iter().map(|ch| Symbol::Char(*ch)).collect();
        alphabet.push(Symbol::Other);
        alphabet
    }
}
