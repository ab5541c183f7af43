/* Automaton recognizing exactly one word. For the word "foo" the states are laid out as
 *
 *   -> (0) -f-> (1) -o-> (2) -o-> ((3))
 *
 * and every other symbol, from every state including the final one, leads to the trap (4). */

use crate::dfa::{DFAError, DFA};
use crate::fa::Symbol;
use color_eyre::eyre::{Report, Result};
use log::debug;

/// Construct a DFA which accepts the provided word and nothing else. Characters that do not occur
/// in the word are classified as Symbol::Other, which always leads to the trap.
pub fn construct_word_dfa(word: &str) -> Result<DFA> {
    let letters: Vec<char> = word.chars().collect();

    if letters.is_empty() {
        return Err(Report::new(DFAError::EmptyWord));
    }

    let num_letters = letters.len();
    let final_state = num_letters;
    let trap = num_letters + 1;

    let mut dfa = DFA::new();
    dfa.set_alphabet(letters.iter().copied());
    dfa.set_trap(trap);

    let alphabet = dfa.get_classifier().get_alphabet();

    // Send every state to the trap on every symbol, the path is carved out below
    for symbol in alphabet {
        for state in 0..=trap {
            dfa.set_transition(state, symbol, trap);
        }
    }

    for (state, letter) in letters.iter().enumerate() {
        dfa.set_transition(state, Symbol::Char(*letter), state + 1);
    }

    dfa.add_final_state(final_state);

    if let Err(err) = dfa.check_invariants() {
        return Err(Report::new(err));
    }

    debug!(
        "Built word automaton for {:?} with {} states, trap {}",
        word,
        trap + 1,
        trap
    );

    Ok(dfa)
}
