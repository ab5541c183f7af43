/* Automaton recognizing a single source code comment, either a line comment running from // up
 * to and including the newline, or a block comment running from / * up to the closing * /
 * (without the spaces).
 *
 *                      "ANY, /, *"
 *                        /   \
 *                        \   /
 *                   -->  (2)  -- "\n" --> ((6))
 *                  /
 *                "/"
 *                /
 *   -> (0) -- "/" --> (1)
 *                \      "ANY, /, \n"       "*"
 *                "*"       /   \          /   \
 *                  \       \   /          \   /
 *                   -->    (3)  -- "*" --> (4) -- "/" --> ((5))
 *                           ^               /
 *                            \             /
 *                              "ANY, \n"
 *
 * Only '/', '\n' and '*' are told apart, every other character is looked up as ANY. Any symbol
 * leaving one of the final states falls into the trap (7), so one run recognizes at most one
 * comment. */

use crate::dfa::DFA;
use crate::fa::Symbol;
use log::debug;

pub const COMMENT_ALPHABET: [char; 3] = ['/', '\n', '*'];

pub const BLOCK_COMMENT_CLOSED: usize = 5;
pub const LINE_COMMENT_CLOSED: usize = 6;
pub const COMMENT_TRAP: usize = 7;

const SLASH: Symbol = Symbol::Char('/');
const NEWLINE: Symbol = Symbol::Char('\n');
const STAR: Symbol = Symbol::Char('*');
const ANY: Symbol = Symbol::Other;

/// Construct a DFA which accepts exactly one line comment or one block comment spanning the whole
/// input.
pub fn construct_comment_dfa() -> DFA {
    let mut dfa = DFA::new();

    dfa.set_alphabet(COMMENT_ALPHABET);
    dfa.set_final_states([BLOCK_COMMENT_CLOSED, LINE_COMMENT_CLOSED]);
    dfa.set_trap(COMMENT_TRAP);

    for state in 0..=COMMENT_TRAP {
        for symbol in [SLASH, NEWLINE, STAR, ANY] {
            dfa.set_transition(state, symbol, COMMENT_TRAP);
        }
    }

    // Opening, up to the fork between the two kinds of comments
    dfa.set_transition(0, SLASH, 1);
    dfa.set_transition(1, SLASH, 2);
    dfa.set_transition(1, STAR, 3);

    // Line comment
    dfa.set_transition(2, STAR, 2);
    dfa.set_transition(2, SLASH, 2);
    dfa.set_transition(2, ANY, 2);
    dfa.set_transition(2, NEWLINE, LINE_COMMENT_CLOSED);

    // Block comment
    dfa.set_transition(3, SLASH, 3);
    dfa.set_transition(3, NEWLINE, 3);
    dfa.set_transition(3, ANY, 3);
    dfa.set_transition(3, STAR, 4);
    dfa.set_transition(4, ANY, 3);
    dfa.set_transition(4, NEWLINE, 3);
    dfa.set_transition(4, STAR, 4);
    dfa.set_transition(4, SLASH, BLOCK_COMMENT_CLOSED);

    if let Err(err) = dfa.check_invariants() {
        panic!("Comment automaton is malformed: {}", err);
    }

    debug!("Built comment automaton with trap {}", COMMENT_TRAP);

    dfa
}
