/* Generic deterministic finite automaton. Builders populate a total transition table by first
 * sending every (state, symbol) pair to the trap and then overwriting the real transitions, so
 * a lookup at run time never has to handle a missing entry. */

use crate::classifier::Classifier;
use crate::fa::{Symbol, FA};
use bitvec::prelude::*;
use color_eyre::eyre::{Report, Result};
use log::{info, trace, warn};
use petgraph::dot::Dot;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::prelude::StableGraph;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;
use std::process::Command;

/// Every automaton starts in state 0 and returns there on reset
pub const START_STATE: usize = 0;

/// List of possible errors while building or loading an automaton
#[derive(Debug, PartialEq, Eq)]
pub enum DFAError {
    /// A word automaton was requested for the empty word
    EmptyWord,
    /// The automaton was finished without a trap state
    TrapNotSet,
    /// The trap state is also marked as a final state
    TrapIsFinal(usize),
    /// A state has no transition for a symbol of the alphabet
    MissingTransition(usize, Symbol),
    /// The trap state leaves itself on the given symbol
    TrapNotAbsorbing(Symbol, usize),
    /// The trap state is not one of the automaton's states
    TrapOutOfRange(usize),
    /// A transition leads to a state the automaton does not have
    TargetOutOfRange(usize, Symbol, usize),
}

impl fmt::Display for DFAError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DFAError::EmptyWord => {
                write!(f, "Error: Cannot build a word automaton for an empty word!")
            }
            DFAError::TrapNotSet => write!(f, "Error: The automaton has no trap state!"),
            DFAError::TrapIsFinal(state) => {
                write!(f, "Error: Trap state {} is marked as a final state!", state)
            }
            DFAError::MissingTransition(state, symbol) => write!(
                f,
                "Error: State {} has no transition on symbol {}!",
                state, symbol
            ),
            DFAError::TrapNotAbsorbing(symbol, target) => write!(
                f,
                "Error: Trap state leaves to state {} on symbol {}!",
                target, symbol
            ),
            DFAError::TrapOutOfRange(trap) => {
                write!(f, "Error: Trap state {} does not exist!", trap)
            }
            DFAError::TargetOutOfRange(state, symbol, target) => write!(
                f,
                "Error: State {} leads to missing state {} on symbol {}!",
                state, target, symbol
            ),
        }
    }
}

impl std::error::Error for DFAError {}

fn serialize_transitions<S>(
    transitions: &HashMap<Symbol, usize>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeMap;

    let mut entries: Vec<(&Symbol, &usize)> = transitions.iter().collect();
    entries.sort(); // Keep saved files stable between runs

    let mut ser_map = serializer.serialize_map(Some(entries.len()))?;

    for (symbol, target) in entries {
        let key_str = match symbol {
            Symbol::Char(c) => c.to_string(),
            Symbol::Other => "other".to_string(),
        };
        ser_map.serialize_entry(&key_str, target)?;
    }
    ser_map.end()
}

fn deserialize_transitions<'de, D>(deserializer: D) -> Result<HashMap<Symbol, usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let transitions: HashMap<String, usize> = HashMap::deserialize(deserializer)?;

    let mut result = HashMap::new();

    for (key, target) in transitions {
        let mut chars = key.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(ch), None) => Symbol::Char(ch),
            _ if key == "other" => Symbol::Other,
            _ => {
                return Err(serde::de::Error::custom(format!(
                    "Invalid key for Symbol: {}",
                    key
                )))
            }
        };

        result.insert(symbol, target);
    }

    Ok(result)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DFAState {
    #[serde(
        serialize_with = "serialize_transitions",
        deserialize_with = "deserialize_transitions"
    )]
    transitions: HashMap<Symbol, usize>,
}

impl DFAState {
    fn new() -> Self {
        DFAState {
            transitions: HashMap::new(),
        }
    }
    /// Get a list of all outgoing transitions for the given state
    pub fn get_transitions(&self) -> &HashMap<Symbol, usize> {
        &self.transitions
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DFA {
    states: Vec<DFAState>,
    #[serde(skip)]
    current_state: usize,
    trap_state: Option<usize>,
    accept_states: BitVec<u8>,
    classifier: Classifier,
}

impl FA for DFA {
    fn get_num_states(&self) -> usize {
        self.states.len()
    }

    fn get_start_state(&self) -> usize {
        START_STATE
    }

    fn get_trap_state(&self) -> Option<usize> {
        self.trap_state
    }

    fn get_alphabet(&self) -> Vec<Symbol> {
        self.classifier.get_alphabet()
    }

    fn get_acceptor_states(&self) -> &BitVec<u8> {
        &self.accept_states
    }

    fn get_state_transitions(&self, state_id: usize) -> Vec<(&Symbol, &usize)> {
        let mut transition_list: Vec<(&Symbol, &usize)> = match self.states.get(state_id) {
            Some(state) => state.transitions.iter().collect(),
            None => Vec::new(),
        };
        transition_list.sort();
        transition_list
    }
}

impl DFA {
    pub(crate) fn new() -> Self {
        DFA {
            states: Vec::new(),
            current_state: START_STATE,
            trap_state: None,
            accept_states: BitVec::new(),
            classifier: Classifier::default(),
        }
    }

    // Grow the state list so that id is a valid state
    fn ensure_state(&mut self, id: usize) {
        while self.states.len() <= id {
            self.states.push(DFAState::new());
        }
        if self.accept_states.len() < self.states.len() {
            self.accept_states.resize(self.states.len(), false);
        }
    }

    /// Set the characters which get their own column in the transition table. Every other
    /// character is looked up as Symbol::Other.
    pub(crate) fn set_alphabet<I>(&mut self, distinguished: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.classifier = Classifier::new(distinguished);
    }

    /// Add a transition from (from, symbol) to to, overwriting any previous target
    pub(crate) fn set_transition(&mut self, from: usize, symbol: Symbol, to: usize) {
        self.ensure_state(from.max(to));
        self.states[from].transitions.insert(symbol, to);
    }

    pub(crate) fn set_trap(&mut self, id: usize) {
        self.ensure_state(id);
        self.trap_state = Some(id);
    }

    pub(crate) fn add_final_state(&mut self, id: usize) {
        self.ensure_state(id);
        self.accept_states.set(id, true);
    }

    /// Replace the final states with the provided ones
    pub(crate) fn set_final_states<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.accept_states.fill(false);
        for id in ids {
            self.add_final_state(id);
        }
    }

    /// Returns the final states in ascending order
    pub fn get_final_states(&self) -> Vec<usize> {
        self.accept_states.iter_ones().collect()
    }

    pub fn get_current_state(&self) -> usize {
        self.current_state
    }

    pub fn get_classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Returns a reference to the DFA state whose id is provided
    pub fn get_state(&self, id: usize) -> Option<&DFAState> {
        self.states.get(id)
    }

    /// Reset the automaton to the start state
    pub fn reset(&mut self) {
        self.current_state = START_STATE;
    }

    /// Consume one input character. The character is classified first and the resulting symbol
    /// is looked up in the transition table.
    pub fn step(&mut self, ch: char) {
        let symbol = self.classifier.classify(ch);
        self.step_symbol(symbol);
    }

    fn step_symbol(&mut self, symbol: Symbol) {
        let next_state = self
            .states
            .get(self.current_state)
            .and_then(|state| state.transitions.get(&symbol));

        let next_state = match next_state {
            Some(&next_state) => next_state,
            // Builders verify totality, reaching this is a construction bug
            None => panic!(
                "No transition defined for state {} on symbol {}",
                self.current_state, symbol
            ),
        };

        trace!("{} --{}--> {}", self.current_state, symbol, next_state);

        self.current_state = next_state;
    }

    /// Check if the current state is a final state
    pub fn is_accepting(&self) -> bool {
        self.accept_states
            .get(self.current_state)
            .map(|is_accept| *is_accept)
            .unwrap_or(false)
    }

    /// Run the automaton over the whole input from the start state and report whether it ends in
    /// a final state.
    pub fn run(&mut self, input: &str) -> bool {
        self.reset();
        for ch in input.chars() {
            self.step(ch);
        }
        self.is_accepting()
    }

    /// Read the complete file into memory and run the automaton over its contents
    pub fn run_file<P: AsRef<Path>>(&mut self, file_path: P) -> Result<bool> {
        let contents = fs::read_to_string(file_path)?;
        Ok(self.run(&contents))
    }

    /// Verify the construction contract: a trap exists and is not final, every state has a
    /// transition for every symbol of the alphabet and the trap only leads back to itself.
    pub(crate) fn check_invariants(&self) -> Result<(), DFAError> {
        let trap = self.trap_state.ok_or(DFAError::TrapNotSet)?;
        let num_states = self.states.len();

        if trap >= num_states {
            return Err(DFAError::TrapOutOfRange(trap));
        }

        if self.accept_states.get(trap).map(|bit| *bit).unwrap_or(false) {
            return Err(DFAError::TrapIsFinal(trap));
        }

        let alphabet = self.classifier.get_alphabet();

        for (state_id, state) in self.states.iter().enumerate() {
            for symbol in alphabet.iter() {
                match state.transitions.get(symbol) {
                    None => return Err(DFAError::MissingTransition(state_id, *symbol)),
                    Some(&target) if target >= num_states => {
                        return Err(DFAError::TargetOutOfRange(state_id, *symbol, target))
                    }
                    Some(&target) if state_id == trap && target != trap => {
                        return Err(DFAError::TrapNotAbsorbing(*symbol, target))
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }

    /// Render the automaton in graphviz dot format. Parallel edges between two states are merged
    /// into one edge carrying every symbol.
    pub fn to_dot(&self) -> String {
        let mut stable_graph = StableGraph::new();

        let num_states = self.states.len();

        let mut edge_map: HashMap<(NodeIndex, NodeIndex), EdgeIndex> = HashMap::new();

        for state_idx in 0..num_states {
            let node_label = if Some(state_idx) == self.trap_state {
                format!("Trap {}", state_idx)
            } else if self.accept_states[state_idx] {
                format!("Final {}", state_idx)
            } else {
                format!("State {}", state_idx)
            };
            stable_graph.add_node(node_label);
        }

        for state_idx in 0..num_states {
            for (symbol, target) in self.get_state_transitions(state_idx) {
                let key = (NodeIndex::new(state_idx), NodeIndex::new(*target));

                match edge_map.get(&key) {
                    Some(edge_idx) => {
                        let old_label: &String = &stable_graph[*edge_idx];
                        let new_label = format!("{}, {}", old_label, symbol);
                        stable_graph[*edge_idx] = new_label;
                    }
                    None => {
                        let edge_idx = stable_graph.add_edge(key.0, key.1, symbol.to_string());
                        edge_map.insert(key, edge_idx);
                    }
                }
            }
        }

        Dot::new(&stable_graph).to_string()
    }

    /// Save the automaton as <filename>.dot and render it to <filename>.jpg when graphviz is
    /// available.
    pub fn show_fa(&self, filename: &str) -> Result<()> {
        let dot_filename = format!("{}.dot", filename);
        let mut dot_file = File::create(&dot_filename)?;

        dot_file.write_all(self.to_dot().as_bytes())?;

        let jpg_filename = format!("{}.jpg", filename);
        let rendered = Command::new("dot")
            .args(["-Tjpg", &dot_filename, "-o", &jpg_filename])
            .output();

        match rendered {
            Ok(output) if output.status.success() => {
                info!("DFA visualization saved as {}", jpg_filename)
            }
            Ok(output) => warn!(
                "Graphviz failed to render {}: {}",
                dot_filename,
                String::from_utf8_lossy(&output.stderr)
            ),
            Err(err) => warn!("Could not run graphviz, only {} was written: {}", dot_filename, err),
        }

        Ok(())
    }

    /// Save the automaton as pretty printed json
    pub fn save_dfa<P: AsRef<Path>>(&self, file_name: P) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;

        let mut file = File::create(file_name)?;

        writeln!(file, "{}", json_string)?;

        Ok(())
    }
}

/// Load an automaton from a saved json file. The transition table is checked again so a file
/// with a missing transition is rejected here instead of failing during a run.
pub fn load_dfa<P: AsRef<Path>>(file_name: P) -> Result<DFA> {
    let file = File::open(file_name)?;

    let buf_reader = BufReader::new(file);

    let mut dfa: DFA = serde_json::from_reader(buf_reader)?;

    // Saved bit vectors may be shorter than the state list
    let num_states = dfa.states.len();
    if dfa.accept_states.len() < num_states {
        dfa.accept_states.resize(num_states, false);
    }

    if let Err(err) = dfa.check_invariants() {
        return Err(Report::new(err));
    }

    dfa.reset();
    Ok(dfa)
}
