//! Subset construction: NFA → DFA conversion.
//!
//! Implements the standard powerset construction on top of the transfer
//! function:
//! 1. Epsilon-closure of the NFA start state → DFA start state
//! 2. For each DFA state and each alphabet symbol, `advance` gives the next
//!    NFA state set
//! 3. A DFA state accepts if its subset contains an accepting NFA state
//!
//! This inherently eliminates all epsilon transitions.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use super::{Automaton, StateId, TransferFunction, Transition};

/// The result of determinizing an automaton.
#[derive(Debug, Clone)]
pub struct SubsetConstruction {
    /// The deterministic automaton. Its start state is `0`.
    pub automaton: Automaton,
    /// `subsets[q]` is the set of source NFA states behind DFA state `q`.
    pub subsets: Vec<BTreeSet<StateId>>,
}

/// Convert an automaton to an equivalent deterministic one.
///
/// DFA states are numbered in discovery order. Empty target sets are dead:
/// no transition and no state is produced for them, so the resulting
/// transfer function is partial.
pub fn determinize(nfa: &Automaton) -> SubsetConstruction {
    let transfer = nfa.transfer();

    // Map from NFA state set → DFA state ID
    let mut state_map: HashMap<BTreeSet<StateId>, StateId> = HashMap::new();
    let mut subsets: Vec<BTreeSet<StateId>> = Vec::new();
    let mut worklist: Vec<StateId> = Vec::new();
    let mut transitions: Vec<Transition> = Vec::new();

    let start_set = nfa.initial_states();
    state_map.insert(start_set.clone(), 0);
    subsets.push(start_set);
    worklist.push(0);

    while let Some(current) = worklist.pop() {
        for input in nfa.alphabet() {
            let target_set = transfer.advance(&subsets[current as usize], input);

            if target_set.is_empty() {
                continue;
            }

            let target = match state_map.get(&target_set) {
                Some(&existing) => existing,
                None => {
                    let id = subsets.len() as StateId;
                    state_map.insert(target_set.clone(), id);
                    subsets.push(target_set);
                    worklist.push(id);
                    id
                }
            };

            transitions.push(Transition::on(current, target, input.clone()));
        }
    }

    let accepting: Vec<StateId> = subsets
        .iter()
        .enumerate()
        .filter(|(_, subset)| nfa.is_accepting(subset))
        .map(|(id, _)| id as StateId)
        .collect();

    debug!(
        "subset construction: {} NFA states -> {} DFA states, {} transitions",
        transfer.states().len(),
        subsets.len(),
        transitions.len()
    );

    let automaton = Automaton::new(
        nfa.alphabet().clone(),
        0,
        accepting,
        TransferFunction::new(transitions),
    )
    .expect("DFA transitions only read symbols of the source alphabet");

    SubsetConstruction { automaton, subsets }
}
