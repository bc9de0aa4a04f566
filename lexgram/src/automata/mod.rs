//! Finite automata for scanner generation.
//!
//! Provides the transition model, the transfer function that drives NFA
//! simulation, and subset construction:
//! `Alphabet + Transitions -> TransferFunction -> Automaton -> determinize`

pub mod alphabet;
pub mod subset;
pub mod transfer;
pub mod transition;

use std::collections::BTreeSet;

use log::debug;

use crate::error::AutomatonError;

pub use alphabet::{Alphabet, AlphabetBuilder, Input};
pub use transfer::{TransferFunction, TransitionFilter};
pub use transition::{DeterministicTransition, Transition};

/// Identifier for an automaton state.
///
/// States carry no data of their own; all behavior comes from the
/// transitions that reference them.
pub type StateId = u32;

/// Construction policy for a [`TransferFunction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Allow more than one transition per `(source, label)` pair.
    pub non_deterministic: bool,
    /// Allow transitions that consume no input.
    pub epsilon_moves: bool,
}

impl Options {
    /// Nondeterministic automaton with epsilon moves.
    pub const NFA: Options = Options {
        non_deterministic: true,
        epsilon_moves: true,
    };

    /// Deterministic automaton: one target per `(source, label)`, no epsilon moves.
    pub const DFA: Options = Options {
        non_deterministic: false,
        epsilon_moves: false,
    };
}

impl Default for Options {
    fn default() -> Self {
        Options::NFA
    }
}

/// A complete finite automaton: alphabet, start state, accepting states and
/// the transfer function over them.
#[derive(Debug, Clone)]
pub struct Automaton {
    alphabet: Alphabet,
    start: StateId,
    accepting: BTreeSet<StateId>,
    transfer: TransferFunction,
}

impl Automaton {
    /// Assemble an automaton, checking that every labeled transition reads a
    /// symbol of `alphabet`.
    pub fn new(
        alphabet: Alphabet,
        start: StateId,
        accepting: impl IntoIterator<Item = StateId>,
        transfer: TransferFunction,
    ) -> Result<Self, AutomatonError> {
        for transition in transfer.normal_transitions() {
            if let Some(input) = transition.label() {
                if !alphabet.contains(input) {
                    return Err(AutomatonError::UnknownInput {
                        transition: transition.clone(),
                    });
                }
            }
        }

        let accepting: BTreeSet<StateId> = accepting.into_iter().collect();

        debug!(
            "automaton: {} inputs, {} transitions, start q{}, {} accepting states",
            alphabet.len(),
            transfer.len(),
            start,
            accepting.len()
        );

        Ok(Automaton {
            alphabet,
            start,
            accepting,
            transfer,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepting(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    pub fn transfer(&self) -> &TransferFunction {
        &self.transfer
    }

    /// The configuration before any input is read: the epsilon-closure of the
    /// start state.
    pub fn initial_states(&self) -> BTreeSet<StateId> {
        self.transfer
            .epsilon_closure(&BTreeSet::from([self.start]))
    }

    /// Whether any state of `states` is accepting.
    pub fn is_accepting(&self, states: &BTreeSet<StateId>) -> bool {
        !states.is_disjoint(&self.accepting)
    }

    /// Feed `inputs` one at a time, returning the final configuration.
    ///
    /// Stops early once the configuration is empty, since no input can revive it.
    pub fn run<'a>(&self, inputs: impl IntoIterator<Item = &'a Input>) -> BTreeSet<StateId> {
        let mut states = self.initial_states();
        for input in inputs {
            if states.is_empty() {
                break;
            }
            states = self.transfer.advance(&states, input);
        }
        states
    }

    /// Whether the automaton accepts the whole input sequence.
    pub fn accepts<'a>(&self, inputs: impl IntoIterator<Item = &'a Input>) -> bool {
        self.is_accepting(&self.run(inputs))
    }

    /// Whether the automaton accepts `text`, read one character per input.
    pub fn accepts_str(&self, text: &str) -> bool {
        let inputs: Vec<Input> = text.chars().map(Input::from).collect();
        self.accepts(&inputs)
    }

    /// Maximal munch: the largest number of leading characters of `text`
    /// that the automaton accepts, or `None` if no prefix (not even the empty
    /// one) is accepted.
    pub fn longest_match(&self, text: &str) -> Option<usize> {
        let mut states = self.initial_states();
        let mut longest = self.is_accepting(&states).then_some(0);

        for (consumed, ch) in text.chars().enumerate() {
            states = self.transfer.advance(&states, &Input::from(ch));
            if states.is_empty() {
                break;
            }
            if self.is_accepting(&states) {
                longest = Some(consumed + 1);
            }
        }

        longest
    }
}
