//! The automaton transfer function.
//!
//! Owns every transition of an automaton, split once at construction into
//! epsilon and labeled subsets, and answers the two questions a scanner or a
//! determinizer asks:
//!
//! - which transitions match a `(source?, target?, label?)` filter, and
//! - which states are reachable from a configuration after reading one input
//!   ([`TransferFunction::advance`]: move, then epsilon-closure).
//!
//! Transition sets are sized to one lexical specification, so matching is a
//! plain scan over the transitions leaving a state.

use std::collections::{BTreeSet, HashSet};
use std::ops::Bound;

use log::{debug, trace};

use super::{Alphabet, DeterministicTransition, Input, Options, StateId, Transition};
use crate::error::AutomatonError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LabelFilter<'a> {
    #[default]
    Any,
    Epsilon,
    Input(&'a Input),
}

/// Optional match predicates over a transition's source, target and label.
///
/// An unset predicate is a wildcard; [`TransitionFilter::any`] matches every
/// transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionFilter<'a> {
    source: Option<StateId>,
    target: Option<StateId>,
    label: LabelFilter<'a>,
}

impl<'a> TransitionFilter<'a> {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: StateId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn target(mut self, target: StateId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn label(mut self, input: &'a Input) -> Self {
        self.label = LabelFilter::Input(input);
        self
    }

    /// Match epsilon transitions only.
    pub fn epsilon(mut self) -> Self {
        self.label = LabelFilter::Epsilon;
        self
    }

    pub fn matches(&self, transition: &Transition) -> bool {
        if let Some(source) = self.source {
            if transition.source() != source {
                return false;
            }
        }
        if let Some(target) = self.target {
            if transition.target() != target {
                return false;
            }
        }
        match self.label {
            LabelFilter::Any => true,
            LabelFilter::Epsilon => transition.is_epsilon(),
            LabelFilter::Input(input) => transition.label() == Some(input),
        }
    }
}

/// The transitions of an automaton, partitioned into epsilon and labeled
/// edges.
///
/// Immutable once built. `epsilon_transitions()` and `normal_transitions()`
/// are disjoint and together yield every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferFunction {
    epsilon: BTreeSet<Transition>,
    normal: BTreeSet<Transition>,
}

impl TransferFunction {
    /// Build a transfer function without any policy checks.
    ///
    /// Exact duplicates collapse; distinct transitions sharing a
    /// `(source, label)` pair are all kept.
    pub fn new(transitions: impl IntoIterator<Item = Transition>) -> Self {
        let (epsilon, normal): (BTreeSet<Transition>, BTreeSet<Transition>) = transitions
            .into_iter()
            .partition(|transition| transition.is_epsilon());

        debug!(
            "transfer function: {} labeled, {} epsilon transitions",
            normal.len(),
            epsilon.len()
        );

        TransferFunction { epsilon, normal }
    }

    /// Build a transfer function and enforce `options`.
    ///
    /// With `epsilon_moves` disabled any epsilon transition is rejected. With
    /// `non_deterministic` disabled a second transition on an already used
    /// `(source, label)` pair is rejected instead of silently replacing or
    /// shadowing the first one.
    pub fn with_options(
        transitions: impl IntoIterator<Item = Transition>,
        options: Options,
    ) -> Result<Self, AutomatonError> {
        let function = Self::new(transitions);

        if !options.epsilon_moves {
            if let Some(transition) = function.epsilon.iter().next() {
                return Err(AutomatonError::EpsilonMove {
                    transition: transition.clone(),
                });
            }
        }

        if !options.non_deterministic {
            if let Some(conflict) = function.find_conflict() {
                return Err(conflict);
            }
        }

        Ok(function)
    }

    /// Whether exactly this transition (source, target and label) is stored.
    pub fn has_transition(&self, transition: &Transition) -> bool {
        match transition.is_epsilon() {
            true => self.epsilon.contains(transition),
            false => self.normal.contains(transition),
        }
    }

    /// Whether some stored transition matches every given field; `None`
    /// fields are wildcards.
    pub fn has_matching(
        &self,
        source: Option<StateId>,
        target: Option<StateId>,
        label: Option<&Input>,
    ) -> bool {
        let mut filter = TransitionFilter::any();
        if let Some(source) = source {
            filter = filter.source(source);
        }
        if let Some(target) = target {
            filter = filter.target(target);
        }
        if let Some(label) = label {
            filter = filter.label(label);
        }
        self.transitions(filter).next().is_some()
    }

    /// All stored transitions matching `filter`.
    pub fn transitions<'s>(
        &'s self,
        filter: TransitionFilter<'s>,
    ) -> impl Iterator<Item = &'s Transition> + 's {
        self.all().filter(move |transition| filter.matches(transition))
    }

    /// Every stored transition: labeled ones first, then epsilon ones.
    pub fn all(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.normal.iter().chain(self.epsilon.iter())
    }

    pub fn epsilon_transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.epsilon.iter()
    }

    pub fn normal_transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.normal.iter()
    }

    pub fn len(&self) -> usize {
        self.epsilon.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epsilon.is_empty() && self.normal.is_empty()
    }

    /// Every state referenced by a transition, as source or target.
    pub fn states(&self) -> BTreeSet<StateId> {
        self.all()
            .flat_map(|transition| [transition.source(), transition.target()])
            .collect()
    }

    /// The inputs read by labeled transitions.
    pub fn labels(&self) -> Alphabet {
        self.normal
            .iter()
            .filter_map(|transition| transition.label().cloned())
            .collect()
    }

    /// No epsilon transitions and at most one target per `(source, label)`.
    pub fn is_deterministic(&self) -> bool {
        self.epsilon.is_empty() && self.find_conflict().is_none()
    }

    /// The move phase: targets of labeled transitions reading `input` from
    /// any state of `states`.
    pub fn step(&self, states: &BTreeSet<StateId>, input: &Input) -> BTreeSet<StateId> {
        let mut targets = BTreeSet::new();
        for &state in states {
            for transition in leaving(&self.normal, state) {
                if transition.label() == Some(input) {
                    targets.insert(transition.target());
                }
            }
        }
        targets
    }

    /// All states reachable from `states` through zero or more epsilon
    /// transitions.
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        if states.is_empty() || self.epsilon.is_empty() {
            return states.clone();
        }

        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for transition in leaving(&self.epsilon, state) {
                if closure.insert(transition.target()) {
                    stack.push(transition.target());
                }
            }
        }

        trace!(
            "epsilon-closure: {} states -> {} states",
            states.len(),
            closure.len()
        );

        closure
    }

    /// The next configuration after reading `input`: move, then
    /// epsilon-closure.
    ///
    /// This is the NFA simulation step of a scanner and the per-symbol step of
    /// subset construction.
    pub fn advance(&self, states: &BTreeSet<StateId>, input: &Input) -> BTreeSet<StateId> {
        if states.is_empty() {
            return BTreeSet::new();
        }
        self.epsilon_closure(&self.step(states, input))
    }

    fn find_conflict(&self) -> Option<AutomatonError> {
        let mut seen: HashSet<DeterministicTransition> = HashSet::with_capacity(self.len());

        for transition in self.all() {
            let candidate = DeterministicTransition::from(transition.clone());
            if let Some(existing) = seen.get(&candidate) {
                return Some(AutomatonError::NonDeterministic {
                    source: transition.source(),
                    label: transition.label().cloned(),
                    first_target: existing.target(),
                    second_target: transition.target(),
                });
            }
            seen.insert(candidate);
        }

        None
    }
}

/// Transitions of `set` whose source is `state`.
///
/// Transitions order by source first, and `(state, 0, None)` is the least
/// transition leaving `state`.
fn leaving(set: &BTreeSet<Transition>, state: StateId) -> impl Iterator<Item = &Transition> + '_ {
    set.range((Bound::Included(Transition::epsilon(state, 0)), Bound::Unbounded))
        .take_while(move |transition| transition.source() == state)
}
