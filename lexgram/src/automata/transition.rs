//! Labeled edges between automaton states.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use super::{Input, StateId};

/// A single edge `source --label--> target`.
///
/// `label == None` is an epsilon edge. Identity is the full triple, so
/// several transitions may leave the same state on the same label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    source: StateId,
    target: StateId,
    label: Option<Input>,
}

impl Transition {
    pub fn new(source: StateId, target: StateId, label: Option<Input>) -> Self {
        Transition {
            source,
            target,
            label,
        }
    }

    /// A labeled transition reading `input`.
    pub fn on(source: StateId, target: StateId, input: impl Into<Input>) -> Self {
        Self::new(source, target, Some(input.into()))
    }

    /// A transition that consumes no input.
    pub fn epsilon(source: StateId, target: StateId) -> Self {
        Self::new(source, target, None)
    }

    #[inline]
    pub fn source(&self) -> StateId {
        self.source
    }

    #[inline]
    pub fn target(&self) -> StateId {
        self.target
    }

    #[inline]
    pub fn label(&self) -> Option<&Input> {
        self.label.as_ref()
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.label.is_none()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(input) => write!(f, "q{} --{}--> q{}", self.source, input, self.target),
            None => write!(f, "q{} --ε--> q{}", self.source, self.target),
        }
    }
}

/// A transition whose identity is `(source, label)` only.
///
/// The target takes no part in equality or hashing, so two edges leaving the
/// same state on the same label collide in any identity-keyed collection:
/// inserting `(q0, q1, a)` and then `(q0, q2, a)` into a `HashSet` keeps only
/// the first. Use it to ask "does this state already have an outgoing edge on
/// this label?" without caring where that edge leads.
#[derive(Debug, Clone)]
pub struct DeterministicTransition(Transition);

impl DeterministicTransition {
    pub fn new(source: StateId, target: StateId, label: Option<Input>) -> Self {
        DeterministicTransition(Transition::new(source, target, label))
    }

    /// The identity key of this transition.
    pub fn key(&self) -> (StateId, Option<&Input>) {
        (self.0.source, self.0.label.as_ref())
    }

    pub fn into_inner(self) -> Transition {
        self.0
    }
}

impl From<Transition> for DeterministicTransition {
    fn from(transition: Transition) -> Self {
        DeterministicTransition(transition)
    }
}

impl Deref for DeterministicTransition {
    type Target = Transition;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for DeterministicTransition {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for DeterministicTransition {}

impl Hash for DeterministicTransition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for DeterministicTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
