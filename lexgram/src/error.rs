//! Construction-boundary errors.
//!
//! Queries on a built [`TransferFunction`](crate::automata::TransferFunction),
//! [`Automaton`](crate::automata::Automaton) or
//! [`Grammar`](crate::grammar::Grammar) are total and never fail. Everything
//! that can go wrong is rejected while the model is being built.

use std::fmt;

use crate::automata::{Input, StateId, Transition};
use crate::grammar::{Production, Symbol};

/// An automaton construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// An epsilon transition was supplied while [`Options::epsilon_moves`]
    /// was disabled.
    ///
    /// [`Options::epsilon_moves`]: crate::automata::Options::epsilon_moves
    EpsilonMove { transition: Transition },
    /// Two transitions leave the same state on the same label while
    /// [`Options::non_deterministic`] was disabled.
    ///
    /// [`Options::non_deterministic`]: crate::automata::Options::non_deterministic
    NonDeterministic {
        source: StateId,
        label: Option<Input>,
        first_target: StateId,
        second_target: StateId,
    },
    /// A labeled transition uses an input that is not part of the alphabet.
    UnknownInput { transition: Transition },
}

impl fmt::Display for AutomatonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonError::EpsilonMove { transition } => {
                write!(f, "epsilon moves not permitted: {}", transition)
            }
            AutomatonError::NonDeterministic {
                source,
                label,
                first_target,
                second_target,
            } => {
                let label = match label {
                    Some(input) => input.to_string(),
                    None => "ε".to_string(),
                };
                write!(
                    f,
                    "transition already defined for q{} on {:?} (targets q{} and q{}); \
                     non-determinism not permitted",
                    source, label, first_target, second_target
                )
            }
            AutomatonError::UnknownInput { transition } => {
                write!(f, "transition input not defined in alphabet: {}", transition)
            }
        }
    }
}

impl std::error::Error for AutomatonError {}

/// A grammar construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The same name was declared both as a terminal and as a nonterminal.
    ConflictingSymbol { name: String },
    /// The start symbol is not a declared nonterminal.
    UndeclaredStart { symbol: Symbol },
    /// A production's left side is not a declared nonterminal.
    UndeclaredLeftSide { production: Production },
    /// A production's right side names a symbol that was never declared.
    UndeclaredSymbol { symbol: Symbol, production: Production },
    /// Two productions carry the same `order` and would be indistinguishable.
    DuplicateOrder { order: u32 },
    /// A textual production line could not be split into a left side and
    /// alternatives.
    MalformedProduction { line: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::ConflictingSymbol { name } => {
                write!(f, "terminal and nonterminal have the same name: {}", name)
            }
            GrammarError::UndeclaredStart { symbol } => {
                write!(f, "start symbol {} is not a declared nonterminal", symbol)
            }
            GrammarError::UndeclaredLeftSide { production } => write!(
                f,
                "left side of production #{} ({}) is not a declared nonterminal",
                production.order(),
                production
            ),
            GrammarError::UndeclaredSymbol { symbol, production } => write!(
                f,
                "unrecognized symbol {} used in production #{} ({})",
                symbol,
                production.order(),
                production
            ),
            GrammarError::DuplicateOrder { order } => {
                write!(f, "more than one production has order {}", order)
            }
            GrammarError::MalformedProduction { line } => {
                write!(f, "malformed production line: {:?}", line)
            }
        }
    }
}

impl std::error::Error for GrammarError {}
