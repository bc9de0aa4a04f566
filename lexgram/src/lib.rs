//! # lexgram: automata and grammar analysis for scanner/parser generators
//!
//! lexgram provides the two analysis back-ends a table-driven front end is
//! built on:
//!
//! - **Automata:** an alphabet, a transition model, and the transfer function
//!   that simulates an NFA (`epsilon_closure`, `advance`) and feeds subset
//!   construction.
//! - **Grammars:** symbols, productions with identity-by-order, and the
//!   derived sets every LL/LR table builder needs: nullable symbols and
//!   FIRST sets for symbols and sequences.
//!
//! ## Architecture
//!
//! ```text
//!  Scanner side                          Parser side
//!  ────────────                          ───────────
//!  AlphabetBuilder ──▶ Alphabet          GrammarBuilder / text lines
//!        │                                      │
//!  Transitions ──▶ TransferFunction             ▼
//!        │           (ε-closure, advance)   Grammar::new (validation)
//!        ▼                                      │
//!     Automaton ──▶ run / longest_match         ├─▶ nullable fixed point
//!        │                                      ├─▶ starts-with matrix
//!        ▼                                      │     (reflexive, transitive)
//!   subset::determinize ──▶ DFA                 ▼
//!                                        FIRST(symbol), FIRST(sequence)
//! ```
//!
//! Everything is computed at construction and read-only afterwards; the only
//! failure points are [`AutomatonError`] and [`GrammarError`] at the
//! construction boundary.

pub mod automata;
pub mod error;
pub mod grammar;

#[cfg(test)]
mod tests;

pub use automata::{
    Alphabet, AlphabetBuilder, Automaton, DeterministicTransition, Input, Options, StateId,
    TransferFunction, Transition, TransitionFilter,
};
pub use error::{AutomatonError, GrammarError};
pub use grammar::{FirstSet, Grammar, GrammarBuilder, Production, StartsWith, Symbol};
