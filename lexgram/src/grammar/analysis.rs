//! Nullable-set and FIRST-set computation.
//!
//! Both analyses run once, when a [`Grammar`](super::Grammar) is built:
//!
//! 1. **Nullable:** fixed-point iteration over the nonterminals until a full
//!    pass marks nothing new.
//! 2. **Starts-with:** a boolean matrix over all declared symbols, seeded
//!    with the direct "A starts with s" edges of every production, made
//!    reflexive, then closed transitively by repeated relaxation.
//!    FIRST(X) is row X restricted to terminals.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use itertools::Itertools;
use log::{debug, trace};

use super::{Production, Symbol};

/// A FIRST set: the terminals that can begin a symbol or sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirstSet {
    /// Terminals that can appear first.
    pub terminals: BTreeSet<Symbol>,
    /// Whether the symbol or sequence can derive the empty string.
    pub nullable: bool,
}

impl FirstSet {
    pub fn new() -> Self {
        FirstSet {
            terminals: BTreeSet::new(),
            nullable: false,
        }
    }

    pub fn insert(&mut self, terminal: Symbol) {
        self.terminals.insert(terminal);
    }

    /// Membership by terminal name.
    pub fn contains(&self, name: &str) -> bool {
        self.terminals.contains(&Symbol::terminal(name))
    }

    pub fn contains_symbol(&self, symbol: &Symbol) -> bool {
        self.terminals.contains(symbol)
    }

    pub fn union(&mut self, other: &FirstSet) {
        self.terminals.extend(other.terminals.iter().cloned());
        self.nullable = self.nullable || other.nullable;
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.terminals.iter()
    }

    /// Terminal names, in symbol order.
    pub fn names(&self) -> Vec<&str> {
        self.terminals.iter().map(Symbol::name).collect()
    }
}

impl Default for FirstSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FirstSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.terminals.iter().join(", "))?;
        if self.nullable {
            write!(f, " (nullable)")?;
        }
        Ok(())
    }
}

/// Compute the nonterminals that can derive the empty string.
///
/// The end marker is added to the result: it stands for "nothing remains".
pub(crate) fn nullable_symbols(
    nonterminals: &BTreeSet<Symbol>,
    productions: &BTreeMap<Symbol, Vec<Production>>,
) -> BTreeSet<Symbol> {
    let mut nullable: BTreeSet<Symbol> = BTreeSet::new();
    let mut passes = 0usize;

    loop {
        passes += 1;
        let mut changed = false;

        for symbol in nonterminals {
            if nullable.contains(symbol) {
                continue;
            }
            let Some(alternatives) = productions.get(symbol) else {
                continue;
            };

            let vanishes = alternatives.iter().any(|production| {
                production
                    .right_side()
                    .iter()
                    .all(|s| s.is_end_marker() || nullable.contains(s))
            });

            if vanishes {
                nullable.insert(symbol.clone());
                changed = true;
            }
        }

        trace!("nullable pass {}: {} symbols", passes, nullable.len());

        if !changed {
            break;
        }
    }

    nullable.insert(Symbol::end_marker());

    debug!(
        "nullable: {} of {} nonterminals after {} passes",
        nullable.iter().filter(|s| s.is_nonterminal()).count(),
        nonterminals.len(),
        passes
    );

    nullable
}

/// The reflexive-transitive "starts with" relation between declared symbols.
///
/// `X` starts with `Y` when some derivation from `X` produces a sentential
/// form whose first symbol is `Y`.
#[derive(Debug, Clone)]
pub struct StartsWith {
    /// Sorted, unique; row/column `i` of the matrix is `symbols[i]`.
    symbols: Vec<Symbol>,
    matrix: Vec<Vec<bool>>,
}

impl StartsWith {
    pub(crate) fn compute(
        symbols: impl IntoIterator<Item = Symbol>,
        productions: &BTreeMap<Symbol, Vec<Production>>,
        nullable: &BTreeSet<Symbol>,
    ) -> Self {
        let symbols: Vec<Symbol> = symbols
            .into_iter()
            .filter(|symbol| !symbol.is_end_marker())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let n = symbols.len();
        let mut relation = StartsWith {
            symbols,
            matrix: vec![vec![false; n]; n],
        };

        // Direct edges: every symbol up to and including the first one that
        // cannot vanish.
        for (left_side, alternatives) in productions {
            let Some(i) = relation.index_of(left_side) else {
                continue;
            };
            for production in alternatives {
                for symbol in production.right_side() {
                    if symbol.is_end_marker() {
                        continue;
                    }
                    if let Some(j) = relation.index_of(symbol) {
                        relation.matrix[i][j] = true;
                    }
                    if !nullable.contains(symbol) {
                        break;
                    }
                }
            }
        }

        for i in 0..n {
            relation.matrix[i][i] = true;
        }

        let passes = relation.close();

        debug!(
            "starts-with: {} symbols, {} edges, closed after {} passes",
            n,
            relation.matrix.iter().flatten().filter(|&&edge| edge).count(),
            passes
        );

        relation
    }

    /// Relax `i -> j -> k` into `i -> k` until nothing changes.
    fn close(&mut self) -> usize {
        let n = self.symbols.len();
        let mut passes = 0;

        loop {
            passes += 1;
            let mut changed = false;

            for i in 0..n {
                for j in 0..n {
                    if i == j || !self.matrix[i][j] {
                        continue;
                    }
                    for k in 0..n {
                        if self.matrix[j][k] && !self.matrix[i][k] {
                            self.matrix[i][k] = true;
                            changed = true;
                        }
                    }
                }
            }

            trace!("starts-with closure pass {}: changed = {}", passes, changed);

            if !changed {
                return passes;
            }
        }
    }

    fn index_of(&self, symbol: &Symbol) -> Option<usize> {
        self.symbols.binary_search(symbol).ok()
    }

    /// The declared symbols, in matrix order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Whether `from` starts with `to`. Unknown symbols relate to nothing.
    pub fn contains(&self, from: &Symbol, to: &Symbol) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => self.matrix[i][j],
            _ => false,
        }
    }

    /// Every symbol `from` starts with, itself included.
    pub fn row(&self, from: &Symbol) -> impl Iterator<Item = &Symbol> + '_ {
        let row = self.index_of(from).map(|i| &self.matrix[i]);
        self.symbols
            .iter()
            .enumerate()
            .filter(move |(j, _)| row.is_some_and(|row| row[*j]))
            .map(|(_, symbol)| symbol)
    }

    /// FIRST of every declared symbol: its row restricted to terminals.
    pub(crate) fn first_sets(&self) -> BTreeMap<Symbol, BTreeSet<Symbol>> {
        self.symbols
            .iter()
            .map(|symbol| {
                let first = self
                    .row(symbol)
                    .filter(|s| s.is_terminal())
                    .cloned()
                    .collect();
                (symbol.clone(), first)
            })
            .collect()
    }
}
