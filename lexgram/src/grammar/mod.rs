//! Context-free grammars and their derived sets.
//!
//! A [`Grammar`] is built once from its symbols and productions, runs the
//! nullable and FIRST analyses eagerly, and is read-only afterwards. Parser
//! table builders query it through [`Grammar::is_nullable`],
//! [`Grammar::starts_with`] and friends.

pub mod analysis;
mod production;
mod symbol;
pub mod text;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::debug;

use crate::error::GrammarError;

pub use analysis::{FirstSet, StartsWith};
pub use production::Production;
pub use symbol::Symbol;

/// A context-free grammar with precomputed nullable and FIRST sets.
#[derive(Debug, Clone)]
pub struct Grammar {
    nonterminals: BTreeSet<Symbol>,
    terminals: BTreeSet<Symbol>,
    /// Alternatives per left side, in insertion order.
    productions: BTreeMap<Symbol, Vec<Production>>,
    start_symbol: Symbol,
    nullable: BTreeSet<Symbol>,
    starts_with: StartsWith,
    first: BTreeMap<Symbol, BTreeSet<Symbol>>,
}

impl Grammar {
    /// Build a grammar and run its analyses.
    ///
    /// Symbols are classified by the collection they are passed in, whatever
    /// their own terminal flag says. Productions keep the order in which they
    /// are supplied within each left side; the first production of the start
    /// symbol is the start production.
    pub fn new(
        nonterminals: impl IntoIterator<Item = Symbol>,
        terminals: impl IntoIterator<Item = Symbol>,
        productions: impl IntoIterator<Item = Production>,
        start_symbol: Symbol,
    ) -> Result<Self, GrammarError> {
        let nonterminals: BTreeSet<Symbol> = nonterminals
            .into_iter()
            .map(|symbol| Symbol::nonterminal(symbol.name()))
            .collect();
        let terminals: BTreeSet<Symbol> = terminals
            .into_iter()
            .map(|symbol| Symbol::terminal(symbol.name()))
            .collect();

        for nonterminal in &nonterminals {
            if terminals.contains(&Symbol::terminal(nonterminal.name())) {
                return Err(GrammarError::ConflictingSymbol {
                    name: nonterminal.name().to_string(),
                });
            }
        }

        let start_symbol = Symbol::nonterminal(start_symbol.name());
        if !nonterminals.contains(&start_symbol) {
            return Err(GrammarError::UndeclaredStart {
                symbol: start_symbol,
            });
        }

        let mut grouped: BTreeMap<Symbol, Vec<Production>> = BTreeMap::new();
        let mut orders: HashSet<u32> = HashSet::new();

        for production in productions {
            if !nonterminals.contains(production.left_side()) {
                return Err(GrammarError::UndeclaredLeftSide { production });
            }

            let undeclared = production
                .right_side()
                .iter()
                .find(|symbol| {
                    !symbol.is_end_marker()
                        && !nonterminals.contains(*symbol)
                        && !terminals.contains(*symbol)
                })
                .cloned();
            if let Some(symbol) = undeclared {
                return Err(GrammarError::UndeclaredSymbol { symbol, production });
            }

            if !orders.insert(production.order()) {
                return Err(GrammarError::DuplicateOrder {
                    order: production.order(),
                });
            }

            grouped
                .entry(production.left_side().clone())
                .or_default()
                .push(production);
        }

        let nullable = analysis::nullable_symbols(&nonterminals, &grouped);
        let starts_with = StartsWith::compute(
            nonterminals.iter().chain(terminals.iter()).cloned(),
            &grouped,
            &nullable,
        );
        let first = starts_with.first_sets();

        debug!(
            "grammar: {} nonterminals, {} terminals, {} productions, start {}",
            nonterminals.len(),
            terminals.len(),
            orders.len(),
            start_symbol
        );

        Ok(Grammar {
            nonterminals,
            terminals,
            productions: grouped,
            start_symbol,
            nullable,
            starts_with,
            first,
        })
    }

    /// Whether `symbol` can derive the empty string. The end marker always can.
    pub fn is_nullable(&self, symbol: &Symbol) -> bool {
        symbol.is_end_marker() || self.nullable.contains(symbol)
    }

    /// Whether every symbol of `sequence` is nullable; the empty sequence is.
    pub fn is_nullable_sequence(&self, sequence: &[Symbol]) -> bool {
        sequence.iter().all(|symbol| self.is_nullable(symbol))
    }

    /// [`is_nullable_sequence`](Self::is_nullable_sequence) over
    /// whitespace-separated names. Unknown names are not nullable.
    pub fn is_nullable_str(&self, sequence: &str) -> bool {
        self.resolve(sequence).iter().all(|symbol| match symbol {
            Some(symbol) => self.is_nullable(symbol),
            None => false,
        })
    }

    /// FIRST of a single symbol. The end marker and undeclared symbols start
    /// with nothing.
    pub fn starts_with(&self, symbol: &Symbol) -> FirstSet {
        FirstSet {
            terminals: self.first.get(symbol).cloned().unwrap_or_default(),
            nullable: self.is_nullable(symbol),
        }
    }

    /// FIRST of a sequence.
    ///
    /// Symbols contribute left to right. The walk stops after the first
    /// symbol that cannot vanish; if every symbol can vanish the result is
    /// the union of all of them and is itself nullable.
    pub fn starts_with_sequence(&self, sequence: &[Symbol]) -> FirstSet {
        self.first_of(sequence.iter().map(Some))
    }

    /// [`starts_with_sequence`](Self::starts_with_sequence) over
    /// whitespace-separated names resolved against the declared symbols.
    /// `"$"` is the empty sequence. An unknown name contributes nothing and
    /// ends the walk.
    pub fn starts_with_str(&self, sequence: &str) -> FirstSet {
        let resolved = self.resolve(sequence);
        self.first_of(resolved.iter().map(Option::as_ref))
    }

    /// Every symbol `symbol` starts with, nonterminals and itself included.
    pub fn starts_with_closure(&self, symbol: &Symbol) -> BTreeSet<&Symbol> {
        self.starts_with.row(symbol).collect()
    }

    /// The full starts-with relation.
    pub fn starts_with_relation(&self) -> &StartsWith {
        &self.starts_with
    }

    /// The nullable symbols, end marker included.
    pub fn nullable_symbols(&self) -> &BTreeSet<Symbol> {
        &self.nullable
    }

    /// FIRST of every declared symbol.
    pub fn first_sets(&self) -> &BTreeMap<Symbol, BTreeSet<Symbol>> {
        &self.first
    }

    /// All productions by ascending `order`.
    pub fn productions(&self) -> Vec<&Production> {
        let mut all: Vec<&Production> = self.productions.values().flatten().collect();
        all.sort();
        all
    }

    /// The alternatives of `left_side`, in insertion order.
    pub fn productions_of(&self, left_side: &Symbol) -> &[Production] {
        self.productions
            .get(left_side)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn terminal_symbols(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    pub fn nonterminal_symbols(&self) -> &BTreeSet<Symbol> {
        &self.nonterminals
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    /// The first production of the start symbol.
    pub fn start_production(&self) -> Option<&Production> {
        self.productions_of(&self.start_symbol).first()
    }

    /// Look up a declared symbol by name.
    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        let nonterminal = Symbol::nonterminal(name);
        if let Some(symbol) = self.nonterminals.get(&nonterminal) {
            return Some(symbol);
        }
        self.terminals.get(&Symbol::terminal(name))
    }

    /// Resolve names to declared symbols; `None` marks an unknown name.
    fn resolve(&self, sequence: &str) -> Vec<Option<Symbol>> {
        text::split_sequence(sequence)
            .into_iter()
            .map(|name| match name == Symbol::END_MARKER {
                true => Some(Symbol::end_marker()),
                false => self.symbol(name).cloned(),
            })
            .collect()
    }

    fn first_of<'s>(&self, sequence: impl Iterator<Item = Option<&'s Symbol>>) -> FirstSet {
        let mut result = FirstSet::new();

        for symbol in sequence {
            let Some(symbol) = symbol else {
                return result;
            };
            if let Some(first) = self.first.get(symbol) {
                result.terminals.extend(first.iter().cloned());
            }
            if !self.is_nullable(symbol) {
                return result;
            }
        }

        result.nullable = true;
        result
    }
}

/// Incremental grammar declaration with automatic production numbering.
///
/// Right-side names are resolved when [`build`](Self::build) runs: a declared
/// nonterminal or terminal name resolves to that symbol, `$` to the end
/// marker, and anything else by the `<nonterminal>` naming convention (and is
/// then reported as undeclared).
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    start_symbol: String,
    nonterminals: Vec<String>,
    terminals: Vec<String>,
    productions: Vec<(String, Vec<String>)>,
}

impl GrammarBuilder {
    /// Start a grammar whose start symbol is the nonterminal `start_symbol`.
    pub fn new(start_symbol: impl Into<String>) -> Self {
        let start_symbol = start_symbol.into();
        GrammarBuilder {
            nonterminals: vec![start_symbol.clone()],
            start_symbol,
            terminals: Vec::new(),
            productions: Vec::new(),
        }
    }

    pub fn nonterminal(&mut self, name: impl Into<String>) -> &mut Self {
        self.nonterminals.push(name.into());
        self
    }

    pub fn nonterminals<S: Into<String>>(&mut self, names: impl IntoIterator<Item = S>) -> &mut Self {
        self.nonterminals.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn terminal(&mut self, name: impl Into<String>) -> &mut Self {
        self.terminals.push(name.into());
        self
    }

    pub fn terminals<S: Into<String>>(&mut self, names: impl IntoIterator<Item = S>) -> &mut Self {
        self.terminals.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add `left_side ::= right_side`. An empty right side is an epsilon
    /// production. The production's `order` is its position among all
    /// productions added so far.
    pub fn production(&mut self, left_side: &str, right_side: &[&str]) -> &mut Self {
        self.productions.push((
            left_side.to_string(),
            right_side.iter().map(|name| name.to_string()).collect(),
        ));
        self
    }

    /// Add every alternative of a `"<A> ::= x <B> | $"` line, in order.
    pub fn production_str(&mut self, line: &str) -> Result<&mut Self, GrammarError> {
        let (left_side, alternatives) = text::split_production_line(line)?;
        for alternative in alternatives {
            self.production(left_side, &alternative);
        }
        Ok(self)
    }

    pub fn build(&self) -> Result<Grammar, GrammarError> {
        let nonterminal_names: HashSet<&str> =
            self.nonterminals.iter().map(String::as_str).collect();
        let terminal_names: HashSet<&str> = self.terminals.iter().map(String::as_str).collect();

        let classify = |name: &str| {
            if nonterminal_names.contains(name) {
                Symbol::nonterminal(name)
            } else if terminal_names.contains(name) {
                Symbol::terminal(name)
            } else {
                text::parse_symbol(name)
            }
        };

        let productions = self
            .productions
            .iter()
            .enumerate()
            .map(|(order, (left_side, right_side))| {
                Production::new(
                    Symbol::nonterminal(left_side.as_str()),
                    right_side.iter().map(|name| classify(name.as_str())),
                    order as u32,
                )
            })
            .collect::<Vec<_>>();

        Grammar::new(
            self.nonterminals.iter().map(Symbol::nonterminal),
            self.terminals.iter().map(Symbol::terminal),
            productions,
            Symbol::nonterminal(self.start_symbol.as_str()),
        )
    }
}
