use std::fmt;

/// A terminal or nonterminal grammar symbol.
///
/// Symbols order by name first, which fixes the row/column layout of the
/// starts-with matrix and every iteration order derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    name: String,
    terminal: bool,
}

impl Symbol {
    /// Name of the end/epsilon marker: "matches nothing".
    pub const END_MARKER: &'static str = "$";

    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            terminal: true,
        }
    }

    pub fn nonterminal(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            terminal: false,
        }
    }

    /// The end marker. Always nullable, never starts anything.
    pub fn end_marker() -> Self {
        Symbol::terminal(Self::END_MARKER)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[inline]
    pub fn is_nonterminal(&self) -> bool {
        !self.terminal
    }

    #[inline]
    pub fn is_end_marker(&self) -> bool {
        self.name == Self::END_MARKER
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
