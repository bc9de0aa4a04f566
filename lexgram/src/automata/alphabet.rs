//! Input symbols and the alphabet builder.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// An atomic alphabet element: a single character or a short token.
///
/// Equality is by value. The epsilon marker is not an `Input`; epsilon
/// transitions carry no label at all (see [`Transition::label`]).
///
/// [`Transition::label`]: super::Transition::label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Input(String);

impl Input {
    pub fn new(symbol: impl Into<String>) -> Self {
        Input(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<char> for Input {
    fn from(symbol: char) -> Self {
        Input(symbol.to_string())
    }
}

impl From<&str> for Input {
    fn from(symbol: &str) -> Self {
        Input(symbol.to_string())
    }
}

impl From<String> for Input {
    fn from(symbol: String) -> Self {
        Input(symbol)
    }
}

impl Borrow<str> for Input {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A frozen set of input symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: BTreeSet<Input>,
}

impl Alphabet {
    pub fn contains(&self, input: &Input) -> bool {
        self.symbols.contains(input)
    }

    pub fn contains_str(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Input> + '_ {
        self.symbols.iter()
    }
}

impl<'a> IntoIterator for &'a Alphabet {
    type Item = &'a Input;
    type IntoIter = std::collections::btree_set::Iter<'a, Input>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl FromIterator<Input> for Alphabet {
    fn from_iter<I: IntoIterator<Item = Input>>(iter: I) -> Self {
        Alphabet {
            symbols: iter.into_iter().collect(),
        }
    }
}

/// Accumulates raw symbols and freezes them into an [`Alphabet`].
///
/// Adding a symbol twice is not an error.
#[derive(Debug, Clone, Default)]
pub struct AlphabetBuilder {
    raw: BTreeSet<String>,
}

impl AlphabetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_symbol(&mut self, symbol: impl Into<Input>) -> &mut Self {
        let Input(raw) = symbol.into();
        self.raw.insert(raw);
        self
    }

    /// Add every character of `chars` as its own symbol.
    pub fn add_chars(&mut self, chars: &str) -> &mut Self {
        for ch in chars.chars() {
            self.add_symbol(ch);
        }
        self
    }

    pub fn build(&self) -> Alphabet {
        self.raw.iter().cloned().map(Input).collect()
    }
}
