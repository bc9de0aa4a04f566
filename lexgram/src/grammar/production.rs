use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use super::Symbol;

/// A production `left_side ::= right_side`.
///
/// **Identity is `order` alone.** Two productions with the same left and right
/// sides but different `order` values are different productions, and equality,
/// hashing and ordering all ignore the symbols. Table builders rely on this to
/// keep otherwise identical alternatives apart and to break ties between them
/// (lower `order` wins).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Production {
    left_side: Symbol,
    right_side: Vec<Symbol>,
    order: u32,
}

impl Production {
    /// A right side consisting of the end marker alone is stored as an empty
    /// (epsilon) right side.
    pub fn new(left_side: Symbol, right_side: impl IntoIterator<Item = Symbol>, order: u32) -> Self {
        let mut right_side: Vec<Symbol> = right_side.into_iter().collect();
        if let [only] = right_side.as_slice() {
            if only.is_end_marker() {
                right_side.clear();
            }
        }

        Production {
            left_side,
            right_side,
            order,
        }
    }

    #[inline]
    pub fn left_side(&self) -> &Symbol {
        &self.left_side
    }

    #[inline]
    pub fn right_side(&self) -> &[Symbol] {
        &self.right_side
    }

    #[inline]
    pub fn order(&self) -> u32 {
        self.order
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.right_side.is_empty()
    }
}

impl PartialEq for Production {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for Production {}

impl Hash for Production {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order.hash(state);
    }
}

impl PartialOrd for Production {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Production {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_epsilon() {
            true => write!(f, "{} ::= {}", self.left_side, Symbol::END_MARKER),
            false => write!(f, "{} ::= {}", self.left_side, self.right_side.iter().join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_identity_is_order() {
        let a = Symbol::nonterminal("<A>");
        let x = Symbol::terminal("x");

        let first = Production::new(a.clone(), [x.clone()], 0);
        let second = Production::new(a.clone(), [x.clone()], 1);
        let unrelated = Production::new(Symbol::nonterminal("<B>"), Vec::new(), 0);

        assert_ne!(first, second);
        assert_eq!(first, unrelated);

        let set: HashSet<Production> = [first, second].into_iter().collect();
        assert_eq!(set.len(), 2, "equal-content productions must not fold");
    }

    #[test]
    fn test_end_marker_right_side_is_epsilon() {
        let p = Production::new(Symbol::nonterminal("<A>"), [Symbol::end_marker()], 3);
        assert!(p.is_epsilon());
        assert_eq!(p.to_string(), "<A> ::= $");
    }

    #[test]
    fn test_display() {
        let p = Production::new(
            Symbol::nonterminal("<S>"),
            [Symbol::nonterminal("<A>"), Symbol::terminal("c")],
            0,
        );
        assert_eq!(p.to_string(), "<S> ::= <A> c");
    }
}
