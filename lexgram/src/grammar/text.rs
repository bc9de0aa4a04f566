//! Textual symbol convention.
//!
//! Grammar files name nonterminals `<like_this>` and terminals `LIKE_THIS`.
//! A right side of `$` is the empty sequence. Alternatives of one left side
//! are separated by `|` after a `::=`:
//!
//! ```text
//! <list> ::= <item> <list> | $
//! ```

use super::Symbol;
use crate::error::GrammarError;

/// Separator between a left side and its alternatives.
pub const DEFINES: &str = "::=";

/// Classify a single symbol name by the naming convention.
pub fn parse_symbol(name: &str) -> Symbol {
    if name == Symbol::END_MARKER {
        Symbol::end_marker()
    } else if is_nonterminal_name(name) {
        Symbol::nonterminal(name)
    } else {
        Symbol::terminal(name)
    }
}

pub fn is_nonterminal_name(name: &str) -> bool {
    name.len() > 2 && name.starts_with('<') && name.ends_with('>')
}

/// Split a whitespace-separated sequence into names; a lone `$` (or blank
/// text) is the empty sequence.
pub fn split_sequence(text: &str) -> Vec<&str> {
    let text = text.trim();
    if text == Symbol::END_MARKER {
        return Vec::new();
    }
    text.split_whitespace().collect()
}

/// Parse a whitespace-separated sequence by the naming convention.
pub fn parse_sequence(text: &str) -> Vec<Symbol> {
    split_sequence(text).into_iter().map(parse_symbol).collect()
}

/// Split `"<A> ::= x <B> | $"` into the left-side name and the names of each
/// alternative.
pub fn split_production_line(line: &str) -> Result<(&str, Vec<Vec<&str>>), GrammarError> {
    let malformed = || GrammarError::MalformedProduction {
        line: line.to_string(),
    };

    let (left, right) = line.split_once(DEFINES).ok_or_else(malformed)?;
    let left = left.trim();

    if left.is_empty() || left.contains(char::is_whitespace) {
        return Err(malformed());
    }

    let alternatives = right.split('|').map(split_sequence).collect();

    Ok((left, alternatives))
}

/// Parse a production line by the naming convention.
pub fn parse_production_line(line: &str) -> Result<(Symbol, Vec<Vec<Symbol>>), GrammarError> {
    let (left, alternatives) = split_production_line(line)?;
    let left = parse_symbol(left);

    if !left.is_nonterminal() {
        return Err(GrammarError::MalformedProduction {
            line: line.to_string(),
        });
    }

    let alternatives = alternatives
        .into_iter()
        .map(|names| names.into_iter().map(parse_symbol).collect())
        .collect();

    Ok((left, alternatives))
}
