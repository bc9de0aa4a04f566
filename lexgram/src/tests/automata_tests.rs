//! Tests for the automata layer: transition queries, NFA simulation,
//! construction policy, and subset construction.

use std::collections::BTreeSet;

use crate::automata::subset::determinize;
use crate::automata::{
    AlphabetBuilder, Automaton, Input, Options, StateId, TransferFunction, Transition,
    TransitionFilter,
};

fn states(ids: &[StateId]) -> BTreeSet<StateId> {
    ids.iter().copied().collect()
}

/// NFA for the keyword `if` and identifiers `[a-z]+`, sharing start state 0.
///
/// ```text
/// 0 --ε--> 1 --i--> 2 --f--> 3 (accept: keyword)
/// 0 --ε--> 4 --[a-z]--> 5 --[a-z]--> 5 (accept: identifier)
/// ```
fn keyword_or_ident() -> Automaton {
    let mut builder = AlphabetBuilder::new();
    builder.add_chars("abcdefghijklmnopqrstuvwxyz");

    let mut transitions = vec![
        Transition::epsilon(0, 1),
        Transition::epsilon(0, 4),
        Transition::on(1, 2, 'i'),
        Transition::on(2, 3, 'f'),
    ];
    for ch in 'a'..='z' {
        transitions.push(Transition::on(4, 5, ch));
        transitions.push(Transition::on(5, 5, ch));
    }

    Automaton::new(builder.build(), 0, [3, 5], TransferFunction::new(transitions)).unwrap()
}

// ══════════════════════════════════════════════════════════════════════════════
// Transition queries
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_has_transition_is_membership() {
    let function = TransferFunction::new([Transition::on(0, 1, 'a'), Transition::epsilon(1, 2)]);

    assert!(function.has_transition(&Transition::on(0, 1, 'a')));
    assert!(function.has_transition(&Transition::epsilon(1, 2)));
    assert!(!function.has_transition(&Transition::on(0, 2, 'a')));
    assert!(!function.has_transition(&Transition::epsilon(0, 1)));
}

#[test]
fn test_has_matching_wildcards() {
    let a = Input::from('a');
    let b = Input::from('b');
    let function = TransferFunction::new([Transition::on(0, 1, 'a'), Transition::on(1, 2, 'b')]);

    assert!(function.has_matching(None, None, None));
    assert!(function.has_matching(Some(0), None, None));
    assert!(function.has_matching(None, Some(2), Some(&b)));
    assert!(function.has_matching(Some(0), Some(1), Some(&a)));
    assert!(!function.has_matching(Some(0), None, Some(&b)));
    assert!(!function.has_matching(Some(7), None, None));

    let empty = TransferFunction::default();
    assert!(!empty.has_matching(None, None, None));
}

#[test]
fn test_filtered_transitions() {
    let a = Input::from('a');
    let function = TransferFunction::new([
        Transition::on(0, 1, 'a'),
        Transition::on(0, 2, 'a'),
        Transition::on(0, 3, 'b'),
        Transition::epsilon(0, 4),
        Transition::on(1, 2, 'a'),
    ]);

    assert_eq!(function.transitions(TransitionFilter::any()).count(), 5);

    let from_zero_on_a: Vec<StateId> = function
        .transitions(TransitionFilter::any().source(0).label(&a))
        .map(Transition::target)
        .collect();
    assert_eq!(from_zero_on_a, vec![1, 2]);

    let into_two: Vec<StateId> = function
        .transitions(TransitionFilter::any().target(2))
        .map(Transition::source)
        .collect();
    assert_eq!(into_two, vec![0, 1]);

    let epsilon: Vec<&Transition> = function
        .transitions(TransitionFilter::any().epsilon())
        .collect();
    assert_eq!(epsilon, vec![&Transition::epsilon(0, 4)]);
}

#[test]
fn test_states_and_labels() {
    let function = TransferFunction::new([
        Transition::on(0, 1, 'x'),
        Transition::epsilon(1, 5),
        Transition::on(5, 0, "=="),
    ]);

    assert_eq!(function.states(), states(&[0, 1, 5]));

    let labels = function.labels();
    let names: Vec<&str> = labels.iter().map(Input::as_str).collect();
    assert_eq!(names, vec!["==", "x"]);
}

// ══════════════════════════════════════════════════════════════════════════════
// NFA simulation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_advance_from_empty_is_empty() {
    let automaton = keyword_or_ident();
    let transfer = automaton.transfer();
    assert!(transfer.advance(&BTreeSet::new(), &Input::from('i')).is_empty());
}

#[test]
fn test_advance_unmatched_label_is_empty() {
    let automaton = keyword_or_ident();
    let transfer = automaton.transfer();
    let start = automaton.initial_states();
    assert!(transfer.advance(&start, &Input::from('7')).is_empty());
}

#[test]
fn test_advance_tracks_both_branches() {
    let automaton = keyword_or_ident();
    let transfer = automaton.transfer();

    let start = automaton.initial_states();
    assert_eq!(start, states(&[0, 1, 4]));

    let after_i = transfer.advance(&start, &Input::from('i'));
    assert_eq!(after_i, states(&[2, 5]));

    let after_if = transfer.advance(&after_i, &Input::from('f'));
    assert_eq!(after_if, states(&[3, 5]));

    let after_ifx = transfer.advance(&after_if, &Input::from('x'));
    assert_eq!(after_ifx, states(&[5]));
}

#[test]
fn test_closure_without_epsilon_edges_is_identity() {
    let function = TransferFunction::new([Transition::on(0, 1, 'a')]);
    let input = states(&[0, 3]);
    assert_eq!(function.epsilon_closure(&input), input);
}

#[test]
fn test_closure_handles_cycles() {
    let function = TransferFunction::new([
        Transition::epsilon(0, 1),
        Transition::epsilon(1, 2),
        Transition::epsilon(2, 0),
        Transition::epsilon(2, 3),
    ]);
    assert_eq!(function.epsilon_closure(&states(&[1])), states(&[0, 1, 2, 3]));
}

#[test]
fn test_maximal_munch() {
    let automaton = keyword_or_ident();
    assert_eq!(automaton.longest_match("if"), Some(2));
    assert_eq!(automaton.longest_match("iffy+1"), Some(4));
    assert_eq!(automaton.longest_match("+"), None);
    assert!(automaton.accepts_str("if"));
    assert!(!automaton.accepts_str(""));
}

// ══════════════════════════════════════════════════════════════════════════════
// Construction policy
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_nfa_options_keep_every_edge() {
    let function = TransferFunction::with_options(
        [
            Transition::on(0, 1, 'a'),
            Transition::on(0, 2, 'a'),
            Transition::epsilon(1, 2),
        ],
        Options::NFA,
    )
    .unwrap();

    assert_eq!(function.len(), 3);
    assert!(!function.is_deterministic());
}

#[test]
fn test_dfa_options_accept_deterministic_input() {
    let function = TransferFunction::with_options(
        [
            Transition::on(0, 1, 'a'),
            Transition::on(0, 2, 'b'),
            Transition::on(1, 1, 'a'),
        ],
        Options::DFA,
    )
    .unwrap();

    assert!(function.is_deterministic());
    assert_eq!(Options::default(), Options::NFA);
}

#[test]
fn test_epsilon_only_policy() {
    let options = Options {
        non_deterministic: false,
        epsilon_moves: true,
    };
    let function = TransferFunction::with_options(
        [Transition::epsilon(0, 1), Transition::on(0, 1, 'a')],
        options,
    )
    .unwrap();
    assert_eq!(function.len(), 2);
}

// ══════════════════════════════════════════════════════════════════════════════
// Subset construction
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_determinize_keyword_or_ident() {
    let nfa = keyword_or_ident();
    let result = determinize(&nfa);
    let dfa = &result.automaton;

    assert!(dfa.transfer().is_deterministic());
    assert_eq!(result.subsets[0], states(&[0, 1, 4]));

    for word in ["if", "i", "iffy", "x", "ifz", ""] {
        assert_eq!(nfa.accepts_str(word), dfa.accepts_str(word), "word {:?}", word);
    }

    // Every DFA state maps back to the NFA subset it was built from.
    for (id, subset) in result.subsets.iter().enumerate() {
        assert_eq!(
            dfa.accepting().contains(&(id as StateId)),
            nfa.is_accepting(subset)
        );
    }
}

#[test]
fn test_determinized_transfer_passes_dfa_policy() {
    let result = determinize(&keyword_or_ident());
    let transitions: Vec<Transition> = result.automaton.transfer().all().cloned().collect();
    assert!(TransferFunction::with_options(transitions, Options::DFA).is_ok());
}
