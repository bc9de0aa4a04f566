//! Analysis benchmarks.
//!
//! 1. Grammar construction: nullable fixed point + starts-with closure
//! 2. FIRST-of-sequence queries on a built grammar
//! 3. NFA simulation (`advance`) over a keyword automaton
//! 4. Subset construction

use std::collections::BTreeSet;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lexgram::automata::subset::determinize;
use lexgram::{
    AlphabetBuilder, Automaton, Grammar, GrammarBuilder, Input, StateId, Symbol,
    TransferFunction, Transition,
};

/// A chain grammar with `n` nonterminals where every other one is nullable:
///
/// ```text
/// <n0> ::= <n1> t0 | t0
/// <n1> ::= <n2> t1 | $
/// ...
/// ```
fn synthetic_grammar(n: usize) -> GrammarBuilder {
    let mut builder = GrammarBuilder::new("<n0>");
    for i in 0..n {
        builder.terminal(format!("t{}", i));
        if i > 0 {
            builder.nonterminal(format!("<n{}>", i));
        }
    }
    for i in 0..n {
        let left = format!("<n{}>", i);
        let terminal = format!("t{}", i);
        if i + 1 < n {
            let next = format!("<n{}>", i + 1);
            builder.production(&left, &[next.as_str(), terminal.as_str()]);
        }
        match i % 2 {
            0 => builder.production(&left, &[terminal.as_str()]),
            _ => builder.production(&left, &[]),
        };
    }
    builder
}

/// Thompson-style NFA recognizing any of `n` keywords `kw0`, `kw1`, ...
fn keyword_nfa(n: usize) -> Automaton {
    let mut builder = AlphabetBuilder::new();
    builder.add_chars("kw0123456789");

    let mut transitions = Vec::new();
    let mut accepting = Vec::new();
    let mut next: StateId = 1;

    for i in 0..n {
        let word = format!("kw{}", i);
        let mut state = next;
        next += 1;
        transitions.push(Transition::epsilon(0, state));
        for ch in word.chars() {
            transitions.push(Transition::on(state, next, ch));
            state = next;
            next += 1;
        }
        accepting.push(state);
    }

    Automaton::new(builder.build(), 0, accepting, TransferFunction::new(transitions))
        .expect("keywords only use alphabet characters")
}

fn bench_grammar_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/grammar_construction");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(100);

    for n in [5, 10, 20, 50, 100] {
        let builder = synthetic_grammar(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &builder, |b, builder| {
            b.iter(|| builder.build().expect("synthetic grammar is well formed"));
        });
    }

    group.finish();
}

fn bench_first_of_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/first_of_sequence");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(200);

    for n in [10, 50, 100] {
        let grammar: Grammar = synthetic_grammar(n)
            .build()
            .expect("synthetic grammar is well formed");
        let sequence: Vec<Symbol> = grammar.nonterminal_symbols().iter().cloned().collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &grammar, |b, grammar| {
            b.iter(|| grammar.starts_with_sequence(&sequence));
        });
    }

    group.finish();
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/advance");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(200);

    let input = Input::from('k');
    for n in [10, 50, 100] {
        let nfa = keyword_nfa(n);
        let start: BTreeSet<StateId> = nfa.initial_states();
        group.throughput(Throughput::Elements(start.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &nfa, |b, nfa| {
            b.iter(|| nfa.transfer().advance(&start, &input));
        });
    }

    group.finish();
}

fn bench_determinize(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/determinize");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(50);

    for n in [10, 50, 100] {
        let nfa = keyword_nfa(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &nfa, |b, nfa| {
            b.iter(|| determinize(nfa));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_grammar_construction,
    bench_first_of_sequence,
    bench_advance,
    bench_determinize,
);
criterion_main!(benches);
