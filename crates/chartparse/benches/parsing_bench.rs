use chartparse::{parse, tokenize, Grammar};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const SENTENCE: &str = "\
    S -> NP VP\n\
    NP -> Det N\n\
    VP -> V NP\n\
    Det -> the\n\
    N -> dog\n\
    N -> cat\n\
    V -> chased\n";

fn sentence_benchmark(c: &mut Criterion) {
    let grammar = Grammar::parse(SENTENCE).expect("grammar");
    let tokens = tokenize("the dog chased the cat");

    c.bench_function("parse_sentence", |b| {
        b.iter(|| parse(black_box(&grammar), black_box(&tokens)).expect("parse"));
    });
}

fn ambiguous_benchmark(c: &mut Criterion) {
    // every bracketing of n tokens is a distinct derivation, so this
    // exercises the dedup index and the ancestry sharing hard
    let grammar = Grammar::parse("X -> X X\nX -> a\n").expect("grammar");

    let mut group = c.benchmark_group("parse_all_bracketings");
    for n in [4usize, 6, 8] {
        let tokens = vec!["a"; n];
        group.bench_function(format!("{n}_tokens"), |b| {
            b.iter(|| parse(black_box(&grammar), black_box(&tokens)).expect("parse"));
        });
    }
    group.finish();
}

fn grammar_benchmark(c: &mut Criterion) {
    c.bench_function("grammar_parse", |b| {
        b.iter(|| Grammar::parse(black_box(SENTENCE)).expect("grammar"));
    });
}

criterion_group!(
    benches,
    sentence_benchmark,
    ambiguous_benchmark,
    grammar_benchmark
);
criterion_main!(benches);
