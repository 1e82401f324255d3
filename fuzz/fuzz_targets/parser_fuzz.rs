//! The engine must handle arbitrary token sequences over a fixed grammar:
//! parse, reject an unknown terminal, or return an empty forest — never
//! panic. Token count is capped to bound the chart.

#![no_main]
use chartparse::{parse, Grammar};
use libfuzzer_sys::fuzz_target;

const GRAMMAR: &str = "\
    S -> NP VP\n\
    S -> S S\n\
    NP -> Det N\n\
    NP -> NP PP\n\
    VP -> V NP\n\
    VP -> VP PP\n\
    PP -> P NP\n\
    Det -> the\n\
    N -> dog\n\
    N -> cat\n\
    V -> chased\n\
    P -> with\n";

fuzz_target!(|data: &[u8]| {
    let grammar = Grammar::parse(GRAMMAR).expect("static grammar");
    let words = ["the", "dog", "chased", "cat", "with", "unknown!"];
    let tokens: Vec<&str> = data
        .iter()
        .take(12)
        .map(|byte| words[*byte as usize % words.len()])
        .collect();
    let _ = parse(&grammar, &tokens);
});
