//! Parse a phrase against a toy sentence grammar and print every
//! derivation.
//!
//! ```text
//! cargo run --example sentence -- "the dog chased the cat"
//! ```

use chartparse::{parse, tokenize, Grammar};

const GRAMMAR: &str = "\
    S -> NP VP\n\
    NP -> Det N\n\
    VP -> V NP\n\
    Det -> the\n\
    N -> dog\n\
    N -> cat\n\
    V -> chased\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grammar = Grammar::parse(GRAMMAR)?;
    let phrase = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "the dog chased the cat".to_owned());

    let tokens = tokenize(&phrase);
    let forest = parse(&grammar, &tokens)?;

    println!("{} derivation(s) of '{phrase}'", forest.len());
    for tree in forest.trees() {
        println!("  {tree}");
    }

    let metrics = forest.metrics();
    println!(
        "{} edges in {:?} ({} closure passes)",
        metrics.edges_created, metrics.parse_time, metrics.closure_passes
    );
    Ok(())
}
