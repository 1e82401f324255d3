//! Enumerate the readings of a classic attachment ambiguity, watching the
//! chart grow through an observer.
//!
//! ```text
//! cargo run --example ambiguity
//! ```

use chartparse::{tokenize, ChartParser, Grammar, InfoCategory};

const GRAMMAR: &str = r#"
    S -> NP VP.
    NP -> NP PP | "we" | "her" | "binoculars".
    VP -> VP PP | V NP.
    PP -> P NP.
    V -> "saw".
    P -> "with".
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grammar = Grammar::parse_ebnf(GRAMMAR)?;
    let tokens = tokenize("we saw her with binoculars");

    let mut observer = |category: InfoCategory, message: &str| {
        if category != InfoCategory::Chart {
            println!("[{category:>2}] {message}");
        }
    };
    let forest = ChartParser::new(&grammar)
        .observer(&mut observer)
        .parse(&tokens)?;

    println!("\n{} reading(s):", forest.len());
    for (i, tree) in forest.trees().enumerate() {
        println!("{}. {tree}", i + 1);
    }
    Ok(())
}
