//! Serde round-trips for the `serialize` feature.

#![cfg(feature = "serialize")]

use chartparse::{parse, tokenize, Grammar};

#[test]
fn trees_serialize_to_nested_json() {
    let grammar = Grammar::parse("S -> A B\nA -> a\nB -> b\n").expect("grammar");
    let forest = parse(&grammar, &tokenize("a b")).expect("parse");
    let tree = forest.tree(0).expect("tree");

    let json = serde_json::to_value(tree).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "label": "S",
            "children": [
                { "label": "A", "tokens": ["a"] },
                { "label": "B", "tokens": ["b"] },
            ]
        })
    );
}

#[test]
fn metrics_serialize_with_counters() {
    let grammar = Grammar::parse("S -> A B\nA -> a\nB -> b\n").expect("grammar");
    let forest = parse(&grammar, &tokenize("a b")).expect("parse");

    let json = serde_json::to_value(forest.metrics()).expect("serialize");
    assert_eq!(json["tokens_consumed"], 2);
    assert_eq!(json["seed_edges"], 2);
    assert_eq!(json["edges_created"], forest.chart().len());
}
