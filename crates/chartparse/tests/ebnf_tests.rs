//! End-to-end tests for the extended production notation.
//!
//! Extraction returns a tree for *every* inactive edge spanning the whole
//! input, whatever its label. Lowered grammars contain unary chains (for
//! example `A -> A+1`), so short inputs legitimately produce several roots;
//! the assertions therefore count derivations per label.

use chartparse::{parse, tokenize, Grammar, GrammarError, ParseForest};

fn labeled(forest: &ParseForest<'_>, label: &str) -> usize {
    forest.trees().filter(|t| t.label() == label).count()
}

const SENTENCE_EBNF: &str = r#"
    S -> NP VP.
    NP -> Det N.
    VP -> V NP.
    Det -> "the".
    N -> "dog" | "cat".
    V -> "chased".
"#;

#[test]
fn extended_notation_matches_the_plain_format() {
    let plain = Grammar::parse(
        "S -> NP VP\nNP -> Det N\nVP -> V NP\nDet -> the\nN -> dog\nN -> cat\nV -> chased\n",
    )
    .expect("plain grammar");
    let extended = Grammar::parse_ebnf(SENTENCE_EBNF).expect("extended grammar");

    let tokens = tokenize("the dog chased the cat");
    let a: Vec<String> = parse(&plain, &tokens)
        .expect("parse")
        .trees()
        .map(|t| t.to_string())
        .collect();
    let b: Vec<String> = parse(&extended, &tokens)
        .expect("parse")
        .trees()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(a, b);
    assert_eq!(a.len(), 1);
}

#[test]
fn optional_symbols_accept_both_shapes() {
    let grammar = Grammar::parse_ebnf("A -> \"a\"? \"b\".").expect("grammar");

    let both = parse(&grammar, &tokenize("a b")).expect("parse");
    assert_eq!(labeled(&both, "A"), 1);

    let bare = parse(&grammar, &tokenize("b")).expect("parse");
    assert_eq!(labeled(&bare, "A"), 1);

    // "a" alone is only the hoisted preterminal, never an A
    let half = parse(&grammar, &tokenize("a")).expect("parse");
    assert_eq!(labeled(&half, "A"), 0);
}

#[test]
fn plus_repetition_derives_each_count_once() {
    let grammar = Grammar::parse_ebnf("A -> \"a\"+.").expect("grammar");
    for n in 1..6 {
        let tokens = vec!["a"; n];
        let forest = parse(&grammar, &tokens).expect("parse");
        // right-recursive lowering leaves exactly one A derivation per length
        assert_eq!(labeled(&forest, "A"), 1, "{n} tokens");
    }
}

#[test]
fn star_repetition_allows_the_bare_tail() {
    let grammar = Grammar::parse_ebnf("A -> \"a\"* \"b\".").expect("grammar");
    for phrase in ["b", "a b", "a a a b"] {
        let forest = parse(&grammar, &tokenize(phrase)).expect("parse");
        assert_eq!(labeled(&forest, "A"), 1, "phrase '{phrase}'");
    }
    let missing_tail = parse(&grammar, &tokenize("a a")).expect("parse");
    assert_eq!(labeled(&missing_tail, "A"), 0);
}

#[test]
fn repetition_nodes_are_visible_in_the_tree() {
    let grammar = Grammar::parse_ebnf("A -> \"a\"+.").expect("grammar");
    let forest = parse(&grammar, &tokenize("a a")).expect("parse");
    let tree = forest
        .trees()
        .find(|t| t.label() == "A")
        .expect("an A derivation");
    // the synthesized repetition non-terminal carries the operator
    // character, the hoisted preterminal carries quotes
    assert_eq!(tree.to_string(), "(A (A+1 ('a' a) (A+1 a)))");
}

#[test]
fn grouped_alternation_distributes() {
    let grammar = Grammar::parse_ebnf("S -> (\"x\" | \"y\") \"z\".").expect("grammar");
    assert_eq!(
        labeled(&parse(&grammar, &tokenize("x z")).expect("parse"), "S"),
        1
    );
    assert_eq!(
        labeled(&parse(&grammar, &tokenize("y z")).expect("parse"), "S"),
        1
    );
    assert_eq!(
        labeled(&parse(&grammar, &tokenize("z")).expect("parse"), "S"),
        0
    );
}

#[test]
fn multi_word_literals_are_single_symbols() {
    let grammar = Grammar::parse_ebnf("City -> \"New York\".").expect("grammar");
    let forest = parse(&grammar, &["New York"]).expect("parse");
    assert_eq!(forest.len(), 1);
    assert_eq!(forest.tree(0).expect("tree").label(), "City");
}

#[test]
fn productions_can_span_lines() {
    let grammar =
        Grammar::parse_ebnf("S -> NP\n     | V.\nNP -> \"we\".\nV -> \"run\".").expect("grammar");
    assert_eq!(
        labeled(&parse(&grammar, &tokenize("we")).expect("parse"), "S"),
        1
    );
    assert_eq!(
        labeled(&parse(&grammar, &tokenize("run")).expect("parse"), "S"),
        1
    );
}

#[test]
fn comments_are_skipped() {
    let grammar =
        Grammar::parse_ebnf("# leading comment\nA -> \"a\". # trailing\n").expect("grammar");
    let forest = parse(&grammar, &tokenize("a")).expect("parse");
    assert_eq!(forest.len(), 1);
}

#[test]
fn empty_definition_is_rejected() {
    assert_eq!(
        Grammar::parse_ebnf("").unwrap_err(),
        GrammarError::EmptyGrammar
    );
}
