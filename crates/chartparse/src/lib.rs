//! # chartparse
//!
//! A bottom-up active chart parser that enumerates *every* derivation of a
//! context-free grammar over a token sequence.
//!
//! ## Overview
//!
//! The library has two halves:
//!
//! - **Grammar**: an immutable, indexed production store, read from a plain
//!   line format ([`Grammar::parse`]) or an extended notation with
//!   alternation, grouping and `?`/`*`/`+` ([`Grammar::parse_ebnf`]), or
//!   built programmatically ([`GrammarBuilder`]).
//! - **Engine**: the chart parser itself ([`ChartParser`], or the [`parse`]
//!   convenience function). It seeds terminal edges from the input, applies
//!   rule invocation and the fundamental rule to a fixed point, and returns
//!   a [`ParseForest`] holding one [`ParseTree`] per whole-input
//!   derivation. Ambiguous inputs simply yield several trees.
//!
//! Failures are clear-cut: bad grammar text fails at construction with
//! [`GrammarError`], a token the grammar cannot produce fails the parse
//! with [`ParseError::UnknownTerminal`], and an input with no whole-input
//! derivation is *not* an error — it yields an empty forest.
//!
//! ## Quick start
//!
//! ```
//! use chartparse::{parse, tokenize, Grammar};
//!
//! let grammar = Grammar::parse(
//!     "S -> NP VP\n\
//!      NP -> Det N\n\
//!      VP -> V NP\n\
//!      Det -> the\n\
//!      N -> dog\n\
//!      N -> cat\n\
//!      V -> chased\n",
//! )?;
//!
//! let tokens = tokenize("the dog chased the cat");
//! let forest = parse(&grammar, &tokens)?;
//!
//! assert_eq!(forest.len(), 1);
//! let tree = forest.tree(0).expect("one derivation");
//! assert_eq!(tree.label(), "S");
//! assert_eq!(
//!     tree.to_string(),
//!     "(S (NP (Det the) (N dog)) (VP (V chased) (NP (Det the) (N cat))))"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `diagnostics`: derive `miette::Diagnostic` on the error types.
//! - `serialize`: serde support for parse trees and metrics.

pub mod chart;
pub mod error;
pub mod forest;
pub mod grammar;
pub mod intern;
pub mod observer;
pub mod parser;
pub mod tokenizer;

pub use chart::{Chart, Edge, EdgeId};
pub use error::{GrammarError, ParseError};
pub use forest::{ChartMetrics, ParseForest, ParseTree};
pub use grammar::{Grammar, GrammarBuilder, Rhs};
pub use intern::Symbol;
pub use observer::{InfoCategory, ParserObserver};
pub use parser::{parse, ChartParser};
pub use tokenizer::tokenize;
