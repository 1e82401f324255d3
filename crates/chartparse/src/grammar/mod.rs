//! Context-free grammar representation.
//!
//! ## Overview
//!
//! A [`Grammar`] is an immutable, indexed store of productions. It is built
//! once — from the plain line format via [`Grammar::parse`], from the
//! extended notation via [`Grammar::parse_ebnf`], or programmatically via
//! [`GrammarBuilder`] — and answers the three lookup queries the chart
//! engine needs:
//!
//! - [`lhs_producing`](Grammar::lhs_producing): which non-terminals rewrite
//!   to a given literal token (used to seed the chart),
//! - [`with_leftmost`](Grammar::with_leftmost): which non-terminals have a
//!   production starting with a given symbol (used for rule invocation),
//! - [`right_hand_sides`](Grammar::right_hand_sides): the declared
//!   right-hand sides of a non-terminal.
//!
//! ## Plain format
//!
//! One production per line, whitespace-delimited, `->` as the literal second
//! field; blank lines and lines starting with `#` are ignored:
//!
//! ```text
//! # a toy sentence grammar
//! S  -> NP VP
//! NP -> Det N
//! Det -> the
//! ```
//!
//! Right-hand sides are kept in a fixed total order (element-wise
//! lexicographic, then shorter first). The order only makes enumeration
//! deterministic; the algorithm does not depend on it.

use crate::error::{GrammarError, ParseError};
use crate::intern::{Interner, InternerReader, Symbol};
use ahash::RandomState;
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

mod ebnf;

/// A right-hand side: the ordered symbols of one production instance.
pub type Rhs = SmallVec<[Symbol; 4]>;

/// An immutable context-free grammar with lookup indices.
pub struct Grammar {
    /// Non-terminal -> ordered right-hand sides.
    productions: HashMap<Symbol, Vec<Rhs>, RandomState>,
    /// Symbol -> non-terminals with a production starting with that symbol,
    /// sorted by name.
    leftmost: HashMap<Symbol, Vec<Symbol>, RandomState>,
    /// Non-terminals with at least one production of length one.
    singletons: HashSet<Symbol, RandomState>,
    interner: InternerReader,
}

impl Grammar {
    /// Read a grammar from its plain line-oriented definition.
    ///
    /// # Errors
    ///
    /// Fails if a line does not match `LHS -> sym1 .. symN`, if a right-hand
    /// side is empty, if the same (lhs, rhs) pair is declared twice, or if
    /// the definition contains no production at all.
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        let mut builder = GrammarBuilder::new();
        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let lhs = match parts.next() {
                Some(lhs) => lhs,
                None => continue,
            };
            if parts.next() != Some("->") {
                return Err(GrammarError::MalformedProduction {
                    line: line.to_owned(),
                });
            }
            let rhs: SmallVec<[&str; 4]> = parts.collect();
            if rhs.is_empty() {
                return Err(GrammarError::EmptyRhs {
                    line: line.to_owned(),
                });
            }

            if !builder.add(lhs, &rhs) {
                return Err(GrammarError::DuplicateProduction {
                    production: line.to_owned(),
                });
            }
        }
        builder.finish()
    }

    /// Read a grammar from the extended production notation.
    ///
    /// Productions are terminated by `.` and may use alternation `|`,
    /// grouping `( .. )` and the postfix operators `?`, `*` and `+`. Bare
    /// identifiers are non-terminals; terminals are quoted strings. The
    /// definition is lowered to the same plain production set that
    /// [`Grammar::parse`] builds.
    ///
    /// # Errors
    ///
    /// Fails on lexical or syntactic errors in the notation and on the same
    /// structural violations as [`Grammar::parse`].
    pub fn parse_ebnf(text: &str) -> Result<Self, GrammarError> {
        ebnf::parse(text)
    }

    /// All singleton non-terminals whose one-symbol right-hand side is the
    /// given terminal, sorted by name.
    ///
    /// # Errors
    ///
    /// An empty result is reported as [`ParseError::UnknownTerminal`] rather
    /// than returned silently: a token nobody produces can never take part
    /// in a derivation.
    pub fn lhs_producing(&self, terminal: &str) -> Result<SmallVec<[Symbol; 2]>, ParseError> {
        let mut producers = SmallVec::new();
        if let Some(sym) = self.interner.get(terminal) {
            for &lhs in self.with_leftmost(sym) {
                if self.singletons.contains(&lhs)
                    && self
                        .right_hand_sides(lhs)
                        .iter()
                        .any(|rhs| rhs.len() == 1 && rhs[0] == sym)
                {
                    producers.push(lhs);
                }
            }
        }
        if producers.is_empty() {
            return Err(ParseError::UnknownTerminal {
                terminal: terminal.to_owned(),
            });
        }
        Ok(producers)
    }

    /// All non-terminals with a production beginning with `symbol`, sorted
    /// by name. The empty slice is a valid answer.
    #[must_use]
    pub fn with_leftmost(&self, symbol: Symbol) -> &[Symbol] {
        self.leftmost.get(&symbol).map_or(&[], Vec::as_slice)
    }

    /// The right-hand sides declared for `lhs`, in the grammar's total
    /// order. The empty slice is a valid answer.
    #[must_use]
    pub fn right_hand_sides(&self, lhs: Symbol) -> &[Rhs] {
        self.productions.get(&lhs).map_or(&[], Vec::as_slice)
    }

    /// Look up the symbol for a string, if it occurs anywhere in the
    /// grammar.
    #[must_use]
    pub fn symbol(&self, text: &str) -> Option<Symbol> {
        self.interner.get(text)
    }

    /// The text of an interned symbol.
    #[must_use]
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.interner.resolve(symbol)
    }

    /// Number of productions over all non-terminals.
    #[must_use]
    pub fn production_count(&self) -> usize {
        self.productions.values().map(Vec::len).sum()
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("productions", &self.production_count())
            .field("symbols", &self.interner.len())
            .finish_non_exhaustive()
    }
}

/// Incremental construction of a [`Grammar`].
///
/// Productions are added one at a time; [`finish`](GrammarBuilder::finish)
/// checks the grammar-level invariants and freezes the indices.
///
/// # Example
///
/// ```
/// use chartparse::GrammarBuilder;
///
/// let mut builder = GrammarBuilder::new();
/// builder.production("S", &["NP", "VP"])?;
/// builder.production("NP", &["we"])?;
/// builder.production("VP", &["run"])?;
/// let grammar = builder.finish()?;
/// assert_eq!(grammar.production_count(), 3);
/// # Ok::<(), chartparse::GrammarError>(())
/// ```
pub struct GrammarBuilder {
    interner: Interner,
    productions: HashMap<Symbol, Vec<Rhs>, RandomState>,
    leftmost: HashMap<Symbol, HashSet<Symbol, RandomState>, RandomState>,
    singletons: HashSet<Symbol, RandomState>,
}

impl GrammarBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            productions: HashMap::default(),
            leftmost: HashMap::default(),
            singletons: HashSet::default(),
        }
    }

    /// Add one production.
    ///
    /// # Errors
    ///
    /// Fails if the right-hand side is empty or the exact same production
    /// was already added.
    pub fn production<S: AsRef<str>>(
        &mut self,
        lhs: &str,
        rhs: &[S],
    ) -> Result<&mut Self, GrammarError> {
        let symbols: SmallVec<[&str; 4]> = rhs.iter().map(AsRef::as_ref).collect();
        if symbols.is_empty() {
            return Err(GrammarError::EmptyRhs {
                line: lhs.to_owned(),
            });
        }
        if !self.add(lhs, &symbols) {
            return Err(GrammarError::DuplicateProduction {
                production: format!("{lhs} -> {}", symbols.join(" ")),
            });
        }
        Ok(self)
    }

    /// Low-level insert; returns `false` on a duplicate (lhs, rhs) pair.
    /// The right-hand side must be non-empty.
    pub(crate) fn add(&mut self, lhs: &str, rhs: &[&str]) -> bool {
        let lhs = self.interner.intern(lhs);
        let rhs: Rhs = rhs.iter().map(|s| self.interner.intern(s)).collect();

        let set = self.productions.entry(lhs).or_default();
        if set.contains(&rhs) {
            return false;
        }

        if rhs.len() == 1 {
            self.singletons.insert(lhs);
        }
        self.leftmost.entry(rhs[0]).or_default().insert(lhs);

        set.push(rhs);
        true
    }

    /// Check the grammar-level invariants and freeze the indices.
    ///
    /// # Errors
    ///
    /// Fails with [`GrammarError::EmptyGrammar`] if nothing was added.
    pub fn finish(self) -> Result<Grammar, GrammarError> {
        let Self {
            interner,
            mut productions,
            leftmost,
            singletons,
        } = self;

        if productions.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        // The indices are sorted once here so that every enumeration during
        // parsing is deterministic.
        for rhss in productions.values_mut() {
            rhss.sort_unstable_by(|a, b| cmp_rhs(&interner, a, b));
        }
        let leftmost = leftmost
            .into_iter()
            .map(|(sym, lhss)| {
                let mut lhss: Vec<Symbol> = lhss.into_iter().collect();
                lhss.sort_unstable_by(|a, b| interner.resolve(*a).cmp(interner.resolve(*b)));
                (sym, lhss)
            })
            .collect();

        Ok(Grammar {
            productions,
            leftmost,
            singletons,
            interner: interner.into_reader(),
        })
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GrammarBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarBuilder")
            .field("productions", &self.productions.values().map(Vec::len).sum::<usize>())
            .finish_non_exhaustive()
    }
}

/// Element-wise lexicographic comparison of the resolved symbols, with the
/// shorter sequence first on a tie.
fn cmp_rhs(interner: &Interner, a: &Rhs, b: &Rhs) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match interner.resolve(*x).cmp(interner.resolve(*y)) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTENCE: &str = "\
        S -> NP VP\n\
        NP -> Det N\n\
        VP -> V NP\n\
        Det -> the\n\
        N -> dog\n\
        N -> cat\n\
        V -> chased\n";

    #[test]
    fn parse_indexes_productions() {
        let grammar = Grammar::parse(SENTENCE).unwrap();
        assert_eq!(grammar.production_count(), 7);

        let n = grammar.symbol("N").unwrap();
        let rhss = grammar.right_hand_sides(n);
        assert_eq!(rhss.len(), 2);
        // sorted: cat before dog
        assert_eq!(grammar.resolve(rhss[0][0]), "cat");
        assert_eq!(grammar.resolve(rhss[1][0]), "dog");
    }

    #[test]
    fn rhs_order_is_lexicographic_then_length() {
        let grammar = Grammar::parse("A -> x y z\nA -> x y\nA -> w\n").unwrap();
        let a = grammar.symbol("A").unwrap();
        let rendered: Vec<String> = grammar
            .right_hand_sides(a)
            .iter()
            .map(|rhs| {
                rhs.iter()
                    .map(|s| grammar.resolve(*s))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        assert_eq!(rendered, ["w", "x y", "x y z"]);
    }

    #[test]
    fn leftmost_index() {
        let grammar = Grammar::parse(SENTENCE).unwrap();
        let np = grammar.symbol("NP").unwrap();
        let lhss: Vec<&str> = grammar
            .with_leftmost(np)
            .iter()
            .map(|s| grammar.resolve(*s))
            .collect();
        assert_eq!(lhss, ["S"]);

        // terminals are indexed too: singleton productions start with them
        let chased = grammar.symbol("chased").unwrap();
        let lhss: Vec<&str> = grammar
            .with_leftmost(chased)
            .iter()
            .map(|s| grammar.resolve(*s))
            .collect();
        assert_eq!(lhss, ["V"]);
    }

    #[test]
    fn lhs_producing_filters_singletons() {
        let grammar = Grammar::parse(SENTENCE).unwrap();
        let producers = grammar.lhs_producing("dog").unwrap();
        assert_eq!(producers.len(), 1);
        assert_eq!(grammar.resolve(producers[0]), "N");
    }

    #[test]
    fn lhs_producing_requires_exact_singleton() {
        // Z is a singleton (via baz) and foo-leftmost (via a longer rule),
        // but it has no production `Z -> foo`.
        let grammar = Grammar::parse("Z -> baz\nZ -> foo qux\nQ -> qux\n").unwrap();
        assert_eq!(
            grammar.lhs_producing("foo"),
            Err(ParseError::UnknownTerminal {
                terminal: "foo".to_owned()
            })
        );
    }

    #[test]
    fn unknown_terminal_is_an_error() {
        let grammar = Grammar::parse(SENTENCE).unwrap();
        assert!(matches!(
            grammar.lhs_producing("banana"),
            Err(ParseError::UnknownTerminal { .. })
        ));
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let grammar = Grammar::parse("# comment\n\n  S -> a\n   # another\n").unwrap();
        assert_eq!(grammar.production_count(), 1);
    }

    #[test]
    fn malformed_line_is_rejected() {
        assert_eq!(
            Grammar::parse("S => a\n").unwrap_err(),
            GrammarError::MalformedProduction {
                line: "S => a".to_owned()
            }
        );
        assert!(matches!(
            Grammar::parse("S\n").unwrap_err(),
            GrammarError::MalformedProduction { .. }
        ));
    }

    #[test]
    fn empty_rhs_is_rejected() {
        assert_eq!(
            Grammar::parse("S ->\n").unwrap_err(),
            GrammarError::EmptyRhs {
                line: "S ->".to_owned()
            }
        );
    }

    #[test]
    fn duplicate_production_is_rejected() {
        assert!(matches!(
            Grammar::parse("S -> a b\nS -> a b\n"),
            Err(GrammarError::DuplicateProduction { .. })
        ));
    }

    #[test]
    fn empty_grammar_is_rejected() {
        assert_eq!(Grammar::parse("").unwrap_err(), GrammarError::EmptyGrammar);
        assert_eq!(
            Grammar::parse("# only comments\n").unwrap_err(),
            GrammarError::EmptyGrammar
        );
    }

    #[test]
    fn builder_reports_duplicates() {
        let mut builder = GrammarBuilder::new();
        builder.production("S", &["a"]).unwrap();
        let err = builder.production("S", &["a"]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::DuplicateProduction {
                production: "S -> a".to_owned()
            }
        );
    }
}
