//! The chart parsing engine.
//!
//! ## Overview
//!
//! Parsing proceeds bottom-up over a single append-only [`Chart`]:
//!
//! 1. **Validation pre-pass** — every input token must have at least one
//!    singleton producer in the grammar; the first token without one aborts
//!    the parse before any chart state exists.
//! 2. **Seeding** — for token `t` at position `i`, each producer `L` gets an
//!    inactive edge `L -> t` spanning `[i, i + 1)`.
//! 3. **Closure** — *rule invocation* starts an active edge for every
//!    production whose leading symbol was just completed, and the
//!    *fundamental rule* advances an active edge over an adjacent completed
//!    edge. Both run to a fixed point; the chart only grows and every edge
//!    is deduplicated, so the fixed point is reached in finitely many
//!    passes for any grammar without unary production cycles.
//! 4. **Extraction** — every inactive edge spanning the whole input becomes
//!    one tree of the resulting [`ParseForest`]. No such edge is a normal
//!    outcome, not an error.
//!
//! A parse is sequential and CPU-bound. It borrows the grammar immutably,
//! so any number of parses may share one grammar; all per-call state lives
//! in the engine.

use crate::chart::{Chart, Edge, EdgeId};
use crate::error::ParseError;
use crate::forest::{ChartMetrics, ParseForest};
use crate::grammar::Grammar;
use crate::intern::Symbol;
use crate::observer::{InfoCategory, ParserObserver};
use smallvec::SmallVec;
use std::time::Instant;

/// Parse `tokens` against `grammar`, producing every derivation that spans
/// the whole input.
///
/// Convenience for [`ChartParser::new`] followed by
/// [`parse`](ChartParser::parse).
///
/// # Errors
///
/// Returns [`ParseError::UnknownTerminal`] if a token has no singleton
/// producer in the grammar.
pub fn parse<'g, S: AsRef<str>>(
    grammar: &'g Grammar,
    tokens: &[S],
) -> Result<ParseForest<'g>, ParseError> {
    ChartParser::new(grammar).parse(tokens)
}

/// A configured parse run.
///
/// # Example
///
/// ```
/// use chartparse::{ChartParser, Grammar, tokenize};
///
/// let grammar = Grammar::parse("S -> a b\nA -> a\nB -> b\nS -> A B")?;
/// let forest = ChartParser::new(&grammar).parse(&tokenize("a b"))?;
/// assert_eq!(forest.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ChartParser<'g, 'o> {
    grammar: &'g Grammar,
    observer: Option<&'o mut dyn ParserObserver>,
}

impl<'g, 'o> ChartParser<'g, 'o> {
    /// A parser over the given grammar.
    #[must_use]
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            observer: None,
        }
    }

    /// Attach an observer that receives one notification per edge
    /// insertion, in insertion order.
    #[must_use]
    pub fn observer(mut self, observer: &'o mut dyn ParserObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run the parse.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownTerminal`] for the first token (in
    /// input order) that no singleton production can produce. An input
    /// with no whole-span derivation is *not* an error: it yields an
    /// empty forest.
    pub fn parse<S: AsRef<str>>(self, tokens: &[S]) -> Result<ParseForest<'g>, ParseError> {
        let started = Instant::now();

        // Validation pre-pass: resolve every token and its producers up
        // front, so the closure loop below cannot fail.
        let mut symbols = Vec::with_capacity(tokens.len());
        let mut seeds = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref();
            let producers = self.grammar.lhs_producing(token)?;
            let symbol =
                self.grammar
                    .symbol(token)
                    .ok_or_else(|| ParseError::UnknownTerminal {
                        terminal: token.to_owned(),
                    })?;
            symbols.push(symbol);
            seeds.push(producers);
        }

        let engine = Engine {
            grammar: self.grammar,
            tokens: symbols,
            chart: Chart::new(),
            observer: self.observer,
            invocation_cursor: 0,
            metrics: ChartMetrics::default(),
        };
        Ok(engine.run(&seeds, started))
    }
}

struct Engine<'g, 'o> {
    grammar: &'g Grammar,
    tokens: Vec<Symbol>,
    chart: Chart,
    observer: Option<&'o mut dyn ParserObserver>,
    /// Lowest chart index not yet covered by a rule-invocation pass. Only
    /// bounds re-scanning cost; correctness does not depend on it.
    invocation_cursor: usize,
    metrics: ChartMetrics,
}

impl<'g> Engine<'g, '_> {
    fn run(mut self, seeds: &[SmallVec<[Symbol; 2]>], started: Instant) -> ParseForest<'g> {
        for (pos, producers) in seeds.iter().enumerate() {
            for &lhs in producers {
                self.try_insert(Edge::seed(pos, lhs, self.tokens[pos]), InfoCategory::Seed);
            }

            // Close over the new seeds before the next token comes in. A
            // full pass with no new edge means the fixed point is reached.
            loop {
                let watermark = self.chart.len();
                let mut change = self.rule_invocation();
                self.invocation_cursor = watermark;
                change |= self.fundamental_rule();
                self.metrics.closure_passes += 1;
                if !change {
                    break;
                }
            }
        }

        let roots = self.extract();
        let metrics = ChartMetrics {
            parse_time: started.elapsed(),
            tokens_consumed: self.tokens.len(),
            edges_created: self.chart.len(),
            ..self.metrics
        };
        ParseForest::new(self.grammar, self.chart, roots, metrics)
    }

    /// Start an active edge for every production whose leading symbol is
    /// the left-hand side of a completed edge, skipping productions that
    /// need more tokens than remain from the edge's start.
    fn rule_invocation(&mut self) -> bool {
        let mut change = false;
        let mut i = self.invocation_cursor;
        while i < self.chart.len() {
            let id = EdgeId::from_index(i);
            if self.chart.get(id).is_complete() {
                let completed = self.chart.get(id).clone();
                let invokable: SmallVec<[Symbol; 8]> =
                    SmallVec::from_slice(self.grammar.with_leftmost(completed.lhs()));
                for lhs in invokable {
                    let candidates = self.grammar.right_hand_sides(lhs).len();
                    for k in 0..candidates {
                        let rhs = self.grammar.right_hand_sides(lhs)[k].clone();
                        if rhs[0] != completed.lhs()
                            || rhs.len() > self.tokens.len() - completed.start()
                        {
                            continue;
                        }
                        change |= self.try_insert(
                            Edge::invoke(lhs, rhs, &completed, id),
                            InfoCategory::Invocation,
                        );
                    }
                }
            }
            i += 1;
        }
        change
    }

    /// Combine every active edge with every adjacent, matching completed
    /// edge. Rescans the full (growing) chart.
    fn fundamental_rule(&mut self) -> bool {
        let mut change = false;
        let mut i = 0;
        while i < self.chart.len() {
            if self.chart.get(EdgeId::from_index(i)).is_active() {
                let mut k = 0;
                while k < self.chart.len() {
                    let combined = {
                        let active = self.chart.get(EdgeId::from_index(i));
                        let candidate = self.chart.get(EdgeId::from_index(k));
                        (candidate.is_complete() && active.matches(candidate))
                            .then(|| Edge::combine(active, EdgeId::from_index(k), candidate))
                    };
                    if let Some(edge) = combined {
                        change |= self.try_insert(edge, InfoCategory::Fundamental);
                    }
                    k += 1;
                }
            }
            i += 1;
        }
        change
    }

    /// Collect the roots: inactive edges spanning the whole input, in
    /// insertion order.
    fn extract(&mut self) -> Vec<EdgeId> {
        let token_count = self.tokens.len();
        let mut roots = Vec::new();
        for i in 0..self.chart.len() {
            let id = EdgeId::from_index(i);
            let (active, overspanning) = {
                let edge = self.chart.get(id);
                (edge.is_active(), edge.is_overspanning(token_count))
            };
            if self.observer.is_some() {
                let message = format!(
                    "{}: {}",
                    if active { "Active" } else { "Inactive" },
                    self.render(self.chart.get(id))
                );
                self.notify(InfoCategory::Chart, &message);
            }
            if !active && overspanning {
                roots.push(id);
            }
        }
        roots
    }

    fn try_insert(&mut self, edge: Edge, category: InfoCategory) -> bool {
        if self.chart.contains(&edge) {
            return false;
        }
        let message = self
            .observer
            .is_some()
            .then(|| format!("Adding edge: {}", self.render(&edge)));
        self.chart.insert(edge);
        match category {
            InfoCategory::Seed => self.metrics.seed_edges += 1,
            InfoCategory::Invocation => self.metrics.invocation_edges += 1,
            InfoCategory::Fundamental => self.metrics.fundamental_edges += 1,
            InfoCategory::Chart => {}
        }
        if let Some(message) = message {
            self.notify(category, &message);
        }
        true
    }

    fn notify(&mut self, category: InfoCategory, message: &str) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.info(category, message);
        }
    }

    /// `(start, end, dot, LHS, [sym1, sym2, ..])`
    fn render(&self, edge: &Edge) -> String {
        let rhs: Vec<&str> = edge
            .rhs()
            .iter()
            .map(|s| self.grammar.resolve(*s))
            .collect();
        format!(
            "({}, {}, {}, {}, [{}])",
            edge.start(),
            edge.end(),
            edge.dot(),
            self.grammar.resolve(edge.lhs()),
            rhs.join(", ")
        )
    }
}
