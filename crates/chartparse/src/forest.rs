//! Parse results: the forest of whole-input derivations.
//!
//! A [`ParseForest`] owns the chart a parse produced and knows which edges
//! are derivation roots. Individual derivations are exposed as cheap
//! [`ParseTree`] handles that navigate the shared edge DAG; nothing is
//! copied out of the chart, and the navigation contract (label, ordered
//! children, literal leaves) is everything an external renderer needs.

use crate::chart::{Chart, Edge, EdgeId};
use crate::grammar::Grammar;
use std::fmt;
use std::time::Duration;

/// Counters describing one parse run.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ChartMetrics {
    /// Wall-clock time of the whole run.
    pub parse_time: Duration,
    /// Number of input tokens.
    pub tokens_consumed: usize,
    /// Total edges inserted into the chart.
    pub edges_created: usize,
    /// Edges seeded from input tokens.
    pub seed_edges: usize,
    /// Edges created by rule invocation.
    pub invocation_edges: usize,
    /// Edges created by the fundamental rule.
    pub fundamental_edges: usize,
    /// Closure passes until the fixed point.
    pub closure_passes: usize,
}

/// Every derivation of one input, sharing a single chart.
///
/// Zero trees is a normal outcome: the input is grammatical nonsense but
/// contained no unknown terminal.
pub struct ParseForest<'g> {
    grammar: &'g Grammar,
    chart: Chart,
    roots: Vec<EdgeId>,
    metrics: ChartMetrics,
}

impl<'g> ParseForest<'g> {
    pub(crate) fn new(
        grammar: &'g Grammar,
        chart: Chart,
        roots: Vec<EdgeId>,
        metrics: ChartMetrics,
    ) -> Self {
        Self {
            grammar,
            chart,
            roots,
            metrics,
        }
    }

    /// Number of derivations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether no derivation spans the whole input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Whether the input has more than one derivation.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.roots.len() > 1
    }

    /// The `index`-th derivation, in chart insertion order.
    #[must_use]
    pub fn tree(&self, index: usize) -> Option<ParseTree<'_>> {
        Some(ParseTree {
            forest: self,
            root: *self.roots.get(index)?,
        })
    }

    /// All derivations, in chart insertion order.
    #[must_use]
    pub fn trees(&self) -> Trees<'_> {
        Trees {
            forest: self,
            ids: self.roots.iter(),
        }
    }

    /// The underlying chart, including partial and sub-span edges.
    #[must_use]
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// The grammar this forest was parsed against.
    #[must_use]
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Counters for this run.
    #[must_use]
    pub fn metrics(&self) -> &ChartMetrics {
        &self.metrics
    }
}

impl fmt::Debug for ParseForest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseForest")
            .field("trees", &self.roots.len())
            .field("edges", &self.chart.len())
            .finish_non_exhaustive()
    }
}

/// Iterator over the derivations of a [`ParseForest`].
pub struct Trees<'a> {
    forest: &'a ParseForest<'a>,
    ids: std::slice::Iter<'a, EdgeId>,
}

impl<'a> Iterator for Trees<'a> {
    type Item = ParseTree<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(ParseTree {
            forest: self.forest,
            root: *self.ids.next()?,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Trees<'_> {}

/// One derivation: a handle over an overspanning, inactive root edge.
///
/// Handles are `Copy` and borrow the forest; navigation walks the shared
/// edge DAG. A node either has *real* children (sub-derivations, one per
/// matched right-hand-side symbol) or is a leaf whose right-hand side is
/// the literal token it matched.
#[derive(Clone, Copy)]
pub struct ParseTree<'a> {
    forest: &'a ParseForest<'a>,
    root: EdgeId,
}

impl<'a> ParseTree<'a> {
    /// The edge behind this node.
    #[must_use]
    pub fn edge(&self) -> &'a Edge {
        self.forest.chart.get(self.root)
    }

    /// The edge's chart handle.
    #[must_use]
    pub fn edge_id(&self) -> EdgeId {
        self.root
    }

    /// The forest this derivation belongs to.
    #[must_use]
    pub fn forest(&self) -> &'a ParseForest<'a> {
        self.forest
    }

    /// The node label: the left-hand side of the edge's production.
    #[must_use]
    pub fn label(&self) -> &'a str {
        self.forest.grammar.resolve(self.edge().lhs())
    }

    /// The half-open token span this node covers.
    #[must_use]
    pub fn span(&self) -> (usize, usize) {
        let edge = self.edge();
        (edge.start(), edge.end())
    }

    /// Whether the node has sub-derivations, as opposed to literal token
    /// leaves.
    #[must_use]
    pub fn has_real_children(&self) -> bool {
        !self.edge().children().is_empty()
    }

    /// The sub-derivations, in left-to-right order. Empty for leaves.
    #[must_use]
    pub fn children(&self) -> Children<'a> {
        Children {
            forest: self.forest,
            ids: self.edge().children().iter(),
        }
    }

    /// The literal symbols of the node's right-hand side. For a leaf these
    /// are the matched tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &'a str> + 'a {
        let forest = self.forest;
        self.edge()
            .rhs()
            .iter()
            .map(move |s| forest.grammar.resolve(*s))
    }
}

/// Renders the derivation in bracket notation, e.g.
/// `(S (NP (Det the) (N dog)) (VP ..))`.
impl fmt::Display for ParseTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label())?;
        if self.has_real_children() {
            for child in self.children() {
                write!(f, " {child}")?;
            }
        } else {
            for token in self.tokens() {
                write!(f, " {token}")?;
            }
        }
        f.write_str(")")
    }
}

impl fmt::Debug for ParseTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseTree({self})")
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for ParseTree<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ParseTree", 2)?;
        state.serialize_field("label", self.label())?;
        if self.has_real_children() {
            state.serialize_field("children", &self.children().collect::<Vec<_>>())?;
        } else {
            state.serialize_field("tokens", &self.tokens().collect::<Vec<_>>())?;
        }
        state.end()
    }
}

/// Iterator over a node's sub-derivations.
pub struct Children<'a> {
    forest: &'a ParseForest<'a>,
    ids: std::slice::Iter<'a, EdgeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = ParseTree<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(ParseTree {
            forest: self.forest,
            root: *self.ids.next()?,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}
