use crate::data_sync::Quote;
use ahash::RandomState;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

pub type FastHasher = RandomState;
/// FastHashMap using ahash
pub type FastHashMap<K, V> = HashMap<K, V, FastHasher>;

/// All quotes seen for one ordered pair during the current scan.
#[derive(Debug, Clone, Serialize)]
pub struct PairEdge {
    quotes: Vec<Quote>,
    best: usize,
    deepest: usize,
    weight: f64,
}

impl PairEdge {
    fn new(quote: Quote) -> Self {
        let weight = traversal_weight(&quote);
        Self { quotes: vec![quote], best: 0, deepest: 0, weight }
    }

    fn push(&mut self, quote: Quote) {
        let index = self.quotes.len();
        if outranks(quote.amount_out, self.quotes[self.best].amount_out) {
            self.best = index;
            self.weight = traversal_weight(&quote);
        }
        if outranks(quote.liquidity, self.quotes[self.deepest].liquidity) {
            self.deepest = index;
        }
        self.quotes.push(quote);
    }

    /// Quotes in arrival order
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Quote with the largest `amount_out`
    pub fn best_quote(&self) -> &Quote {
        &self.quotes[self.best]
    }

    /// Quote with the largest `liquidity`
    pub fn deepest_quote(&self) -> &Quote {
        &self.quotes[self.deepest]
    }

    /// `-ln(rate)` of the best quote
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

// Strict, so the first seen quote wins ties. A non-finite incumbent loses to any finite value.
fn outranks(candidate: f64, incumbent: f64) -> bool {
    candidate.is_finite() && (!incumbent.is_finite() || candidate > incumbent)
}

fn traversal_weight(quote: &Quote) -> f64 {
    if quote.amount_in <= 0.0 { f64::INFINITY } else { -quote.effective_rate().ln() }
}

/// Directed token graph for one scan. Nodes are token symbols, edges are ordered pairs
/// holding every quote observed for that pair.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LiquidityGraph {
    pub graph: DiGraph<String, PairEdge, usize>,
    // token -> node index
    #[serde(skip)]
    token_index: FastHashMap<String, NodeIndex<usize>>,
    // (from, to) -> edge index
    #[serde(skip)]
    pair_index: FastHashMap<(NodeIndex<usize>, NodeIndex<usize>), EdgeIndex<usize>>,
    quote_count: usize,
}

impl LiquidityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes<I: IntoIterator<Item = Quote>>(quotes: I) -> Self {
        let mut graph = Self::new();
        graph.update(quotes);
        graph
    }

    /// Rebuild the graph from a fresh quote batch. Nothing from the previous batch survives.
    pub fn update<I: IntoIterator<Item = Quote>>(&mut self, quotes: I) {
        self.graph.clear();
        self.token_index.clear();
        self.pair_index.clear();
        self.quote_count = 0;

        for quote in quotes {
            self.add_quote(quote);
        }

        debug!(
            tokens = self.token_count(),
            pairs = self.pair_count(),
            quotes = self.quote_count,
            "Rebuilt liquidity graph"
        );
    }

    fn add_or_get_token_idx(&mut self, token: &str) -> NodeIndex<usize> {
        if let Some(&idx) = self.token_index.get(token) {
            return idx;
        }
        let idx = self.graph.add_node(token.to_string());
        self.token_index.insert(token.to_string(), idx);
        idx
    }

    fn add_quote(&mut self, quote: Quote) {
        let node_from = self.add_or_get_token_idx(&quote.token_in);
        let node_to = self.add_or_get_token_idx(&quote.token_out);
        self.quote_count += 1;

        match self.pair_index.get(&(node_from, node_to)) {
            Some(&edge_index) => {
                if let Some(edge) = self.graph.edge_weight_mut(edge_index) {
                    edge.push(quote);
                }
            }
            None => {
                let edge_index = self.graph.add_edge(node_from, node_to, PairEdge::new(quote));
                self.pair_index.insert((node_from, node_to), edge_index);
            }
        }
    }

    pub fn node_index(&self, token: &str) -> Option<NodeIndex<usize>> {
        self.token_index.get(token).copied()
    }

    pub fn token_at(&self, idx: NodeIndex<usize>) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.token_index.contains_key(token)
    }

    /// Tokens in first-seen order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Out-neighbours of a node, in the order their pair was first quoted.
    pub fn successor_indices(&self, idx: NodeIndex<usize>) -> Vec<NodeIndex<usize>> {
        // petgraph walks the adjacency list newest first
        let mut successors: Vec<NodeIndex<usize>> = self.graph.edges(idx).map(|edge| edge.target()).collect();
        successors.reverse();
        successors
    }

    pub fn successors(&self, token: &str) -> Vec<&str> {
        let Some(idx) = self.node_index(token) else {
            return Vec::new();
        };
        self.successor_indices(idx).into_iter().filter_map(|successor| self.token_at(successor)).collect()
    }

    pub fn pair_edge(&self, token_in: &str, token_out: &str) -> Option<&PairEdge> {
        let from = self.node_index(token_in)?;
        let to = self.node_index(token_out)?;
        let edge_index = self.pair_index.get(&(from, to))?;
        self.graph.edge_weight(*edge_index)
    }

    pub fn has_edge(&self, token_in: &str, token_out: &str) -> bool {
        self.pair_edge(token_in, token_out).is_some()
    }

    pub fn quotes(&self, token_in: &str, token_out: &str) -> Option<&[Quote]> {
        self.pair_edge(token_in, token_out).map(PairEdge::quotes)
    }

    pub fn best_quote(&self, token_in: &str, token_out: &str) -> Option<&Quote> {
        self.pair_edge(token_in, token_out).map(PairEdge::best_quote)
    }

    pub fn deepest_quote(&self, token_in: &str, token_out: &str) -> Option<&Quote> {
        self.pair_edge(token_in, token_out).map(PairEdge::deepest_quote)
    }

    pub fn edge_weight(&self, token_in: &str, token_out: &str) -> Option<f64> {
        self.pair_edge(token_in, token_out).map(PairEdge::weight)
    }

    pub fn token_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed pairs with at least one quote
    pub fn pair_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn quote_count(&self) -> usize {
        self.quote_count
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
