use super::graph::LiquidityGraph;
use crate::config::RouterConfig;
use petgraph::graph::NodeIndex;
use std::collections::VecDeque;
use tracing::trace;

/// State of the cycle search: the node we stand on and how we got there.
#[derive(Debug)]
struct PathState {
    node: NodeIndex<usize>,
    path: Vec<NodeIndex<usize>>,
}

/// Enumerates bounded-length simple cycles through the liquidity graph and decides
/// which tokens a scan starts from.
#[derive(Clone, Debug)]
pub struct CycleFinder {
    priority_tokens: Vec<String>,
    max_start_tokens: usize,
}

impl Default for CycleFinder {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}

impl CycleFinder {
    pub fn new(priority_tokens: Vec<String>, max_start_tokens: usize) -> Self {
        Self { priority_tokens, max_start_tokens }
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(config.priority_tokens.clone(), config.max_start_tokens)
    }

    /// Priority tokens present in the graph, then every other token in first-seen order,
    /// capped at `max_start_tokens`.
    pub fn start_tokens<'a>(&self, graph: &'a LiquidityGraph) -> Vec<&'a str> {
        let mut start_tokens: Vec<&'a str> = Vec::with_capacity(self.max_start_tokens);

        for priority_token in &self.priority_tokens {
            if let Some(token) = graph.node_index(priority_token).and_then(|idx| graph.token_at(idx)) {
                if !start_tokens.contains(&token) {
                    start_tokens.push(token);
                }
            }
        }
        for token in graph.tokens() {
            if !start_tokens.contains(&token) {
                start_tokens.push(token);
            }
        }

        start_tokens.truncate(self.max_start_tokens);
        start_tokens
    }

    /// Every simple cycle of exactly `hops` edges that leaves and re-enters `start_token`.
    ///
    /// The search is depth first over an explicit stack. A neighbour is taken when it is
    /// not on the path yet, or when it is the start token and only the closing hop remains.
    /// Cycles come out in successor order, so the result is deterministic for a given graph.
    pub fn find_cycles(&self, graph: &LiquidityGraph, start_token: &str, hops: usize) -> Vec<Vec<String>> {
        if hops < 2 {
            return Vec::new();
        }
        let Some(start_node) = graph.node_index(start_token) else {
            return Vec::new();
        };

        let mut cycles = Vec::new();
        let mut stack = VecDeque::new();
        stack.push_back(PathState { node: start_node, path: vec![start_node] });

        while let Some(PathState { node, path }) = stack.pop_back() {
            let remaining = hops + 1 - path.len();
            if remaining == 0 {
                if node == start_node {
                    cycles.push(path.iter().filter_map(|idx| graph.token_at(*idx).map(str::to_string)).collect());
                }
                continue;
            }

            // Pushed in reverse so the first successor is explored first
            for next in graph.successor_indices(node).into_iter().rev() {
                let accepted = if next == start_node { remaining == 1 } else { remaining > 1 && !path.contains(&next) };
                if accepted {
                    let mut next_path = path.clone();
                    next_path.push(next);
                    stack.push_back(PathState { node: next, path: next_path });
                }
            }
        }

        trace!(start_token, hops, cycles = cycles.len(), "Enumerated cycles");
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_sync::Quote;

    fn graph_of(pairs: &[(&str, &str)]) -> LiquidityGraph {
        LiquidityGraph::from_quotes(pairs.iter().map(|(token_in, token_out)| Quote::unit(*token_in, *token_out, "dex", 1.0, 1.0)))
    }

    fn cycle(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn test_simple_triangle() {
        let graph = graph_of(&[("USDC", "WETH"), ("WETH", "ARB"), ("ARB", "USDC")]);
        let finder = CycleFinder::default();

        assert_eq!(finder.find_cycles(&graph, "USDC", 3), vec![cycle(&["USDC", "WETH", "ARB", "USDC"])]);
        assert!(finder.find_cycles(&graph, "USDC", 2).is_empty());
        assert!(finder.find_cycles(&graph, "USDC", 4).is_empty());
    }

    #[test]
    fn test_two_hop_round_trip() {
        let graph = graph_of(&[("A", "B"), ("B", "A")]);
        let finder = CycleFinder::default();

        assert_eq!(finder.find_cycles(&graph, "A", 2), vec![cycle(&["A", "B", "A"])]);
    }

    #[test]
    fn test_no_revisits_and_exact_length() {
        // complete digraph over four tokens
        let tokens = ["A", "B", "C", "D"];
        let mut pairs = Vec::new();
        for from in tokens {
            for to in tokens {
                if from != to {
                    pairs.push((from, to));
                }
            }
        }
        let graph = graph_of(&pairs);
        let finder = CycleFinder::default();

        for hops in 2..=4 {
            let cycles = finder.find_cycles(&graph, "A", hops);
            // ordered choices of (hops - 1) distinct intermediates out of 3
            assert_eq!(cycles.len(), if hops == 2 { 3 } else { 6 });

            for cycle in &cycles {
                assert_eq!(cycle.len(), hops + 1);
                assert_eq!(cycle.first().map(String::as_str), Some("A"));
                assert_eq!(cycle.last().map(String::as_str), Some("A"));
                let intermediates = &cycle[1..hops];
                assert!(!intermediates.contains(&"A".to_string()));
                for (i, token) in intermediates.iter().enumerate() {
                    assert!(!intermediates[i + 1..].contains(token));
                }
                for pair in cycle.windows(2) {
                    assert!(graph.has_edge(&pair[0], &pair[1]));
                }
            }
        }
        assert!(finder.find_cycles(&graph, "A", 5).is_empty());
    }

    #[test]
    fn test_deterministic_order() {
        let graph = graph_of(&[("A", "B"), ("A", "C"), ("B", "C"), ("C", "B"), ("B", "A"), ("C", "A")]);
        let finder = CycleFinder::default();

        assert_eq!(
            finder.find_cycles(&graph, "A", 3),
            vec![cycle(&["A", "B", "C", "A"]), cycle(&["A", "C", "B", "A"])]
        );
        assert_eq!(finder.find_cycles(&graph, "A", 3), finder.find_cycles(&graph, "A", 3));
    }

    #[test]
    fn test_unknown_or_dead_end_start() {
        let graph = graph_of(&[("A", "B"), ("B", "C")]);
        let finder = CycleFinder::default();

        assert!(finder.find_cycles(&graph, "Z", 3).is_empty());
        assert!(finder.find_cycles(&graph, "C", 3).is_empty());
        assert!(finder.find_cycles(&graph, "A", 1).is_empty());
        assert!(finder.find_cycles(&graph, "A", 0).is_empty());
    }

    #[test]
    fn test_start_tokens_priority_first() {
        let graph = graph_of(&[("ARB", "WETH"), ("WETH", "GMX"), ("GMX", "USDC"), ("USDC", "ARB")]);
        let finder = CycleFinder::default();

        assert_eq!(finder.start_tokens(&graph), vec!["USDC", "WETH", "ARB", "GMX"]);
        assert_eq!(CycleFinder::new(vec!["GMX".to_string(), "DAI".to_string()], 2).start_tokens(&graph), vec!["GMX", "ARB"]);
        assert!(finder.start_tokens(&LiquidityGraph::new()).is_empty());
    }
}
