use super::cycle_validator::CycleValidator;
use super::graph::LiquidityGraph;
use super::pathfinder::CycleFinder;
use super::types::{RejectionCounts, ScanReport, TriangularOpportunity};
use crate::config::{RouterConfig, RouterConfigError};
use crate::data_sync::{Quote, QuoteSource};
use rayon::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, trace};

/// What one start token contributed to a search.
#[derive(Debug, Default)]
struct StartTokenSearch {
    opportunities: Vec<TriangularOpportunity>,
    cycles_evaluated: usize,
    rejections: RejectionCounts,
}

/// Multi-hop arbitrage router.
///
/// Each scan rebuilds the liquidity graph from a quote batch, enumerates cycles of
/// `min_hops..=max_hops` hops from every start token, simulates them on the best quotes
/// and returns the most profitable ones.
#[derive(Debug, Clone)]
pub struct MultiHopRouter {
    config: RouterConfig,
    graph: LiquidityGraph,
    cycle_finder: CycleFinder,
    cycle_validator: CycleValidator,
}

impl MultiHopRouter {
    pub fn new(config: RouterConfig) -> Result<Self, RouterConfigError> {
        config.validate()?;

        info!(
            min_hops = config.min_hops,
            max_hops = config.max_hops,
            min_profit_usd = config.min_profit_usd,
            top_k = config.top_k,
            parallel_search = config.parallel_search,
            "Multi-hop router ready"
        );

        Ok(Self {
            cycle_finder: CycleFinder::from_config(&config),
            cycle_validator: CycleValidator::from_config(&config),
            graph: LiquidityGraph::new(),
            config,
        })
    }

    pub fn builder() -> MultiHopRouterBuilder {
        MultiHopRouterBuilder::new()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn graph(&self) -> &LiquidityGraph {
        &self.graph
    }

    pub fn cycle_finder(&self) -> &CycleFinder {
        &self.cycle_finder
    }

    pub fn cycle_validator(&self) -> &CycleValidator {
        &self.cycle_validator
    }

    /// Replace the liquidity graph with one built from this quote batch.
    pub fn update<I: IntoIterator<Item = Quote>>(&mut self, quotes: I) {
        self.graph.update(quotes);
    }

    /// Profitable cycles over the current graph, best net profit first, at most `top_k`.
    pub fn find_triangular_opportunities(&self, start_amount_usd: f64) -> Vec<TriangularOpportunity> {
        self.search(start_amount_usd).opportunities
    }

    /// Pull a quote batch from `source`, rebuild the graph and search it.
    pub async fn scan<S: QuoteSource + ?Sized>(&mut self, source: &S, start_amount_usd: f64) -> eyre::Result<ScanReport> {
        let quotes = source.fetch_quotes().await?;
        let quotes_ingested = quotes.len();
        self.update(quotes);

        let start_tokens = self.cycle_finder.start_tokens(&self.graph).len();
        let search = self.search(start_amount_usd);

        let report = ScanReport {
            opportunities: search.opportunities,
            quotes_ingested,
            token_count: self.graph.token_count(),
            pair_count: self.graph.pair_count(),
            start_tokens,
            cycles_evaluated: search.cycles_evaluated,
            rejections: search.rejections,
            timestamp: SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs(),
        };

        info!(
            quotes = report.quotes_ingested,
            tokens = report.token_count,
            pairs = report.pair_count,
            cycles = report.cycles_evaluated,
            rejected = report.rejections.total(),
            opportunities = report.opportunities.len(),
            "Scan finished"
        );

        Ok(report)
    }

    pub fn format_opportunity(opportunity: &TriangularOpportunity) -> String {
        opportunity.to_string()
    }

    fn search(&self, start_amount_usd: f64) -> StartTokenSearch {
        let start_tokens = self.cycle_finder.start_tokens(&self.graph);

        // Results are collected in start token order on both paths, so the output does not
        // depend on the thread schedule.
        let per_token: Vec<StartTokenSearch> = if self.config.parallel_search {
            start_tokens.par_iter().map(|start_token| self.search_start_token(start_token, start_amount_usd)).collect()
        } else {
            start_tokens.iter().map(|start_token| self.search_start_token(start_token, start_amount_usd)).collect()
        };

        let mut total = StartTokenSearch::default();
        for search in per_token {
            total.opportunities.extend(search.opportunities);
            total.cycles_evaluated += search.cycles_evaluated;
            total.rejections.merge(&search.rejections);
        }

        // Stable, so equal profits keep discovery order
        total.opportunities.sort_by(|a, b| b.net_profit_usd.total_cmp(&a.net_profit_usd));
        total.opportunities.truncate(self.config.top_k);

        debug!(
            start_tokens = start_tokens.len(),
            cycles = total.cycles_evaluated,
            opportunities = total.opportunities.len(),
            "Cycle search finished"
        );
        total
    }

    fn search_start_token(&self, start_token: &str, start_amount_usd: f64) -> StartTokenSearch {
        let mut search = StartTokenSearch::default();

        for hops in self.config.min_hops..=self.config.max_hops {
            for cycle in self.cycle_finder.find_cycles(&self.graph, start_token, hops as usize) {
                search.cycles_evaluated += 1;
                match self.cycle_validator.validate(&self.graph, &cycle, start_amount_usd) {
                    Ok(opportunity) if opportunity.net_profit_usd > self.config.min_profit_usd => {
                        search.opportunities.push(opportunity);
                    }
                    Ok(opportunity) => {
                        trace!(route = %opportunity.route_hash, net_profit_usd = opportunity.net_profit_usd, "Below profit threshold");
                        search.rejections.below_threshold += 1;
                    }
                    Err(failure) => {
                        trace!(cycle = ?cycle, %failure, "Cycle rejected");
                        search.rejections.record(&failure);
                    }
                }
            }
        }

        debug!(start_token, cycles = search.cycles_evaluated, opportunities = search.opportunities.len(), "Searched start token");
        search
    }
}

/// Builder for [`MultiHopRouter`], starting from the default configuration.
pub struct MultiHopRouterBuilder {
    config: RouterConfig,
}

impl MultiHopRouterBuilder {
    pub fn new() -> Self {
        Self { config: RouterConfig::default() }
    }

    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_hops(mut self, min_hops: u8, max_hops: u8) -> Self {
        self.config.min_hops = min_hops;
        self.config.max_hops = max_hops;
        self
    }

    pub fn with_min_profit_usd(mut self, min_profit_usd: f64) -> Self {
        self.config.min_profit_usd = min_profit_usd;
        self
    }

    pub fn with_gas_settings(mut self, gas_units_per_hop: u64, gas_price_gwei: f64, native_token_price_usd: f64) -> Self {
        self.config.gas_units_per_hop = gas_units_per_hop;
        self.config.gas_price_gwei = gas_price_gwei;
        self.config.native_token_price_usd = native_token_price_usd;
        self
    }

    pub fn with_priority_tokens<S: Into<String>>(mut self, priority_tokens: Vec<S>) -> Self {
        self.config.priority_tokens = priority_tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_start_tokens(mut self, max_start_tokens: usize) -> Self {
        self.config.max_start_tokens = max_start_tokens;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    pub fn with_parallel_search(mut self, enabled: bool) -> Self {
        self.config.parallel_search = enabled;
        self
    }

    pub fn build(self) -> Result<MultiHopRouter, RouterConfigError> {
        MultiHopRouter::new(self.config)
    }
}

impl Default for MultiHopRouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
