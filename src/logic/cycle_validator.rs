use super::graph::{LiquidityGraph, generate_route_hash};
use super::types::{Priority, RouteHop, TriangularOpportunity, ValidationFailure};
use crate::config::RouterConfig;
use crate::constants::{BPS_PER_UNIT, GWEI_PER_NATIVE};

/// Simulates a start amount through a cycle, hop by hop, on the best quote of each pair,
/// and turns a profitable result into a [`TriangularOpportunity`].
#[derive(Clone, Debug)]
pub struct CycleValidator {
    gas_units_per_hop: u64,
    gas_price_gwei: f64,
    native_token_price_usd: f64,
    liquidity_reference_depth: f64,
    slippage_estimate_pct: f64,
    execution_time_per_hop_ms: u64,
}

impl Default for CycleValidator {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}

impl CycleValidator {
    pub fn from_config(config: &RouterConfig) -> Self {
        Self {
            gas_units_per_hop: config.gas_units_per_hop,
            gas_price_gwei: config.gas_price_gwei,
            native_token_price_usd: config.native_token_price_usd,
            liquidity_reference_depth: config.liquidity_reference_depth,
            slippage_estimate_pct: config.slippage_estimate_pct,
            execution_time_per_hop_ms: config.execution_time_per_hop_ms,
        }
    }

    /// Flat gas estimate in USD: every hop burns `gas_units_per_hop` at the reference price.
    pub fn estimate_gas_cost_usd(&self, hops: usize) -> f64 {
        let total_gas = hops as f64 * self.gas_units_per_hop as f64;
        total_gas * self.gas_price_gwei / GWEI_PER_NATIVE * self.native_token_price_usd
    }

    pub fn validate(&self, graph: &LiquidityGraph, cycle: &[String], start_amount_usd: f64) -> Result<TriangularOpportunity, ValidationFailure> {
        if cycle.len() < 3 {
            return Err(ValidationFailure::TooShort(cycle.len()));
        }
        let total_hops = cycle.len() - 1;

        let mut current_amount = start_amount_usd;
        let mut amounts = Vec::with_capacity(cycle.len());
        let mut prices = Vec::with_capacity(total_hops);
        let mut dexes = Vec::with_capacity(total_hops);
        let mut execution_route = Vec::with_capacity(total_hops);
        let mut liquidity_depth = Vec::with_capacity(total_hops);
        amounts.push(current_amount);

        for pair in cycle.windows(2) {
            let (token_in, token_out) = (&pair[0], &pair[1]);
            let Some(edge) = graph.pair_edge(token_in, token_out) else {
                return Err(ValidationFailure::MissingHop { token_in: token_in.clone(), token_out: token_out.clone() });
            };

            let best = edge.best_quote();
            let liquidity_score = edge.deepest_quote().liquidity / self.liquidity_reference_depth;
            let amount_out = current_amount * best.price;

            execution_route.push(RouteHop {
                token_in: token_in.clone(),
                token_out: token_out.clone(),
                dex: best.dex.clone(),
                amount_in: current_amount,
                amount_out,
                price: best.price,
                pool: best.pool_address.clone(),
                liquidity_score,
            });
            amounts.push(amount_out);
            prices.push(best.price);
            dexes.push(best.dex.clone());
            liquidity_depth.push((token_in.clone(), liquidity_score));

            current_amount = amount_out;
        }

        let gross_profit_usd = current_amount - start_amount_usd;
        let gas_cost_usd = self.estimate_gas_cost_usd(total_hops);
        let net_profit_usd = gross_profit_usd - gas_cost_usd;

        // NaN from a broken quote fails this check as well
        if !(net_profit_usd > 0.0) {
            return Err(ValidationFailure::Unprofitable { net_profit_usd });
        }

        let profit_bps = if start_amount_usd > 0.0 { (net_profit_usd / start_amount_usd * BPS_PER_UNIT).trunc() as i64 } else { 0 };

        let average_score = liquidity_depth.iter().map(|(_, score)| score).sum::<f64>() / total_hops as f64;
        let confidence = if average_score.is_finite() { (average_score * 100.0).clamp(0.0, 100.0) } else { 0.0 };

        let route_hash = generate_route_hash(cycle, &dexes);

        Ok(TriangularOpportunity {
            tokens: cycle.to_vec(),
            dexes,
            amounts,
            prices,
            gross_profit_usd,
            profit_bps,
            gas_cost_usd,
            net_profit_usd,
            total_hops,
            execution_route,
            confidence,
            liquidity_depth,
            slippage_estimate_pct: self.slippage_estimate_pct,
            execution_time_ms: total_hops as u64 * self.execution_time_per_hop_ms,
            priority: Priority::from_net_profit(net_profit_usd),
            route_hash,
        })
    }
}
