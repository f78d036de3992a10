use super::graph::RouteHash;
use crate::constants::{CRITICAL_NET_PROFIT_USD, HIGH_NET_PROFIT_USD, MEDIUM_NET_PROFIT_USD};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, VariantNames};
use thiserror::Error;

/// Priority tier of an opportunity, ordered from least to most urgent.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, StrumDisplay, EnumString, VariantNames, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn from_net_profit(net_profit_usd: f64) -> Self {
        if net_profit_usd > CRITICAL_NET_PROFIT_USD {
            Priority::Critical
        } else if net_profit_usd > HIGH_NET_PROFIT_USD {
            Priority::High
        } else if net_profit_usd > MEDIUM_NET_PROFIT_USD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// One executed hop of a simulated route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteHop {
    pub token_in: String,
    pub token_out: String,
    pub dex: String,
    pub amount_in: f64,
    pub amount_out: f64,
    pub price: f64,
    pub pool: Option<String>,
    /// Depth of the deepest venue on this pair over the reference depth
    pub liquidity_score: f64,
}

/// A profitable cycle, fully simulated for one start amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangularOpportunity {
    /// Cycle tokens, first and last are the start token
    pub tokens: Vec<String>,
    /// Venue used per hop
    pub dexes: Vec<String>,
    /// Start amount followed by the running amount after each hop
    pub amounts: Vec<f64>,
    pub prices: Vec<f64>,
    pub gross_profit_usd: f64,
    /// Net profit over start amount in basis points, truncated toward zero
    pub profit_bps: i64,
    pub gas_cost_usd: f64,
    pub net_profit_usd: f64,
    pub total_hops: usize,
    pub execution_route: Vec<RouteHop>,
    /// 0..=100
    pub confidence: f64,
    /// (token_in, liquidity score) per hop
    pub liquidity_depth: Vec<(String, f64)>,
    pub slippage_estimate_pct: f64,
    pub execution_time_ms: u64,
    pub priority: Priority,
    pub route_hash: RouteHash,
}

impl TriangularOpportunity {
    pub fn start_amount(&self) -> f64 {
        self.amounts.first().copied().unwrap_or_default()
    }

    pub fn end_amount(&self) -> f64 {
        self.amounts.last().copied().unwrap_or_default()
    }

    pub fn start_token(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }
}

impl Display for TriangularOpportunity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TRIANGULAR ARBITRAGE")?;
        writeln!(f, "Path: {}", self.tokens.join(" -> "))?;
        writeln!(f, "DEXes: {}", self.dexes.join(" -> "))?;
        writeln!(f, "Start: ${:.2}", self.start_amount())?;
        writeln!(f, "End: ${:.2}", self.end_amount())?;
        writeln!(f, "Gross Profit: ${:.4} ({} bps)", self.gross_profit_usd, self.profit_bps)?;
        writeln!(f, "Gas Cost: ${:.4}", self.gas_cost_usd)?;
        writeln!(f, "Net Profit: ${:.4}", self.net_profit_usd)?;
        writeln!(f, "Confidence: {:.1}%", self.confidence)?;
        writeln!(f, "Priority: {}", self.priority)?;
        write!(f, "Hops: {}", self.total_hops)
    }
}

/// Why a candidate cycle did not become an opportunity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationFailure {
    #[error("cycle has {0} tokens, at least 3 are needed")]
    TooShort(usize),
    #[error("no quote for hop {token_in}->{token_out}")]
    MissingHop { token_in: String, token_out: String },
    #[error("net profit {net_profit_usd:.6} USD is not positive")]
    Unprofitable { net_profit_usd: f64 },
}

/// Rejected candidate counts, one per failure kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionCounts {
    pub too_short: usize,
    pub missing_hop: usize,
    pub unprofitable: usize,
    /// Profitable but not above `min_profit_usd`
    pub below_threshold: usize,
}

impl RejectionCounts {
    pub fn record(&mut self, failure: &ValidationFailure) {
        match failure {
            ValidationFailure::TooShort(_) => self.too_short += 1,
            ValidationFailure::MissingHop { .. } => self.missing_hop += 1,
            ValidationFailure::Unprofitable { .. } => self.unprofitable += 1,
        }
    }

    pub fn merge(&mut self, other: &RejectionCounts) {
        self.too_short += other.too_short;
        self.missing_hop += other.missing_hop;
        self.unprofitable += other.unprofitable;
        self.below_threshold += other.below_threshold;
    }

    pub fn total(&self) -> usize {
        self.too_short + self.missing_hop + self.unprofitable + self.below_threshold
    }
}

/// Outcome of one full scan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub opportunities: Vec<TriangularOpportunity>,
    pub quotes_ingested: usize,
    pub token_count: usize,
    pub pair_count: usize,
    pub start_tokens: usize,
    pub cycles_evaluated: usize,
    pub rejections: RejectionCounts,
    /// Unix seconds
    pub timestamp: u64,
}

impl ScanReport {
    pub fn best(&self) -> Option<&TriangularOpportunity> {
        self.opportunities.first()
    }
}
