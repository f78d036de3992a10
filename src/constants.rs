/// Start tokens searched first, in this order, when present in the graph.
pub const DEFAULT_PRIORITY_TOKENS: [&str; 5] = ["USDC", "USDT", "WETH", "DAI", "USDC.e"];

pub const DEFAULT_MIN_HOPS: u8 = 2;
pub const DEFAULT_MAX_HOPS: u8 = 4;
pub const DEFAULT_MIN_PROFIT_USD: f64 = 0.05;

// Arbitrum-like gas reference values
pub const DEFAULT_GAS_UNITS_PER_HOP: u64 = 150_000;
pub const DEFAULT_GAS_PRICE_GWEI: f64 = 0.1;
pub const DEFAULT_NATIVE_TOKEN_PRICE_USD: f64 = 3000.0;

/// Venue liquidity that maps to a full confidence score
pub const DEFAULT_LIQUIDITY_REFERENCE_DEPTH: f64 = 10_000.0;

pub const DEFAULT_MAX_START_TOKENS: usize = 20;
pub const DEFAULT_TOP_K: usize = 50;
pub const DEFAULT_SLIPPAGE_ESTIMATE_PCT: f64 = 0.5;
pub const DEFAULT_EXECUTION_TIME_PER_HOP_MS: u64 = 200;

pub const GWEI_PER_NATIVE: f64 = 1e9;
pub const BPS_PER_UNIT: f64 = 10_000.0;

// Priority tiers on net profit, USD
pub const CRITICAL_NET_PROFIT_USD: f64 = 1.0;
pub const HIGH_NET_PROFIT_USD: f64 = 0.5;
pub const MEDIUM_NET_PROFIT_USD: f64 = 0.2;
