pub mod liquidity_graph;
pub mod route_hash;

pub use liquidity_graph::{FastHashMap, FastHasher, LiquidityGraph, PairEdge};
pub use route_hash::{RouteHash, generate_route_hash};
