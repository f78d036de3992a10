//! Logic layer: liquidity graph, cycle search, cycle simulation and the router that
//! ties them together.
pub mod cycle_validator;
pub mod graph;
pub mod pathfinder;
pub mod router;
pub mod types;

pub use cycle_validator::CycleValidator;
pub use graph::{LiquidityGraph, PairEdge, RouteHash, generate_route_hash};
pub use pathfinder::CycleFinder;
pub use router::{MultiHopRouter, MultiHopRouterBuilder};
pub use types::{Priority, RejectionCounts, RouteHop, ScanReport, TriangularOpportunity, ValidationFailure};
