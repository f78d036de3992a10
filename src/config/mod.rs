pub mod router_config;

pub use router_config::{RouterConfig, RouterConfigError, RouterConfigRoot};
