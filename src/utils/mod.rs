pub mod config_loader;

pub use config_loader::{ConfigLoader, ConfigLoaderSync, LoadConfigError};
