use async_trait::async_trait;
use dotenvy::dotenv;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::{env, fs};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("env expansion error: {0}")]
    Regex(#[from] regex::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[async_trait]
pub trait ConfigLoader {
    type SectionType;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError>;
}

pub trait ConfigLoaderSync {
    type SectionType;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError>;
}

pub async fn load_from_file<T: DeserializeOwned>(file_name: String) -> Result<T, LoadConfigError> {
    dotenv().ok();
    let contents = tokio::fs::read_to_string(file_name).await?;
    load_from_str(&contents)
}

pub fn load_from_file_sync<T: DeserializeOwned>(file_name: String) -> Result<T, LoadConfigError> {
    dotenv().ok();
    let contents = fs::read_to_string(file_name)?;
    load_from_str(&contents)
}

/// Parse a TOML document after `${VAR}` expansion
pub fn load_from_str<T: DeserializeOwned>(raw_config: &str) -> Result<T, LoadConfigError> {
    let contents = expand_vars(raw_config)?;
    Ok(toml::from_str(&contents)?)
}

// Unset variables are left as-is so the TOML error points at them.
fn expand_vars(raw_config: &str) -> Result<String, LoadConfigError> {
    let re = Regex::new(r"\$\{([a-zA-Z_][0-9a-zA-Z_]*)\}")?;
    Ok(re
        .replace_all(raw_config, |caps: &Captures| match env::var(&caps[1]) {
            Ok(val) => val,
            Err(_) => caps[0].to_string(),
        })
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Section {
        name: String,
        depth: f64,
    }

    #[test]
    fn test_expand_vars() -> eyre::Result<()> {
        // SAFETY: the variable name is unique to this test
        unsafe { env::set_var("MULTIHOP_LOADER_TEST_NAME", "arbitrum") };

        let expanded = expand_vars("name = \"${MULTIHOP_LOADER_TEST_NAME}\"\nother = \"${MULTIHOP_LOADER_UNSET}\"")?;
        assert_eq!(expanded, "name = \"arbitrum\"\nother = \"${MULTIHOP_LOADER_UNSET}\"");
        Ok(())
    }

    #[test]
    fn test_load_from_str() -> eyre::Result<()> {
        let section: Section = load_from_str("name = \"x\"\ndepth = 2.5")?;
        assert_eq!(section.name, "x");
        assert_eq!(section.depth, 2.5);

        let broken: Result<Section, _> = load_from_str("name = ");
        assert!(matches!(broken, Err(LoadConfigError::Toml(_))));
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result: Result<Section, _> = load_from_file_sync("does/not/exist.toml".to_string());
        assert!(matches!(result, Err(LoadConfigError::Io(_))));
    }
}
