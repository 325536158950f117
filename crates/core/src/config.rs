use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::alias::AliasTable;
use crate::assets::get_default_aliases;

/// Overrides the provider base url, mostly useful against a local mock server.
pub const BASE_URL_ENV: &str = "GROQ_BASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML parsing error: {0}")]
    YAMLError(#[from] serde_yaml::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Connection settings for the OpenAI compatible completion endpoint.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Literal key, or `env:NAME` to read it from the environment at request time.
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DefaultsConfig {
    pub model: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub models: AliasTable,
    pub prompts: AliasTable,
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Resolves a model alias to the vendor model id.
    pub fn model_id(&self, alias: &str) -> Option<&str> {
        self.models.resolve(alias)
    }

    /// Resolves a prompt alias to a path under `base_dir`.
    pub fn prompt_path(&self, alias: &str, base_dir: &Path) -> Option<PathBuf> {
        self.prompts.resolve(alias).map(|p| base_dir.join(p))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.models.is_empty() {
            return Err(ConfigError::Config("No models defined".to_string()));
        }
        if !self.models.contains(&self.defaults.model) {
            return Err(ConfigError::Config(format!(
                "Default model '{}' not found",
                self.defaults.model
            )));
        }
        if !self.prompts.contains(&self.defaults.prompt) {
            return Err(ConfigError::Config(format!(
                "Default prompt '{}' not found",
                self.defaults.prompt
            )));
        }
        Ok(())
    }
}

/// Parses and validates alias configuration from YAML.
#[instrument(skip(content))]
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Loads the built-in configuration, applying the base url override if set.
#[instrument]
pub fn get_config() -> Result<Config, ConfigError> {
    let mut config = parse_config(get_default_aliases())?;
    if let Ok(base_url) = std::env::var(BASE_URL_ENV)
        && !base_url.is_empty()
    {
        config.provider.base_url = base_url;
    }
    Ok(config)
}
