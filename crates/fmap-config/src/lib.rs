//! # fmap-config
//!
//! Layered configuration loading for fmap using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FMAP_*` prefix, `__` as separator)
//! 2. Project-level `.fmap/config.toml`
//! 3. User-level `~/.config/fmap/config.toml`
//! 4. Built-in defaults
//!
//! `DASHSCOPE_API_KEY` fills `oracle.api_key` when no other source set it.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FMAP_ORACLE__MODEL` -> `oracle.model`,
//! `FMAP_PARSER__VARIABLE_POLICY` -> `parser.variable_policy`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use fmap_config::FmapConfig;
//!
//! let config = FmapConfig::load_with_dotenv().expect("config");
//! if config.oracle.is_configured() {
//!     println!("model: {}", config.oracle.model);
//! }
//! ```

mod error;
mod oracle;
mod parser;

pub use error::ConfigError;
pub use oracle::OracleConfig;
pub use parser::ParserConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when `oracle.api_key` is still empty.
pub const FALLBACK_API_KEY_VAR: &str = "DASHSCOPE_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FmapConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

impl FmapConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be read or a value fails
    /// to deserialize or validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let mut config: Self = figment.extract()?;
        if config.oracle.api_key.is_empty()
            && let Ok(key) = std::env::var(FALLBACK_API_KEY_VAR)
        {
            config.oracle.api_key = key;
        }
        config.oracle.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".fmap/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FMAP_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fmap").join("config.toml"))
    }
}
