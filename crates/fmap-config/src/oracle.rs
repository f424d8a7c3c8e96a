//! Mapping-oracle (chat-completions endpoint) configuration.

use fmap_core::ContractPolicy;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default endpoint: DashScope's OpenAI-compatible mode.
fn default_endpoint() -> String {
    "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string()
}

fn default_model() -> String {
    "qwen-max".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    60
}

/// Default number of oracle calls in flight.
const fn default_max_concurrency() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Base URL of an OpenAI-compatible API (`/chat/completions` is appended).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token for the endpoint.
    #[serde(default)]
    pub api_key: String,

    /// Model name sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default)]
    pub temperature: f32,

    /// Per-request timeout, in seconds. Timeouts are per-method errors.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum concurrent oracle calls during one analysis run.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Handling of reply keys that do not occur in the formula text.
    #[serde(default)]
    pub on_unknown_symbol: ContractPolicy,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            on_unknown_symbol: ContractPolicy::default(),
        }
    }
}

impl OracleConfig {
    /// Check if the endpoint, model, and API key are all set.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.model.is_empty() && !self.api_key.is_empty()
    }

    /// Full URL of the chat-completions route.
    pub fn completions_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{base}/chat/completions")
        }
    }

    /// Reject values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BelowMinimum`] for a zero timeout or zero concurrency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::BelowMinimum {
                field: "oracle.timeout_secs",
                min: 1,
                found: 0,
            });
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::BelowMinimum {
                field: "oracle.max_concurrency",
                min: 1,
                found: 0,
            });
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and additionally require credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OracleUnset`] naming the first empty setting.
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let unset = if self.api_key.is_empty() {
            Some(("api_key", "FMAP_ORACLE__API_KEY or DASHSCOPE_API_KEY"))
        } else if self.endpoint.is_empty() {
            Some(("endpoint", "FMAP_ORACLE__ENDPOINT"))
        } else if self.model.is_empty() {
            Some(("model", "FMAP_ORACLE__MODEL"))
        } else {
            None
        };
        match unset {
            Some((field, env)) => Err(ConfigError::OracleUnset { field, env }),
            None => Ok(()),
        }
    }
}
