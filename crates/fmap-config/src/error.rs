//! Errors raised while loading or checking fmap configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config layer could not be read or did not match [`crate::FmapConfig`].
    #[error("could not load fmap config: {0}")]
    Figment(#[from] figment::Error),

    /// A setting the oracle needs is empty after every layer merged.
    #[error("oracle.{field} is not set; provide {env} or `{field}` under [oracle] in .fmap/config.toml")]
    OracleUnset {
        field: &'static str,
        env: &'static str,
    },

    /// A numeric limit is below what the analyzer can run with.
    #[error("{field} = {found} is below the minimum of {min}")]
    BelowMinimum {
        field: &'static str,
        min: u64,
        found: u64,
    },
}
