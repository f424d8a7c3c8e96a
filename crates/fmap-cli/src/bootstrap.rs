use anyhow::Context;
use fmap_config::FmapConfig;

use crate::cli::root_commands::SourceArgs;

/// Load layered config (`.env`, TOML files, `FMAP_*` env) and apply the
/// parser flag overrides.
pub fn load_config(source: &SourceArgs) -> anyhow::Result<FmapConfig> {
    let mut config = FmapConfig::load_with_dotenv().context("failed to load fmap config")?;
    source.apply(&mut config.parser);
    tracing::debug!(
        model = %config.oracle.model,
        policy = %config.parser.variable_policy,
        loop_counters = config.parser.include_loop_counters,
        "configuration loaded"
    );
    Ok(config)
}
