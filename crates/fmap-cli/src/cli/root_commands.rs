use std::path::PathBuf;

use clap::{Args, Subcommand};
use fmap_config::ParserConfig;
use fmap_core::{ContractPolicy, VariablePolicy};

/// Default artifact name for `analyze --out` without a path.
pub const DEFAULT_RESULTS_FILE: &str = "analysis_results.json";

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Parse a Java file and map each method's formula to its code via the oracle.
    Analyze(AnalyzeArgs),
    /// Parse a Java file and print the extracted method records (offline).
    Parse(ParseArgs),
    /// Print the oracle requests that `analyze` would send (offline).
    Prompt(PromptArgs),
}

/// Input selection and parser switches shared by every command.
#[derive(Clone, Debug, Args)]
pub struct SourceArgs {
    /// Java source file, or `-` for stdin.
    pub input: String,

    /// Which declarations become candidate variables: numeric-typed, all-declared.
    #[arg(long)]
    pub policy: Option<VariablePolicy>,

    /// Count `for` loop variables as candidates.
    #[arg(long)]
    pub loop_counters: bool,
}

impl SourceArgs {
    /// Apply flag overrides on top of the loaded parser config.
    pub fn apply(&self, config: &mut ParserConfig) {
        if let Some(policy) = self.policy {
            config.variable_policy = policy;
        }
        if self.loop_counters {
            config.include_loop_counters = true;
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Also write the results to a JSON file (default: analysis_results.json).
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_RESULTS_FILE)]
    pub out: Option<PathBuf>,

    /// Maximum oracle calls in flight.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Model name override.
    #[arg(long)]
    pub model: Option<String>,

    /// Endpoint base URL override.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Handling of reply keys absent from the formula: strip, reject.
    #[arg(long)]
    pub on_unknown_symbol: Option<ContractPolicy>,
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Debug, Args)]
pub struct PromptArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only the method with this name.
    #[arg(long)]
    pub method: Option<String>,
}
