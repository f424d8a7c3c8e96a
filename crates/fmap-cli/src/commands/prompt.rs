use anyhow::{Context, bail};
use fmap_analyzer::parse_options;
use fmap_oracle::OracleRequest;
use fmap_parser::JavaParser;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::PromptArgs;
use crate::input::read_source;
use crate::output::output;

/// Handle `fmap prompt`.
pub fn handle(args: &PromptArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = read_source(&args.source.input)?;
    let config = bootstrap::load_config(&args.source)?;

    let records = JavaParser::new(parse_options(&config.parser))
        .parse(&source)
        .with_context(|| format!("failed to parse {}", args.source.input))?;

    let requests: Vec<OracleRequest> = records
        .iter()
        .filter(|record| args.method.as_deref().is_none_or(|name| record.name == name))
        .map(|record| {
            OracleRequest::for_record(record, &config.oracle.model, config.oracle.temperature)
        })
        .collect();

    if requests.is_empty()
        && let Some(name) = &args.method
    {
        bail!("no method named `{name}` in {}", args.source.input);
    }

    output(&requests, flags.format)
}
