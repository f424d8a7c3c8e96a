use anyhow::Context;
use fmap_analyzer::{Analyzer, parse_options};
use fmap_core::AnalysisReport;
use fmap_parser::JavaParser;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::input::read_source;
use crate::output::{output, write_json};
use crate::progress::Progress;

/// Handle `fmap analyze`.
pub async fn handle(args: &AnalyzeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = read_source(&args.source.input)?;
    let mut config = bootstrap::load_config(&args.source)?;

    let records = JavaParser::new(parse_options(&config.parser))
        .parse(&source)
        .with_context(|| format!("failed to parse {}", args.source.input))?;

    if let Some(concurrency) = args.concurrency {
        config.oracle.max_concurrency = concurrency;
    }
    if let Some(model) = &args.model {
        config.oracle.model.clone_from(model);
    }
    if let Some(endpoint) = &args.endpoint {
        config.oracle.endpoint.clone_from(endpoint);
    }
    if let Some(policy) = args.on_unknown_symbol {
        config.oracle.on_unknown_symbol = policy;
    }
    config
        .oracle
        .require_configured()
        .context("oracle is not usable")?;

    let analyzer = Analyzer::from_config(&config).context("failed to build oracle client")?;

    let progress = Progress::bar(records.len() as u64, "mapping formulas", !flags.quiet);
    let results = analyzer
        .map_records_with(records, |result| {
            progress.set_message(&result.method_name);
            progress.inc(1);
        })
        .await;
    progress.finish_clear();

    if !flags.quiet {
        eprintln!("{}", AnalysisReport::from_results(&results));
    }

    if let Some(path) = &args.out {
        write_json(path, &results)?;
        if !flags.quiet {
            eprintln!("results written to {}", path.display());
        }
    }

    output(&results, flags.format)
}
