use anyhow::Context;
use fmap_analyzer::parse_options;
use fmap_parser::JavaParser;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ParseArgs;
use crate::input::read_source;
use crate::output::output;

/// Handle `fmap parse`.
pub fn handle(args: &ParseArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = read_source(&args.source.input)?;
    let config = bootstrap::load_config(&args.source)?;

    let records = JavaParser::new(parse_options(&config.parser))
        .parse(&source)
        .with_context(|| format!("failed to parse {}", args.source.input))?;

    output(&records, flags.format)
}
