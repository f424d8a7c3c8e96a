use std::process::ExitCode;

use clap::Parser;
use fmap_core::ParseFailure;

mod bootstrap;
mod cli;
mod commands;
mod input;
mod output;
mod progress;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("fmap error: {error:#}");
            ExitCode::from(exit_code_for(&error))
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    commands::dispatch(cli.command, &flags).await
}

/// Unparseable or method-less input exits 2; everything else exits 1.
fn exit_code_for(error: &anyhow::Error) -> u8 {
    if error.downcast_ref::<ParseFailure>().is_some() {
        2
    } else {
        1
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FMAP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
