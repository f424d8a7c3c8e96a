pub mod analyze;
pub mod parse;
pub mod prompt;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => analyze::handle(&args, flags).await,
        Commands::Parse(args) => parse::handle(&args, flags),
        Commands::Prompt(args) => prompt::handle(&args, flags),
    }
}
