//! CLI-Templates submission tool entry point.
//!
//! Binary name: `clitpl`
//!
//! Parses CLI arguments, resolves the catalog root and its config, then
//! dispatches to the wizard or a catalog maintenance command.

mod cli;
mod state;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;
use console::style;

use clitpl_observe::tracing_setup::{init_tracing, verbosity_filter};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(verbosity_filter(cli.quiet, cli.verbose)) {
        eprintln!("Warning: could not initialize logging: {err}");
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!();
            eprintln!("  {} {err:#}", style("✗").red().bold());
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    // Shell completions don't need app state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "clitpl", &mut std::io::stdout());
        return Ok(true);
    }

    let state = AppState::init().await?;

    match cli.command.unwrap_or(Commands::Submit) {
        Commands::Submit => cli::wizard::run(&state).await,
        Commands::RebuildIndex => cli::catalog::rebuild_index(&state).await,
        Commands::ValidateAll => cli::catalog::validate_all(&state).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
