//! CLI command definitions for the `clitpl` binary.
//!
//! Uses clap derive macros for argument parsing. Running `clitpl` with no
//! subcommand starts the submission wizard.

pub mod catalog;
pub mod wizard;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Submit a template to the CLI-Templates catalog.
#[derive(Parser)]
#[command(name = "clitpl", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Describe a template interactively and submit it (the default).
    Submit,

    /// Regenerate templates/index.json from every stored entry.
    #[command(name = "rebuild-index")]
    RebuildIndex,

    /// Check every stored entry against templates/schema.json.
    #[command(name = "validate-all")]
    ValidateAll,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_wizard() {
        let cli = Cli::try_parse_from(["clitpl"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn parses_maintenance_commands_and_global_flags() {
        let cli = Cli::try_parse_from(["clitpl", "validate-all", "-vv"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ValidateAll)));
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["clitpl", "--quiet", "rebuild-index"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::RebuildIndex)));
        assert!(cli.quiet);
    }

    #[test]
    fn completions_requires_known_shell() {
        let cli = Cli::try_parse_from(["clitpl", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Completions { shell: Shell::Zsh })));
        assert!(Cli::try_parse_from(["clitpl", "completions", "tcsh"]).is_err());
    }
}
