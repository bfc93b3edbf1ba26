//! Command-line interface definitions for Crudforge.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Crudforge - CRUD layer generation from Java entity sources
#[derive(Parser, Debug)]
#[command(name = "crudforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to crudforge.toml configuration file
    #[arg(short, long, global = true, env = "CRUDFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output path override (overrides config file)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the CRUD artifacts for the configured entities (default)
    Generate(GenerateArgs),

    /// Initialize a new crudforge.toml configuration file
    Init(InitArgs),

    /// Print the package and class naming table for an entity
    Layout(LayoutArgs),
}

// ============================================================================
// Generate Arguments
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Fully-qualified entity class; repeat to replace the configured list
    #[arg(short, long = "entity", value_name = "ENTITY")]
    pub entities: Vec<String>,

    /// Module directory hint for locating entity sources
    #[arg(short, long)]
    pub module: Option<String>,

    /// Report what would be written without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Process entities in parallel
    #[arg(long)]
    pub parallel: bool,
}

// ============================================================================
// Init Arguments
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing crudforge.toml if present
    #[arg(short, long)]
    pub force: bool,
}

// ============================================================================
// Layout Arguments
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Fully-qualified entity class, e.g. com.acme.shop.domain.Order
    pub entity: String,

    /// Support package override
    #[arg(long)]
    pub support_package: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "crudforge",
            "-vv",
            "generate",
            "--entity",
            "com.acme.shop.domain.Order",
            "-e",
            "com.acme.shop.domain.Customer",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.entities.len(), 2);
                assert!(args.dry_run);
                assert!(!args.parallel);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["crudforge", "--output", "out"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["crudforge", "-q", "-v"]).is_err());
    }
}
