mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let result = match cli.command.clone() {
        None => commands::generate::run_default(&cli).map(|r| r.failed() == 0),
        Some(Commands::Generate(args)) => {
            commands::generate::run(&cli, args).map(|r| r.failed() == 0)
        }
        Some(Commands::Init(args)) => commands::init::run(&cli, args).map(|_| true),
        Some(Commands::Layout(args)) => commands::layout::run(&cli, args).map(|_| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise verbosity comes from `-v`/`--quiet`.
fn init_tracing(cli: &Cli) {
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let fallback = format!("crudforge={default_level},crudforge_core={default_level}");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
