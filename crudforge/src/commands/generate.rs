//! Generate command - runs the artifact pipeline for every entity.

use super::load_config;
use crate::cli::{Cli, GenerateArgs};
use crudforge_core::config::CrudforgeConfig;
use crudforge_core::error::Result;
use crudforge_core::tooling::{GenerationReport, Generator};
use tracing::{error, info, warn};

/// Runs the generate command with default arguments.
pub fn run_default(cli: &Cli) -> Result<GenerationReport> {
    run(cli, GenerateArgs::default())
}

/// Runs the generate command, returning the report so the caller can set
/// the exit status.
pub fn run(cli: &Cli, args: GenerateArgs) -> Result<GenerationReport> {
    let mut config = load_config(cli)?;
    apply_overrides(&mut config, args);

    if config.general.entities.is_empty() {
        warn!("No entities configured; add them to [general].entities or pass --entity");
    }

    let report = Generator::new(config).generate_all()?;
    print_summary(&report, cli.quiet);
    Ok(report)
}

fn apply_overrides(config: &mut CrudforgeConfig, args: GenerateArgs) {
    if !args.entities.is_empty() {
        config.general.entities = args.entities;
    }
    if let Some(module) = args.module {
        config.general.module = module;
    }
    config.output.dry_run |= args.dry_run;
    config.general.parallel |= args.parallel;
}

fn print_summary(report: &GenerationReport, quiet: bool) {
    for (entity, err) in report.failures() {
        error!("{}: {}", entity, err);
    }
    if quiet {
        return;
    }

    for entity in &report.entities {
        for outcome in entity.outcomes() {
            let label = if outcome.is_written() { "written" } else { "unchanged" };
            println!("  {:<9} {}", label, outcome.path().display());
        }
    }
    println!(
        "{} entities processed, {} failed; {} artifacts written, {} unchanged",
        report.processed(),
        report.failed(),
        report.written(),
        report.skipped()
    );
    info!("Generation finished");
}
