//! Init command - initializes crudforge.toml configuration.

use crate::cli::{Cli, InitArgs};
use crudforge_core::config::{CONFIG_FILE_NAME, CONFIG_TEMPLATE};
use crudforge_core::error::{CrudforgeError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Runs the init command in the current directory.
pub fn run(cli: &Cli, args: InitArgs) -> Result<()> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| Path::new(CONFIG_FILE_NAME).to_path_buf());
    write_template(&path, args.force)?;

    info!("Created {}", path.display());
    if !cli.quiet {
        println!("Created {}", path.display());
        println!("Next steps:");
        println!("  1. List your entity classes under [general].entities");
        println!("  2. Run 'crudforge generate'");
    }
    Ok(())
}

fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CrudforgeError::config(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }
    fs::write(path, CONFIG_TEMPLATE)?;
    Ok(())
}
