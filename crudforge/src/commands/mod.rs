//! Command handlers for the Crudforge CLI.

pub mod generate;
pub mod init;
pub mod layout;

use crate::cli::Cli;
use crudforge_core::config::{CONFIG_FILE_NAME, CrudforgeConfig};
use crudforge_core::error::Result;
use std::env;
use tracing::debug;

/// Loads the configuration named by `--config`, else searches upward from
/// the current directory. `--output` overrides the output path and is taken
/// relative to the current directory.
pub fn load_config(cli: &Cli) -> Result<CrudforgeConfig> {
    dotenv::dotenv().ok();

    let mut config = match &cli.config {
        Some(path) => CrudforgeConfig::from_path(path)?,
        None => {
            let start = env::current_dir()?;
            let path = CrudforgeConfig::find_config_file(&start)?;
            debug!("Using {} at {}", CONFIG_FILE_NAME, path.display());
            CrudforgeConfig::from_path(&path)?
        }
    };

    if let Some(output) = &cli.output {
        let output = env::current_dir()?.join(output);
        config.general.output_path = output.to_string_lossy().into_owned();
    }
    Ok(config)
}
