//! Batch orchestration: locate, analyze, lay out, emit and write every
//! configured entity.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! fn main() {
//!     let report = crudforge_core::tooling::generate().expect("Generation failed");
//!     println!("{} of {} entities failed", report.failed(), report.processed());
//! }
//! ```

mod generator;

pub use generator::*;

use crate::config::CrudforgeConfig;
use crate::error::CrudforgeError;

/// Generates the artifacts for every entity listed in crudforge.toml.
///
/// Configuration is read from `crudforge.toml`, searching from the current
/// directory upward.
///
/// # Errors
///
/// Returns `CrudforgeError` only if the configuration cannot be found,
/// parsed or validated. Per-entity failures are recorded in the report.
pub fn generate() -> Result<GenerationReport, CrudforgeError> {
    let config = CrudforgeConfig::new()?;
    Generator::new(config).generate_all()
}

/// Generates artifacts with a custom configuration.
///
/// Use this when you need to override settings from crudforge.toml or
/// configure generation programmatically.
pub fn generate_with_config(config: CrudforgeConfig) -> Result<GenerationReport, CrudforgeError> {
    Generator::new(config).generate_all()
}
