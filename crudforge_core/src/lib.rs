// Crudforge - CRUD layer generation from Java entity sources

// Pipeline stages
pub mod analyzer;
pub mod emit;
pub mod layout;
pub mod locator;
pub mod writer;

// Shared model and rendering
pub mod artifact;
pub mod entity;

// Ambient
pub mod config;
pub mod error;

// Batch orchestration
pub mod tooling;

// Re-export commonly used items for convenience
pub use artifact::{ArtifactDescription, render};
pub use config::{CONFIG_FILE_NAME, CrudforgeConfig};
pub use entity::{EntityDescriptor, EntityId, FieldDescriptor};
pub use error::{CrudforgeError, Result};
pub use layout::{ArtifactKind, LayoutConfig, derive_layout};
pub use tooling::{GenerationReport, Generator, generate, generate_with_config};
pub use writer::{OutputWriter, WriteOutcome};
