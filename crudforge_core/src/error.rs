use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrudforgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source root for entity {entity} not found (searched {} locations)", .searched.len())]
    LocatorNotFound {
        entity: String,
        searched: Vec<PathBuf>,
    },

    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Malformed source in file {file}: {message}")]
    MalformedSource { file: PathBuf, message: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid entity identifier: {0}")]
    InvalidEntityId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file 'crudforge.toml' not found searching upward from {search_start}")]
    ConfigNotFound { search_start: PathBuf },

    #[error("TOML error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Invalid regex pattern: {0}")]
    Regex(String),
}

impl From<regex::Error> for CrudforgeError {
    fn from(err: regex::Error) -> Self {
        CrudforgeError::Regex(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CrudforgeError>;

impl CrudforgeError {
    pub fn locator_not_found(entity: impl Into<String>, searched: Vec<PathBuf>) -> Self {
        CrudforgeError::LocatorNotFound {
            entity: entity.into(),
            searched,
        }
    }

    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        CrudforgeError::SourceNotFound { path: path.into() }
    }

    pub fn malformed_source(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CrudforgeError::MalformedSource {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrudforgeError::WriteFailure {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_entity_id(entity: impl Into<String>) -> Self {
        CrudforgeError::InvalidEntityId(entity.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        CrudforgeError::Config(message.into())
    }

    /// Short machine-friendly label used in reports and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CrudforgeError::Io(_) => "io",
            CrudforgeError::LocatorNotFound { .. } => "locator_not_found",
            CrudforgeError::SourceNotFound { .. } => "source_not_found",
            CrudforgeError::MalformedSource { .. } => "malformed_source",
            CrudforgeError::WriteFailure { .. } => "write_failure",
            CrudforgeError::InvalidEntityId(_) => "invalid_entity_id",
            CrudforgeError::Config(_)
            | CrudforgeError::ConfigNotFound { .. }
            | CrudforgeError::TomlParse(_)
            | CrudforgeError::EnvVarNotSet(_)
            | CrudforgeError::Regex(_) => "config",
        }
    }
}
