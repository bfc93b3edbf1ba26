use crate::error::{CrudforgeError, Result};
use crate::layout::ArtifactKind;
use crate::writer::DEFAULT_SOURCE_SUBTREE;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};
use tracing::{debug, error, info, trace, warn};

pub const CONFIG_FILE_NAME: &str = "crudforge.toml";

/// Pattern to match ${VAR_NAME} or ${VAR_NAME:-default}
static ENV_VAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
        .expect("Invalid regex for environment variable substitution")
});

/// Starter configuration written by `crudforge init`.
pub const CONFIG_TEMPLATE: &str = r#"# crudforge configuration

[general]
# Module directory holding the entity sources (used to locate the source root)
module = ""
# Root of the generated tree; ${VAR} and ${VAR:-default} are expanded
output_path = "${CRUDFORGE_OUT:-./generated}"
# Fully-qualified entity classes to generate for
entities = []
parallel = false

[locator]
source_root = "src/main/java"
project_markers = ["pom.xml", "build.gradle", "build.gradle.kts"]
search_depth = 8
fallback_depth = 4

[output]
source_subtree = "src/main/java"
kinds = ["dto", "request", "response", "query", "repository", "service", "service_impl", "convertor", "controller"]
# support_package = "com.example.common"
dry_run = false
"#;

/// `[general]`: what to generate and where.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Module hint for the source locator; empty means none.
    pub module: String,
    pub output_path: String,
    pub entities: Vec<String>,
    /// Process entities on a rayon pool.
    pub parallel: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            module: String::new(),
            output_path: "./generated".to_string(),
            entities: Vec::new(),
            parallel: false,
        }
    }
}

/// `[locator]`: how entity sources are found on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Path suffix identifying a source root.
    pub source_root: String,
    /// Files marking a module directory.
    pub project_markers: Vec<String>,
    /// Depth of the reverse search below the working directory.
    pub search_depth: usize,
    /// Depth of the last-resort walk; kept shallower than `search_depth`.
    pub fallback_depth: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            source_root: "src/main/java".to_string(),
            project_markers: vec![
                "pom.xml".to_string(),
                "build.gradle".to_string(),
                "build.gradle.kts".to_string(),
            ],
            search_depth: 8,
            fallback_depth: 4,
        }
    }
}

/// `[output]`: what the writer produces.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub source_subtree: String,
    pub kinds: Vec<ArtifactKind>,
    /// Package of the hand-written helper types; `<base>.common` when unset.
    pub support_package: Option<String>,
    pub dry_run: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source_subtree: DEFAULT_SOURCE_SUBTREE.to_string(),
            kinds: ArtifactKind::ALL.to_vec(),
            support_package: None,
            dry_run: false,
        }
    }
}

/// Root configuration, the contents of `crudforge.toml`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CrudforgeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub locator: LocatorConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Directory the locator searches from and relative paths resolve
    /// against. Set to the config file's directory when loaded from disk.
    #[serde(skip)]
    pub working_dir: PathBuf,
}

impl CrudforgeConfig {
    /// Load configuration by searching for crudforge.toml in the current
    /// directory and its ancestors.
    pub fn new() -> Result<CrudforgeConfig> {
        info!("Loading crudforge configuration");
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        let config_path = Self::find_config_file(&env::current_dir()?)?;
        Self::from_path(&config_path)
    }

    /// Load a specific configuration file.
    pub fn from_path(path: &Path) -> Result<CrudforgeConfig> {
        info!("Reading configuration file: {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            CrudforgeError::from(e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        let mut config = Self::parse(&contents)?;
        config.working_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        info!(
            entities = config.general.entities.len(),
            kinds = config.output.kinds.len(),
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Parse TOML text, expand environment references and validate.
    pub fn parse(contents: &str) -> Result<CrudforgeConfig> {
        let mut config: CrudforgeConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            CrudforgeError::from(e)
        })?;
        debug!("Successfully parsed TOML configuration");

        config.substitute_all()?;
        config.validate()?;
        Ok(config)
    }

    /// Searches for `crudforge.toml` starting from `start` and traversing up
    /// to the root.
    pub fn find_config_file(start: &Path) -> Result<PathBuf> {
        debug!("Starting config file search from: {:?}", start);

        for path in start.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        error!("Configuration file '{}' not found in any parent directory.", CONFIG_FILE_NAME);
        Err(CrudforgeError::ConfigNotFound {
            search_start: start.to_path_buf(),
        })
    }

    pub fn builder() -> CrudforgeConfigBuilder {
        CrudforgeConfigBuilder::new()
    }

    /// Output root, resolved against the working directory.
    pub fn output_root(&self) -> PathBuf {
        self.working_dir.join(&self.general.output_path)
    }

    pub fn module_hint(&self) -> Option<&str> {
        let module = self.general.module.trim();
        (!module.is_empty()).then_some(module)
    }

    fn substitute_all(&mut self) -> Result<()> {
        debug!("Substituting environment variables in configuration");
        let general = &mut self.general;
        general.module = substitute_env_vars(&general.module)?;
        general.output_path = substitute_env_vars(&general.output_path)?;
        for entity in &mut general.entities {
            *entity = substitute_env_vars(entity)?;
        }

        self.locator.source_root = substitute_env_vars(&self.locator.source_root)?;
        self.output.source_subtree = substitute_env_vars(&self.output.source_subtree)?;
        if let Some(package) = &self.output.support_package {
            self.output.support_package = Some(substitute_env_vars(package)?);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.locator.source_root.trim().is_empty() {
            return Err(CrudforgeError::config("locator.source_root must not be empty"));
        }
        if self.locator.fallback_depth > self.locator.search_depth {
            return Err(CrudforgeError::config(format!(
                "locator.fallback_depth ({}) must not exceed locator.search_depth ({})",
                self.locator.fallback_depth, self.locator.search_depth
            )));
        }
        if self.output.kinds.is_empty() {
            return Err(CrudforgeError::config("output.kinds must name at least one artifact kind"));
        }
        Ok(())
    }
}

/// Substitute environment variables in config strings.
/// Supports ${VAR_NAME:-default} syntax.
pub fn substitute_env_vars(value: &str) -> Result<String> {
    trace!("Substituting environment variables in: {}", value);
    let mut result = value.to_string();

    for cap in ENV_VAR.captures_iter(value) {
        let var_name = &cap[1];
        let default_value = cap.get(2).map(|m| m.as_str());

        let replacement = match env::var(var_name) {
            Ok(val) => {
                debug!("Resolved environment variable: {}", var_name);
                val
            }
            Err(_) => match default_value {
                Some(default) => {
                    warn!(
                        "Environment variable {} not set, using default: {}",
                        var_name, default
                    );
                    default.to_string()
                }
                None => {
                    error!(
                        "Environment variable {} not set and no default provided",
                        var_name
                    );
                    return Err(CrudforgeError::EnvVarNotSet(var_name.to_string()));
                }
            },
        };

        result = result.replace(&cap[0], &replacement);
    }

    Ok(result)
}

/// Builder for creating a configuration programmatically.
#[derive(Debug, Clone)]
pub struct CrudforgeConfigBuilder {
    config: CrudforgeConfig,
}

impl Default for CrudforgeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CrudforgeConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: CrudforgeConfig {
                working_dir: PathBuf::from("."),
                ..CrudforgeConfig::default()
            },
        }
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.working_dir = dir.into();
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.config.general.module = module.into();
        self
    }

    pub fn output_path(mut self, path: impl Into<String>) -> Self {
        self.config.general.output_path = path.into();
        self
    }

    /// Adds one entity to generate for.
    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.config.general.entities.push(entity.into());
        self
    }

    /// Replaces the entity list.
    pub fn entities(mut self, entities: Vec<String>) -> Self {
        self.config.general.entities = entities;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.general.parallel = parallel;
        self
    }

    pub fn kinds(mut self, kinds: Vec<ArtifactKind>) -> Self {
        self.config.output.kinds = kinds;
        self
    }

    pub fn support_package(mut self, package: impl Into<String>) -> Self {
        self.config.output.support_package = Some(package.into());
        self
    }

    pub fn source_subtree(mut self, subtree: impl Into<String>) -> Self {
        self.config.output.source_subtree = subtree.into();
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.output.dry_run = dry_run;
        self
    }

    pub fn locator(mut self, locator: LocatorConfig) -> Self {
        self.config.locator = locator;
        self
    }

    pub fn build(self) -> CrudforgeConfig {
        self.config
    }
}
