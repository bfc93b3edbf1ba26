//! Per-entity pipeline with continue-on-error batch semantics.

use crate::analyzer::{ChainResolver, TypeResolver, analyze_with_resolver};
use crate::config::CrudforgeConfig;
use crate::emit::emit_kinds;
use crate::entity::EntityId;
use crate::error::{CrudforgeError, Result};
use crate::layout::derive_layout;
use crate::locator::SourceLocator;
use crate::writer::{OutputWriter, WriteOutcome};
use rayon::prelude::*;
use tracing::{debug, error, info};

/// Outcome for one configured entity.
#[derive(Debug)]
pub struct EntityReport {
    /// The identifier as configured.
    pub entity: String,
    pub outcome: std::result::Result<Vec<WriteOutcome>, CrudforgeError>,
}

impl EntityReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&CrudforgeError> {
        self.outcome.as_ref().err()
    }

    pub fn outcomes(&self) -> &[WriteOutcome] {
        match &self.outcome {
            Ok(outcomes) => outcomes.as_slice(),
            Err(_) => &[],
        }
    }
}

/// Report of a generation run, in configuration order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub entities: Vec<EntityReport>,
}

impl GenerationReport {
    /// Number of entities attempted.
    pub fn processed(&self) -> usize {
        self.entities.len()
    }

    pub fn succeeded(&self) -> usize {
        self.entities.iter().filter(|e| e.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.processed() - self.succeeded()
    }

    /// Artifacts written (or that would be written, in a dry run).
    pub fn written(&self) -> usize {
        self.all_outcomes().filter(|o| o.is_written()).count()
    }

    /// Artifacts left untouched because their content was unchanged.
    pub fn skipped(&self) -> usize {
        self.all_outcomes().filter(|o| !o.is_written()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &CrudforgeError)> {
        self.entities
            .iter()
            .filter_map(|e| e.error().map(|err| (e.entity.as_str(), err)))
    }

    fn all_outcomes(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.entities.iter().flat_map(|e| e.outcomes())
    }
}

/// Runs the artifact pipeline for every configured entity.
pub struct Generator {
    config: CrudforgeConfig,
    locator: SourceLocator,
    writer: OutputWriter,
    resolver: Box<dyn TypeResolver>,
}

impl Generator {
    pub fn new(config: CrudforgeConfig) -> Self {
        let locator = SourceLocator::new(
            config.working_dir.clone(),
            config.module_hint().map(String::from),
            &config.locator,
        );
        let writer = OutputWriter::new(config.output_root())
            .with_source_subtree(&config.output.source_subtree)
            .with_dry_run(config.output.dry_run);

        Self {
            config,
            locator,
            writer,
            resolver: Box::new(ChainResolver::default()),
        }
    }

    /// Replaces the type resolver used by the analyzer.
    pub fn with_resolver(mut self, resolver: Box<dyn TypeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &CrudforgeConfig {
        &self.config
    }

    /// Processes every entity. A failing entity is logged and recorded; the
    /// remaining entities still run.
    pub fn generate_all(&self) -> Result<GenerationReport> {
        self.config.validate()?;
        let entities = &self.config.general.entities;
        info!(
            entities = entities.len(),
            parallel = self.config.general.parallel,
            output = %self.writer.output_root().display(),
            "Starting generation"
        );

        let run = |raw: &String| EntityReport {
            entity: raw.clone(),
            outcome: self.generate_entity(raw),
        };
        // indexed parallel collect keeps configuration order
        let reports: Vec<EntityReport> = if self.config.general.parallel {
            entities.par_iter().map(run).collect()
        } else {
            entities.iter().map(run).collect()
        };

        let report = GenerationReport { entities: reports };
        info!(
            processed = report.processed(),
            failed = report.failed(),
            written = report.written(),
            skipped = report.skipped(),
            "Generation complete"
        );
        Ok(report)
    }

    /// Runs the pipeline for a single entity identifier.
    pub fn generate_entity(&self, raw: &str) -> Result<Vec<WriteOutcome>> {
        self.run_pipeline(raw).inspect_err(|err| {
            error!(entity = %raw, kind = err.kind(), "Entity failed: {}", err);
        })
    }

    fn run_pipeline(&self, raw: &str) -> Result<Vec<WriteOutcome>> {
        let id = EntityId::parse(raw)?;
        let source_root = self.locator.locate(&id)?;
        debug!(entity = %id, root = %source_root.display(), "Analyzing");
        let entity = analyze_with_resolver(&id, &source_root, self.resolver.as_ref())?;

        let mut layout = derive_layout(id.base_package(), id.class_name());
        if let Some(package) = &self.config.output.support_package {
            layout = layout.with_support_package(package);
        }

        let artifacts = emit_kinds(&entity, &layout, &self.config.output.kinds);
        let outcomes = artifacts
            .iter()
            .map(|artifact| self.writer.write(artifact))
            .collect::<Result<Vec<_>>>()?;

        info!(
            entity = %id,
            fields = entity.fields.len(),
            written = outcomes.iter().filter(|o| o.is_written()).count(),
            "Entity generated"
        );
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ArtifactKind;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_entity(root: &Path, package: &str, class: &str, body: &str) {
        let dir = root.join("src/main/java").join(package.replace('.', "/"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{class}.java")),
            format!("package {package};\n\npublic class {class} {{\n{body}\n}}\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_report_counts() {
        let report = GenerationReport {
            entities: vec![
                EntityReport {
                    entity: "a.b.C".into(),
                    outcome: Ok(vec![
                        WriteOutcome::Written("x".into()),
                        WriteOutcome::Skipped("y".into()),
                    ]),
                },
                EntityReport {
                    entity: "bad".into(),
                    outcome: Err(CrudforgeError::invalid_entity_id("bad")),
                },
            ],
        };
        assert_eq!(report.processed(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.written(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failures().map(|(e, _)| e).collect::<Vec<_>>(), vec!["bad"]);
    }

    #[test]
    fn test_invalid_identifier_is_recorded() {
        let dir = TempDir::new().unwrap();
        let config = CrudforgeConfig::builder()
            .working_dir(dir.path())
            .entity("Order")
            .build();

        let report = Generator::new(config).generate_all().unwrap();
        assert!(matches!(
            report.entities[0].error(),
            Some(CrudforgeError::InvalidEntityId(_))
        ));
    }

    #[test]
    fn test_selected_kinds_and_support_package() {
        let dir = TempDir::new().unwrap();
        write_entity(dir.path(), "com.acme.shop.domain", "Order", "    private Long id;");
        let config = CrudforgeConfig::builder()
            .working_dir(dir.path())
            .output_path("out")
            .entity("com.acme.shop.domain.Order")
            .kinds(vec![ArtifactKind::Service])
            .support_package("com.acme.web")
            .build();

        let report = Generator::new(config).generate_all().unwrap();
        assert_eq!(report.written(), 1);

        let path = dir.path().join("out/src/main/java/com/acme/shop/service/OrderService.java");
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("import com.acme.web.PageResult;"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write_entity(dir.path(), "com.acme.shop.domain", "Order", "    private Long id;");
        let config = CrudforgeConfig::builder()
            .working_dir(dir.path())
            .output_path("out")
            .entity("com.acme.shop.domain.Order")
            .dry_run(true)
            .build();

        let report = Generator::new(config).generate_all().unwrap();
        assert_eq!(report.written(), 9);
        assert!(!dir.path().join("out").exists());
    }
}
