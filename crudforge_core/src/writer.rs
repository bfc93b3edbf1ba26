//! Idempotent artifact writer.
//!
//! An artifact is rendered, hashed with BLAKE3 and compared with whatever is
//! already on disk. Matching content is left untouched.

use crate::artifact::{ArtifactDescription, render};
use crate::error::{CrudforgeError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Default source subtree beneath the output root.
pub const DEFAULT_SOURCE_SUBTREE: &str = "src/main/java";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// Existing file already had identical content.
    Skipped(PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written(path) | WriteOutcome::Skipped(path) => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written(_))
    }
}

#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_root: PathBuf,
    source_subtree: PathBuf,
    dry_run: bool,
}

impl OutputWriter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            source_subtree: PathBuf::from(DEFAULT_SOURCE_SUBTREE),
            dry_run: false,
        }
    }

    pub fn with_source_subtree(mut self, subtree: impl Into<PathBuf>) -> Self {
        self.source_subtree = subtree.into();
        self
    }

    /// Computes outcomes without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// `<root>/<subtree>/<package path>/<ClassName>.java`
    pub fn target_path(&self, artifact: &ArtifactDescription) -> PathBuf {
        let mut path = self.output_root.join(&self.source_subtree);
        path.extend(artifact.package.split('.').filter(|s| !s.is_empty()));
        path.push(format!("{}.java", artifact.class_name));
        path
    }

    pub fn write(&self, artifact: &ArtifactDescription) -> Result<WriteOutcome> {
        let path = self.target_path(artifact);
        let content = render(artifact);
        let digest = blake3::hash(content.as_bytes());

        if let Some(existing) = existing_digest(&path)? {
            if existing == digest {
                debug!(path = %path.display(), "Unchanged, skipping");
                return Ok(WriteOutcome::Skipped(path));
            }
            trace!(path = %path.display(), "Content changed");
        }

        if self.dry_run {
            debug!(path = %path.display(), bytes = content.len(), "Would write (dry run)");
            return Ok(WriteOutcome::Written(path));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CrudforgeError::write_failure(parent, e))?;
        }
        fs::write(&path, content.as_bytes()).map_err(|e| CrudforgeError::write_failure(&path, e))?;

        debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
        Ok(WriteOutcome::Written(path))
    }
}

fn existing_digest(path: &Path) -> Result<Option<blake3::Hash>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(blake3::hash(&bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CrudforgeError::write_failure(path, e)),
    }
}
