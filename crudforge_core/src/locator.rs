//! Finds the source root holding an entity's `.java` file.
//!
//! Three strategies run in order and the first validated hit wins: a reverse
//! search below the working directory, the conventional module paths, and a
//! shallow walk from the working directory's grandparent.

use crate::config::LocatorConfig;
use crate::entity::EntityId;
use crate::error::{CrudforgeError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into.
const IGNORED_DIRS: &[&str] = &["target", "build", "node_modules", "out"];

#[derive(Debug, Clone)]
pub struct SourceLocator {
    working_dir: PathBuf,
    module_hint: Option<String>,
    source_root: PathBuf,
    project_markers: Vec<String>,
    search_depth: usize,
    fallback_depth: usize,
}

impl SourceLocator {
    pub fn new(
        working_dir: impl Into<PathBuf>,
        module_hint: Option<String>,
        config: &LocatorConfig,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            module_hint: module_hint.filter(|m| !m.trim().is_empty()),
            source_root: PathBuf::from(&config.source_root),
            project_markers: config.project_markers.clone(),
            search_depth: config.search_depth,
            fallback_depth: config.fallback_depth,
        }
    }

    /// Returns the source root directory containing `entity`'s file.
    pub fn locate(&self, entity: &EntityId) -> Result<PathBuf> {
        let relative = entity.relative_source_path();
        let mut searched = Vec::new();

        if let Some(root) = self.reverse_search(&relative, &mut searched) {
            debug!(entity = %entity, root = %root.display(), "Located by reverse search");
            return Ok(root);
        }
        if let Some(root) = self.conventional(&relative, &mut searched) {
            debug!(entity = %entity, root = %root.display(), "Located at conventional path");
            return Ok(root);
        }
        if let Some(root) = self.fallback(&relative, &mut searched) {
            debug!(entity = %entity, root = %root.display(), "Located by fallback walk");
            return Ok(root);
        }

        Err(CrudforgeError::locator_not_found(entity.to_string(), searched))
    }

    fn reverse_search(&self, relative: &Path, searched: &mut Vec<PathBuf>) -> Option<PathBuf> {
        searched.push(self.working_dir.clone());

        let mut first_match = None;
        for root in walk_dirs(&self.working_dir, self.search_depth) {
            if !root.ends_with(&self.source_root) || !root.join(relative).is_file() {
                continue;
            }
            trace!(root = %root.display(), "Candidate source root");
            if self.is_preferred(&root) {
                return Some(root);
            }
            first_match.get_or_insert(root);
        }
        first_match
    }

    /// A root whose module directory carries a project marker and matches the
    /// module hint, if any.
    fn is_preferred(&self, root: &Path) -> bool {
        let depth = self.source_root.components().count();
        let Some(module_dir) = root.ancestors().nth(depth) else {
            return false;
        };

        let has_marker = self
            .project_markers
            .iter()
            .any(|marker| module_dir.join(marker).is_file());
        let name_matches = match &self.module_hint {
            Some(hint) => module_dir
                .file_name()
                .is_some_and(|name| name.to_string_lossy() == hint.as_str()),
            None => true,
        };
        has_marker && name_matches
    }

    fn conventional(&self, relative: &Path, searched: &mut Vec<PathBuf>) -> Option<PathBuf> {
        let mut bases = vec![self.working_dir.clone()];
        if let Some(module) = &self.module_hint {
            bases.push(self.working_dir.join(module));
            bases.push(self.working_dir.join("..").join(module));
            bases.push(self.working_dir.join("../..").join(module));
        }

        for base in bases {
            let root = base.join(&self.source_root);
            searched.push(root.clone());
            if root.join(relative).is_file() {
                return Some(root);
            }
        }
        None
    }

    fn fallback(&self, relative: &Path, searched: &mut Vec<PathBuf>) -> Option<PathBuf> {
        let start = self.working_dir.join("../..");
        searched.push(start.clone());

        walk_dirs(&start, self.fallback_depth).find(|dir| {
            let looks_like_root = dir.ends_with(&self.source_root)
                || dir
                    .file_name()
                    .is_some_and(|name| name == "java" || name == "src");
            looks_like_root && dir.join(relative).is_file()
        })
    }
}

/// Directories below `root` (inclusive) in file-name order, skipping build
/// output and dot directories.
fn walk_dirs(root: &Path, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(DirEntry::into_path)
}

fn is_ignored(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn order_id() -> EntityId {
        EntityId::parse("com.acme.shop.domain.Order").unwrap()
    }

    fn add_entity(module_dir: &Path, source_root: &str) -> PathBuf {
        let root = module_dir.join(source_root);
        let file = root.join("com/acme/shop/domain/Order.java");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "package com.acme.shop.domain;\npublic class Order {}\n").unwrap();
        root
    }

    fn locator(dir: &Path, hint: Option<&str>) -> SourceLocator {
        SourceLocator::new(dir, hint.map(String::from), &LocatorConfig::default())
    }

    #[test]
    fn test_reverse_search_finds_nested_module() {
        let dir = TempDir::new().unwrap();
        let root = add_entity(&dir.path().join("services/shop"), "src/main/java");

        assert_eq!(locator(dir.path(), None).locate(&order_id()).unwrap(), root);
    }

    #[test]
    fn test_reverse_search_prefers_marked_module() {
        let dir = TempDir::new().unwrap();
        // "a-copy" sorts first but has no build file
        add_entity(&dir.path().join("a-copy"), "src/main/java");
        let marked = add_entity(&dir.path().join("shop"), "src/main/java");
        fs::write(dir.path().join("shop/pom.xml"), "<project/>").unwrap();

        assert_eq!(locator(dir.path(), None).locate(&order_id()).unwrap(), marked);
    }

    #[test]
    fn test_module_hint_selects_module() {
        let dir = TempDir::new().unwrap();
        for module in ["billing", "shop"] {
            add_entity(&dir.path().join(module), "src/main/java");
            fs::write(dir.path().join(module).join("build.gradle"), "").unwrap();
        }

        let found = locator(dir.path(), Some("shop")).locate(&order_id()).unwrap();
        assert_eq!(found, dir.path().join("shop/src/main/java"));
    }

    #[test]
    fn test_first_raw_match_without_markers() {
        let dir = TempDir::new().unwrap();
        let first = add_entity(&dir.path().join("alpha"), "src/main/java");
        add_entity(&dir.path().join("beta"), "src/main/java");

        assert_eq!(locator(dir.path(), Some("beta")).locate(&order_id()).unwrap(), first);
    }

    #[test]
    fn test_conventional_sibling_module() {
        let dir = TempDir::new().unwrap();
        let work = dir.path().join("workspace/app");
        fs::create_dir_all(&work).unwrap();
        add_entity(&dir.path().join("workspace/shop"), "src/main/java");

        let found = locator(&work, Some("shop")).locate(&order_id()).unwrap();
        assert!(found.join("com/acme/shop/domain/Order.java").is_file());
        assert!(found.ends_with("shop/src/main/java"));
    }

    #[test]
    fn test_fallback_accepts_plain_java_dir() {
        let dir = TempDir::new().unwrap();
        let work = dir.path().join("a/b");
        fs::create_dir_all(&work).unwrap();
        add_entity(&dir.path().join("legacy"), "java");

        let found = locator(&work, None).locate(&order_id()).unwrap();
        assert!(found.ends_with("legacy/java"));
    }

    #[test]
    fn test_ignored_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        add_entity(&dir.path().join("target/copy"), "src/main/java");
        add_entity(&dir.path().join(".cache"), "src/main/java");

        let work = dir.path().join("x/y");
        fs::create_dir_all(&work).unwrap();
        let err = locator(&work, None).locate(&order_id()).unwrap_err();
        assert!(matches!(err, CrudforgeError::LocatorNotFound { .. }));
    }

    #[test]
    fn test_not_found_lists_searched_locations() {
        let dir = TempDir::new().unwrap();
        let work = dir.path().join("a/b");
        fs::create_dir_all(&work).unwrap();

        match locator(&work, Some("shop")).locate(&order_id()) {
            Err(CrudforgeError::LocatorNotFound { entity, searched }) => {
                assert_eq!(entity, "com.acme.shop.domain.Order");
                // walk root, four conventional paths, fallback root
                assert_eq!(searched.len(), 6);
            }
            other => panic!("expected LocatorNotFound, got {other:?}"),
        }
    }
}
