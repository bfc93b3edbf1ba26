//! Normalized entity description shared by every emitter.

use crate::error::{CrudforgeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Java type used for identifiers when the entity has no primary key field.
pub const DEFAULT_ID_TYPE: &str = "java.lang.Long";

/// Fully-qualified name of an entity class, e.g. `com.acme.shop.domain.Order`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    package: String,
    class_name: String,
}

impl EntityId {
    /// Parses a dotted identifier. The entity must live in a package that has a
    /// parent, since artifacts are laid out under the parent package.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let segments: Vec<&str> = raw.split('.').collect();
        if segments.len() < 3 || segments.iter().any(|s| !is_java_identifier(s)) {
            return Err(CrudforgeError::invalid_entity_id(raw));
        }

        let Some((class_name, package)) = segments.split_last() else {
            return Err(CrudforgeError::invalid_entity_id(raw));
        };
        Ok(Self {
            package: package.join("."),
            class_name: (*class_name).to_string(),
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Parent of the entity package; artifacts are generated beneath it.
    pub fn base_package(&self) -> &str {
        parent_package(&self.package)
    }

    /// Path of the source file relative to a source root.
    pub fn relative_source_path(&self) -> PathBuf {
        let mut path: PathBuf = self.package.split('.').collect();
        path.push(format!("{}.java", self.class_name));
        path
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.class_name)
    }
}

/// One field declared directly on the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// The type as written in the source, generics included.
    pub declared_type: String,
    /// Fully-qualified form when resolution succeeded, otherwise `declared_type`.
    pub resolved_type: String,
    pub comment: String,
    pub is_primary_key: bool,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        resolved_type: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let is_primary_key = is_primary_key_name(&name);
        Self {
            name,
            declared_type: declared_type.into(),
            resolved_type: resolved_type.into(),
            comment: comment.into(),
            is_primary_key,
        }
    }

    /// Shorthand for fields whose type needs no resolution.
    pub fn simple(name: impl Into<String>, ty: impl Into<String>) -> Self {
        let ty = ty.into();
        Self::new(name, ty.clone(), ty, "")
    }

    /// Raw type without generic arguments or array brackets.
    pub fn raw_type(&self) -> &str {
        raw_type_name(&self.declared_type)
    }

    /// Collections, maps and arrays are not usable as equality predicates.
    pub fn is_scalar(&self) -> bool {
        if self.declared_type.trim_end().ends_with(']') {
            return false;
        }
        !matches!(
            self.raw_type(),
            "List"
                | "ArrayList"
                | "LinkedList"
                | "Set"
                | "HashSet"
                | "LinkedHashSet"
                | "TreeSet"
                | "SortedSet"
                | "Collection"
                | "Iterable"
                | "Map"
                | "HashMap"
                | "LinkedHashMap"
                | "TreeMap"
                | "SortedMap"
                | "Queue"
                | "Deque"
        )
    }
}

/// Normalized description of one entity class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub package_name: String,
    pub class_name: String,
    pub class_comment: String,
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    pub fn base_package(&self) -> &str {
        parent_package(&self.package_name)
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package_name, self.class_name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The field named `id`, otherwise the first field flagged as a key.
    pub fn primary_key(&self) -> Option<&FieldDescriptor> {
        self.field("id")
            .or_else(|| self.fields.iter().find(|f| f.is_primary_key))
    }

    /// Resolved type of the key; [`DEFAULT_ID_TYPE`] when there is none.
    pub fn id_type(&self) -> &str {
        self.primary_key()
            .map(|f| f.resolved_type.as_str())
            .unwrap_or(DEFAULT_ID_TYPE)
    }
}

/// `id` or anything ending in `Id` counts as a key.
pub fn is_primary_key_name(name: &str) -> bool {
    name == "id" || name.ends_with("Id")
}

/// Everything before the last dot; empty for single-segment packages.
pub fn parent_package(package: &str) -> &str {
    package.rsplit_once('.').map(|(parent, _)| parent).unwrap_or("")
}

/// `Map<String, List<Long>>` -> `Map`, `byte[]` -> `byte`.
pub fn raw_type_name(ty: &str) -> &str {
    let end = ty.find(['<', '[']).unwrap_or(ty.len());
    ty[..end].trim()
}

fn is_java_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
