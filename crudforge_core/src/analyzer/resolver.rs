//! Best-effort resolution of simple Java type names to qualified names.
//!
//! Resolution never fails the analysis: every resolver returns
//! `Result<String, Unresolved>` and the caller falls back to the name as
//! written.

use super::ast::{ImportDecl, TypeRef};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::trace;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

const JAVA_LANG: &[&str] = &[
    "Boolean",
    "Byte",
    "Character",
    "Class",
    "Double",
    "Enum",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Number",
    "Object",
    "Record",
    "Short",
    "String",
    "StringBuilder",
    "Void",
];

/// JDK types found through wildcard imports of common packages.
const WELL_KNOWN: &[(&str, &[&str])] = &[
    (
        "java.util",
        &[
            "ArrayList",
            "Collection",
            "Date",
            "Deque",
            "HashMap",
            "HashSet",
            "LinkedHashMap",
            "LinkedHashSet",
            "LinkedList",
            "List",
            "Locale",
            "Map",
            "Optional",
            "Queue",
            "Set",
            "SortedMap",
            "SortedSet",
            "TreeMap",
            "TreeSet",
            "UUID",
        ],
    ),
    (
        "java.time",
        &[
            "Duration",
            "Instant",
            "LocalDate",
            "LocalDateTime",
            "LocalTime",
            "OffsetDateTime",
            "Period",
            "ZonedDateTime",
        ],
    ),
    ("java.math", &["BigDecimal", "BigInteger"]),
];

/// A name that none of the strategies could qualify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub name: String,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot resolve type '{}'", self.name)
    }
}

/// What a resolver may consult about the file being analyzed.
#[derive(Debug, Clone)]
pub struct ResolutionContext<'a> {
    pub package: &'a str,
    pub imports: &'a [ImportDecl],
    pub source_root: &'a Path,
}

impl ResolutionContext<'_> {
    fn class_exists(&self, package: &str, simple: &str) -> bool {
        let mut path: PathBuf = self.source_root.to_path_buf();
        path.extend(package.split('.').filter(|s| !s.is_empty()));
        path.push(format!("{simple}.java"));
        path.is_file()
    }
}

/// Strategy for qualifying one simple (or already dotted) type name.
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, name: &str, ctx: &ResolutionContext<'_>) -> Result<String, Unresolved>;

    /// Resolves every named type inside a reference, keeping generics and
    /// array dimensions. Unresolvable parts are kept as written.
    fn resolve_type_ref(&self, ty: &TypeRef, ctx: &ResolutionContext<'_>) -> String {
        ty.render_with(&|name| match self.resolve(name, ctx) {
            Ok(qualified) => qualified,
            Err(e) => {
                trace!(error = %e, "falling back to declared type");
                name.to_string()
            }
        })
    }
}

fn unresolved(name: &str) -> Unresolved {
    Unresolved {
        name: name.to_string(),
    }
}

/// Primitives stay as they are; `java.lang` names are qualified.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinResolver;

impl TypeResolver for BuiltinResolver {
    fn resolve(&self, name: &str, _ctx: &ResolutionContext<'_>) -> Result<String, Unresolved> {
        if PRIMITIVES.contains(&name) {
            Ok(name.to_string())
        } else if JAVA_LANG.contains(&name) {
            Ok(format!("java.lang.{name}"))
        } else {
            Err(unresolved(name))
        }
    }
}

/// Single-type imports: `import java.math.BigDecimal;`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportResolver;

impl TypeResolver for ImportResolver {
    fn resolve(&self, name: &str, ctx: &ResolutionContext<'_>) -> Result<String, Unresolved> {
        // `Outer.Inner` resolves through `Outer`
        let (head, tail) = match name.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (name, None),
        };

        ctx.imports
            .iter()
            .find(|import| import.simple_name() == Some(head))
            .map(|import| match tail {
                Some(tail) => format!("{}.{}", import.path, tail),
                None => import.path.clone(),
            })
            .ok_or_else(|| unresolved(name))
    }
}

/// Classes living next to the entity under the source root.
#[derive(Debug, Default, Clone, Copy)]
pub struct SamePackageResolver;

impl TypeResolver for SamePackageResolver {
    fn resolve(&self, name: &str, ctx: &ResolutionContext<'_>) -> Result<String, Unresolved> {
        if ctx.package.is_empty() || name.contains('.') {
            return Err(unresolved(name));
        }
        if ctx.class_exists(ctx.package, name) {
            Ok(format!("{}.{}", ctx.package, name))
        } else {
            Err(unresolved(name))
        }
    }
}

/// Wildcard imports, checked against the source root and the well-known JDK
/// table.
#[derive(Debug, Default, Clone, Copy)]
pub struct WildcardImportResolver;

impl TypeResolver for WildcardImportResolver {
    fn resolve(&self, name: &str, ctx: &ResolutionContext<'_>) -> Result<String, Unresolved> {
        if name.contains('.') {
            return Err(unresolved(name));
        }

        for import in ctx.imports.iter().filter(|i| i.is_wildcard && !i.is_static) {
            let known = WELL_KNOWN
                .iter()
                .find(|(package, _)| *package == import.path)
                .is_some_and(|(_, names)| names.contains(&name));

            if known || ctx.class_exists(&import.path, name) {
                return Ok(format!("{}.{}", import.path, name));
            }
        }

        Err(unresolved(name))
    }
}

/// Fully dotted names that look like `com.acme.Type` are taken as written.
#[derive(Debug, Default, Clone, Copy)]
pub struct QualifiedNameResolver;

impl TypeResolver for QualifiedNameResolver {
    fn resolve(&self, name: &str, _ctx: &ResolutionContext<'_>) -> Result<String, Unresolved> {
        let starts_lower = name.chars().next().is_some_and(|c| c.is_ascii_lowercase());
        if name.contains('.') && starts_lower {
            Ok(name.to_string())
        } else {
            Err(unresolved(name))
        }
    }
}

/// Tries each resolver in turn; the first success wins.
pub struct ChainResolver {
    resolvers: Vec<Box<dyn TypeResolver>>,
}

impl ChainResolver {
    pub fn new(resolvers: Vec<Box<dyn TypeResolver>>) -> Self {
        Self { resolvers }
    }
}

impl Default for ChainResolver {
    fn default() -> Self {
        Self::new(vec![
            Box::new(BuiltinResolver),
            Box::new(QualifiedNameResolver),
            Box::new(ImportResolver),
            Box::new(SamePackageResolver),
            Box::new(WildcardImportResolver),
        ])
    }
}

impl TypeResolver for ChainResolver {
    fn resolve(&self, name: &str, ctx: &ResolutionContext<'_>) -> Result<String, Unresolved> {
        self.resolvers
            .iter()
            .find_map(|r| r.resolve(name, ctx).ok())
            .ok_or_else(|| unresolved(name))
    }
}
