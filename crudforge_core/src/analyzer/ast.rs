//! Declaration-level Java syntax tree.

/// A parsed Java compilation unit. Only the parts needed to describe an entity
/// are kept.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// A single `import` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Dotted path without the trailing `.*`.
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
}

impl ImportDecl {
    /// Simple name this import brings into scope, if it is a single-type import.
    pub fn simple_name(&self) -> Option<&str> {
        if self.is_wildcard || self.is_static {
            return None;
        }
        self.path.rsplit('.').next()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A top-level type declaration.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub kind: TypeDeclKind,
    pub name: String,
    pub doc_comment: Option<String>,
    pub annotations: Vec<Annotation>,
    pub fields: Vec<FieldDecl>,
}

/// A field (or record component) declared directly on a type.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub type_ref: TypeRef,
    pub is_static: bool,
    pub doc_comment: Option<String>,
    pub annotations: Vec<Annotation>,
}

/// An annotation with its string-valued arguments. Positional values are
/// stored under the key `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<(String, String)>,
}

impl Annotation {
    /// Simple annotation name, `@io.swagger.Schema` -> `Schema`.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A syntactic type reference, e.g. `java.util.List<? extends Item>[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named {
        name: String,
        arguments: Vec<TypeRef>,
    },
    Array(Box<TypeRef>),
    Wildcard {
        bound: Option<(WildcardBound, Box<TypeRef>)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardBound {
    Extends,
    Super,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Renders the reference back to Java syntax, mapping every named type
    /// through `name_of`.
    pub fn render_with(&self, name_of: &dyn Fn(&str) -> String) -> String {
        match self {
            TypeRef::Named { name, arguments } => {
                let mut out = name_of(name);
                if !arguments.is_empty() {
                    let args: Vec<String> =
                        arguments.iter().map(|a| a.render_with(name_of)).collect();
                    out.push('<');
                    out.push_str(&args.join(", "));
                    out.push('>');
                }
                out
            }
            TypeRef::Array(inner) => format!("{}[]", inner.render_with(name_of)),
            TypeRef::Wildcard { bound: None } => "?".to_string(),
            TypeRef::Wildcard {
                bound: Some((kind, inner)),
            } => {
                let keyword = match kind {
                    WildcardBound::Extends => "extends",
                    WildcardBound::Super => "super",
                };
                format!("? {} {}", keyword, inner.render_with(name_of))
            }
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_with(&|name| name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef::Named {
            name: "Map".into(),
            arguments: vec![
                TypeRef::named("String"),
                TypeRef::Wildcard {
                    bound: Some((
                        WildcardBound::Extends,
                        Box::new(TypeRef::Array(Box::new(TypeRef::named("byte")))),
                    )),
                },
            ],
        };
        assert_eq!(ty.to_string(), "Map<String, ? extends byte[]>");
    }

    #[test]
    fn test_import_simple_name() {
        let single = ImportDecl {
            path: "java.time.LocalDateTime".into(),
            is_static: false,
            is_wildcard: false,
        };
        let wildcard = ImportDecl {
            path: "java.util".into(),
            is_static: false,
            is_wildcard: true,
        };
        assert_eq!(single.simple_name(), Some("LocalDateTime"));
        assert_eq!(wildcard.simple_name(), None);
    }
}
