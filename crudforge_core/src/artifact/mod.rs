//! Language-level description of one generated source unit.
//!
//! Emitters build an [`ArtifactDescription`]; [`render`] turns it into Java
//! source text for the writer.

mod render;

pub use render::{INDENT, render};

use crate::layout::{ArtifactKind, ArtifactName};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

/// Matches dotted names such as `java.math.BigDecimal` inside a type string.
static QUALIFIED_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[a-z_$][A-Za-z0-9_$]*\.)+[A-Z][A-Za-z0-9_$]*")
        .expect("Invalid regex for qualified type names")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
}

/// A body statement. Rendering indents nested blocks one level deeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    Line(String),
    Blank,
    /// `header {` body `}`
    Block {
        header: String,
        body: Vec<Statement>,
    },
    IfElse {
        condition: String,
        then: Vec<Statement>,
        otherwise: Vec<Statement>,
    },
}

impl Statement {
    pub fn line(text: impl Into<String>) -> Self {
        Statement::Line(text.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub ty: String,
    pub documentation: String,
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
    pub initializer: Option<String>,
}

impl FieldSpec {
    /// A `private` field, the shape of every DTO-style property.
    pub fn property(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            documentation: String::new(),
            annotations: Vec::new(),
            modifiers: vec!["private".to_string()],
            initializer: None,
        }
    }

    pub fn with_doc(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub annotations: Vec<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotations: Vec::new(),
        }
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSpec {
    pub name: String,
    pub params: Vec<Param>,
    /// `None` for constructors.
    pub return_type: Option<String>,
    pub documentation: String,
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
    /// `None` renders a declaration ending in `;`.
    pub body: Option<Vec<Statement>>,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: Some(return_type.into()),
            documentation: String::new(),
            annotations: Vec::new(),
            modifiers: Vec::new(),
            body: None,
        }
    }

    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            return_type: None,
            modifiers: vec!["public".to_string()],
            body: Some(Vec::new()),
            ..Self::new(class_name, "")
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_doc(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_body(mut self, body: Vec<Statement>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.body.is_none()
    }
}

/// One generated type: everything the renderer needs, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDescription {
    pub artifact: ArtifactKind,
    pub kind: TypeKind,
    pub package: String,
    pub class_name: String,
    pub documentation: String,
    pub annotations: Vec<String>,
    pub super_type: Option<String>,
    pub interfaces: Vec<String>,
    pub imports: BTreeSet<String>,
    pub fields: Vec<FieldSpec>,
    pub methods: Vec<MethodSpec>,
}

impl ArtifactDescription {
    pub fn new(name: &ArtifactName, kind: TypeKind) -> Self {
        Self {
            artifact: name.kind,
            kind,
            package: name.package.clone(),
            class_name: name.class_name.clone(),
            documentation: String::new(),
            annotations: Vec::new(),
            super_type: None,
            interfaces: Vec::new(),
            imports: BTreeSet::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn class(name: &ArtifactName) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: &ArtifactName) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Adds an import unless the type is implicitly visible.
    pub fn import(&mut self, qualified: &str) {
        let Some((package, _)) = qualified.rsplit_once('.') else {
            return;
        };
        if package == "java.lang" || package == self.package {
            return;
        }
        self.imports.insert(qualified.to_string());
    }

    /// Shortens every qualified name in `resolved` to its simple name and
    /// imports it. A simple name already taken by another import stays
    /// qualified.
    pub fn use_type(&mut self, resolved: &str) -> String {
        let mut out = String::with_capacity(resolved.len());
        let mut last = 0;
        for m in QUALIFIED_TYPE.find_iter(resolved) {
            out.push_str(&resolved[last..m.start()]);
            out.push_str(&self.use_qualified(m.as_str()));
            last = m.end();
        }
        out.push_str(&resolved[last..]);
        out
    }

    fn use_qualified(&mut self, qualified: &str) -> String {
        let simple = qualified.rsplit('.').next().unwrap_or(qualified);
        let shadows_self = simple == self.class_name && qualified != self.qualified_name();
        let clashes = shadows_self
            || self.imports.iter().any(|existing| {
                existing != qualified && existing.rsplit('.').next() == Some(simple)
            });

        if clashes {
            return qualified.to_string();
        }
        self.import(qualified);
        simple.to_string()
    }

    pub fn annotate(&mut self, annotation: impl Into<String>) {
        self.annotations.push(annotation.into());
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::derive_layout;

    fn dto() -> ArtifactDescription {
        let layout = derive_layout("com.acme.shop", "Order");
        ArtifactDescription::class(layout.get(ArtifactKind::Dto))
    }

    #[test]
    fn test_use_type_imports_and_shortens() {
        let mut artifact = dto();
        let ty = artifact.use_type("java.util.Map<java.lang.String, java.util.List<com.acme.shop.domain.Tag>>");
        assert_eq!(ty, "Map<String, List<Tag>>");
        assert_eq!(
            artifact.imports.iter().cloned().collect::<Vec<_>>(),
            vec!["com.acme.shop.domain.Tag", "java.util.List", "java.util.Map"]
        );
    }

    #[test]
    fn test_use_type_keeps_unresolved_and_primitives() {
        let mut artifact = dto();
        assert_eq!(artifact.use_type("Widget"), "Widget");
        assert_eq!(artifact.use_type("byte[]"), "byte[]");
        assert!(artifact.imports.is_empty());
    }

    #[test]
    fn test_use_type_clash_stays_qualified() {
        let mut artifact = dto();
        assert_eq!(artifact.use_type("com.acme.a.Status"), "Status");
        assert_eq!(artifact.use_type("com.acme.b.Status"), "com.acme.b.Status");
        assert_eq!(artifact.imports.len(), 1);
    }

    #[test]
    fn test_import_skips_same_package() {
        let mut artifact = dto();
        artifact.import("com.acme.shop.model.dto.OtherDTO");
        artifact.import("java.lang.String");
        assert!(artifact.imports.is_empty());
    }
}
