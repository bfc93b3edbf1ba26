//! Java source rendering for artifact descriptions.

use super::{ArtifactDescription, FieldSpec, MethodSpec, Statement, TypeKind};

/// One indentation level.
pub const INDENT: &str = "    ";

/// Renders an artifact as a complete Java compilation unit: LF line endings,
/// four-space indentation and a single trailing newline.
pub fn render(artifact: &ArtifactDescription) -> String {
    let mut out = Writer::default();

    out.line(0, &format!("package {};", artifact.package));
    out.blank();

    if !artifact.imports.is_empty() {
        for import in &artifact.imports {
            out.line(0, &format!("import {import};"));
        }
        out.blank();
    }

    out.doc(0, &artifact.documentation);
    for annotation in &artifact.annotations {
        out.line(0, annotation);
    }
    out.line(0, &type_header(artifact));

    for field in &artifact.fields {
        out.blank();
        render_field(&mut out, field);
    }
    for method in &artifact.methods {
        out.blank();
        render_method(&mut out, method);
    }
    if !artifact.fields.is_empty() || !artifact.methods.is_empty() {
        out.blank();
    }

    out.line(0, "}");
    out.finish()
}

fn type_header(artifact: &ArtifactDescription) -> String {
    let keyword = match artifact.kind {
        TypeKind::Class => "class",
        TypeKind::Interface => "interface",
    };
    let mut header = format!("public {} {}", keyword, artifact.class_name);

    if let Some(super_type) = &artifact.super_type {
        header.push_str(" extends ");
        header.push_str(super_type);
    }
    if !artifact.interfaces.is_empty() {
        let clause = match artifact.kind {
            TypeKind::Class => " implements ",
            TypeKind::Interface if artifact.super_type.is_some() => ", ",
            TypeKind::Interface => " extends ",
        };
        header.push_str(clause);
        header.push_str(&artifact.interfaces.join(", "));
    }

    header.push_str(" {");
    header
}

fn render_field(out: &mut Writer, field: &FieldSpec) {
    out.doc(1, &field.documentation);
    for annotation in &field.annotations {
        out.line(1, annotation);
    }

    let mut decl = modifiers_prefix(&field.modifiers);
    decl.push_str(&field.ty);
    decl.push(' ');
    decl.push_str(&field.name);
    if let Some(init) = &field.initializer {
        decl.push_str(" = ");
        decl.push_str(init);
    }
    decl.push(';');
    out.line(1, &decl);
}

fn render_method(out: &mut Writer, method: &MethodSpec) {
    out.doc(1, &method.documentation);
    for annotation in &method.annotations {
        out.line(1, annotation);
    }

    let params: Vec<String> = method
        .params
        .iter()
        .map(|p| {
            let mut text = String::new();
            for annotation in &p.annotations {
                text.push_str(annotation);
                text.push(' ');
            }
            format!("{}{} {}", text, p.ty, p.name)
        })
        .collect();

    let mut signature = modifiers_prefix(&method.modifiers);
    if let Some(return_type) = &method.return_type {
        signature.push_str(return_type);
        signature.push(' ');
    }
    signature.push_str(&method.name);
    signature.push('(');
    signature.push_str(&params.join(", "));
    signature.push(')');

    match &method.body {
        None => {
            signature.push(';');
            out.line(1, &signature);
        }
        Some(body) => {
            signature.push_str(" {");
            out.line(1, &signature);
            render_statements(out, body, 2);
            out.line(1, "}");
        }
    }
}

fn render_statements(out: &mut Writer, statements: &[Statement], depth: usize) {
    for statement in statements {
        match statement {
            Statement::Line(text) => out.line(depth, text),
            Statement::Blank => out.blank(),
            Statement::Block { header, body } => {
                out.line(depth, &format!("{header} {{"));
                render_statements(out, body, depth + 1);
                out.line(depth, "}");
            }
            Statement::IfElse {
                condition,
                then,
                otherwise,
            } => {
                out.line(depth, &format!("if ({condition}) {{"));
                render_statements(out, then, depth + 1);
                if otherwise.is_empty() {
                    out.line(depth, "}");
                } else {
                    out.line(depth, "} else {");
                    render_statements(out, otherwise, depth + 1);
                    out.line(depth, "}");
                }
            }
        }
    }
}

fn modifiers_prefix(modifiers: &[String]) -> String {
    let mut prefix = String::new();
    for modifier in modifiers {
        prefix.push_str(modifier);
        prefix.push(' ');
    }
    prefix
}

#[derive(Default)]
struct Writer {
    buf: String,
}

impl Writer {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    fn doc(&mut self, depth: usize, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.line(depth, "/**");
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line(depth, " *");
            } else {
                self.line(depth, &format!(" * {line}"));
            }
        }
        self.line(depth, " */");
    }

    fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{Param, Statement};
    use crate::layout::{ArtifactKind, derive_layout};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_class_with_field_and_method() {
        let layout = derive_layout("com.acme.shop", "Order");
        let mut artifact = ArtifactDescription::class(layout.get(ArtifactKind::Dto));
        artifact.documentation = "Customer order.".to_string();
        artifact.annotate("@Data");
        artifact.import("lombok.Data");
        artifact.fields.push(FieldSpec::property("id", "Long").with_doc("Primary key"));
        artifact.methods.push(
            MethodSpec::new("isNew", "boolean")
                .with_modifiers(&["public"])
                .with_body(vec![Statement::IfElse {
                    condition: "id == null".to_string(),
                    then: vec![Statement::line("return true;")],
                    otherwise: vec![Statement::line("return false;")],
                }]),
        );

        let expected = "\
package com.acme.shop.model.dto;

import lombok.Data;

/**
 * Customer order.
 */
@Data
public class OrderDTO {

    /**
     * Primary key
     */
    private Long id;

    public boolean isNew() {
        if (id == null) {
            return true;
        } else {
            return false;
        }
    }

}
";
        assert_eq!(render(&artifact), expected);
    }

    #[test]
    fn test_render_interface_declarations() {
        let layout = derive_layout("x.y", "Order");
        let mut artifact = ArtifactDescription::interface(layout.get(ArtifactKind::Service));
        artifact.interfaces.push("Marker".to_string());
        artifact.methods.push(
            MethodSpec::new("getById", "OrderDTO").param(Param::new("id", "Long")),
        );

        let expected = "\
package x.y.service;

public interface OrderService extends Marker {

    OrderDTO getById(Long id);

}
";
        assert_eq!(render(&artifact), expected);
    }

    #[test]
    fn test_render_empty_class() {
        let layout = derive_layout("x.y", "Order");
        let artifact = ArtifactDescription::class(layout.get(ArtifactKind::Response));
        assert_eq!(
            render(&artifact),
            "package x.y.model.response;\n\npublic class OrderResponse {\n}\n"
        );
    }
}
