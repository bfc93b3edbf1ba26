use super::predicate::RANGE_FIELDS;
use super::{Emitter, LOMBOK_DATA, describe, support_type};
use crate::artifact::{ArtifactDescription, FieldSpec};
use crate::entity::EntityDescriptor;
use crate::layout::{ArtifactKind, DEFAULT_ORDER_FIELD, LayoutConfig, PAGE_QUERY};

const DEFAULT_RANGE_TYPE: &str = "java.time.LocalDateTime";

pub struct QueryEmitter;

impl Emitter for QueryEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Query
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        let mut artifact = ArtifactDescription::class(layout.get(ArtifactKind::Query));
        artifact.documentation = describe(entity, "Paged filter");
        artifact.import(LOMBOK_DATA);
        artifact.import("lombok.EqualsAndHashCode");
        artifact.annotate("@Data");
        artifact.annotate("@EqualsAndHashCode(callSuper = true)");

        let page_query = support_type(&mut artifact, layout, PAGE_QUERY);
        let order_field = support_type(&mut artifact, layout, DEFAULT_ORDER_FIELD);
        artifact.super_type = Some(format!("{page_query}<{order_field}>"));

        for field in &entity.fields {
            // every filter is optional, so primitives are boxed
            let ty = artifact.use_type(boxed(&field.resolved_type));
            artifact
                .fields
                .push(FieldSpec::property(&field.name, ty).with_doc(&field.comment));
        }

        for (name, column, _) in RANGE_FIELDS {
            let resolved = entity
                .field(column)
                .map(|f| boxed(&f.resolved_type))
                .unwrap_or(DEFAULT_RANGE_TYPE);
            let ty = artifact.use_type(resolved);
            let bound = if name.starts_with("min") { "Lower" } else { "Upper" };
            artifact.fields.push(
                FieldSpec::property(name, ty)
                    .with_doc(format!("{bound} bound (inclusive) of {column}")),
            );
        }

        artifact
    }
}

fn boxed(ty: &str) -> &str {
    match ty {
        "boolean" => "java.lang.Boolean",
        "byte" => "java.lang.Byte",
        "char" => "java.lang.Character",
        "short" => "java.lang.Short",
        "int" => "java.lang.Integer",
        "long" => "java.lang.Long",
        "float" => "java.lang.Float",
        "double" => "java.lang.Double",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::render;
    use crate::emit::fixtures;
    use crate::entity::FieldDescriptor;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_appends_range_fields() {
        let query = QueryEmitter.emit(&fixtures::order(), &fixtures::order_layout());
        assert_eq!(
            query.field_names(),
            vec![
                "id",
                "customerId",
                "orderNo",
                "amount",
                "status",
                "tags",
                "paid",
                "createdAt",
                "updatedAt",
                "minCreatedAt",
                "maxCreatedAt",
                "minUpdatedAt",
                "maxUpdatedAt",
            ]
        );
    }

    #[test]
    fn test_query_extends_page_query() {
        let query = QueryEmitter.emit(&fixtures::order(), &fixtures::order_layout());
        assert_eq!(query.super_type.as_deref(), Some("PageQuery<DefaultOrderField>"));
        assert!(query.imports.contains("com.acme.shop.common.PageQuery"));
        assert!(query.imports.contains("com.acme.shop.common.DefaultOrderField"));

        let source = render(&query);
        assert!(source.contains("public class OrderQuery extends PageQuery<DefaultOrderField> {"));
        assert!(source.contains("    private Boolean paid;\n"));
    }

    #[test]
    fn test_range_types_follow_entity() {
        let mut entity = fixtures::keyless();
        entity.fields.push(FieldDescriptor::new("createdAt", "Date", "java.util.Date", ""));
        let query = QueryEmitter.emit(&entity, &crate::layout::derive_layout("x.y", "AuditEntry"));

        let types: Vec<&str> = query.fields[3..].iter().map(|f| f.ty.as_str()).collect();
        assert_eq!(types, vec!["Date", "Date", "LocalDateTime", "LocalDateTime"]);
        assert!(query.imports.contains("java.util.Date"));
        assert!(query.imports.contains("java.time.LocalDateTime"));
    }
}
