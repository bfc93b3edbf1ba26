use super::{Emitter, LOMBOK_DATA, describe, mirror_field};
use crate::artifact::ArtifactDescription;
use crate::entity::{EntityDescriptor, FieldDescriptor};
use crate::layout::{ArtifactKind, LayoutConfig};

const JSON_SERIALIZE: &str = "com.fasterxml.jackson.databind.annotation.JsonSerialize";
const TO_STRING_SERIALIZER: &str = "com.fasterxml.jackson.databind.ser.std.ToStringSerializer";

/// Serializes key values as strings so large identifiers survive JavaScript
/// clients.
pub(crate) const KEY_ANNOTATION: &str = "@JsonSerialize(using = ToStringSerializer.class)";

pub struct DtoEmitter;

impl Emitter for DtoEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Dto
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        model_class(
            entity,
            layout,
            ArtifactKind::Dto,
            "Data transfer object",
            entity.fields.iter(),
            true,
        )
    }
}

/// A Lombok `@Data` class holding `fields` as private properties.
pub(super) fn model_class<'a>(
    entity: &EntityDescriptor,
    layout: &LayoutConfig,
    kind: ArtifactKind,
    role: &str,
    fields: impl Iterator<Item = &'a FieldDescriptor>,
    annotate_keys: bool,
) -> ArtifactDescription {
    let mut artifact = ArtifactDescription::class(layout.get(kind));
    artifact.documentation = describe(entity, role);
    artifact.import(LOMBOK_DATA);
    artifact.annotate("@Data");

    for field in fields {
        let mut spec = mirror_field(&mut artifact, field);
        if annotate_keys && field.is_primary_key {
            artifact.import(JSON_SERIALIZE);
            artifact.import(TO_STRING_SERIALIZER);
            spec = spec.with_annotation(KEY_ANNOTATION);
        }
        artifact.fields.push(spec);
    }

    artifact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::render;
    use crate::emit::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dto_mirrors_entity() {
        let entity = fixtures::order();
        let dto = DtoEmitter.emit(&entity, &fixtures::order_layout());

        assert_eq!(
            dto.field_names(),
            vec!["id", "customerId", "orderNo", "amount", "status", "tags", "paid", "createdAt", "updatedAt"]
        );
        assert_eq!(dto.fields[0].documentation, "Primary key");
        assert_eq!(dto.fields[3].ty, "BigDecimal");
        assert_eq!(dto.fields[5].ty, "List<String>");
    }

    #[test]
    fn test_dto_key_fields_are_annotated() {
        let dto = DtoEmitter.emit(&fixtures::order(), &fixtures::order_layout());
        let annotated: Vec<&str> = dto
            .fields
            .iter()
            .filter(|f| f.annotations.iter().any(|a| a == KEY_ANNOTATION))
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(annotated, vec!["id", "customerId"]);
        assert!(dto.imports.contains(TO_STRING_SERIALIZER));
    }

    #[test]
    fn test_dto_source() {
        let dto = DtoEmitter.emit(&fixtures::order(), &fixtures::order_layout());
        let source = render(&dto);

        assert!(source.starts_with("package com.acme.shop.model.dto;\n"));
        assert!(source.contains("import com.acme.shop.domain.OrderStatus;\n"));
        assert!(source.contains("import java.math.BigDecimal;\n"));
        assert!(source.contains("@Data\npublic class OrderDTO {\n"));
        assert!(source.contains(
            "    @JsonSerialize(using = ToStringSerializer.class)\n    private Long id;\n"
        ));
        assert!(source.contains("    private boolean paid;\n"));
    }
}
