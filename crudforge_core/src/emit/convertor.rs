use super::{Emitter, JAVA_LIST, artifact_type, describe, entity_type};
use crate::artifact::{ArtifactDescription, FieldSpec, MethodSpec, Param};
use crate::entity::EntityDescriptor;
use crate::layout::{ArtifactKind, LayoutConfig};

const MAPSTRUCT_MAPPER: &str = "org.mapstruct.Mapper";
const MAPPERS: &str = "org.mapstruct.factory.Mappers";

pub struct ConvertorEmitter;

impl Emitter for ConvertorEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Convertor
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        let mut artifact = ArtifactDescription::interface(layout.get(ArtifactKind::Convertor));
        artifact.documentation = describe(entity, "Object mapping");
        artifact.import(MAPSTRUCT_MAPPER);
        artifact.import(MAPPERS);
        artifact.import(JAVA_LIST);
        artifact.annotate("@Mapper");

        let entity_class = entity_type(&mut artifact, entity);
        let dto = artifact_type(&mut artifact, layout, ArtifactKind::Dto);
        let request = artifact_type(&mut artifact, layout, ArtifactKind::Request);
        let response = artifact_type(&mut artifact, layout, ArtifactKind::Response);
        let own = artifact.class_name.clone();

        // MapStruct singleton accessor
        artifact.fields.push(
            FieldSpec::property("INSTANCE", own.clone())
                .with_modifiers(&[])
                .with_initializer(format!("Mappers.getMapper({own}.class)")),
        );

        artifact.methods = vec![
            MethodSpec::new("toDTO", dto.clone()).param(Param::new("entity", entity_class.clone())),
            MethodSpec::new("toEntity", entity_class.clone()).param(Param::new("dto", dto.clone())),
            MethodSpec::new("fromRequest", entity_class.clone())
                .param(Param::new("request", request)),
            MethodSpec::new("toResponse", response.clone())
                .param(Param::new("entity", entity_class.clone())),
            MethodSpec::new("toDTOList", format!("List<{dto}>"))
                .param(Param::new("entities", format!("List<{entity_class}>"))),
            MethodSpec::new("toResponseList", format!("List<{response}>"))
                .param(Param::new("entities", format!("List<{entity_class}>"))),
        ];

        artifact
    }
}
