use super::{Emitter, JAVA_LIST, artifact_type, describe, support_type};
use crate::artifact::{ArtifactDescription, MethodSpec, Param};
use crate::entity::EntityDescriptor;
use crate::layout::{ArtifactKind, LayoutConfig, PAGE_RESULT};

/// The six service operations as abstract declarations.
pub(crate) fn operations(dto: &str, query: &str, id_type: &str, page_result: &str) -> Vec<MethodSpec> {
    vec![
        MethodSpec::new("create", dto).param(Param::new("dto", dto)),
        MethodSpec::new("getById", dto).param(Param::new("id", id_type)),
        MethodSpec::new("list", format!("List<{dto}>")).param(Param::new("query", query)),
        MethodSpec::new("page", format!("{page_result}<{dto}>")).param(Param::new("query", query)),
        MethodSpec::new("update", dto)
            .param(Param::new("id", id_type))
            .param(Param::new("dto", dto)),
        MethodSpec::new("delete", "boolean").param(Param::new("id", id_type)),
    ]
}

pub struct ServiceEmitter;

impl Emitter for ServiceEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Service
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        let mut artifact = ArtifactDescription::interface(layout.get(ArtifactKind::Service));
        artifact.documentation = describe(entity, "Business operations");

        let dto = artifact_type(&mut artifact, layout, ArtifactKind::Dto);
        let query = artifact_type(&mut artifact, layout, ArtifactKind::Query);
        let page_result = support_type(&mut artifact, layout, PAGE_RESULT);
        let id_type = artifact.use_type(entity.id_type());
        artifact.import(JAVA_LIST);

        let docs = [
            "Creates a record and returns it as stored.",
            "Loads one record, or null when absent.",
            "All records matching the query.",
            "One page of records matching the query.",
            "Replaces the record with the given id; null when absent.",
            "Deletes the record; true when a row was removed.",
        ];
        artifact.methods = operations(&dto, &query, &id_type, &page_result)
            .into_iter()
            .zip(docs)
            .map(|(method, doc)| method.with_doc(doc))
            .collect();

        artifact
    }
}
