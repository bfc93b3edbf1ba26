use super::Emitter;
use super::dto::model_class;
use crate::artifact::ArtifactDescription;
use crate::entity::EntityDescriptor;
use crate::layout::{ArtifactKind, LayoutConfig};

/// Server-managed properties a client never supplies: the key, the audit
/// timestamps and their legacy spellings.
pub const REQUEST_EXCLUDED_FIELDS: [&str; 7] = [
    "id",
    "createdAt",
    "updatedAt",
    "gmtCreate",
    "gmtModified",
    "createTime",
    "updateTime",
];

pub struct RequestEmitter;

impl Emitter for RequestEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Request
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        let fields = entity
            .fields
            .iter()
            .filter(|f| !REQUEST_EXCLUDED_FIELDS.contains(&f.name.as_str()));

        model_class(
            entity,
            layout,
            ArtifactKind::Request,
            "Create and update request",
            fields,
            true,
        )
    }
}
