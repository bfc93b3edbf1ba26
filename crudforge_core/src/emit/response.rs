use super::Emitter;
use super::dto::model_class;
use crate::artifact::ArtifactDescription;
use crate::entity::EntityDescriptor;
use crate::layout::{ArtifactKind, LayoutConfig};

pub struct ResponseEmitter;

impl Emitter for ResponseEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Response
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        model_class(
            entity,
            layout,
            ArtifactKind::Response,
            "Response view",
            entity.fields.iter(),
            false,
        )
    }
}
