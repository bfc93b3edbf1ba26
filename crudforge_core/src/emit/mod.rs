//! Emitters: one pure transformation per artifact kind.
//!
//! Every emitter maps an [`EntityDescriptor`] and its [`LayoutConfig`] to an
//! [`ArtifactDescription`] without touching the filesystem, so the same input
//! always yields the same artifact.

mod controller;
mod convertor;
mod dto;
pub mod predicate;
mod query;
mod repository;
mod request;
mod response;
mod service;
mod service_impl;

pub use controller::ControllerEmitter;
pub use convertor::ConvertorEmitter;
pub use dto::DtoEmitter;
pub use query::QueryEmitter;
pub use repository::RepositoryEmitter;
pub use request::{REQUEST_EXCLUDED_FIELDS, RequestEmitter};
pub use response::ResponseEmitter;
pub use service::ServiceEmitter;
pub use service_impl::ServiceImplEmitter;

use crate::artifact::{ArtifactDescription, FieldSpec};
use crate::entity::{EntityDescriptor, FieldDescriptor};
use crate::layout::{ArtifactKind, LayoutConfig};
use convert_case::{Case, Casing};

pub(crate) const LOMBOK_DATA: &str = "lombok.Data";
pub(crate) const JAVA_LIST: &str = "java.util.List";

/// Produces one artifact kind.
pub trait Emitter: Send + Sync {
    fn kind(&self) -> ArtifactKind;

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription;
}

/// All emitters, in layout table order.
pub fn emitters() -> Vec<Box<dyn Emitter>> {
    ArtifactKind::ALL.into_iter().map(emitter_for).collect()
}

pub fn emitter_for(kind: ArtifactKind) -> Box<dyn Emitter> {
    match kind {
        ArtifactKind::Dto => Box::new(DtoEmitter),
        ArtifactKind::Request => Box::new(RequestEmitter),
        ArtifactKind::Response => Box::new(ResponseEmitter),
        ArtifactKind::Query => Box::new(QueryEmitter),
        ArtifactKind::Repository => Box::new(RepositoryEmitter),
        ArtifactKind::Service => Box::new(ServiceEmitter),
        ArtifactKind::ServiceImpl => Box::new(ServiceImplEmitter),
        ArtifactKind::Convertor => Box::new(ConvertorEmitter),
        ArtifactKind::Controller => Box::new(ControllerEmitter),
    }
}

/// Runs the emitters for `kinds`, preserving the order given.
pub fn emit_kinds(
    entity: &EntityDescriptor,
    layout: &LayoutConfig,
    kinds: &[ArtifactKind],
) -> Vec<ArtifactDescription> {
    kinds
        .iter()
        .map(|kind| emitter_for(*kind).emit(entity, layout))
        .collect()
}

/// Imports another artifact of the same entity and returns its simple name.
pub(crate) fn artifact_type(
    artifact: &mut ArtifactDescription,
    layout: &LayoutConfig,
    kind: ArtifactKind,
) -> String {
    artifact.import(&layout.qualified(kind));
    layout.class_name(kind).to_string()
}

/// Imports the entity class itself.
pub(crate) fn entity_type(artifact: &mut ArtifactDescription, entity: &EntityDescriptor) -> String {
    artifact.import(&entity.qualified_name());
    entity.class_name.clone()
}

/// Imports a helper type from the support package.
pub(crate) fn support_type(
    artifact: &mut ArtifactDescription,
    layout: &LayoutConfig,
    simple_name: &str,
) -> String {
    artifact.import(&layout.support_type(simple_name));
    simple_name.to_string()
}

/// The entity's field as a private property with the same documentation.
pub(crate) fn mirror_field(artifact: &mut ArtifactDescription, field: &FieldDescriptor) -> FieldSpec {
    let ty = artifact.use_type(&field.resolved_type);
    FieldSpec::property(&field.name, ty).with_doc(&field.comment)
}

/// Class-level documentation: a fixed role line, then the entity's own comment.
pub(crate) fn describe(entity: &EntityDescriptor, role: &str) -> String {
    let mut doc = format!("{} for {{@link {}}}.", role, entity.qualified_name());
    if !entity.class_comment.is_empty() {
        doc.push_str("\n\n");
        doc.push_str(&entity.class_comment);
    }
    doc
}

/// `orderItem` for `OrderItem`, used for local variable and field names.
pub(crate) fn variable_name(class_name: &str) -> String {
    class_name.to_case(Case::Camel)
}

/// Upper-cases the first character, the JavaBeans property convention.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lombok getter: `isPaid` for primitive booleans, `getX` otherwise.
///
/// A primitive boolean already named like `isActive` keeps its name.
pub(crate) fn getter(field_name: &str, declared_type: &str) -> String {
    if declared_type != "boolean" {
        return format!("get{}", capitalize(field_name));
    }
    let has_is_prefix = field_name
        .strip_prefix("is")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase);
    if has_is_prefix {
        field_name.to_string()
    } else {
        format!("is{}", capitalize(field_name))
    }
}

pub(crate) fn setter(field_name: &str) -> String {
    format!("set{}", capitalize(field_name))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::render;
    use crate::entity::FieldDescriptor;
    use crate::layout::derive_layout;
    use proptest::prelude::*;

    #[test]
    fn test_emitters_cover_table_in_order() {
        let kinds: Vec<ArtifactKind> = emitters().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, ArtifactKind::ALL.to_vec());
    }

    #[test]
    fn test_names_come_from_layout() {
        let entity = fixtures::order();
        let layout = fixtures::order_layout();
        for emitter in emitters() {
            let artifact = emitter.emit(&entity, &layout);
            let name = layout.get(emitter.kind());
            assert_eq!(artifact.artifact, emitter.kind());
            assert_eq!(artifact.package, name.package);
            assert_eq!(artifact.class_name, name.class_name);
        }
    }

    #[test]
    fn test_naming_helpers() {
        assert_eq!(variable_name("OrderItem"), "orderItem");
        assert_eq!(capitalize("orderNo"), "OrderNo");
        assert_eq!(getter("paid", "boolean"), "isPaid");
        assert_eq!(getter("paid", "Boolean"), "getPaid");
        assert_eq!(getter("isActive", "boolean"), "isActive");
        assert_eq!(getter("isActive", "Boolean"), "getIsActive");
        assert_eq!(getter("island", "boolean"), "isIsland");
        assert_eq!(setter("id"), "setId");
    }

    const TYPES: &[(&str, &str)] = &[
        ("Long", "java.lang.Long"),
        ("String", "java.lang.String"),
        ("int", "int"),
        ("boolean", "boolean"),
        ("BigDecimal", "java.math.BigDecimal"),
        ("LocalDateTime", "java.time.LocalDateTime"),
        ("List<String>", "java.util.List<java.lang.String>"),
        ("Widget", "Widget"),
    ];

    fn arb_fields() -> impl Strategy<Value = Vec<FieldDescriptor>> {
        prop::collection::vec(
            ("[a-z][a-zA-Z0-9]{0,8}", 0..TYPES.len(), "[a-zA-Z ]{0,12}"),
            0..12,
        )
        .prop_map(|raw| {
            let mut seen = std::collections::HashSet::new();
            raw.into_iter()
                .filter(|(name, _, _)| seen.insert(name.clone()))
                .map(|(name, ty, comment)| {
                    let (declared, resolved) = TYPES[ty];
                    FieldDescriptor::new(name, declared, resolved, comment)
                })
                .collect()
        })
    }

    fn entity_with(fields: Vec<FieldDescriptor>) -> EntityDescriptor {
        EntityDescriptor {
            package_name: "com.acme.shop.domain".into(),
            class_name: "Order".into(),
            class_comment: String::new(),
            fields,
        }
    }

    proptest! {
        #[test]
        fn prop_emitters_are_deterministic(fields in arb_fields()) {
            let entity = entity_with(fields);
            let layout = derive_layout("com.acme.shop", "Order");
            for emitter in emitters() {
                let first = render(&emitter.emit(&entity, &layout));
                let second = render(&emitter.emit(&entity.clone(), &layout.clone()));
                prop_assert_eq!(first, second);
            }
        }

        #[test]
        fn prop_dto_and_response_mirror_fields(fields in arb_fields()) {
            let entity = entity_with(fields);
            let layout = derive_layout("com.acme.shop", "Order");
            let expected: Vec<&str> = entity.fields.iter().map(|f| f.name.as_str()).collect();

            let dto = DtoEmitter.emit(&entity, &layout);
            let response = ResponseEmitter.emit(&entity, &layout);
            prop_assert_eq!(dto.field_names(), expected.clone());
            prop_assert_eq!(response.field_names(), expected);
        }

        #[test]
        fn prop_request_never_carries_excluded_fields(fields in arb_fields()) {
            let mut fields = fields;
            fields.push(FieldDescriptor::simple("id", "Long"));
            fields.push(FieldDescriptor::simple("createdAt", "LocalDateTime"));
            let entity = entity_with(fields);
            let layout = derive_layout("com.acme.shop", "Order");

            let request = RequestEmitter.emit(&entity, &layout);
            for name in request.field_names() {
                prop_assert!(!REQUEST_EXCLUDED_FIELDS.contains(&name));
            }
        }
    }
}
