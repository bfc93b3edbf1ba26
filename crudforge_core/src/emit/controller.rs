use super::{
    Emitter, JAVA_LIST, artifact_type, describe, getter, support_type, variable_name,
};
use crate::artifact::{ArtifactDescription, FieldSpec, MethodSpec, Param, Statement};
use crate::entity::EntityDescriptor;
use crate::layout::{ArtifactKind, LayoutConfig, PAGE_RESULT, RESULT};
use convert_case::{Case, Casing};

const WEB: &str = "org.springframework.web.bind.annotation";

pub struct ControllerEmitter;

impl Emitter for ControllerEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Controller
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        let mut artifact = ArtifactDescription::class(layout.get(ArtifactKind::Controller));
        artifact.documentation = describe(entity, "HTTP endpoints");

        for annotation in [
            "RestController",
            "RequestMapping",
            "PostMapping",
            "GetMapping",
            "PutMapping",
            "DeleteMapping",
            "PathVariable",
            "RequestBody",
        ] {
            artifact.import(&format!("{WEB}.{annotation}"));
        }
        artifact.annotate("@RestController");
        artifact.annotate(format!("@RequestMapping(\"{}\")", resource_path(&entity.class_name)));

        let service = artifact_type(&mut artifact, layout, ArtifactKind::Service);
        let dto = artifact_type(&mut artifact, layout, ArtifactKind::Dto);
        let query = artifact_type(&mut artifact, layout, ArtifactKind::Query);
        let result = support_type(&mut artifact, layout, RESULT);
        let page_result = support_type(&mut artifact, layout, PAGE_RESULT);
        let id = artifact.use_type(entity.id_type());
        artifact.import(JAVA_LIST);

        let svc = variable_name(&service);
        artifact.fields.push(
            FieldSpec::property(&svc, service.clone()).with_modifiers(&["private", "final"]),
        );
        artifact.methods.push(
            MethodSpec::constructor(&artifact.class_name)
                .param(Param::new(&svc, service.clone()))
                .with_body(vec![Statement::line(format!("this.{svc} = {svc};"))]),
        );

        let id_param = || Param::new("id", id.clone()).annotated("@PathVariable(\"id\")");
        let body_param = |name: &str, ty: &str| Param::new(name, ty).annotated("@RequestBody");
        let wrap = |call: String| vec![Statement::line(format!("return {result}.success({svc}.{call});"))];

        artifact.methods.push(
            endpoint("create", &format!("{result}<{dto}>"), "@PostMapping")
                .param(body_param("dto", &dto))
                .with_body(wrap("create(dto)".into())),
        );
        artifact.methods.push(
            endpoint("getById", &format!("{result}<{dto}>"), "@GetMapping(\"/{id}\")")
                .param(id_param())
                .with_body(wrap("getById(id)".into())),
        );
        artifact.methods.push(
            endpoint("list", &format!("{result}<List<{dto}>>"), "@PostMapping(\"/query\")")
                .param(body_param("query", &query))
                .with_body(wrap("list(query)".into())),
        );
        artifact.methods.push(
            endpoint(
                "page",
                &format!("{result}<{page_result}<{dto}>>"),
                "@PostMapping(\"/page\")",
            )
            .param(body_param("query", &query))
            .with_body(wrap("page(query)".into())),
        );

        // the body carries its own key; keyless entities take it as a request parameter
        let update = endpoint("update", &format!("{result}<{dto}>"), "@PutMapping");
        let update = match key_getter(entity) {
            Some(key) => update
                .param(body_param("dto", &dto))
                .with_body(wrap(format!("update(dto.{key}(), dto)"))),
            None => {
                artifact.import(&format!("{WEB}.RequestParam"));
                update
                    .param(Param::new("id", id.clone()).annotated("@RequestParam(\"id\")"))
                    .param(body_param("dto", &dto))
                    .with_body(wrap("update(id, dto)".into()))
            }
        };
        artifact.methods.push(update);

        artifact.methods.push(
            endpoint("delete", &format!("{result}<Boolean>"), "@DeleteMapping(\"/{id}\")")
                .param(id_param())
                .with_body(wrap("delete(id)".into())),
        );

        artifact
    }
}

fn endpoint(name: &str, return_type: &str, mapping: &str) -> MethodSpec {
    MethodSpec::new(name, return_type)
        .with_annotation(mapping)
        .with_modifiers(&["public"])
}

/// `/order-item` for `OrderItem`.
pub fn resource_path(entity_name: &str) -> String {
    format!("/{}", entity_name.to_case(Case::Kebab))
}

/// Getter for the key property on the DTO.
fn key_getter(entity: &EntityDescriptor) -> Option<String> {
    entity
        .primary_key()
        .map(|pk| getter(&pk.name, &pk.declared_type))
}
