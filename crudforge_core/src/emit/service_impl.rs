use super::service::operations;
use super::{
    Emitter, JAVA_LIST, artifact_type, describe, entity_type, setter, support_type, variable_name,
};
use crate::artifact::{ArtifactDescription, FieldSpec, MethodSpec, Param, Statement};
use crate::entity::EntityDescriptor;
use crate::layout::{ArtifactKind, LayoutConfig, PAGE_RESULT};

const SERVICE: &str = "org.springframework.stereotype.Service";
const PAGE: &str = "com.baomidou.mybatisplus.extension.plugins.pagination.Page";

pub struct ServiceImplEmitter;

impl Emitter for ServiceImplEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ServiceImpl
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        let mut artifact = ArtifactDescription::class(layout.get(ArtifactKind::ServiceImpl));
        artifact.documentation = describe(entity, "Default business operations");
        artifact.import(SERVICE);
        artifact.annotate("@Service");

        let entity_class = entity_type(&mut artifact, entity);
        let service = artifact_type(&mut artifact, layout, ArtifactKind::Service);
        let dto = artifact_type(&mut artifact, layout, ArtifactKind::Dto);
        let query = artifact_type(&mut artifact, layout, ArtifactKind::Query);
        let repository = artifact_type(&mut artifact, layout, ArtifactKind::Repository);
        let convertor = artifact_type(&mut artifact, layout, ArtifactKind::Convertor);
        let page_result = support_type(&mut artifact, layout, PAGE_RESULT);
        let id = artifact.use_type(entity.id_type());
        artifact.import(PAGE);
        artifact.import(JAVA_LIST);
        artifact.interfaces.push(service);

        let repo = variable_name(&repository);
        let conv = variable_name(&convertor);

        artifact.fields.push(
            FieldSpec::property(&repo, repository.clone()).with_modifiers(&["private", "final"]),
        );
        artifact.fields.push(
            FieldSpec::property(&conv, convertor.clone())
                .with_modifiers(&["private", "final"])
                .with_initializer(format!("{convertor}.INSTANCE")),
        );

        artifact.methods.push(
            MethodSpec::constructor(&artifact.class_name)
                .param(Param::new(&repo, repository.clone()))
                .with_body(vec![Statement::line(format!("this.{repo} = {repo};"))]),
        );

        // forces the path id onto the converted entity, when there is a key
        let assign_key = entity
            .primary_key()
            .map(|pk| Statement::line(format!("entity.{}(id);", setter(&pk.name))));

        let bodies: Vec<Vec<Statement>> = vec![
            // create
            vec![
                Statement::line(format!("{entity_class} entity = {conv}.toEntity(dto);")),
                Statement::line(format!("{repo}.insert(entity);")),
                Statement::line(format!("return {conv}.toDTO(entity);")),
            ],
            // getById
            vec![Statement::line(format!(
                "return {conv}.toDTO({repo}.selectById(id));"
            ))],
            // list
            vec![Statement::line(format!(
                "return {conv}.toDTOList({repo}.listByQuery(query));"
            ))],
            // page
            vec![
                Statement::line(format!("Page<{entity_class}> page = {repo}.page(query);")),
                Statement::line(format!(
                    "return {page_result}.of(page.getCurrent(), page.getSize(), page.getTotal(), {conv}.toDTOList(page.getRecords()));"
                )),
            ],
            // update
            {
                let mut body = vec![
                    Statement::line(format!("{entity_class} existing = {repo}.selectById(id);")),
                    Statement::IfElse {
                        condition: "existing == null".to_string(),
                        then: vec![Statement::line("return null;")],
                        otherwise: Vec::new(),
                    },
                    Statement::line(format!("{entity_class} entity = {conv}.toEntity(dto);")),
                ];
                body.extend(assign_key);
                body.push(Statement::line(format!("{repo}.updateById(entity);")));
                body.push(Statement::line(format!("return {conv}.toDTO(entity);")));
                body
            },
            // delete
            vec![Statement::line(format!("return {repo}.deleteById(id) > 0;"))],
        ];

        let methods = operations(&dto, &query, &id, &page_result)
            .into_iter()
            .zip(bodies)
            .map(|(method, body)| {
                method
                    .with_annotation("@Override")
                    .with_modifiers(&["public"])
                    .with_body(body)
            });
        artifact.methods.extend(methods);

        artifact
    }
}
