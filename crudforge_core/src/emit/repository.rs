use super::predicate::{build_query_plan, render_query_plan};
use super::{Emitter, JAVA_LIST, artifact_type, describe, entity_type};
use crate::artifact::{ArtifactDescription, MethodSpec, Param, Statement};
use crate::entity::EntityDescriptor;
use crate::layout::{ArtifactKind, LayoutConfig};

const BASE_MAPPER: &str = "com.baomidou.mybatisplus.core.mapper.BaseMapper";
const LAMBDA_QUERY_WRAPPER: &str =
    "com.baomidou.mybatisplus.core.conditions.query.LambdaQueryWrapper";
const PAGE: &str = "com.baomidou.mybatisplus.extension.plugins.pagination.Page";
const MAPPER: &str = "org.apache.ibatis.annotations.Mapper";

/// Name of the shared wrapper-building default method.
pub(crate) const BUILD_WRAPPER: &str = "buildQueryWrapper";

pub struct RepositoryEmitter;

impl Emitter for RepositoryEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Repository
    }

    fn emit(&self, entity: &EntityDescriptor, layout: &LayoutConfig) -> ArtifactDescription {
        let mut artifact = ArtifactDescription::interface(layout.get(ArtifactKind::Repository));
        artifact.documentation = describe(entity, "Data access");

        artifact.import(MAPPER);
        artifact.annotate("@Mapper");

        let entity_class = entity_type(&mut artifact, entity);
        let query = artifact_type(&mut artifact, layout, ArtifactKind::Query);
        artifact.import(BASE_MAPPER);
        artifact.import(LAMBDA_QUERY_WRAPPER);
        artifact.import(PAGE);
        artifact.import(JAVA_LIST);
        artifact.super_type = Some(format!("BaseMapper<{entity_class}>"));

        let query_param = || Param::new("query", query.clone());

        artifact.methods.push(
            MethodSpec::new("listByQuery", format!("List<{entity_class}>"))
                .with_doc("Records matching every populated filter of the query.")
                .with_modifiers(&["default"])
                .param(query_param())
                .with_body(vec![Statement::line(format!(
                    "return selectList({BUILD_WRAPPER}(query));"
                ))]),
        );

        artifact.methods.push(
            MethodSpec::new("page", format!("Page<{entity_class}>"))
                .with_doc("One page of the records matching the query.")
                .with_modifiers(&["default"])
                .param(query_param())
                .with_body(vec![
                    Statement::line(format!(
                        "Page<{entity_class}> page = new Page<>(query.getPageNo(), query.getPageSize());"
                    )),
                    Statement::line(format!("return selectPage(page, {BUILD_WRAPPER}(query));")),
                ]),
        );

        let plan = build_query_plan(entity);
        let mut body = vec![Statement::line(format!(
            "LambdaQueryWrapper<{entity_class}> wrapper = new LambdaQueryWrapper<>();"
        ))];
        body.extend(render_query_plan(&plan, &entity_class));
        body.push(Statement::line("return wrapper;"));

        artifact.methods.push(
            MethodSpec::new(BUILD_WRAPPER, format!("LambdaQueryWrapper<{entity_class}>"))
                .with_modifiers(&["default"])
                .param(query_param())
                .with_body(body),
        );

        artifact
    }
}
