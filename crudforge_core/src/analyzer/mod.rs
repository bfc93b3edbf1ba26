//! Java entity analyzer.
//!
//! Parses the entity's source file and extracts an [`EntityDescriptor`]:
//! package, class documentation and the non-static fields declared directly
//! on the class, in declaration order.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use crudforge_core::analyzer::analyze;
//! use crudforge_core::entity::EntityId;
//!
//! let id = EntityId::parse("com.acme.shop.domain.Order").unwrap();
//! let entity = analyze(&id, Path::new("shop-service/src/main/java")).unwrap();
//! println!("{} has {} fields", entity.class_name, entity.fields.len());
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod resolver;

pub use ast::{CompilationUnit, TypeDeclKind};
pub use lexer::LexError;
pub use parser::ParseError;
pub use resolver::{ChainResolver, ResolutionContext, TypeResolver, Unresolved};

use crate::entity::{EntityDescriptor, EntityId, FieldDescriptor};
use crate::error::{CrudforgeError, Result};
use ast::{Annotation, FieldDecl};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Analyze an entity with the default resolver chain.
pub fn analyze(entity_id: &EntityId, source_root: &Path) -> Result<EntityDescriptor> {
    analyze_with_resolver(entity_id, source_root, &ChainResolver::default())
}

/// Analyze an entity, qualifying field types with `resolver`.
pub fn analyze_with_resolver(
    entity_id: &EntityId,
    source_root: &Path,
    resolver: &dyn TypeResolver,
) -> Result<EntityDescriptor> {
    let path = source_root.join(entity_id.relative_source_path());
    if !path.is_file() {
        return Err(CrudforgeError::source_not_found(path));
    }

    debug!(entity = %entity_id, path = %path.display(), "Analyzing entity source");
    let bytes = fs::read(&path)?;
    // GBK and similar encodings normally only show up in Javadoc text
    let source = String::from_utf8_lossy(&bytes);
    if matches!(source, Cow::Owned(_)) {
        warn!(path = %path.display(), "Source is not valid UTF-8, decoding lossily");
    }
    analyze_source(&source, &path, entity_id, source_root, resolver)
}

/// Analyze in-memory source text. `path` is only used for error reporting.
pub fn analyze_source(
    source: &str,
    path: &Path,
    entity_id: &EntityId,
    source_root: &Path,
    resolver: &dyn TypeResolver,
) -> Result<EntityDescriptor> {
    let source = source.trim_start_matches('\u{feff}');
    let unit =
        parser::parse(source).map_err(|e| CrudforgeError::malformed_source(path, e.to_string()))?;
    trace!(types = unit.types.len(), imports = unit.imports.len(), "Parsed compilation unit");

    let package_name = unit.package.clone().unwrap_or_default();
    if package_name != entity_id.package() {
        return Err(CrudforgeError::malformed_source(
            path,
            format!(
                "declared package '{}' does not match '{}'",
                package_name,
                entity_id.package()
            ),
        ));
    }

    let decl = unit.find_type(entity_id.class_name()).ok_or_else(|| {
        CrudforgeError::malformed_source(
            path,
            format!("no top-level type named '{}'", entity_id.class_name()),
        )
    })?;

    if !matches!(decl.kind, TypeDeclKind::Class | TypeDeclKind::Record) {
        return Err(CrudforgeError::malformed_source(
            path,
            format!("'{}' is a {:?}, not a class", decl.name, decl.kind),
        ));
    }

    let ctx = ResolutionContext {
        package: &package_name,
        imports: &unit.imports,
        source_root,
    };

    let fields: Vec<FieldDescriptor> = decl
        .fields
        .iter()
        .filter(|f| !f.is_static)
        .map(|f| convert_field(f, resolver, &ctx))
        .collect();

    debug!(
        entity = %entity_id,
        fields = fields.len(),
        "Extracted entity description"
    );

    Ok(EntityDescriptor {
        package_name,
        class_name: decl.name.clone(),
        class_comment: decl
            .doc_comment
            .as_deref()
            .map(lexer::clean_doc_comment)
            .unwrap_or_default(),
        fields,
    })
}

fn convert_field(
    field: &FieldDecl,
    resolver: &dyn TypeResolver,
    ctx: &ResolutionContext<'_>,
) -> FieldDescriptor {
    let declared_type = field.type_ref.to_string();
    let resolved_type = resolver.resolve_type_ref(&field.type_ref, ctx);

    let comment = field
        .doc_comment
        .as_deref()
        .map(lexer::clean_doc_comment)
        .filter(|c| !c.is_empty())
        .or_else(|| annotation_description(&field.annotations))
        .unwrap_or_default();

    FieldDescriptor::new(&field.name, declared_type, resolved_type, comment)
}

/// Description from `@Schema(description = ..)` or `@ApiModelProperty(..)`.
fn annotation_description(annotations: &[Annotation]) -> Option<String> {
    annotations.iter().find_map(|a| {
        let text = match a.simple_name() {
            "Schema" => a.argument("description").or_else(|| a.argument("title")),
            "ApiModelProperty" => a.argument("value").or_else(|| a.argument("notes")),
            _ => None,
        }?;
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}
