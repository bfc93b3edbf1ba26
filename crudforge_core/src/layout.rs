//! Package and class-name layout for an entity's artifact set.
//!
//! Every artifact name comes from [`derive_layout`]; emitters never build
//! names on their own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple names of the hand-written helper types in the support package.
pub const PAGE_QUERY: &str = "PageQuery";
pub const DEFAULT_ORDER_FIELD: &str = "DefaultOrderField";
pub const PAGE_RESULT: &str = "PageResult";
pub const RESULT: &str = "Result";

/// The nine generated artifact kinds, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Dto,
    Request,
    Response,
    Query,
    Repository,
    Service,
    ServiceImpl,
    Convertor,
    Controller,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 9] = [
        ArtifactKind::Dto,
        ArtifactKind::Request,
        ArtifactKind::Response,
        ArtifactKind::Query,
        ArtifactKind::Repository,
        ArtifactKind::Service,
        ArtifactKind::ServiceImpl,
        ArtifactKind::Convertor,
        ArtifactKind::Controller,
    ];

    /// Appended to the base package.
    pub fn package_suffix(self) -> &'static str {
        match self {
            ArtifactKind::Dto => ".model.dto",
            ArtifactKind::Request => ".model.request",
            ArtifactKind::Response => ".model.response",
            ArtifactKind::Query => ".model.request",
            ArtifactKind::Repository => ".dal.repository",
            ArtifactKind::Service => ".service",
            ArtifactKind::ServiceImpl => ".service.impl",
            ArtifactKind::Convertor => ".convertor",
            ArtifactKind::Controller => ".controller",
        }
    }

    /// Appended to the entity name.
    pub fn name_suffix(self) -> &'static str {
        match self {
            ArtifactKind::Dto => "DTO",
            ArtifactKind::Request => "Request",
            ArtifactKind::Response => "Response",
            ArtifactKind::Query => "Query",
            ArtifactKind::Repository => "Repository",
            ArtifactKind::Service => "Service",
            ArtifactKind::ServiceImpl => "ServiceImpl",
            ArtifactKind::Convertor => "Convertor",
            ArtifactKind::Controller => "Controller",
        }
    }

    /// Configuration key, e.g. `service_impl`.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Dto => "dto",
            ArtifactKind::Request => "request",
            ArtifactKind::Response => "response",
            ArtifactKind::Query => "query",
            ArtifactKind::Repository => "repository",
            ArtifactKind::Service => "service",
            ArtifactKind::ServiceImpl => "service_impl",
            ArtifactKind::Convertor => "convertor",
            ArtifactKind::Controller => "controller",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package and simple class name of one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactName {
    pub kind: ArtifactKind,
    pub package: String,
    pub class_name: String,
}

impl ArtifactName {
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.package, self.class_name)
    }
}

/// Naming table for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub base_package: String,
    pub entity_name: String,
    pub support_package: String,
    artifacts: [ArtifactName; 9],
}

impl LayoutConfig {
    pub fn get(&self, kind: ArtifactKind) -> &ArtifactName {
        &self.artifacts[kind.index()]
    }

    pub fn class_name(&self, kind: ArtifactKind) -> &str {
        &self.get(kind).class_name
    }

    pub fn package(&self, kind: ArtifactKind) -> &str {
        &self.get(kind).package
    }

    pub fn qualified(&self, kind: ArtifactKind) -> String {
        self.get(kind).qualified()
    }

    /// Qualified name of a helper type, e.g. `support_type(PAGE_RESULT)`.
    pub fn support_type(&self, simple_name: &str) -> String {
        format!("{}.{}", self.support_package, simple_name)
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactName> {
        self.artifacts.iter()
    }

    /// Replaces the default `<base>.common` support package.
    pub fn with_support_package(mut self, support_package: impl Into<String>) -> Self {
        self.support_package = support_package.into();
        self
    }
}

/// Derives the naming table from the parent of the entity's package.
///
/// `base_package` must be non-empty; entity identifiers are validated before
/// reaching this point.
pub fn derive_layout(base_package: &str, entity_name: &str) -> LayoutConfig {
    debug_assert!(!base_package.is_empty(), "base package must not be empty");
    debug_assert!(!entity_name.is_empty(), "entity name must not be empty");

    let artifacts = ArtifactKind::ALL.map(|kind| ArtifactName {
        kind,
        package: format!("{}{}", base_package, kind.package_suffix()),
        class_name: format!("{}{}", entity_name, kind.name_suffix()),
    });

    LayoutConfig {
        base_package: base_package.to_string(),
        entity_name: entity_name.to_string(),
        support_package: format!("{base_package}.common"),
        artifacts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_naming_table_for_order() {
        let layout = derive_layout("x.y", "Order");

        let table: Vec<(String, String)> = layout
            .artifacts()
            .map(|a| (a.package.clone(), a.class_name.clone()))
            .collect();
        let expected = [
            ("x.y.model.dto", "OrderDTO"),
            ("x.y.model.request", "OrderRequest"),
            ("x.y.model.response", "OrderResponse"),
            ("x.y.model.request", "OrderQuery"),
            ("x.y.dal.repository", "OrderRepository"),
            ("x.y.service", "OrderService"),
            ("x.y.service.impl", "OrderServiceImpl"),
            ("x.y.convertor", "OrderConvertor"),
            ("x.y.controller", "OrderController"),
        ]
        .map(|(p, c)| (p.to_string(), c.to_string()));

        assert_eq!(table, expected.to_vec());
        assert_eq!(layout.qualified(ArtifactKind::Repository), "x.y.dal.repository.OrderRepository");
        assert_eq!(layout.qualified(ArtifactKind::Controller), "x.y.controller.OrderController");
    }

    #[test]
    fn test_lookup_by_kind_matches_kind() {
        let layout = derive_layout("com.acme.shop", "Invoice");
        for kind in ArtifactKind::ALL {
            assert_eq!(layout.get(kind).kind, kind);
        }
    }

    #[test]
    fn test_support_package() {
        let layout = derive_layout("com.acme.shop", "Order");
        assert_eq!(layout.support_type(PAGE_RESULT), "com.acme.shop.common.PageResult");

        let layout = layout.with_support_package("com.acme.web");
        assert_eq!(layout.support_type(RESULT), "com.acme.web.Result");
    }

    #[test]
    fn test_kind_keys() {
        assert_eq!(ArtifactKind::ServiceImpl.to_string(), "service_impl");
        #[derive(Deserialize)]
        struct Kinds {
            kinds: Vec<ArtifactKind>,
        }

        let keys: Vec<String> = ArtifactKind::ALL
            .iter()
            .map(|k| format!("\"{}\"", k.as_str()))
            .collect();
        let parsed: Kinds = toml::from_str(&format!("kinds = [{}]", keys.join(", "))).unwrap();
        assert_eq!(parsed.kinds, ArtifactKind::ALL.to_vec());
    }
}
