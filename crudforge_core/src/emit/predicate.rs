//! Query predicate synthesis for the repository artifact.
//!
//! [`build_query_plan`] decides *what* the query filters on;
//! [`render_query_plan`] turns that plan into `LambdaQueryWrapper` calls. The
//! split keeps the filter logic testable without looking at Java text.

use crate::artifact::Statement;
use crate::entity::EntityDescriptor;

use super::{capitalize, getter};

/// Synthetic range fields appended to the query object, in order, with the
/// entity column each one bounds.
pub const RANGE_FIELDS: [(&str, &str, Operator); 4] = [
    ("minCreatedAt", "createdAt", Operator::Ge),
    ("maxCreatedAt", "createdAt", Operator::Le),
    ("minUpdatedAt", "updatedAt", Operator::Ge),
    ("maxUpdatedAt", "updatedAt", Operator::Le),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ge,
    Le,
}

impl Operator {
    /// Wrapper method name.
    pub fn method(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ge => "ge",
            Operator::Le => "le",
        }
    }
}

/// `column <operator> query.<value>`, applied only when the value is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Entity property holding the stored column.
    pub column: String,
    /// Lombok getter on the entity, e.g. `getStatus` or `isPaid`.
    pub column_getter: String,
    pub operator: Operator,
    /// Property of the query object supplying the value. Query properties
    /// are boxed, so the getter is always `getX`.
    pub value: String,
    pub value_getter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column_getter: String,
    pub direction: Direction,
}

/// Ordering applied after the predicates.
///
/// Ordering fields carried by the query win when present; `fallback` applies
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub fallback: Option<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub predicates: Vec<Predicate>,
    pub ordering: Ordering,
}

/// Equality on every scalar field in declaration order, the four range
/// bounds, then ordering by primary key descending.
pub fn build_query_plan(entity: &EntityDescriptor) -> QueryPlan {
    let mut predicates: Vec<Predicate> = entity
        .fields
        .iter()
        .filter(|f| f.is_scalar())
        .map(|f| Predicate {
            column: f.name.clone(),
            column_getter: getter(&f.name, &f.declared_type),
            operator: Operator::Eq,
            value: f.name.clone(),
            value_getter: format!("get{}", capitalize(&f.name)),
        })
        .collect();

    predicates.extend(RANGE_FIELDS.iter().map(|(value, column, operator)| {
        let column_type = entity
            .field(column)
            .map(|f| f.declared_type.as_str())
            .unwrap_or_default();
        Predicate {
            column: column.to_string(),
            column_getter: getter(column, column_type),
            operator: *operator,
            value: value.to_string(),
            value_getter: format!("get{}", capitalize(value)),
        }
    }));

    let fallback = entity.primary_key().map(|pk| SortKey {
        column_getter: getter(&pk.name, &pk.declared_type),
        direction: Direction::Desc,
    });

    QueryPlan {
        predicates,
        ordering: Ordering { fallback },
    }
}

/// Statements building `wrapper` from `query` for the given entity class.
pub fn render_query_plan(plan: &QueryPlan, entity_class: &str) -> Vec<Statement> {
    let mut body: Vec<Statement> = plan
        .predicates
        .iter()
        .map(|p| {
            Statement::line(format!(
                "wrapper.{}(query.{}() != null, {}::{}, query.{}());",
                p.operator.method(),
                p.value_getter,
                entity_class,
                p.column_getter,
                p.value_getter
            ))
        })
        .collect();

    let query_order = vec![Statement::line("wrapper.last(query.orderByClause());")];
    match &plan.ordering.fallback {
        Some(key) => {
            let method = match key.direction {
                Direction::Asc => "orderByAsc",
                Direction::Desc => "orderByDesc",
            };
            body.push(Statement::IfElse {
                condition: "query.hasOrderFields()".to_string(),
                then: query_order,
                otherwise: vec![Statement::line(format!(
                    "wrapper.{}({}::{});",
                    method, entity_class, key.column_getter
                ))],
            });
        }
        None => body.push(Statement::IfElse {
            condition: "query.hasOrderFields()".to_string(),
            then: query_order,
            otherwise: Vec::new(),
        }),
    }

    body
}
