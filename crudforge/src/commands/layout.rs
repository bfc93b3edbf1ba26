//! Layout command - prints the naming table for one entity.

use crate::cli::{Cli, LayoutArgs};
use crudforge_core::entity::EntityId;
use crudforge_core::error::Result;
use crudforge_core::layout::{LayoutConfig, derive_layout};
use serde_json::{Value, json};

pub fn run(_cli: &Cli, args: LayoutArgs) -> Result<()> {
    let id = EntityId::parse(&args.entity)?;
    let mut layout = derive_layout(id.base_package(), id.class_name());
    if let Some(package) = args.support_package {
        layout = layout.with_support_package(package);
    }

    if args.json {
        println!("{:#}", to_json(&layout));
    } else {
        println!("{}", to_table(&layout));
    }
    Ok(())
}

fn to_json(layout: &LayoutConfig) -> Value {
    let artifacts: Vec<Value> = layout
        .artifacts()
        .map(|a| {
            json!({
                "kind": a.kind,
                "package": a.package,
                "class_name": a.class_name,
            })
        })
        .collect();

    json!({
        "base_package": layout.base_package,
        "entity": layout.entity_name,
        "support_package": layout.support_package,
        "artifacts": artifacts,
    })
}

fn to_table(layout: &LayoutConfig) -> String {
    let mut lines = vec![format!("{:<13} {}", "KIND", "CLASS")];
    lines.extend(
        layout
            .artifacts()
            .map(|a| format!("{:<13} {}", a.kind.as_str(), a.qualified())),
    );
    lines.push(format!("{:<13} {}", "support", layout.support_package));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_shape() {
        let value = to_json(&derive_layout("x.y", "Order"));
        assert_eq!(value["support_package"], "x.y.common");
        assert_eq!(value["artifacts"].as_array().unwrap().len(), 9);
        assert_eq!(value["artifacts"][4]["kind"], "repository");
        assert_eq!(value["artifacts"][4]["package"], "x.y.dal.repository");
        assert_eq!(value["artifacts"][4]["class_name"], "OrderRepository");
    }

    #[test]
    fn test_table_lists_every_kind() {
        let table = to_table(&derive_layout("x.y", "Order"));
        assert!(table.contains("controller    x.y.controller.OrderController"));
        assert_eq!(table.lines().count(), 11);
    }
}
