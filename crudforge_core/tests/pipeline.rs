use crudforge_core::{
    ArtifactKind, CrudforgeConfig, CrudforgeError, Generator, WriteOutcome, generate_with_config,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ORDER: &str = r#"package com.acme.shop.domain;

import java.math.BigDecimal;
import java.time.LocalDateTime;

/**
 * Customer order.
 *
 * @author shop-team
 */
public class Order {

    private static final long serialVersionUID = 1L;

    /** Primary key */
    private Long id;

    /** Owning customer */
    private Long customerId;

    private BigDecimal amount;

    private LocalDateTime createdAt;

    private LocalDateTime updatedAt;
}
"#;

const CUSTOMER: &str = r#"package com.acme.shop.domain;

public class Customer {
    private Long id;
    private String name;
    private boolean active;
}
"#;

// unterminated class body
const BROKEN: &str = "package com.acme.shop.domain;\n\npublic class Invoice {\n    private Long id\n";

/// A Maven-style module two levels below the temp dir, so the locator's
/// fallback walk stays inside it.
struct Project {
    _dir: TempDir,
    root: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("repos/workspace");
        let module = root.join("shop-service");
        fs::create_dir_all(&module).unwrap();
        fs::write(module.join("pom.xml"), "<project/>").unwrap();
        Self { _dir: dir, root }
    }

    fn add(&self, class: &str, source: &str) {
        let path = self
            .root
            .join("shop-service/src/main/java/com/acme/shop/domain")
            .join(format!("{class}.java"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, source).unwrap();
    }

    fn config(&self, classes: &[&str]) -> CrudforgeConfig {
        let mut builder = CrudforgeConfig::builder()
            .working_dir(&self.root)
            .module("shop-service")
            .output_path("generated");
        for class in classes {
            builder = builder.entity(format!("com.acme.shop.domain.{class}"));
        }
        builder.build()
    }

    fn generated(&self, relative: &str) -> PathBuf {
        self.root.join("generated/src/main/java").join(relative)
    }
}

fn artifact_paths(outcomes: &[WriteOutcome]) -> Vec<&Path> {
    outcomes.iter().map(WriteOutcome::path).collect()
}

#[test]
fn full_artifact_set_is_written() {
    let project = Project::new();
    project.add("Order", ORDER);

    let report = generate_with_config(project.config(&["Order"])).unwrap();
    assert_eq!(report.failed(), 0);
    assert_eq!(report.written(), 9);

    for relative in [
        "com/acme/shop/model/dto/OrderDTO.java",
        "com/acme/shop/model/request/OrderRequest.java",
        "com/acme/shop/model/response/OrderResponse.java",
        "com/acme/shop/model/request/OrderQuery.java",
        "com/acme/shop/dal/repository/OrderRepository.java",
        "com/acme/shop/service/OrderService.java",
        "com/acme/shop/service/impl/OrderServiceImpl.java",
        "com/acme/shop/convertor/OrderConvertor.java",
        "com/acme/shop/controller/OrderController.java",
    ] {
        assert!(project.generated(relative).is_file(), "missing {relative}");
    }

    let dto = fs::read_to_string(project.generated("com/acme/shop/model/dto/OrderDTO.java")).unwrap();
    assert!(dto.starts_with("package com.acme.shop.model.dto;\n"));
    assert!(dto.contains("private BigDecimal amount;"));
    assert!(!dto.contains("serialVersionUID"));

    let request =
        fs::read_to_string(project.generated("com/acme/shop/model/request/OrderRequest.java")).unwrap();
    assert!(request.contains("private Long customerId;"));
    assert!(!request.contains("private Long id;"));
    assert!(!request.contains("createdAt"));
}

#[test]
fn second_run_skips_every_artifact() {
    let project = Project::new();
    project.add("Order", ORDER);
    project.add("Customer", CUSTOMER);
    let config = project.config(&["Order", "Customer"]);

    let first = generate_with_config(config.clone()).unwrap();
    assert_eq!(first.written(), 18);

    let second = generate_with_config(config).unwrap();
    assert_eq!(second.written(), 0);
    assert_eq!(second.skipped(), 18);
    for (before, after) in first.entities.iter().zip(&second.entities) {
        assert_eq!(artifact_paths(before.outcomes()), artifact_paths(after.outcomes()));
        assert!(after.outcomes().iter().all(|o| matches!(o, WriteOutcome::Skipped(_))));
    }
}

#[test]
fn failing_entity_does_not_stop_the_batch() {
    let project = Project::new();
    project.add("Order", ORDER);
    project.add("Invoice", BROKEN);
    project.add("Customer", CUSTOMER);

    let report = generate_with_config(project.config(&["Order", "Invoice", "Customer"])).unwrap();

    assert_eq!(report.processed(), 3);
    assert_eq!(report.failed(), 1);
    let names: Vec<&str> = report.entities.iter().map(|e| e.entity.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "com.acme.shop.domain.Order",
            "com.acme.shop.domain.Invoice",
            "com.acme.shop.domain.Customer",
        ]
    );
    assert_eq!(report.entities[0].outcomes().len(), 9);
    assert!(matches!(
        report.entities[1].error(),
        Some(CrudforgeError::MalformedSource { .. })
    ));
    assert_eq!(report.entities[2].outcomes().len(), 9);
    assert!(project.generated("com/acme/shop/controller/CustomerController.java").is_file());
    assert!(!project.generated("com/acme/shop/controller/InvoiceController.java").exists());
}

#[test]
fn parallel_run_keeps_configuration_order() {
    let project = Project::new();
    project.add("Order", ORDER);
    project.add("Customer", CUSTOMER);
    let mut config = project.config(&["Customer", "Missing", "Order"]);
    config.general.parallel = true;

    let report = Generator::new(config).generate_all().unwrap();
    let names: Vec<&str> = report.entities.iter().map(|e| e.entity.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "com.acme.shop.domain.Customer",
            "com.acme.shop.domain.Missing",
            "com.acme.shop.domain.Order",
        ]
    );
    assert!(matches!(
        report.entities[1].error(),
        Some(CrudforgeError::LocatorNotFound { .. })
    ));
    assert_eq!(report.succeeded(), 2);
}

#[test]
fn selected_kinds_only() {
    let project = Project::new();
    project.add("Order", ORDER);
    let mut config = project.config(&["Order"]);
    config.output.kinds = vec![ArtifactKind::Repository, ArtifactKind::Controller];

    let report = generate_with_config(config).unwrap();
    assert_eq!(report.written(), 2);
    assert!(project.generated("com/acme/shop/dal/repository/OrderRepository.java").is_file());
    assert!(!project.generated("com/acme/shop/model/dto/OrderDTO.java").exists());
}
