use anyhow::Result;
use serde_json::Value;
use staffql::graphql::{execute, DEFAULT_DEPTH_LIMIT};
use staffql::{build_schema, AppSchema, MemoryStore};
use std::sync::Arc;

fn schema() -> (Arc<MemoryStore>, AppSchema) {
    let store = Arc::new(MemoryStore::new());
    let schema = build_schema(store.clone(), DEFAULT_DEPTH_LIMIT);
    (store, schema)
}

async fn seed(schema: &AppSchema) {
    let result = execute(
        schema,
        r#"mutation {
            createDepartment(name: "Engineering") { department { id name } }
            createRole(name: "Developer") { role { id name } }
        }"#,
    )
    .await;
    assert!(result.get("errors").is_none(), "seed failed: {}", result);
}

fn error_code(result: &Value) -> &str {
    result["errors"][0]["extensions"]["code"]
        .as_str()
        .unwrap_or_default()
}

/// 建立員工並確認關聯實體
#[tokio::test]
async fn test_create_employee_end_to_end() -> Result<()> {
    let (store, schema) = schema();
    seed(&schema).await;

    let result = execute(
        &schema,
        r#"mutation {
            createEmployee(name: "Al", department: "Engineering", role: "Developer") {
                employee { id name hiredOn department { id name } role { id name } }
                department { id name }
                role { id name }
            }
        }"#,
    )
    .await;

    assert!(result.get("errors").is_none(), "unexpected errors: {}", result);
    let payload = &result["data"]["createEmployee"];
    let employee = &payload["employee"];

    assert!(employee["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(employee["name"], "Al");
    assert!(employee["hiredOn"].is_string());
    assert_eq!(employee["department"], payload["department"]);
    assert_eq!(employee["role"], payload["role"]);
    assert_eq!(payload["department"]["name"], "Engineering");
    assert_eq!(payload["role"]["name"], "Developer");
    assert_eq!(store.len("employee").await, 1);

    // The stored employee can be read back by name.
    let result = execute(
        &schema,
        r#"{ employee(name: "Al", department: "Engineering") { id name role { name } } }"#,
    )
    .await;
    assert_eq!(result["data"]["employee"]["id"], employee["id"]);
    assert_eq!(result["data"]["employee"]["role"]["name"], "Developer");

    Ok(())
}

#[tokio::test]
async fn test_output_never_exposes_primary_key_attribute() -> Result<()> {
    let (_store, schema) = schema();
    seed(&schema).await;

    let result = execute(&schema, r#"{ department(name: "Engineering") { id name } }"#).await;
    let department = result["data"]["department"]
        .as_object()
        .expect("department object");

    assert!(department.contains_key("id"));
    assert!(!department.contains_key("_id"));
    assert_eq!(department["id"].as_str().map(str::len), Some(32));

    // `_id` is not part of the schema at all.
    let result = execute(&schema, r#"{ department(name: "Engineering") { _id } }"#).await;
    assert!(result.get("errors").is_some());

    Ok(())
}

#[tokio::test]
async fn test_validation_failures_do_not_persist() -> Result<()> {
    let (store, schema) = schema();

    let result = execute(&schema, r#"mutation { createDepartment(name: "") { department { id } } }"#).await;
    assert_eq!(error_code(&result), "VALIDATION_ERROR");
    assert_eq!(
        result["errors"][0]["extensions"]["fields"]["name"],
        "String is shorter than 1 characters"
    );
    assert!(store.is_empty("department").await);

    let result = execute(&schema, r#"mutation { createRole { role { id } } }"#).await;
    assert_eq!(error_code(&result), "VALIDATION_ERROR");
    assert_eq!(result["errors"][0]["extensions"]["fields"]["name"], "is required");
    assert!(store.is_empty("role").await);

    seed(&schema).await;
    let result = execute(
        &schema,
        r#"mutation { createEmployee(name: "A", department: "Engineering", role: "Developer") { employee { id } } }"#,
    )
    .await;
    assert_eq!(error_code(&result), "VALIDATION_ERROR");
    assert!(store.is_empty("employee").await);

    Ok(())
}

#[tokio::test]
async fn test_unknown_department_is_not_found() -> Result<()> {
    let (store, schema) = schema();
    seed(&schema).await;

    let result = execute(
        &schema,
        r#"mutation { createEmployee(name: "Al", department: "Marketing", role: "Developer") { employee { id } } }"#,
    )
    .await;

    assert_eq!(error_code(&result), "NOT_FOUND");
    assert_eq!(result["errors"][0]["extensions"]["status"], 404);
    assert!(store.is_empty("employee").await);

    Ok(())
}

#[tokio::test]
async fn test_queries_report_missing_and_ambiguous_names() -> Result<()> {
    let (_store, schema) = schema();
    seed(&schema).await;
    execute(
        &schema,
        r#"mutation { createRole(name: "Developer") { role { id } } }"#,
    )
    .await;

    let result = execute(&schema, r#"{ role(name: "Developer") { id } }"#).await;
    assert_eq!(error_code(&result), "CONFLICT");

    let result = execute(&schema, r#"{ department(name: "Finance") { id } }"#).await;
    assert_eq!(error_code(&result), "NOT_FOUND");

    let result = execute(&schema, r#"{ employee(name: "Nobody") { id } }"#).await;
    assert_eq!(error_code(&result), "NOT_FOUND");

    Ok(())
}
