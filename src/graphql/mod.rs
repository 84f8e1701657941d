//! GraphQL schema over the query and mutation handlers.

pub mod schema;

use crate::core::mutations::MutationHandlers;
use crate::core::queries::QueryHandlers;
use crate::domain::ports::DocumentStore;
use async_graphql::{EmptySubscription, Schema, ServerError};
use std::sync::Arc;

pub use schema::{
    CreateDepartmentPayload, CreateEmployeePayload, CreateRolePayload, MutationRoot, QueryRoot,
};

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Deep enough for the GraphiQL introspection query.
pub const DEFAULT_DEPTH_LIMIT: usize = 32;

/// Build the schema with both handler sets sharing one store.
pub fn build_schema(store: Arc<dyn DocumentStore>, depth_limit: usize) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(QueryHandlers::new(store.clone()))
        .data(MutationHandlers::new(store))
        .limit_depth(depth_limit)
        .finish()
}

/// HTTP status carried by an error's `status` extension.
pub fn error_status(error: &ServerError) -> Option<u16> {
    let value = error.extensions.as_ref()?.get("status")?;
    match value {
        async_graphql::Value::Number(n) => n.as_u64().and_then(|s| u16::try_from(s).ok()),
        _ => None,
    }
}

/// Execute a GraphQL query and return the JSON result.
pub async fn execute(schema: &AppSchema, query: &str) -> serde_json::Value {
    let response = schema.execute(query).await;
    serde_json::to_value(&response).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    #[tokio::test]
    async fn test_hello_defaults_to_world() {
        let schema = build_schema(Arc::new(MemoryStore::new()), DEFAULT_DEPTH_LIMIT);

        let result = execute(&schema, "{ hello }").await;
        assert_eq!(result["data"]["hello"], "Hello world");

        let result = execute(&schema, r#"{ hello(name: "Ada") }"#).await;
        assert_eq!(result["data"]["hello"], "Hello Ada");
    }

    #[tokio::test]
    async fn test_sdl_exposes_operations() {
        let schema = build_schema(Arc::new(MemoryStore::new()), DEFAULT_DEPTH_LIMIT);
        let sdl = schema.sdl();

        for field in [
            "type DepartmentField",
            "type CreateEmployeePayload",
            "createEmployee(",
            "hiredOn: DateTime",
        ] {
            assert!(sdl.contains(field), "missing {} in\n{}", field, sdl);
        }
    }

    #[tokio::test]
    async fn test_not_found_error_carries_status() {
        let schema = build_schema(Arc::new(MemoryStore::new()), DEFAULT_DEPTH_LIMIT);
        let response = schema.execute(r#"{ role(name: "Ghost") { id } }"#).await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(error_status(&response.errors[0]), Some(404));
    }
}
