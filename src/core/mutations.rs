//! Create mutations: validate, resolve relations, persist, adapt.

use crate::core::construct::construct;
use crate::core::fields::{DepartmentField, EmployeeField, RoleField};
use crate::domain::model::{Department, Employee, Model, Role};
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use crate::utils::validation::InputSchema;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Raw mutation arguments keyed by name.
pub type InputMap = HashMap<String, Value>;

/// An employee together with the entities it was linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEmployee {
    pub employee: EmployeeField,
    pub department: DepartmentField,
    pub role: RoleField,
}

#[derive(Clone)]
pub struct MutationHandlers {
    store: Arc<dyn DocumentStore>,
}

impl MutationHandlers {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn department_schema() -> InputSchema {
        InputSchema::new().string("name", 1)
    }

    pub fn role_schema() -> InputSchema {
        InputSchema::new().string("name", 1)
    }

    pub fn employee_schema() -> InputSchema {
        InputSchema::new()
            .string("name", 2)
            .string("department", 2)
            .string("role", 2)
    }

    pub async fn create_department(&self, input: &InputMap) -> Result<DepartmentField> {
        tracing::debug!("create_department args {:?}", input);
        let mut data = Self::department_schema().check(input)?;

        let department = Department {
            name: data.remove("name").unwrap_or_default(),
        };
        let doc = self
            .store
            .insert(Department::COLLECTION, department.to_document())
            .await?;

        tracing::info!("Created department {:?}", doc.id());
        Ok(construct(&doc))
    }

    pub async fn create_role(&self, input: &InputMap) -> Result<RoleField> {
        tracing::debug!("create_role args {:?}", input);
        let mut data = Self::role_schema().check(input)?;

        let role = Role {
            name: data.remove("name").unwrap_or_default(),
        };
        let doc = self.store.insert(Role::COLLECTION, role.to_document()).await?;

        tracing::info!("Created role {:?}", doc.id());
        Ok(construct(&doc))
    }

    /// Both relations are resolved before anything is written.
    pub async fn create_employee(&self, input: &InputMap) -> Result<CreatedEmployee> {
        tracing::debug!("create_employee args {:?}", input);
        let mut data = Self::employee_schema().check(input)?;

        let department_name = data.remove("department").unwrap_or_default();
        let role_name = data.remove("role").unwrap_or_default();

        let department = self
            .store
            .get_by_field(
                Department::COLLECTION,
                Department::ENTITY,
                "name",
                &department_name,
            )
            .await
            .inspect_err(|e| tracing::warn!("create_employee rejected: {}", e))?;
        let role = self
            .store
            .get_by_field(Role::COLLECTION, Role::ENTITY, "name", &role_name)
            .await
            .inspect_err(|e| tracing::warn!("create_employee rejected: {}", e))?;

        let employee = Employee {
            name: data.remove("name").unwrap_or_default(),
            hired_on: Utc::now(),
            department: department.id().unwrap_or_default().to_string(),
            role: role.id().unwrap_or_default().to_string(),
        };
        let doc = self
            .store
            .save(Employee::COLLECTION, employee.to_document())
            .await?;

        tracing::info!("Created employee {:?}", doc.id());
        Ok(CreatedEmployee {
            employee: construct(&doc),
            department: construct(&department),
            role: construct(&role),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::utils::error::ApiError;
    use serde_json::json;

    fn input(pairs: &[(&str, &str)]) -> InputMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    fn handlers() -> (Arc<MemoryStore>, MutationHandlers) {
        let store = Arc::new(MemoryStore::new());
        let handlers = MutationHandlers::new(store.clone());
        (store, handlers)
    }

    #[tokio::test]
    async fn test_create_department() {
        let (store, mutations) = handlers();
        let dept = mutations
            .create_department(&input(&[("name", "Sales")]))
            .await
            .unwrap();

        assert_eq!(dept.name.as_deref(), Some("Sales"));
        assert!(dept.id.is_some());
        assert_eq!(store.len("department").await, 1);
    }

    #[tokio::test]
    async fn test_empty_role_name_is_rejected_without_writes() {
        let (store, mutations) = handlers();
        let err = mutations
            .create_role(&input(&[("name", "")]))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::ValidationError { .. }));
        assert!(store.is_empty("role").await);
    }

    #[tokio::test]
    async fn test_create_employee_links_relations() {
        let (store, mutations) = handlers();
        let dept = mutations
            .create_department(&input(&[("name", "Sales")]))
            .await
            .unwrap();
        let role = mutations
            .create_role(&input(&[("name", "Rep")]))
            .await
            .unwrap();

        let created = mutations
            .create_employee(&input(&[
                ("name", "Al"),
                ("department", "Sales"),
                ("role", "Rep"),
            ]))
            .await
            .unwrap();

        assert!(created.employee.id.is_some());
        assert_eq!(created.employee.name.as_deref(), Some("Al"));
        assert!(created.employee.hired_on.is_some());
        assert_eq!(created.employee.department_id, dept.id);
        assert_eq!(created.employee.role_id, role.id);
        assert_eq!(created.department, dept);
        assert_eq!(created.role, role);
        assert_eq!(store.len("employee").await, 1);
    }

    #[tokio::test]
    async fn test_short_employee_fields_fail_validation() {
        let (store, mutations) = handlers();
        let err = mutations
            .create_employee(&input(&[("name", "A"), ("department", "S"), ("role", "R")]))
            .await
            .unwrap_err();

        match err {
            ApiError::ValidationError { fields, .. } => {
                assert_eq!(fields.len(), 3);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.is_empty("employee").await);
    }

    #[tokio::test]
    async fn test_unknown_role_fails_with_404_and_no_employee() {
        let (store, mutations) = handlers();
        mutations
            .create_department(&input(&[("name", "Sales")]))
            .await
            .unwrap();

        let err = mutations
            .create_employee(&input(&[
                ("name", "Al"),
                ("department", "Sales"),
                ("role", "Ghost"),
            ]))
            .await
            .unwrap_err();

        assert_eq!(err.http_status(), Some(404));
        assert!(store.is_empty("employee").await);
    }

    #[tokio::test]
    async fn test_duplicate_department_name_is_conflict() {
        let (store, mutations) = handlers();
        for _ in 0..2 {
            mutations
                .create_department(&input(&[("name", "Sales")]))
                .await
                .unwrap();
        }
        mutations
            .create_role(&input(&[("name", "Rep")]))
            .await
            .unwrap();

        let err = mutations
            .create_employee(&input(&[
                ("name", "Al"),
                ("department", "Sales"),
                ("role", "Rep"),
            ]))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.http_status(), Some(404));
        assert!(store.is_empty("employee").await);
    }
}
