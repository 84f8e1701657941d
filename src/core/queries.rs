//! Name-keyed lookups returned through the field adapter.

use crate::core::construct::construct;
use crate::core::fields::{DepartmentField, EmployeeField, RoleField};
use crate::domain::model::{Department, Document, Employee, Model, Role};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{ApiError, Result};
use std::sync::Arc;

/// Optional narrowing for the employee lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub name: String,
    pub department: Option<String>,
    pub role: Option<String>,
}

#[derive(Clone)]
pub struct QueryHandlers {
    store: Arc<dyn DocumentStore>,
}

impl QueryHandlers {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn department(&self, name: &str) -> Result<DepartmentField> {
        tracing::debug!("department query name={:?}", name);
        let doc = self
            .store
            .get_by_field(Department::COLLECTION, Department::ENTITY, "name", name)
            .await?;
        Ok(construct(&doc))
    }

    pub async fn role(&self, name: &str) -> Result<RoleField> {
        tracing::debug!("role query name={:?}", name);
        let doc = self
            .store
            .get_by_field(Role::COLLECTION, Role::ENTITY, "name", name)
            .await?;
        Ok(construct(&doc))
    }

    /// Department and role names are resolved to their ids before matching.
    pub async fn employee(&self, filter: &EmployeeFilter) -> Result<EmployeeField> {
        tracing::debug!("employee query {:?}", filter);
        let mut query = Document::new().with("name", filter.name.clone());

        if let Some(department) = &filter.department {
            let doc = self
                .store
                .get_by_field(Department::COLLECTION, Department::ENTITY, "name", department)
                .await?;
            query.insert("department", doc.id().unwrap_or_default().to_string());
        }

        if let Some(role) = &filter.role {
            let doc = self
                .store
                .get_by_field(Role::COLLECTION, Role::ENTITY, "name", role)
                .await?;
            query.insert("role", doc.id().unwrap_or_default().to_string());
        }

        let mut matches = self.store.find(Employee::COLLECTION, &query).await?;
        match matches.len() {
            0 => Err(ApiError::NotFound {
                entity: Employee::ENTITY.to_string(),
                field: "name".to_string(),
                value: filter.name.clone(),
            }),
            1 => Ok(construct(&matches.remove(0))),
            count => Err(ApiError::MultipleMatches {
                entity: Employee::ENTITY.to_string(),
                field: "name".to_string(),
                value: filter.name.clone(),
                count,
            }),
        }
    }

    pub async fn department_by_id(&self, id: &str) -> Result<Option<DepartmentField>> {
        let doc = self.store.get(Department::COLLECTION, id).await?;
        Ok(doc.as_ref().map(construct))
    }

    pub async fn role_by_id(&self, id: &str) -> Result<Option<RoleField>> {
        let doc = self.store.get(Role::COLLECTION, id).await?;
        Ok(doc.as_ref().map(construct))
    }

    pub fn hello(&self, name: &str) -> String {
        format!("Hello {}", name)
    }
}
