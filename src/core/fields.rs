use crate::core::construct::{datetime_field, string_field, FieldShape};
use crate::core::queries::QueryHandlers;
use crate::domain::model::ObjectId;
use async_graphql::{ComplexObject, Context, ErrorExtensions, SimpleObject};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, SimpleObject)]
pub struct DepartmentField {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl FieldShape for DepartmentField {
    const FIELDS: &'static [&'static str] = &["id", "name"];

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            id: string_field(fields, "id"),
            name: string_field(fields, "name"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SimpleObject)]
pub struct RoleField {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl FieldShape for RoleField {
    const FIELDS: &'static [&'static str] = &["id", "name"];

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            id: string_field(fields, "id"),
            name: string_field(fields, "name"),
        }
    }
}

/// Relations are stored as primary keys and resolved on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, SimpleObject)]
#[graphql(complex)]
pub struct EmployeeField {
    pub id: Option<String>,
    pub name: Option<String>,
    pub hired_on: Option<DateTime<Utc>>,
    #[graphql(skip)]
    pub department_id: Option<ObjectId>,
    #[graphql(skip)]
    pub role_id: Option<ObjectId>,
}

impl FieldShape for EmployeeField {
    const FIELDS: &'static [&'static str] = &["id", "name", "hired_on", "department", "role"];

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            id: string_field(fields, "id"),
            name: string_field(fields, "name"),
            hired_on: datetime_field(fields, "hired_on"),
            department_id: string_field(fields, "department"),
            role_id: string_field(fields, "role"),
        }
    }
}

#[ComplexObject]
impl EmployeeField {
    async fn department(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<DepartmentField>> {
        let Some(id) = self.department_id.as_deref() else {
            return Ok(None);
        };
        let queries = ctx.data::<QueryHandlers>()?;
        queries.department_by_id(id).await.map_err(|e| e.extend())
    }

    async fn role(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<RoleField>> {
        let Some(id) = self.role_id.as_deref() else {
            return Ok(None);
        };
        let queries = ctx.data::<QueryHandlers>()?;
        queries.role_by_id(id).await.map_err(|e| e.extend())
    }
}
