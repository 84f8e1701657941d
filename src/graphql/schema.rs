use crate::core::fields::{DepartmentField, EmployeeField, RoleField};
use crate::core::mutations::{InputMap, MutationHandlers};
use crate::core::queries::{EmployeeFilter, QueryHandlers};
use async_graphql::{Context, ErrorExtensions, Object, SimpleObject};
use serde_json::Value;

/*
  type Query {
    department(name: String!): DepartmentField!
    role(name: String!): RoleField!
    employee(name: String!, department: String, role: String): EmployeeField!
    hello(name: String! = "world"): String!
  }
*/
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Department Query
    async fn department(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> async_graphql::Result<DepartmentField> {
        let queries = ctx.data::<QueryHandlers>()?;
        queries.department(&name).await.map_err(|e| e.extend())
    }

    /// Role Query
    async fn role(&self, ctx: &Context<'_>, name: String) -> async_graphql::Result<RoleField> {
        let queries = ctx.data::<QueryHandlers>()?;
        queries.role(&name).await.map_err(|e| e.extend())
    }

    /// Employee Query
    async fn employee(
        &self,
        ctx: &Context<'_>,
        name: String,
        #[graphql(desc = "department name the employee must belong to")]
        department: Option<String>,
        #[graphql(desc = "role name the employee must hold")]
        role: Option<String>,
    ) -> async_graphql::Result<EmployeeField> {
        let queries = ctx.data::<QueryHandlers>()?;
        let filter = EmployeeFilter {
            name,
            department,
            role,
        };
        queries.employee(&filter).await.map_err(|e| e.extend())
    }

    async fn hello(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = "world")] name: String,
    ) -> async_graphql::Result<String> {
        let queries = ctx.data::<QueryHandlers>()?;
        Ok(queries.hello(&name))
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateDepartmentPayload {
    pub department: DepartmentField,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateRolePayload {
    pub role: RoleField,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateEmployeePayload {
    pub employee: EmployeeField,
    pub department: DepartmentField,
    pub role: RoleField,
}

/// Absent arguments stay out of the map so validation reports them as required.
fn input_map(args: &[(&str, Option<String>)]) -> InputMap {
    args.iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| (key.to_string(), Value::String(v.clone())))
        })
        .collect()
}

/*
  type Mutation {
    createDepartment(name: String): CreateDepartmentPayload!
    createRole(name: String): CreateRolePayload!
    createEmployee(name: String, department: String, role: String): CreateEmployeePayload!
  }
*/
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create New Department
    async fn create_department(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
    ) -> async_graphql::Result<CreateDepartmentPayload> {
        let mutations = ctx.data::<MutationHandlers>()?;
        let department = mutations
            .create_department(&input_map(&[("name", name)]))
            .await
            .map_err(|e| e.extend())?;
        Ok(CreateDepartmentPayload { department })
    }

    /// Create New Role
    async fn create_role(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
    ) -> async_graphql::Result<CreateRolePayload> {
        let mutations = ctx.data::<MutationHandlers>()?;
        let role = mutations
            .create_role(&input_map(&[("name", name)]))
            .await
            .map_err(|e| e.extend())?;
        Ok(CreateRolePayload { role })
    }

    /// Create New Employee
    async fn create_employee(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        department: Option<String>,
        role: Option<String>,
    ) -> async_graphql::Result<CreateEmployeePayload> {
        let mutations = ctx.data::<MutationHandlers>()?;
        let created = mutations
            .create_employee(&input_map(&[
                ("name", name),
                ("department", department),
                ("role", role),
            ]))
            .await
            .map_err(|e| e.extend())?;
        Ok(CreateEmployeePayload {
            employee: created.employee,
            department: created.department,
            role: created.role,
        })
    }
}
