pub mod construct;
pub mod fields;
pub mod mutations;
pub mod queries;

pub use crate::domain::model::{Document, Model};
pub use crate::domain::ports::{ConfigProvider, DocumentStore};
pub use crate::utils::error::Result;
pub use construct::{construct, project, FieldShape};
pub use fields::{DepartmentField, EmployeeField, RoleField};
pub use mutations::{CreatedEmployee, InputMap, MutationHandlers};
pub use queries::{EmployeeFilter, QueryHandlers};
