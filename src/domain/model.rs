use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Attribute under which the store keeps a document's primary key.
pub const PRIMARY_KEY: &str = "_id";

/// 儲存層指派的主鍵 (32 字元十六進位字串)
pub type ObjectId = String;

/// A stored document: string keys mapped to JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub data: HashMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str(PRIMARY_KEY)
    }

    /// True when every attribute of `filter` is present here with an equal value.
    pub fn matches(&self, filter: &Document) -> bool {
        filter
            .data
            .iter()
            .all(|(key, expected)| self.data.get(key) == Some(expected))
    }
}

/// A persistable entity kind.
pub trait Model {
    const COLLECTION: &'static str;
    /// Name used in error messages.
    const ENTITY: &'static str;

    fn to_document(&self) -> Document;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub name: String,
}

impl Model for Department {
    const COLLECTION: &'static str = "department";
    const ENTITY: &'static str = "Department";

    fn to_document(&self) -> Document {
        Document::new().with("name", self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
}

impl Model for Role {
    const COLLECTION: &'static str = "role";
    const ENTITY: &'static str = "Role";

    fn to_document(&self) -> Document {
        Document::new().with("name", self.name.clone())
    }
}

/// Employee references its department and role by primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
    pub hired_on: DateTime<Utc>,
    pub department: ObjectId,
    pub role: ObjectId,
}

impl Model for Employee {
    const COLLECTION: &'static str = "employee";
    const ENTITY: &'static str = "Employee";

    fn to_document(&self) -> Document {
        Document::new()
            .with("name", self.name.clone())
            .with(
                "hired_on",
                self.hired_on.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .with("department", self.department.clone())
            .with("role", self.role.clone())
    }
}
