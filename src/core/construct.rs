//! Field adapter: stored documents to API output objects.

use crate::domain::model::{Document, PRIMARY_KEY};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Output field that receives the stored primary key.
pub const ID_FIELD: &str = "id";

/// An API output type that can be built from a filtered attribute map.
pub trait FieldShape: Sized {
    /// Attribute names the shape declares.
    const FIELDS: &'static [&'static str];

    /// Attributes of the wrong JSON type are left empty.
    fn from_fields(fields: &Map<String, Value>) -> Self;
}

/// Keeps only the attributes in `field_names`. When `id` is declared, the
/// document's `_id` is carried over as `id` and wins over a stored `id`.
pub fn project(field_names: &[&str], document: &Document) -> Map<String, Value> {
    let mut fields = Map::new();

    for (attr, value) in &document.data {
        if attr != PRIMARY_KEY && field_names.contains(&attr.as_str()) {
            fields.insert(attr.clone(), value.clone());
        }
    }

    if field_names.contains(&ID_FIELD) {
        if let Some(pk) = document.get(PRIMARY_KEY) {
            fields.insert(ID_FIELD.to_string(), pk.clone());
        }
    }

    fields
}

pub fn construct<T: FieldShape>(document: &Document) -> T {
    T::from_fields(&project(T::FIELDS, document))
}

pub(crate) fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn datetime_field(fields: &Map<String, Value>, name: &str) -> Option<DateTime<Utc>> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
