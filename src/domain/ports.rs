use crate::domain::model::Document;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::net::SocketAddr;

pub use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;

/// Document-store boundary.
///
/// Collections are created on first write. `find` returns matches in
/// insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document and assigns its `_id`.
    async fn insert(&self, collection: &str, document: Document) -> Result<Document>;

    /// Replaces the document with the same `_id`, or inserts it. A missing `_id` is assigned.
    async fn save(&self, collection: &str, document: Document) -> Result<Document>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    async fn find(&self, collection: &str, filter: &Document) -> Result<Vec<Document>>;

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>> {
        let filter = Document::new().with(field, Value::String(value.to_string()));
        self.find(collection, &filter).await
    }

    /// Exactly one document must match.
    async fn get_by_field(
        &self,
        collection: &str,
        entity: &str,
        field: &str,
        value: &str,
    ) -> Result<Document> {
        let mut matches = self.find_by_field(collection, field, value).await?;
        match matches.len() {
            0 => Err(ApiError::NotFound {
                entity: entity.to_string(),
                field: field.to_string(),
                value: value.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            count => Err(ApiError::MultipleMatches {
                entity: entity.to_string(),
                field: field.to_string(),
                value: value.to_string(),
                count,
            }),
        }
    }
}

pub trait ConfigProvider: Validate + Send + Sync {
    fn listen_addr(&self) -> Result<SocketAddr>;
    /// `None` keeps everything in memory.
    fn data_file(&self) -> Option<&str>;
    fn graphiql(&self) -> bool;
    fn depth_limit(&self) -> usize;
    fn verbose(&self) -> bool;
    fn log_format(&self) -> LogFormat;
}
