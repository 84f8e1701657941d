use crate::domain::model::{Document, ObjectId, PRIMARY_KEY};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

pub(crate) type Collections = HashMap<String, Vec<Document>>;

pub(crate) fn new_object_id() -> ObjectId {
    uuid::Uuid::new_v4().simple().to_string()
}

/// 新增文件；沒有 `_id` 時自動產生，重複的 `_id` 視為錯誤
pub(crate) fn insert_document(
    collections: &mut Collections,
    collection: &str,
    mut document: Document,
) -> Result<Document> {
    let docs = collections.entry(collection.to_string()).or_default();

    match document.id().map(str::to_string) {
        Some(id) => {
            if docs.iter().any(|d| d.id() == Some(id.as_str())) {
                return Err(ApiError::storage(format!(
                    "duplicate key {} in collection {}",
                    id, collection
                )));
            }
        }
        None => document.insert(PRIMARY_KEY, Value::String(new_object_id())),
    }

    tracing::debug!(
        "Inserted {} into {}",
        document.id().unwrap_or_default(),
        collection
    );
    docs.push(document.clone());
    Ok(document)
}

/// Upsert keyed by `_id`.
pub(crate) fn save_document(
    collections: &mut Collections,
    collection: &str,
    mut document: Document,
) -> Document {
    let docs = collections.entry(collection.to_string()).or_default();

    if document.id().is_none() {
        document.insert(PRIMARY_KEY, Value::String(new_object_id()));
    }

    let existing = docs.iter_mut().find(|d| d.id() == document.id());
    match existing {
        Some(slot) => *slot = document.clone(),
        None => docs.push(document.clone()),
    }

    tracing::debug!(
        "Saved {} in {}",
        document.id().unwrap_or_default(),
        collection
    );
    document
}

/// In-process document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_collections(collections: Collections) -> Self {
        Self {
            collections: RwLock::new(collections),
        }
    }

    pub(crate) async fn snapshot(&self) -> Collections {
        self.collections.read().await.clone()
    }

    /// Swap in a fully prepared set of collections.
    pub(crate) async fn replace(&self, collections: Collections) {
        *self.collections.write().await = collections;
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<Document> {
        let mut collections = self.collections.write().await;
        insert_document(&mut collections, collection, document)
    }

    async fn save(&self, collection: &str, document: Document) -> Result<Document> {
        let mut collections = self.collections.write().await;
        Ok(save_document(&mut collections, collection, document))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id() == Some(id)))
            .cloned())
    }

    async fn find(&self, collection: &str, filter: &Document) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| d.matches(filter)).cloned().collect())
            .unwrap_or_default())
    }
}
