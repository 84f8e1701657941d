use crate::adapters::memory::{insert_document, save_document, Collections, MemoryStore};
use crate::domain::model::Document;
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Document store persisted as a single JSON snapshot `{collection: [documents]}`.
///
/// Reads are served from memory. Every write is applied to a copy of the
/// collections, written through a temporary file followed by a rename, and
/// only then made visible to readers.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// 開啟資料檔；檔案不存在時以空資料開始
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let collections: Collections = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Collections::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Data file {} not found, starting empty", path.display());
                Collections::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "Opened data file {} ({} collections)",
            path.display(),
            collections.len()
        );

        Ok(Self {
            path,
            inner: MemoryStore::from_collections(collections),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, snapshot: &Collections) -> Result<()> {
        let data = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &data).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<Document> {
        let _guard = self.write_lock.lock().await;
        let mut staged = self.inner.snapshot().await;
        let document = insert_document(&mut staged, collection, document)?;
        self.persist(&staged).await?;
        self.inner.replace(staged).await;
        Ok(document)
    }

    async fn save(&self, collection: &str, document: Document) -> Result<Document> {
        let _guard = self.write_lock.lock().await;
        let mut staged = self.inner.snapshot().await;
        let document = save_document(&mut staged, collection, document);
        self.persist(&staged).await?;
        self.inner.replace(staged).await;
        Ok(document)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn find(&self, collection: &str, filter: &Document) -> Result<Vec<Document>> {
        self.inner.find(collection, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("nested/data.json"))
            .await
            .unwrap();

        let found = store.find("department", &Document::new()).await.unwrap();
        assert!(found.is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/data.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        store
            .insert("department", Document::new().with("name", "Sales"))
            .await
            .unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_nothing_visible() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        // 暫存檔路徑被目錄佔用，寫入必定失敗
        let tmp_path = path.with_extension("json.tmp");
        std::fs::create_dir(&tmp_path).unwrap();

        let err = store
            .insert("department", Document::new().with("name", "Sales"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTERNAL");
        assert!(store.find("department", &Document::new()).await.unwrap().is_empty());

        let err = store
            .save("role", Document::new().with("name", "Rep"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTERNAL");
        assert!(store.find("role", &Document::new()).await.unwrap().is_empty());
        assert!(!path.exists());

        // 恢復後的下一次寫入只包含成功的文件
        std::fs::remove_dir(&tmp_path).unwrap();
        store
            .insert("department", Document::new().with("name", "Ops"))
            .await
            .unwrap();

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let departments = reopened.find("department", &Document::new()).await.unwrap();
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].get_str("name"), Some("Ops"));
        assert!(reopened.find("role", &Document::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        std::fs::write(&path, b"{not json").unwrap();

        let err = JsonFileStore::open(&path).await.unwrap_err();
        assert_eq!(err.code(), "INTERNAL");
    }
}
