//! Document storage.
//!
//! The canvas never persists anything itself; it hands whole replacement
//! documents to its owner. The host owns a [`DocumentStore`] keyed by a short
//! document name. Saves always replace the whole document.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use geocanvas::doc::{DocError, GeometryDocument};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid document key `{0}`; use letters, digits, '-' or '_'")]
    InvalidKey(String),
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Document(#[from] DocError),
}

/// Whole-document storage keyed by name.
pub trait DocumentStore: Send + Sync + 'static {
    /// Load the document stored under `key`, or `None` if there is none.
    fn load(&self, key: &str) -> impl Future<Output = Result<Option<GeometryDocument>, StoreError>> + Send;

    /// Replace the document stored under `key`.
    fn save(&self, key: &str, doc: &GeometryDocument) -> impl Future<Output = Result<(), StoreError>> + Send;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid { Ok(()) } else { Err(StoreError::InvalidKey(key.to_owned())) }
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl DocumentStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<GeometryDocument>, StoreError> {
        let path = self.path_for(key)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(key, path = %path.display(), "no stored document");
                return Ok(None);
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Some(GeometryDocument::from_json(&raw)?))
    }

    async fn save(&self, key: &str, doc: &GeometryDocument) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let body = doc.to_json()?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;

        // Write beside the target and rename so readers never see a torn file.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body.as_bytes())
            .await
            .map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;
        tracing::debug!(key, path = %path.display(), bytes = body.len(), "document saved");
        Ok(())
    }
}

/// In-memory store that counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<String, GeometryDocument>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document without counting it as a save.
    pub async fn insert(&self, key: &str, doc: GeometryDocument) {
        self.docs.write().await.insert(key.to_owned(), doc);
    }

    /// Number of successful `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl DocumentStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<GeometryDocument>, StoreError> {
        validate_key(key)?;
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, doc: &GeometryDocument) -> Result<(), StoreError> {
        validate_key(key)?;
        self.docs.write().await.insert(key.to_owned(), doc.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
