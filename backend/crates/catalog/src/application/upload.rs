//! Upload Storage
//!
//! Writes product images under a local directory and hands back the
//! relative path stored alongside the product row.

use std::path::{Path, PathBuf};

use crate::error::CatalogResult;

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original client-side filename, used only for its extension.
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Directory-backed store for product images.
///
/// Stored names are random UUIDs, so concurrent uploads of files with the
/// same client name never collide.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `file` to disk and return its relative serving path,
    /// e.g. `uploads/3f2a….png`.
    pub async fn store(&self, file: &UploadedFile) -> CatalogResult<String> {
        let name = match Path::new(&file.filename)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) => format!("{}.{ext}", uuid::Uuid::new_v4()),
            None => uuid::Uuid::new_v4().to_string(),
        };
        tokio::fs::write(self.dir.join(&name), &file.bytes).await?;
        Ok(format!("uploads/{name}"))
    }

    /// Best-effort delete of a previously stored file.
    ///
    /// Used to compensate when the database write after an upload fails;
    /// a failed removal is logged and swallowed.
    pub async fn remove(&self, stored_path: &str) {
        let Some(name) = stored_path.strip_prefix("uploads/") else {
            return;
        };
        if let Err(error) = tokio::fs::remove_file(self.dir.join(name)).await {
            tracing::warn!(%stored_path, %error, "failed to remove uploaded file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> UploadStore {
        let dir = std::env::temp_dir().join(format!("uploads-test-{}", uuid::Uuid::new_v4()));
        UploadStore::new(dir)
    }

    #[tokio::test]
    async fn test_store_keeps_extension_and_randomizes_name() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let file = UploadedFile {
            filename: "menu photo.PNG".to_string(),
            bytes: vec![1, 2, 3],
        };
        let first = store.store(&file).await.unwrap();
        let second = store.store(&file).await.unwrap();

        assert!(first.starts_with("uploads/"));
        assert!(first.ends_with(".PNG"));
        assert_ne!(first, second);

        let on_disk = store.dir().join(first.strip_prefix("uploads/").unwrap());
        assert_eq!(tokio::fs::read(on_disk).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_store_without_extension() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let file = UploadedFile {
            filename: "picture".to_string(),
            bytes: vec![0],
        };
        let path = store.store(&file).await.unwrap();
        assert!(!path.contains('.'));
    }

    #[tokio::test]
    async fn test_remove_is_silent_for_missing_file() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();
        store.remove("uploads/no-such-file.png").await;
        store.remove("not-an-upload-path").await;
    }
}
