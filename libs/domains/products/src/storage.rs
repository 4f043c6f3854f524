//! Flat-directory storage for product images.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid image name '{0}'")]
    InvalidName(String),

    #[error("image '{0}' already exists")]
    AlreadyExists(String),

    #[error("I/O error on image '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn io(name: &str, source: io::Error) -> Self {
        Self::Io {
            name: name.to_string(),
            source,
        }
    }
}

/// File storage addressed by bare file name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Write a new file. Never overwrites: an existing name yields
    /// [`StorageError::AlreadyExists`].
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError>;

    async fn exists(&self, name: &str) -> Result<bool, StorageError>;

    async fn remove(&self, name: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if missing.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::io(&self.root.display().to_string(), e))
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        let flat = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);

        if !flat {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(name)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(name.to_string()),
                _ => StorageError::io(name, e),
            })?;

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(StorageError::io(name, e));
        }

        tracing::debug!(image = %name, size = bytes.len(), "Stored image");
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let path = self.path_for(name)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io(name, e))
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::io(name, e))?;

        tracing::debug!(image = %name, "Removed image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::TestUploadDir;

    #[tokio::test]
    async fn test_put_exists_remove() {
        let dir = TestUploadDir::new();
        let storage = LocalImageStorage::new(dir.path());

        storage.put("image_1.png", b"png").await.unwrap();
        assert!(dir.contains("image_1.png"));
        assert!(storage.exists("image_1.png").await.unwrap());

        storage.remove("image_1.png").await.unwrap();
        assert!(!dir.contains("image_1.png"));
        assert!(!storage.exists("image_1.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_never_overwrites() {
        let dir = TestUploadDir::new();
        dir.seed("image_1.png", b"original");
        let storage = LocalImageStorage::new(dir.path());

        let err = storage.put("image_1.png", b"new").await.unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
        assert_eq!(std::fs::read(dir.file("image_1.png")).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_io_error() {
        let dir = TestUploadDir::new();
        let storage = LocalImageStorage::new(dir.path());

        let err = storage.remove("image_9.png").await.unwrap_err();
        match err {
            StorageError::Io { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_names_with_separators_rejected() {
        let dir = TestUploadDir::new();
        let storage = LocalImageStorage::new(dir.path());

        for name in ["../escape.png", "a/b.png", "..", ""] {
            let err = storage.exists(name).await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidName(_)), "{name}");
        }
    }

    #[tokio::test]
    async fn test_ensure_root_creates_nested_dir() {
        let dir = TestUploadDir::new();
        let storage = LocalImageStorage::new(dir.path().join("public").join("upload"));

        storage.ensure_root().await.unwrap();
        assert!(storage.root().is_dir());
    }
}
