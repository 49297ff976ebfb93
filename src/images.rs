/**
 * Image Storage
 *
 * Contract and disk-backed implementation for post images. Handlers store
 * uploaded bytes and get back an opaque reference (`images/<file>`); the
 * same directory is served statically at `/images`.
 *
 * Release is best-effort everywhere it is used: `release_detached` runs it
 * as a background task whose only error channel is the log. A failed
 * release never fails the enclosing mutation.
 */

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

/// Errors from the image store.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("invalid image reference: {0}")]
    InvalidReference(String),
    #[error("image i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// An uploaded image as parsed out of a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Storage contract for post images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the bytes and return an opaque reference.
    async fn store(&self, bytes: Bytes, content_type: &str) -> Result<String, ImageError>;
    /// Release a previously stored image. Callers treat failure as non-fatal.
    async fn release(&self, reference: &str) -> Result<(), ImageError>;
}

/// Content types accepted for post images.
pub fn is_supported_type(content_type: &str) -> bool {
    extension_for(content_type).is_some()
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpg" | "image/jpeg" => Some("jpg"),
        _ => None,
    }
}

/// Disk-backed image store rooted at a single directory.
pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    /// Create the store, making sure the directory exists.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, ImageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn store(&self, bytes: Bytes, content_type: &str) -> Result<String, ImageError> {
        let ext = extension_for(content_type)
            .ok_or_else(|| ImageError::UnsupportedType(content_type.to_string()))?;

        let name = format!(
            "{}-{}.{}",
            Utc::now().format("%Y%m%dT%H%M%S%3f"),
            Uuid::new_v4(),
            ext
        );
        tokio::fs::write(self.dir.join(&name), &bytes).await?;

        Ok(format!("images/{name}"))
    }

    async fn release(&self, reference: &str) -> Result<(), ImageError> {
        let name = reference.strip_prefix("images/").unwrap_or(reference);
        // References are single flat file names; anything else never came
        // from this store.
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Err(ImageError::InvalidReference(reference.to_string()));
        }

        tokio::fs::remove_file(self.dir.join(name)).await?;
        Ok(())
    }
}

/// Fire-and-forget release of an image reference.
///
/// Spawned as a detached task; a failure is logged and swallowed so the
/// enclosing mutation never waits on, or fails because of, image cleanup.
pub fn release_detached(store: Arc<dyn ImageStore>, reference: String) {
    tokio::spawn(async move {
        if let Err(e) = store.release(&reference).await {
            tracing::warn!("Failed to release image {}: {}", reference, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> DiskImageStore {
        let dir = std::env::temp_dir().join(format!("feedcast-images-{}", Uuid::new_v4()));
        DiskImageStore::new(dir).await.unwrap()
    }

    #[tokio::test]
    async fn test_store_then_release() {
        let store = temp_store().await;

        let reference = store
            .store(Bytes::from_static(b"not-really-a-png"), "image/png")
            .await
            .unwrap();
        assert!(reference.starts_with("images/"));
        assert!(reference.ends_with(".png"));

        let name = reference.strip_prefix("images/").unwrap();
        assert!(store.dir().join(name).exists());

        store.release(&reference).await.unwrap();
        assert!(!store.dir().join(name).exists());
    }

    #[tokio::test]
    async fn test_unsupported_type_is_rejected() {
        let store = temp_store().await;
        let result = store
            .store(Bytes::from_static(b"<svg/>"), "image/svg+xml")
            .await;
        assert!(matches!(result, Err(ImageError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_release_rejects_traversal() {
        let store = temp_store().await;
        let result = store.release("images/../etc/passwd").await;
        assert!(matches!(result, Err(ImageError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_release_missing_file_is_an_error_for_the_log() {
        let store = temp_store().await;
        // The caller logs and swallows this; the store itself reports it.
        assert!(store.release("images/never-stored.png").await.is_err());
    }
}
