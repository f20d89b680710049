pub mod optimizer;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tokio::fs;

use crate::error::{AppError, Result};

/// Allowed image extensions
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Maximum upload size (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// An image file received from a multipart form, not yet stored.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Lowercased extension, checked against the allowlist.
    pub fn extension(&self) -> Result<String> {
        let ext = Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| AppError::Validation("Invalid filename".to_string()))?;

        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(AppError::Validation(format!(
                "Invalid file type. Allowed: {}",
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        Ok(ext)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(AppError::Validation("Empty file".to_string()));
        }
        if self.bytes.len() > MAX_FILE_SIZE {
            return Err(AppError::Validation("File too large (max 10 MB)".to_string()));
        }
        self.extension().map(|_| ())
    }
}

/// Relative storage path for an upload: `{prefix}/{year}/{slug}-{8 hex chars}.{ext}`.
/// The random suffix keeps replacement uploads from colliding with the
/// file they replace.
pub fn storage_path(prefix: &str, name_slug: &str, ext: &str) -> String {
    let suffix = hex::encode(rand::random::<[u8; 4]>());
    format!(
        "{}/{}/{}-{}.{}",
        prefix,
        Utc::now().year(),
        name_slug,
        suffix,
        ext
    )
}

/// Blob storage for uploaded photos. Paths are relative; the store owns
/// the mapping onto its backing medium.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;
    async fn read(&self, path: &str) -> Result<Vec<u8>>;
    /// Delete-if-exists; a missing file is a no-op, not an error.
    async fn delete(&self, path: &str) -> Result<()>;
    async fn exists(&self, path: &str) -> bool;
}

/// Filesystem-backed store rooted at the configured media directory.
pub struct FsPhotoStore {
    root: PathBuf,
}

impl FsPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.full_path(path);

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Internal(format!("Failed to create media directory: {}", e))
            })?;
        }

        fs::write(&full, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {}", e)))
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(self.full_path(path))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read file: {}", e)))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let full = self.full_path(path);
        if fs::try_exists(&full).await.unwrap_or(false) {
            fs::remove_file(&full)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to delete file: {}", e)))?;
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        fs::try_exists(self.full_path(path)).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_path_shape() {
        let path = storage_path("team", "jane-doe", "jpg");
        let parts: Vec<&str> = path.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "team");
        let file = parts[2];
        assert!(file.starts_with("jane-doe-"));
        assert!(file.ends_with(".jpg"));
        // slug + '-' + 8 hex chars + ".jpg"
        assert_eq!(file.len(), "jane-doe-".len() + 8 + 4);
    }

    #[test]
    fn upload_extension_allowlist() {
        let ok = PhotoUpload::new("portrait.JPG", vec![1]);
        assert_eq!(ok.extension().unwrap(), "jpg");

        let bad = PhotoUpload::new("script.svg", vec![1]);
        assert!(bad.extension().is_err());

        let none = PhotoUpload::new("noext", vec![1]);
        assert!(none.extension().is_err());
    }
}
