// Local filesystem adapter - File system operations backed by tokio::fs

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::metadata(file_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError> {
        Ok(tokio::fs::metadata(dir_path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(dir_path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                dir_path.display(),
                e
            ))
        })
    }

    async fn write_file(&self, file_path: &Path, contents: &[u8]) -> Result<(), DomainError> {
        tokio::fs::write(file_path, contents).await.map_err(|e| {
            DomainError::FsFail(format!("Failed to write {}: {}", file_path.display(), e))
        })
    }

    async fn remove_file(&self, file_path: &Path) -> Result<(), DomainError> {
        tokio::fs::remove_file(file_path).await.map_err(|e| {
            DomainError::FsFail(format!("Failed to remove {}: {}", file_path.display(), e))
        })
    }

    async fn remove_empty_directory(&self, dir_path: &Path) -> Result<bool, DomainError> {
        let fs_error = |e: std::io::Error| {
            DomainError::FsFail(format!(
                "Failed to remove directory {}: {}",
                dir_path.display(),
                e
            ))
        };

        let mut entries = match tokio::fs::read_dir(dir_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(fs_error(e)),
        };
        if entries.next_entry().await.map_err(fs_error)?.is_some() {
            return Ok(false);
        }

        tokio::fs::remove_dir(dir_path).await.map_err(fs_error)?;
        Ok(true)
    }
}
