// Local filesystem adapter - File system operations

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new filesystem adapter
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
            Err(e) => Err(DomainError::io(file_path, e)),
        }
    }

    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::metadata(dir_path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::io(dir_path, e)),
        }
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

    async fn can_write_to_directory(&self, dir_path: &Path) -> Result<bool, DomainError> {
        if !self.directory_exists(dir_path).await? {
            return Ok(false);
        }

        // Try to create a probe file, removed again on drop
        match tempfile::Builder::new()
            .prefix(".clipbatch_probe")
            .tempfile_in(dir_path)
        {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    async fn create_staging_file(&self, final_path: &Path) -> Result<StagingFile, DomainError> {
        let dir = final_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let stem = final_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        // ffmpeg picks the container from the extension
        let suffix = final_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let temp_file = tempfile::Builder::new()
            .prefix(&format!(".{}.", stem))
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| {
                DomainError::FsFail(format!(
                    "Failed to create staging file in {}: {}",
                    dir.display(),
                    e
                ))
            })?;

        Ok(StagingFile::new(temp_file.into_temp_path()))
    }

    async fn commit_staging_file(
        &self,
        staging: StagingFile,
        final_path: &Path,
    ) -> Result<(), DomainError> {
        staging.persist(final_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_and_directory_checks() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.mp4");
        std::fs::write(&file, b"x").unwrap();
        let fs = LocalFsAdapter::new();

        assert!(fs.file_exists(&file).await.unwrap());
        assert!(!fs.file_exists(temp_dir.path()).await.unwrap());
        assert!(!fs.file_exists(&temp_dir.path().join("b.mp4")).await.unwrap());
        assert!(fs.directory_exists(temp_dir.path()).await.unwrap());
        assert!(!fs.directory_exists(&file).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_directory_and_writability() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("clips");
        let fs = LocalFsAdapter::new();

        assert!(!fs.can_write_to_directory(&nested).await.unwrap());
        fs.create_directory(&nested).await.unwrap();
        assert!(fs.can_write_to_directory(&nested).await.unwrap());
        assert_eq!(std::fs::read_dir(&nested).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_staging_file_keeps_extension_and_commits() {
        let temp_dir = TempDir::new().unwrap();
        let final_path = temp_dir.path().join("videoA_0.mp4");
        let fs = LocalFsAdapter::new();

        let staging = fs.create_staging_file(&final_path).await.unwrap();
        let staging_path = staging.path().to_path_buf();
        assert_eq!(staging_path.parent(), Some(temp_dir.path()));
        assert!(staging_path.to_string_lossy().ends_with(".mp4"));
        assert_ne!(staging_path, final_path);

        std::fs::write(&staging_path, b"clip").unwrap();
        fs.commit_staging_file(staging, &final_path).await.unwrap();

        assert_eq!(std::fs::read(&final_path).unwrap(), b"clip");
        assert!(!staging_path.exists());
    }

    #[tokio::test]
    async fn test_dropped_staging_file_is_removed() {
        let temp_dir = TempDir::new().unwrap();
        let fs = LocalFsAdapter::new();

        let staging = fs
            .create_staging_file(&temp_dir.path().join("videoA_0.mp4"))
            .await
            .unwrap();
        let staging_path = staging.path().to_path_buf();
        std::fs::write(&staging_path, b"partial").unwrap();
        drop(staging);

        assert!(!staging_path.exists());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
