// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::TempPath;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for the external transcoder
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Check that the transcoder can be executed
    async fn check_available(&self) -> Result<(), DomainError>;

    /// Cut `range` out of `input` into `output`, replacing whatever is there
    async fn extract(
        &self,
        input: &Path,
        range: &ClipRange,
        output: &Path,
    ) -> Result<(), DomainError>;
}

/// Port for content digests
#[async_trait]
pub trait ChecksumPort: Send + Sync {
    /// Hex digest over the whole file content
    async fn digest(&self, file_path: &Path) -> Result<String, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Check if directory exists
    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Check write permissions for directory
    async fn can_write_to_directory(&self, dir_path: &Path) -> Result<bool, DomainError>;

    /// Reserve a hidden staging file next to `final_path`, keeping its extension
    async fn create_staging_file(&self, final_path: &Path) -> Result<StagingFile, DomainError>;

    /// Move a finished staging file onto its final path
    async fn commit_staging_file(
        &self,
        staging: StagingFile,
        final_path: &Path,
    ) -> Result<(), DomainError>;
}

/// Port for manifest persistence
#[async_trait]
pub trait ManifestStorePort: Send + Sync {
    /// Load a manifest, failing if it is absent or malformed
    async fn load(&self, path: &Path) -> Result<Manifest, DomainError>;

    /// Load a manifest, treating an absent file as an empty manifest
    async fn load_or_default(&self, path: &Path) -> Result<Manifest, DomainError>;

    /// Replace the manifest file with `manifest`
    async fn save(&self, manifest: &Manifest, path: &Path) -> Result<(), DomainError>;
}

/// Port for per-item batch progress
pub trait ProgressPort: Send + Sync {
    /// Begin a batch of `total` items, replacing any previous one
    fn start(&self, label: &str, total: u64);

    /// Mark one item done
    fn advance(&self, message: &str);

    /// End the current batch
    fn finish(&self);
}

/// Partial output written by the transcoder before it is committed
///
/// Dropping an uncommitted staging file deletes it.
#[derive(Debug)]
pub struct StagingFile {
    path: TempPath,
}

impl StagingFile {
    pub fn new(path: TempPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename onto `destination`, replacing an existing file
    pub fn persist(self, destination: &Path) -> Result<PathBuf, DomainError> {
        self.path.persist(destination).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move {} to {}: {}",
                e.path.display(),
                destination.display(),
                e.error
            ))
        })?;
        Ok(destination.to_path_buf())
    }
}
