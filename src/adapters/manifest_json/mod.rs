// JSON manifest adapter - Manifest persistence with backups and atomic rewrites

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// JSON manifest store
pub struct JsonManifestStore {
    backup: bool,
}

impl JsonManifestStore {
    /// Create new manifest store; `backup` keeps a `.backup` copy before each rewrite
    pub fn new(backup: bool) -> Self {
        Self { backup }
    }

    /// Path of the backup copy for `path`
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".backup");
        PathBuf::from(name)
    }

    fn write_atomic(content: &str, path: &Path) -> Result<(), DomainError> {
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp_file = tempfile::Builder::new()
            .prefix(".manifest")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| DomainError::io(dir, e))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| DomainError::io(temp_file.path(), e))?;
        // Keep the mode of the file being replaced
        if let Ok(metadata) = std::fs::metadata(path) {
            temp_file
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| DomainError::io(temp_file.path(), e))?;
        }
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| DomainError::io(temp_file.path(), e))?;

        temp_file
            .persist(path)
            .map_err(|e| DomainError::io(path, e.error))?;
        Ok(())
    }
}

#[async_trait]
impl ManifestStorePort for JsonManifestStore {
    async fn load(&self, path: &Path) -> Result<Manifest, DomainError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::io(path, e))?;
        let manifest = Manifest::from_json_str(&content).map_err(|e| match e {
            DomainError::Parse(message) => {
                DomainError::Parse(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        debug!(
            manifest = %path.display(),
            entries = manifest.entries.len(),
            clips = manifest.clip_count(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    async fn load_or_default(&self, path: &Path) -> Result<Manifest, DomainError> {
        match tokio::fs::metadata(path).await {
            Ok(_) => self.load(path).await,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Manifest {} does not exist, starting a new one", path.display());
                Ok(Manifest::new())
            }
            Err(e) => Err(DomainError::io(path, e)),
        }
    }

    async fn save(&self, manifest: &Manifest, path: &Path) -> Result<(), DomainError> {
        let content = manifest.to_json_string()?;

        if self.backup && tokio::fs::metadata(path).await.is_ok() {
            let backup_path = Self::backup_path(path);
            tokio::fs::copy(path, &backup_path)
                .await
                .map_err(|e| DomainError::io(&backup_path, e))?;
            debug!("Backed up manifest to {}", backup_path.display());
        }

        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::write_atomic(&content, &target))
            .await
            .map_err(|e| DomainError::FsFail(format!("Manifest write task failed: {}", e)))??;
        info!("Saved manifest {}", path.display());
        Ok(())
    }
}
