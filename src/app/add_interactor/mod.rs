// Add interactor - Appends a clip definition to a manifest

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the `add` use case
pub struct AddInteractor {
    store: Arc<dyn ManifestStorePort>,
}

impl AddInteractor {
    /// Create new add interactor with injected ports
    pub fn new(store: Arc<dyn ManifestStorePort>) -> Self {
        Self { store }
    }

    /// Append the clip and write the manifest back
    pub async fn execute(&self, request: AddRequest) -> Result<AddResponse, DomainError> {
        let mut manifest = self.store.load_or_default(&request.manifest_path).await?;

        let outcome = manifest.add_clip(&request.filename, &request.start, &request.end)?;
        let clip_index = match outcome {
            AddOutcome::Added { clip_index, .. } | AddOutcome::Duplicate { clip_index } => {
                clip_index
            }
        };
        // Unnameable originals are rejected before anything is written
        let output_name = ClipNamer::name_for(&request.filename, clip_index)?;

        match outcome {
            AddOutcome::Added { entry_created, .. } => {
                self.store.save(&manifest, &request.manifest_path).await?;
                info!(
                    original = %request.filename,
                    clip_index,
                    entry_created,
                    "Added clip {} -> {}",
                    request.start,
                    request.end
                );
            }
            AddOutcome::Duplicate { .. } => {
                warn!(
                    "Clip {} -> {} already exists for {} at index {}, manifest unchanged",
                    request.start, request.end, request.filename, clip_index
                );
            }
        }

        Ok(AddResponse {
            outcome,
            output_name,
        })
    }
}

/// Request for appending a clip
#[derive(Debug, Clone)]
pub struct AddRequest {
    pub manifest_path: PathBuf,
    pub filename: String,
    pub start: String,
    pub end: String,
}

/// Response from appending a clip
#[derive(Debug, Clone)]
pub struct AddResponse {
    pub outcome: AddOutcome,
    /// Output filename the clip will be generated under
    pub output_name: String,
}
