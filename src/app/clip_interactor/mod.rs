// Clip interactor - Reconciles the manifest against the output directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the `clip` use case
pub struct ClipInteractor {
    transcode_port: Arc<dyn TranscodePort>,
    checksum_port: Arc<dyn ChecksumPort>,
    fs_port: Arc<dyn FsPort>,
    store: Arc<dyn ManifestStorePort>,
    progress: Arc<dyn ProgressPort>,
}

impl ClipInteractor {
    /// Create new clip interactor with injected ports
    pub fn new(
        transcode_port: Arc<dyn TranscodePort>,
        checksum_port: Arc<dyn ChecksumPort>,
        fs_port: Arc<dyn FsPort>,
        store: Arc<dyn ManifestStorePort>,
        progress: Arc<dyn ProgressPort>,
    ) -> Self {
        Self {
            transcode_port,
            checksum_port,
            fs_port,
            store,
            progress,
        }
    }

    /// Generate every missing or stale clip of the manifest
    ///
    /// Errors returned here are fatal and happen before any clip is touched.
    /// Per-clip failures are part of the report instead.
    pub async fn execute(&self, request: ClipRequest) -> Result<ClipReport, DomainError> {
        let mut manifest = self.store.load(&request.manifest_path).await?;
        self.prepare(&request).await?;

        if request.overwrite {
            warn!("Existing clips whose checksum does not match will be overwritten");
        }
        if manifest.clip_count() == 0 {
            warn!("Manifest {} has no clips", request.manifest_path.display());
        }

        let claimants = ClipNamer::first_claimants(&manifest);
        let mut outcomes = Vec::with_capacity(manifest.clip_count());
        let mut checksums_changed = false;

        self.progress
            .start("Processing clips", manifest.clip_count() as u64);
        for entry in manifest.entries.iter_mut() {
            let source = request.input_dir.join(&entry.original);
            let source_state = self
                .fs_port
                .file_exists(&source)
                .await
                .map_err(|e| e.to_string());

            for (clip_index, clip) in entry.clips.iter_mut().enumerate() {
                let output_name = ClipNamer::name_for(&entry.original, clip_index).ok();

                let checked =
                    Self::check_clip(&claimants, &entry.original, clip_index, &source, &source_state);
                let status = match checked {
                    Err(e) => ClipStatus::Failed(e),
                    Ok(()) => match self
                        .reconcile_clip(&source, &entry.original, clip_index, clip, &request)
                        .await
                    {
                        Ok(status) => status,
                        Err(e) => ClipStatus::Failed(e),
                    },
                };

                if matches!(
                    status,
                    ClipStatus::Generated { .. } | ClipStatus::Regenerated { .. }
                ) {
                    checksums_changed = true;
                }
                if let ClipStatus::Failed(e) = &status {
                    error!(
                        original = %entry.original,
                        clip_index,
                        "Clip failed: {}",
                        e
                    );
                }

                self.progress
                    .advance(output_name.as_deref().unwrap_or(&entry.original));
                outcomes.push(ClipOutcome {
                    original: entry.original.clone(),
                    clip_index,
                    output_name,
                    status,
                });
            }
        }
        self.progress.finish();

        let manifest_saved = checksums_changed && !request.dry_run;
        if manifest_saved {
            self.store.save(&manifest, &request.manifest_path).await?;
        }

        let report = ClipReport {
            outcomes,
            manifest_saved,
        };
        let summary = report.summary();
        info!(
            generated = summary.generated,
            skipped = summary.skipped,
            planned = summary.planned,
            failed = summary.failed,
            "Clip run finished"
        );
        Ok(report)
    }

    /// Fatal checks run before the batch starts
    async fn prepare(&self, request: &ClipRequest) -> Result<(), DomainError> {
        if !self.fs_port.directory_exists(&request.input_dir).await? {
            return Err(DomainError::FsFail(format!(
                "Input directory does not exist: {}",
                request.input_dir.display()
            )));
        }

        if request.dry_run {
            info!("Dry run: no files will be created or modified");
            return Ok(());
        }

        self.fs_port.create_directory(&request.output_dir).await?;
        if !self
            .fs_port
            .can_write_to_directory(&request.output_dir)
            .await?
        {
            return Err(DomainError::FsFail(format!(
                "Output directory is not writable: {}",
                request.output_dir.display()
            )));
        }

        self.transcode_port.check_available().await
    }

    /// Name collisions and unusable sources fail a clip before it is touched
    fn check_clip(
        claimants: &HashMap<String, String>,
        original: &str,
        clip_index: usize,
        source: &Path,
        source_state: &Result<bool, String>,
    ) -> Result<(), DomainError> {
        let name = ClipNamer::name_for(original, clip_index)?;
        ClipNamer::check_claim(claimants, original, &name)?;

        match source_state {
            Ok(true) => Ok(()),
            Ok(false) => Err(DomainError::MissingSource(source.display().to_string())),
            Err(message) => Err(DomainError::FsFail(message.clone())),
        }
    }

    /// Decide and carry out the action for one clip
    async fn reconcile_clip(
        &self,
        source: &Path,
        original: &str,
        clip_index: usize,
        clip: &mut ClipSpec,
        request: &ClipRequest,
    ) -> Result<ClipStatus, DomainError> {
        let output_path = request
            .output_dir
            .join(ClipNamer::name_for(original, clip_index)?);
        let range = clip.range()?;

        let exists = self.fs_port.file_exists(&output_path).await?;
        let recorded = clip.sha256_checksum.as_deref();
        let current = if ReconcilePolicy::needs_current_digest(exists, request.overwrite, recorded)
        {
            Some(self.checksum_port.digest(&output_path).await?)
        } else {
            None
        };

        let action =
            ReconcilePolicy::decide(exists, request.overwrite, recorded, current.as_deref());
        match action {
            ClipAction::Skip(reason) => {
                info!("Skipping {} ({})", output_path.display(), reason);
                return Ok(ClipStatus::Skipped(reason));
            }
            ClipAction::Regenerate => {
                warn!(
                    "Checksum mismatch for {}. Expected {} Found {}",
                    output_path.display(),
                    recorded.unwrap_or_default(),
                    current.as_deref().unwrap_or_default()
                );
            }
            ClipAction::Generate => {}
        }

        if request.dry_run {
            info!(
                "Dry run: would clip {} [{} -> {}] into {}",
                source.display(),
                range.start,
                range.end,
                output_path.display()
            );
            return Ok(ClipStatus::Planned);
        }

        info!("Creating clip {}", output_path.display());
        let checksum = self.generate(source, &range, &output_path).await?;
        clip.sha256_checksum = Some(checksum.clone());

        Ok(match action {
            ClipAction::Regenerate => ClipStatus::Regenerated { checksum },
            _ => ClipStatus::Generated { checksum },
        })
    }

    /// Transcode into a staging file, move it into place, then digest the result
    async fn generate(
        &self,
        source: &Path,
        range: &ClipRange,
        output_path: &Path,
    ) -> Result<String, DomainError> {
        let staging = self.fs_port.create_staging_file(output_path).await?;
        self.transcode_port
            .extract(source, range, staging.path())
            .await?;
        self.fs_port
            .commit_staging_file(staging, output_path)
            .await?;

        self.checksum_port.digest(output_path).await
    }
}

/// Request for a clip run
#[derive(Debug, Clone)]
pub struct ClipRequest {
    pub manifest_path: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub overwrite: bool,
    pub dry_run: bool,
}

/// What happened to one clip
#[derive(Debug)]
pub enum ClipStatus {
    Generated { checksum: String },
    Regenerated { checksum: String },
    Skipped(SkipReason),
    /// Would have been generated in a real run
    Planned,
    Failed(DomainError),
}

/// Outcome for the clip at `clip_index` of `original`
#[derive(Debug)]
pub struct ClipOutcome {
    pub original: String,
    pub clip_index: usize,
    pub output_name: Option<String>,
    pub status: ClipStatus,
}

/// Counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipSummary {
    pub generated: usize,
    pub skipped: usize,
    pub planned: usize,
    pub failed: usize,
}

/// Result of a clip run
#[derive(Debug)]
pub struct ClipReport {
    pub outcomes: Vec<ClipOutcome>,
    /// Whether recorded checksums were written back
    pub manifest_saved: bool,
}

impl ClipReport {
    /// Aggregate the per-clip outcomes
    pub fn summary(&self) -> ClipSummary {
        self.outcomes
            .iter()
            .fold(ClipSummary::default(), |mut summary, outcome| {
                match outcome.status {
                    ClipStatus::Generated { .. } | ClipStatus::Regenerated { .. } => {
                        summary.generated += 1
                    }
                    ClipStatus::Skipped(_) => summary.skipped += 1,
                    ClipStatus::Planned => summary.planned += 1,
                    ClipStatus::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| matches!(outcome.status, ClipStatus::Failed(_)))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ClipOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, ClipStatus::Failed(_)))
    }
}
