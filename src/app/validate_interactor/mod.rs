// Validate interactor - Checks manifest structure and recorded checksums

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the `validate` use case
pub struct ValidateInteractor {
    checksum_port: Arc<dyn ChecksumPort>,
    fs_port: Arc<dyn FsPort>,
    store: Arc<dyn ManifestStorePort>,
    progress: Arc<dyn ProgressPort>,
}

impl ValidateInteractor {
    /// Create new validate interactor with injected ports
    pub fn new(
        checksum_port: Arc<dyn ChecksumPort>,
        fs_port: Arc<dyn FsPort>,
        store: Arc<dyn ManifestStorePort>,
        progress: Arc<dyn ProgressPort>,
    ) -> Self {
        Self {
            checksum_port,
            fs_port,
            store,
            progress,
        }
    }

    /// Execute validation; never writes any file
    pub async fn execute(&self, request: ValidateRequest) -> Result<ValidateReport, DomainError> {
        info!(
            "Validating manifest {}",
            request.manifest_path.display()
        );
        let manifest = self.store.load(&request.manifest_path).await?;

        let mut issues = Self::check_structure(&manifest);
        issues.extend(self.check_sources(&manifest, &request).await);

        let clips = match &request.output_dir {
            Some(output_dir) => self.verify_checksums(&manifest, output_dir).await,
            None => {
                info!("No output directory given, skipping checksum validation");
                Vec::new()
            }
        };

        let report = ValidateReport { issues, clips };
        if report.is_valid() {
            info!("Manifest is valid");
        } else {
            warn!(
                issues = report.issues.len(),
                failed_clips = report.failed_clips(),
                "Manifest validation failed"
            );
        }
        Ok(report)
    }

    /// Clip lists, timecodes and output name collisions
    fn check_structure(manifest: &Manifest) -> Vec<StructuralIssue> {
        let mut issues = Vec::new();
        let claimants = ClipNamer::first_claimants(manifest);

        for entry in &manifest.entries {
            if entry.clips.is_empty() {
                issues.push(StructuralIssue {
                    original: entry.original.clone(),
                    clip_index: None,
                    message: "entry has no clips".to_string(),
                });
            }

            for (clip_index, clip) in entry.clips.iter().enumerate() {
                if let Err(e) = clip.range() {
                    issues.push(StructuralIssue {
                        original: entry.original.clone(),
                        clip_index: Some(clip_index),
                        message: e.to_string(),
                    });
                }

                let claim = ClipNamer::name_for(&entry.original, clip_index).and_then(|name| {
                    ClipNamer::check_claim(&claimants, &entry.original, &name)
                });
                if let Err(e) = claim {
                    issues.push(StructuralIssue {
                        original: entry.original.clone(),
                        clip_index: Some(clip_index),
                        message: e.to_string(),
                    });
                }
            }
        }

        issues
    }

    /// Every original must exist under the input directory
    async fn check_sources(
        &self,
        manifest: &Manifest,
        request: &ValidateRequest,
    ) -> Vec<StructuralIssue> {
        let mut issues = Vec::new();
        for entry in &manifest.entries {
            let source = request.input_dir.join(&entry.original);
            let message = match self.fs_port.file_exists(&source).await {
                Ok(true) => continue,
                Ok(false) => DomainError::MissingSource(source.display().to_string()).to_string(),
                Err(e) => e.to_string(),
            };
            issues.push(StructuralIssue {
                original: entry.original.clone(),
                clip_index: None,
                message,
            });
        }
        issues
    }

    /// Compare recorded checksums with the files in `output_dir`
    async fn verify_checksums(
        &self,
        manifest: &Manifest,
        output_dir: &std::path::Path,
    ) -> Vec<ClipVerdict> {
        let mut verdicts = Vec::with_capacity(manifest.clip_count());

        self.progress
            .start("Verifying checksums", manifest.clip_count() as u64);
        for entry in &manifest.entries {
            for (clip_index, clip) in entry.clips.iter().enumerate() {
                let output_name = match ClipNamer::name_for(&entry.original, clip_index) {
                    Ok(name) => name,
                    // Already reported as a structural issue
                    Err(_) => {
                        self.progress.advance(&entry.original);
                        continue;
                    }
                };

                let status = match clip.sha256_checksum.as_deref() {
                    None => VerifyStatus::Unverified,
                    Some(expected) => {
                        self.verify_clip(&output_dir.join(&output_name), expected)
                            .await
                    }
                };
                if status.is_failure() {
                    warn!("{}: {}", output_name, status.detail());
                }

                self.progress.advance(&output_name);
                verdicts.push(ClipVerdict {
                    original: entry.original.clone(),
                    clip_index,
                    output_name,
                    status,
                });
            }
        }
        self.progress.finish();

        verdicts
    }

    async fn verify_clip(&self, output_path: &std::path::Path, expected: &str) -> VerifyStatus {
        match self.fs_port.file_exists(output_path).await {
            Ok(true) => {}
            Ok(false) => return VerifyStatus::Missing,
            Err(e) => return VerifyStatus::Unreadable(e.to_string()),
        }

        match self.checksum_port.digest(output_path).await {
            Ok(actual) if ReconcilePolicy::checksums_match(expected, &actual) => VerifyStatus::Pass,
            Ok(actual) => VerifyStatus::Mismatch {
                expected: expected.to_string(),
                actual,
            },
            Err(e) => VerifyStatus::Unreadable(e.to_string()),
        }
    }
}

/// Request for validation
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub manifest_path: PathBuf,
    pub input_dir: PathBuf,
    /// When absent only structural checks run
    pub output_dir: Option<PathBuf>,
}

/// Problem with the manifest itself or its sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralIssue {
    pub original: String,
    pub clip_index: Option<usize>,
    pub message: String,
}

/// Checksum verdict for one clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyStatus {
    Pass,
    /// No checksum recorded yet
    Unverified,
    Mismatch { expected: String, actual: String },
    Missing,
    Unreadable(String),
}

impl VerifyStatus {
    pub fn is_failure(&self) -> bool {
        !matches!(self, VerifyStatus::Pass | VerifyStatus::Unverified)
    }

    /// Human-readable explanation
    pub fn detail(&self) -> String {
        match self {
            VerifyStatus::Pass => "checksum matches".to_string(),
            VerifyStatus::Unverified => "no recorded checksum".to_string(),
            VerifyStatus::Mismatch { expected, actual } => {
                format!("checksum mismatch, expected {} got {}", expected, actual)
            }
            VerifyStatus::Missing => "output file missing".to_string(),
            VerifyStatus::Unreadable(message) => message.clone(),
        }
    }
}

impl fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyStatus::Pass => write!(f, "PASS"),
            VerifyStatus::Unverified => write!(f, "UNVERIFIED"),
            _ => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipVerdict {
    pub original: String,
    pub clip_index: usize,
    pub output_name: String,
    pub status: VerifyStatus,
}

/// Result of a validation run
#[derive(Debug, Clone, Default)]
pub struct ValidateReport {
    pub issues: Vec<StructuralIssue>,
    pub clips: Vec<ClipVerdict>,
}

impl ValidateReport {
    pub fn failed_clips(&self) -> usize {
        self.clips
            .iter()
            .filter(|verdict| verdict.status.is_failure())
            .count()
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty() && self.failed_clips() == 0
    }

    /// Verdict for a given clip
    pub fn verdict(&self, original: &str, clip_index: usize) -> Option<&VerifyStatus> {
        self.clips
            .iter()
            .find(|verdict| verdict.original == original && verdict.clip_index == clip_index)
            .map(|verdict| &verdict.status)
    }
}
