// Domain rules - Output naming and reconciliation policy

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Business rules for clip output filenames
pub struct ClipNamer;

impl ClipNamer {
    /// Output filename for the clip at `clip_index` of `original`: `{stem}_{index}{ext}`
    ///
    /// Directory components of `original` are dropped, outputs are written flat.
    pub fn name_for(original: &str, clip_index: usize) -> Result<String, DomainError> {
        let path = Path::new(original);
        let stem = path
            .file_stem()
            .ok_or_else(|| {
                DomainError::BadArgs(format!("Cannot derive a clip name from '{}'", original))
            })?
            .to_string_lossy();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Ok(format!("{}_{}{}", stem, clip_index, extension))
    }

    /// First original in manifest order claiming each output name
    ///
    /// Clips of any other original mapping to the same name collide with it.
    pub fn first_claimants(manifest: &Manifest) -> HashMap<String, String> {
        let mut claimants = HashMap::new();
        for entry in &manifest.entries {
            for clip_index in 0..entry.clips.len() {
                if let Ok(name) = Self::name_for(&entry.original, clip_index) {
                    claimants
                        .entry(name)
                        .or_insert_with(|| entry.original.clone());
                }
            }
        }
        claimants
    }

    /// Error for a clip of `original` whose output name belongs to another original
    pub fn check_claim(
        claimants: &HashMap<String, String>,
        original: &str,
        name: &str,
    ) -> Result<(), DomainError> {
        match claimants.get(name) {
            Some(owner) if owner != original => Err(DomainError::BadArgs(format!(
                "output name {} collides with a clip of {}",
                name, owner
            ))),
            _ => Ok(()),
        }
    }
}

/// Why an existing output was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Output exists and overwriting is disabled
    AlreadyExists,
    /// Output digest equals the recorded checksum
    ChecksumMatch,
    /// Output exists but the manifest has no checksum to compare against
    Unverifiable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyExists => write!(f, "already exists"),
            SkipReason::ChecksumMatch => write!(f, "checksum matches"),
            SkipReason::Unverifiable => write!(f, "exists, no recorded checksum"),
        }
    }
}

/// Action to take for a single clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipAction {
    Generate,
    Regenerate,
    Skip(SkipReason),
}

/// Business rules deciding whether a clip output must be (re)generated
pub struct ReconcilePolicy;

impl ReconcilePolicy {
    /// Whether the existing output has to be hashed before deciding
    pub fn needs_current_digest(exists: bool, overwrite: bool, recorded: Option<&str>) -> bool {
        exists && overwrite && recorded.is_some()
    }

    /// Decide the action for one clip
    ///
    /// `current` is the digest of the existing output, only consulted when
    /// [`ReconcilePolicy::needs_current_digest`] holds.
    pub fn decide(
        exists: bool,
        overwrite: bool,
        recorded: Option<&str>,
        current: Option<&str>,
    ) -> ClipAction {
        if !exists {
            return ClipAction::Generate;
        }
        if !overwrite {
            return ClipAction::Skip(SkipReason::AlreadyExists);
        }

        match (recorded, current) {
            (None, _) => ClipAction::Skip(SkipReason::Unverifiable),
            (Some(recorded), Some(current)) if Self::checksums_match(recorded, current) => {
                ClipAction::Skip(SkipReason::ChecksumMatch)
            }
            _ => ClipAction::Regenerate,
        }
    }

    /// Hex digests compare case-insensitively
    pub fn checksums_match(recorded: &str, current: &str) -> bool {
        recorded.trim().eq_ignore_ascii_case(current.trim())
    }
}
