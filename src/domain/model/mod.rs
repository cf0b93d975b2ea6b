// Domain models - Manifest, clip specs and timecodes

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::errors::DomainError;

/// Checksum placeholder older manifests used for "not computed yet"
pub const LEGACY_UNKNOWN_CHECKSUM: &str = "none";

/// Position inside a source video, written as `HH:MM:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode {
    seconds: u32,
}

impl Timecode {
    /// Create a new Timecode from hours, minutes and seconds
    pub fn from_components(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            seconds: hours * 3600 + minutes * 60 + seconds,
        }
    }

    /// Parse a strict `HH:MM:SS` timecode
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidTimecode(time_str.to_string());

        let parts: Vec<&str> = time_str.split(':').collect();
        if parts.len() != 3
            || parts
                .iter()
                .any(|part| part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(invalid());
        }

        let hours = parts[0].parse::<u32>().map_err(|_| invalid())?;
        let minutes = parts[1].parse::<u32>().map_err(|_| invalid())?;
        let seconds = parts[2].parse::<u32>().map_err(|_| invalid())?;

        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        Ok(Self::from_components(hours, minutes, seconds))
    }

    /// Total seconds from the start of the video
    pub fn as_seconds(&self) -> u32 {
        self.seconds
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl FromStr for Timecode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Validated clip range, start inclusive and end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRange {
    pub start: Timecode,
    pub end: Timecode,
}

impl ClipRange {
    /// Create a new range, rejecting empty or reversed ones
    pub fn new(start: Timecode, end: Timecode) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse both timecodes and build the range
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Self::new(Timecode::parse(start)?, Timecode::parse(end)?)
    }

    /// Clip length in seconds
    pub fn duration_seconds(&self) -> u32 {
        self.end.as_seconds() - self.start.as_seconds()
    }
}

/// One clip to cut from an original video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipSpec {
    pub start: String,
    pub end: String,
    #[serde(
        default,
        deserialize_with = "deserialize_checksum",
        skip_serializing_if = "Option::is_none"
    )]
    pub sha256_checksum: Option<String>,
}

impl ClipSpec {
    /// Create a clip spec without a recorded checksum
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            sha256_checksum: None,
        }
    }

    /// Validated time range of this clip
    pub fn range(&self) -> Result<ClipRange, DomainError> {
        ClipRange::parse(&self.start, &self.end)
    }

    /// Whether this clip covers exactly the given timecodes
    fn covers(&self, start: &str, end: &str) -> bool {
        self.start == start && self.end == end
    }
}

fn deserialize_checksum<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|checksum| !checksum.is_empty() && checksum != LEGACY_UNKNOWN_CHECKSUM))
}

/// Original video and the ordered clips to extract from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the input directory
    pub original: String,
    pub clips: Vec<ClipSpec>,
}

impl ManifestEntry {
    /// Create an entry without clips
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            clips: Vec::new(),
        }
    }
}

/// Result of appending a clip to the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Clip appended at `clip_index`
    Added {
        clip_index: usize,
        entry_created: bool,
    },
    /// Identical range already present at `clip_index`
    Duplicate { clip_index: usize },
}

/// The whole manifest document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest document
    pub fn from_json_str(content: &str) -> Result<Self, DomainError> {
        let manifest: Manifest =
            serde_json::from_str(content).map_err(|e| DomainError::Parse(e.to_string()))?;
        manifest.check_keys()?;
        Ok(manifest)
    }

    /// Serialize with 4-space indentation and a trailing newline
    pub fn to_json_string(&self) -> Result<String, DomainError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| DomainError::Parse(format!("Failed to serialize manifest: {}", e)))?;
        buffer.push(b'\n');

        String::from_utf8(buffer)
            .map_err(|e| DomainError::Parse(format!("Serialized manifest is not UTF-8: {}", e)))
    }

    /// `original` must be non-empty and unique
    fn check_keys(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.original.trim().is_empty() {
                return Err(DomainError::Parse(
                    "Entry with empty 'original' filename".to_string(),
                ));
            }
            if !seen.insert(entry.original.as_str()) {
                return Err(DomainError::Parse(format!(
                    "Duplicate entry for original '{}'",
                    entry.original
                )));
            }
        }
        Ok(())
    }

    /// Find the entry for an original filename
    pub fn entry(&self, original: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|entry| entry.original == original)
    }

    /// Append a clip to the entry for `filename`, creating the entry at the end if needed
    pub fn add_clip(
        &mut self,
        filename: &str,
        start: &str,
        end: &str,
    ) -> Result<AddOutcome, DomainError> {
        if filename.trim().is_empty() {
            return Err(DomainError::BadArgs("Filename cannot be empty".to_string()));
        }
        ClipRange::parse(start, end)?;

        let position = self
            .entries
            .iter()
            .position(|entry| entry.original == filename);
        let entry_created = position.is_none();
        let index = match position {
            Some(index) => index,
            None => {
                self.entries.push(ManifestEntry::new(filename));
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        if let Some(clip_index) = entry.clips.iter().position(|clip| clip.covers(start, end)) {
            return Ok(AddOutcome::Duplicate { clip_index });
        }

        entry.clips.push(ClipSpec::new(start, end));
        Ok(AddOutcome::Added {
            clip_index: entry.clips.len() - 1,
            entry_created,
        })
    }

    /// Total number of clips over all entries
    pub fn clip_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.clips.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;
