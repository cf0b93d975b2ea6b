//! clipbatch library
//!
//! Manifest-driven batch video clipping: a JSON manifest lists source videos
//! and time ranges, clips are cut with an external transcoder and their
//! SHA-256 checksums recorded back into the manifest for later validation.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{AddOutcome, ClipRange, ClipSpec, Manifest, ManifestEntry, Timecode};
pub use domain::rules::{ClipAction, ClipNamer, ReconcilePolicy, SkipReason};
