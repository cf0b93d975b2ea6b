//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// JSON file containing clip timestamps
    #[arg(long)]
    pub manifest: PathBuf,

    /// Name of the file relative to the input directory
    #[arg(long)]
    pub filename: String,

    /// Start timestamp HH:MM:SS
    #[arg(long)]
    pub start: String,

    /// End timestamp HH:MM:SS
    #[arg(long)]
    pub end: String,

    /// Do not save a *.backup of the manifest before editing
    #[arg(long)]
    pub no_backup: bool,
}

/// Arguments for the clip command
#[derive(Args, Debug)]
pub struct ClipArgs {
    /// JSON file containing clip timestamps
    #[arg(long)]
    pub manifest: PathBuf,

    /// Directory holding the original files
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Output directory for clips, created if missing
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Regenerate existing clips whose checksum differs from the manifest
    #[arg(long)]
    pub overwrite: bool,

    /// Only print, do not modify or create files
    #[arg(long, alias = "dry-run")]
    pub dryrun: bool,

    /// Do not save a *.backup of the manifest before editing
    #[arg(long)]
    pub no_backup: bool,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON file containing clip timestamps
    #[arg(long)]
    pub manifest: PathBuf,

    /// Directory holding the original files
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Output directory to compare clip checksums against
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}
