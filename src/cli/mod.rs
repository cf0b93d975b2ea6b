//! CLI module for clipbatch
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

const EXAMPLE_MANIFEST: &str = r#"Example manifest file:
[
    {
        "original": "2593592-15.mp4",
        "clips": [
            { "start": "00:10:00", "end": "00:31:56" }
        ]
    }
]"#;

/// Batch video clipper driven by a JSON manifest
#[derive(Parser, Debug)]
#[command(name = "clipper")]
#[command(about = "Create clips from multiple video files")]
#[command(version)]
#[command(after_help = EXAMPLE_MANIFEST)]
pub struct Cli {
    /// Config file (default: ./clipbatch.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,

    /// Transcoder program to run
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a clip definition to the manifest
    Add(args::AddArgs),
    /// Clip videos based on the manifest
    Clip(args::ClipArgs),
    /// Validate the manifest and, with --output-dir, the clip checksums
    Validate(args::ValidateArgs),
}

impl Commands {
    /// Whether `--no-backup` was given to a command that rewrites the manifest
    pub fn no_backup(&self) -> bool {
        match self {
            Commands::Add(args) => args.no_backup,
            Commands::Clip(args) => args.no_backup,
            Commands::Validate(_) => false,
        }
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    value.parse().map_err(|e: crate::DomainError| e.to_string())
}
