//! clipbatch CLI
//!
//! Cuts clips out of source videos as described by a JSON manifest and keeps
//! their checksums in the manifest.
//!
//! # Usage
//!
//! ```bash
//! clipper add --manifest clips.json --filename videoA.mp4 --start 00:05:00 --end 00:06:20
//! clipper clip --manifest clips.json --input-dir originals --output-dir clips
//! clipper validate --manifest clips.json --input-dir originals --output-dir clips
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use clipbatch::app::DefaultAppContainer;
use clipbatch::cli::{commands, Cli, Commands};
use clipbatch::config_initialization::initialize_configuration_hierarchy;
use clipbatch::utils::logging::LoggingSystem;

/// Main entry point; clips are processed one at a time on a single thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    LoggingSystem::new(config.logging.clone()).init()?;
    info!("Starting clipbatch");

    let container = DefaultAppContainer::new(&config);

    // Execute the requested command
    let exit_code = match cli.command {
        Commands::Add(args) => commands::add(&container, args).await?,
        Commands::Clip(args) => commands::clip(&container, args).await?,
        Commands::Validate(args) => commands::validate(&container, args).await?,
    };

    Ok(exit_code)
}
