//! Command implementations

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use crate::app::add_interactor::{AddRequest, AddResponse};
use crate::app::clip_interactor::{ClipReport, ClipRequest, ClipStatus};
use crate::app::validate_interactor::{ValidateReport, ValidateRequest, VerifyStatus};
use crate::app::AppContainer;
use crate::cli::args::{AddArgs, ClipArgs, ValidateArgs};
use crate::domain::model::AddOutcome;

/// Execute the add command
pub async fn add(container: &dyn AppContainer, args: AddArgs) -> Result<ExitCode> {
    info!("Starting add operation");
    let manifest_path = args.manifest.clone();

    let response = container
        .add_interactor()
        .execute(AddRequest {
            manifest_path: args.manifest,
            filename: args.filename,
            start: args.start,
            end: args.end,
        })
        .await
        .with_context(|| format!("Failed to add clip to {}", manifest_path.display()))?;

    display_add_response(&response);
    Ok(ExitCode::SUCCESS)
}

/// Execute the clip command
pub async fn clip(container: &dyn AppContainer, args: ClipArgs) -> Result<ExitCode> {
    info!("Starting clip operation");
    info!("Input: {}", args.input_dir.display());
    info!("Output: {}", args.output_dir.display());

    let manifest_path = args.manifest.clone();
    let report = container
        .clip_interactor()
        .execute(ClipRequest {
            manifest_path: args.manifest,
            input_dir: args.input_dir,
            output_dir: args.output_dir,
            overwrite: args.overwrite,
            dry_run: args.dryrun,
        })
        .await
        .with_context(|| format!("Failed to process manifest {}", manifest_path.display()))?;

    display_clip_report(&report);
    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Execute the validate command
pub async fn validate(container: &dyn AppContainer, args: ValidateArgs) -> Result<ExitCode> {
    info!("Starting validate operation");

    let manifest_path = args.manifest.clone();
    let report = container
        .validate_interactor()
        .execute(ValidateRequest {
            manifest_path: args.manifest,
            input_dir: args.input_dir,
            output_dir: args.output_dir,
        })
        .await
        .with_context(|| format!("Failed to validate manifest {}", manifest_path.display()))?;

    display_validate_report(&report);
    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn display_add_response(response: &AddResponse) {
    match response.outcome {
        AddOutcome::Added {
            clip_index,
            entry_created,
        } => {
            let scope = if entry_created { "new entry" } else { "existing entry" };
            println!(
                "Added clip {} ({}) -> {}",
                clip_index, scope, response.output_name
            );
        }
        AddOutcome::Duplicate { clip_index } => {
            println!(
                "Clip already defined as {} ({}), nothing to add",
                clip_index, response.output_name
            );
        }
    }
}

/// Display clip results in human-readable format
fn display_clip_report(report: &ClipReport) {
    for outcome in &report.outcomes {
        let name = outcome
            .output_name
            .clone()
            .unwrap_or_else(|| format!("{}#{}", outcome.original, outcome.clip_index));
        let line = match &outcome.status {
            ClipStatus::Generated { checksum } => format!("generated   {} {}", name, checksum),
            ClipStatus::Regenerated { checksum } => format!("regenerated {} {}", name, checksum),
            ClipStatus::Skipped(reason) => format!("skipped     {} ({})", name, reason),
            ClipStatus::Planned => format!("would clip  {}", name),
            ClipStatus::Failed(e) => format!("FAILED      {}: {}", name, e),
        };
        println!("{}", line);
    }

    let summary = report.summary();
    println!();
    println!("Clip Summary");
    println!("============");
    println!("Generated: {}", summary.generated);
    println!("Skipped:   {}", summary.skipped);
    if summary.planned > 0 {
        println!("Planned:   {}", summary.planned);
    }
    println!("Failed:    {}", summary.failed);
    if report.manifest_saved {
        println!("Manifest updated with new checksums");
    }
}

/// Display validation results in human-readable format
fn display_validate_report(report: &ValidateReport) {
    if !report.issues.is_empty() {
        println!("Manifest Issues:");
        for issue in &report.issues {
            match issue.clip_index {
                Some(index) => println!("  ✗ {} clip {}: {}", issue.original, index, issue.message),
                None => println!("  ✗ {}: {}", issue.original, issue.message),
            }
        }
        println!();
    }

    if !report.clips.is_empty() {
        println!("Checksums:");
        for verdict in &report.clips {
            match verdict.status {
                VerifyStatus::Pass => println!("  PASS       {}", verdict.output_name),
                VerifyStatus::Unverified => println!("  UNVERIFIED {}", verdict.output_name),
                _ => println!(
                    "  {:<10} {}: {}",
                    verdict.status.to_string(),
                    verdict.output_name,
                    verdict.status.detail()
                ),
            }
        }
        println!();
    }

    println!("{}", if report.is_valid() { "OK" } else { "INVALID" });
}
