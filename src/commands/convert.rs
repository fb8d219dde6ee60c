use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::commands::{prepare, ConvertOptions};
use crate::layout::{Artifact, ConversionReport, StepOutcome};

/// Convert a gradle project into the standard layout
///
/// Returns `Ok(false)` when a required artifact was missing; the caller
/// decides the exit code.
pub fn execute(app_dir: &Path, dest_dir: &Path, options: &ConvertOptions) -> Result<bool> {
    let (converter, request) = prepare(app_dir, dest_dir, options)?;

    println!(
        "  {} {} ({}) -> {}",
        "Converting".green().bold(),
        request.app_source_root().display(),
        request.build_variant(),
        request.destination_root().display()
    );

    let report = converter.convert(&request)?;
    print_report(&report);

    Ok(report.succeeded())
}

fn print_report(report: &ConversionReport) {
    for step in report.steps() {
        match &step.outcome {
            StepOutcome::Copied { from } => {
                println!(
                    "      {} {} from {}",
                    "Copied".green(),
                    step.artifact,
                    from.display()
                );
            }
            StepOutcome::Merged {
                support_files,
                project_libs,
            } => {
                let project = project_libs
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_else(|| "none".to_string());
                println!(
                    "      {} {} ({} support jars, project libs: {})",
                    "Merged".green(),
                    step.artifact,
                    support_files,
                    project
                );
            }
            StepOutcome::MissingSource if step.artifact == Artifact::Manifest => {
                println!("     {} {}", "Skipped".yellow(), step.artifact);
            }
            StepOutcome::MissingSource => {
                println!("     {} {}", "Missing".red(), step.artifact);
            }
        }
    }

    for warning in report.warnings() {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    for diagnostic in report.diagnostics() {
        eprintln!("{} {}", "error:".red().bold(), diagnostic);
    }

    if report.succeeded() {
        println!("    {} conversion", "Finished".green().bold());
    }
}
