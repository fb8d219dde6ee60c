use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::commands::{prepare, ConvertOptions};

/// Show which candidate each artifact resolves to, without copying anything
///
/// Returns whether every required artifact has a source.
pub fn execute(app_dir: &Path, dest_dir: &Path, options: &ConvertOptions) -> Result<bool> {
    let (converter, request) = prepare(app_dir, dest_dir, options)?;
    let plan = converter.plan(&request);

    println!(
        "{} {} ({})",
        "Plan for".cyan().bold(),
        request.app_source_root().display(),
        request.build_variant()
    );

    for entry in &plan.entries {
        let name = entry.artifact.to_string();
        match &entry.source {
            Some(source) => println!(
                "  {} {:<8} {} -> {}",
                "✓".green(),
                name,
                source.display(),
                entry.destination.display()
            ),
            None if entry.artifact.is_required() => {
                println!("  {} {:<8} not found", "✗".red(), name)
            }
            None => println!("  {} {:<8} not found", "-".yellow(), name),
        }
    }

    match (&plan.support_libs, converter.support_libs_dir()) {
        (Some(dir), _) => println!("  {} support  {}", "✓".green(), dir.display()),
        (None, Some(dir)) => println!("  {} support  {} (missing)", "-".yellow(), dir.display()),
        (None, None) => println!("  {} support  not configured", "-".yellow()),
    }

    Ok(plan.is_complete())
}
