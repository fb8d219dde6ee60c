//! Conversion from the gradle build layout to the standard project layout
//!
//! A gradle build scatters its outputs under `build/intermediates/`, with the
//! exact location depending on the plugin version and the build variant. The
//! standard layout expected by older tooling is flat:
//!
//! ```text
//! <dest>/
//! ├── AndroidManifest.xml
//! ├── bin/classes/
//! ├── libs/
//! └── res/layout/
//! ```
//!
//! Each artifact is looked up in an ordered list of candidate locations (see
//! [`Artifact::candidates`]) and the first match is copied. Classes and layout
//! are required; libraries and the manifest are best-effort.

mod candidates;
pub mod fs_ops;
mod resolve;

pub use candidates::{Artifact, MANIFEST_FILE};
pub use resolve::resolve_first_existing;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs for a single conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    app_source_root: PathBuf,
    build_variant: String,
    destination_root: PathBuf,
}

impl ConversionRequest {
    pub fn new(
        app_source_root: impl Into<PathBuf>,
        build_variant: impl Into<String>,
        destination_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            app_source_root: app_source_root.into(),
            build_variant: build_variant.into(),
            destination_root: destination_root.into(),
        }
    }

    pub fn app_source_root(&self) -> &Path {
        &self.app_source_root
    }

    /// Build variant (e.g. "debug", "release"), used only to build paths
    pub fn build_variant(&self) -> &str {
        &self.build_variant
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }
}

/// What happened to one artifact during a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The artifact was found at `from` and copied
    Copied { from: PathBuf },
    /// Libraries: support jars laid down first, project libs copied on top
    Merged {
        support_files: usize,
        project_libs: Option<PathBuf>,
    },
    /// None of the candidate locations exist
    MissingSource,
}

impl StepOutcome {
    pub fn is_missing(&self) -> bool {
        matches!(self, StepOutcome::MissingSource)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub artifact: Artifact,
    pub outcome: StepOutcome,
}

/// Result of a conversion run
#[derive(Debug, Default)]
pub struct ConversionReport {
    steps: Vec<StepReport>,
    diagnostics: Vec<String>,
    warnings: Vec<String>,
}

impl ConversionReport {
    /// True only if every required artifact (classes, layout) was copied
    pub fn succeeded(&self) -> bool {
        Artifact::ALL
            .iter()
            .filter(|artifact| artifact.is_required())
            .all(|artifact| {
                matches!(self.outcome(*artifact), Some(StepOutcome::Copied { .. }))
            })
    }

    pub fn outcome(&self, artifact: Artifact) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|step| step.artifact == artifact)
            .map(|step| &step.outcome)
    }

    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    /// Errors for required artifacts that could not be found
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Non-fatal problems with optional artifacts
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn record(&mut self, artifact: Artifact, outcome: StepOutcome) {
        self.steps.push(StepReport { artifact, outcome });
    }
}

/// Where each artifact would come from, without touching the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub entries: Vec<PlanEntry>,
    /// Support library directory, if one is configured and exists
    pub support_libs: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub artifact: Artifact,
    pub source: Option<PathBuf>,
    pub destination: PathBuf,
}

impl Plan {
    /// True if every required artifact has a source
    pub fn is_complete(&self) -> bool {
        self.entries
            .iter()
            .filter(|entry| entry.artifact.is_required())
            .all(|entry| entry.source.is_some())
    }

    pub fn source(&self, artifact: Artifact) -> Option<&Path> {
        self.entries
            .iter()
            .find(|entry| entry.artifact == artifact)
            .and_then(|entry| entry.source.as_deref())
    }
}

/// Copies a gradle-style project into the standard layout
#[derive(Debug, Clone, Default)]
pub struct LayoutConverter {
    support_libs_dir: Option<PathBuf>,
}

impl LayoutConverter {
    /// `support_libs_dir` holds jars merged into every converted `libs/`
    pub fn new(support_libs_dir: Option<PathBuf>) -> Self {
        Self { support_libs_dir }
    }

    pub fn support_libs_dir(&self) -> Option<&Path> {
        self.support_libs_dir.as_deref()
    }

    /// Resolve every artifact's source without writing anything
    pub fn plan(&self, request: &ConversionRequest) -> Plan {
        let entries = Artifact::ALL
            .iter()
            .map(|&artifact| PlanEntry {
                artifact,
                source: locate(artifact, request),
                destination: artifact.destination(request),
            })
            .collect();

        Plan {
            entries,
            support_libs: self
                .support_libs_dir
                .as_ref()
                .filter(|dir| dir.is_dir())
                .cloned(),
        }
    }

    /// Run the conversion
    ///
    /// A missing required artifact is reported through
    /// [`ConversionReport::succeeded`] and does not stop later steps. Any
    /// filesystem error aborts the run.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionReport> {
        let mut report = ConversionReport::default();

        create_destination(request)?;

        for artifact in [Artifact::Classes, Artifact::Layout] {
            let outcome = copy_directory(artifact, request)?;
            if outcome.is_missing() {
                report.diagnostics.push(format!(
                    "{} dir not found in {}",
                    artifact,
                    request.app_source_root().display()
                ));
            }
            report.record(artifact, outcome);
        }

        let outcome = self.copy_libs(request, &mut report)?;
        report.record(Artifact::ProjectLibs, outcome);

        let outcome = copy_manifest(request)?;
        if outcome.is_missing() {
            report.warnings.push(format!(
                "{} not found in {}",
                MANIFEST_FILE,
                request.app_source_root().display()
            ));
        }
        report.record(Artifact::Manifest, outcome);

        Ok(report)
    }

    /// Lay down the support jars, then copy the project's own libs on top
    ///
    /// A project jar with the same name as a support jar replaces it.
    fn copy_libs(
        &self,
        request: &ConversionRequest,
        report: &mut ConversionReport,
    ) -> Result<StepOutcome> {
        let dst = Artifact::ProjectLibs.destination(request);

        // Both sources are resolved and checked before `dst` is cleared
        let project_libs = locate(Artifact::ProjectLibs, request);
        let support_dir = match &self.support_libs_dir {
            Some(dir) if dir.is_dir() => Some(dir.as_path()),
            Some(dir) => {
                report.warnings.push(format!(
                    "support library directory {} not found",
                    dir.display()
                ));
                None
            }
            None => None,
        };
        for src in project_libs.as_deref().into_iter().chain(support_dir) {
            fs_ops::ensure_disjoint(src, &dst)?;
        }

        fs_ops::remove_existing(&dst)?;
        fs::create_dir_all(&dst).with_context(|| format!("Failed to create {}", dst.display()))?;

        let support_found = support_dir.is_some();
        let support_files = match support_dir {
            Some(dir) => fs_ops::copy_top_level_files(dir, &dst)?,
            None => 0,
        };

        if let Some(src) = &project_libs {
            fs_ops::copy_tree(src, &dst)?;
        }

        if !support_found && project_libs.is_none() {
            report.warnings.push(format!(
                "no libraries found in {}",
                request.app_source_root().display()
            ));
            return Ok(StepOutcome::MissingSource);
        }

        Ok(StepOutcome::Merged {
            support_files,
            project_libs,
        })
    }
}

fn locate(artifact: Artifact, request: &ConversionRequest) -> Option<PathBuf> {
    let candidates = artifact.candidates(request);
    if artifact.is_file() {
        resolve_first_existing(&candidates, resolve::is_file)
    } else {
        resolve_first_existing(&candidates, resolve::is_dir)
    }
}

fn create_destination(request: &ConversionRequest) -> Result<()> {
    let res = request.destination_root().join("res");
    fs::create_dir_all(&res).with_context(|| format!("Failed to create {}", res.display()))
}

fn copy_directory(artifact: Artifact, request: &ConversionRequest) -> Result<StepOutcome> {
    let Some(src) = locate(artifact, request) else {
        return Ok(StepOutcome::MissingSource);
    };

    fs_ops::replace_tree(&src, &artifact.destination(request))?;
    Ok(StepOutcome::Copied { from: src })
}

fn copy_manifest(request: &ConversionRequest) -> Result<StepOutcome> {
    let Some(src) = locate(Artifact::Manifest, request) else {
        return Ok(StepOutcome::MissingSource);
    };

    fs_ops::copy_file(&src, &Artifact::Manifest.destination(request))?;
    Ok(StepOutcome::Copied { from: src })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, path.display().to_string()).unwrap();
    }

    #[test]
    fn test_plan_prefers_earlier_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("app");
        touch(&app.join("build/intermediates/classes/debug/A.class"));
        touch(&app.join("bin/classes/B.class"));

        let request = ConversionRequest::new(&app, "debug", temp_dir.path().join("out"));
        let plan = LayoutConverter::default().plan(&request);

        assert_eq!(
            plan.source(Artifact::Classes),
            Some(app.join("build/intermediates/classes/debug").as_path())
        );
        assert_eq!(plan.source(Artifact::Layout), None);
        assert!(!plan.is_complete());
        assert!(
            !temp_dir.path().join("out").exists(),
            "plan must not write"
        );
    }

    #[test]
    fn test_missing_classes_leaves_destination_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("app");
        let out = temp_dir.path().join("out");
        touch(&app.join("res/layout/main.xml"));
        touch(&out.join("bin/classes/Old.class"));

        let request = ConversionRequest::new(&app, "debug", &out);
        let report = LayoutConverter::default().convert(&request).unwrap();

        assert!(!report.succeeded());
        assert_eq!(
            report.outcome(Artifact::Classes),
            Some(&StepOutcome::MissingSource)
        );
        assert!(out.join("bin/classes/Old.class").exists());
        assert!(out.join("res/layout/main.xml").exists());
    }

    #[test]
    fn test_manifest_missing_is_only_a_warning() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("app");
        touch(&app.join("bin/classes/A.class"));
        touch(&app.join("res/layout/main.xml"));

        let request = ConversionRequest::new(&app, "debug", temp_dir.path().join("out"));
        let report = LayoutConverter::default().convert(&request).unwrap();

        assert!(report.succeeded());
        assert!(report.diagnostics().is_empty());
        assert_eq!(
            report.outcome(Artifact::Manifest),
            Some(&StepOutcome::MissingSource)
        );
        assert!(report.warnings().iter().any(|w| w.contains(MANIFEST_FILE)));
    }

    #[test]
    fn test_missing_support_dir_is_a_warning() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("app");
        touch(&app.join("libs/a.jar"));

        let converter = LayoutConverter::new(Some(temp_dir.path().join("no-such-dir")));
        let request = ConversionRequest::new(&app, "debug", temp_dir.path().join("out"));
        let report = converter.convert(&request).unwrap();

        assert_eq!(
            report.outcome(Artifact::ProjectLibs),
            Some(&StepOutcome::Merged {
                support_files: 0,
                project_libs: Some(app.join("libs")),
            })
        );
        assert!(report.warnings().iter().any(|w| w.contains("no-such-dir")));
    }

    #[test]
    fn test_no_libraries_leaves_empty_libs_dir() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("app");
        let out = temp_dir.path().join("out");
        touch(&app.join("bin/classes/A.class"));
        touch(&app.join("res/layout/main.xml"));
        touch(&out.join("libs/stale.jar"));

        let request = ConversionRequest::new(&app, "debug", &out);
        let report = LayoutConverter::default().convert(&request).unwrap();

        assert!(report.succeeded(), "missing libraries are not fatal");
        assert_eq!(
            report.outcome(Artifact::ProjectLibs),
            Some(&StepOutcome::MissingSource)
        );
        assert!(report
            .warnings()
            .iter()
            .any(|w| w.starts_with("no libraries found")));

        let libs = out.join("libs");
        assert!(libs.is_dir());
        assert_eq!(fs::read_dir(&libs).unwrap().count(), 0);
    }
}
