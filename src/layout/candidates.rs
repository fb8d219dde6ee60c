use std::fmt;
use std::path::PathBuf;

use super::ConversionRequest;

/// A logical artifact copied from the gradle layout into the standard one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Classes,
    Layout,
    ProjectLibs,
    Manifest,
}

impl Artifact {
    /// Every artifact, in the order a conversion processes them
    pub const ALL: [Artifact; 4] = [
        Artifact::Classes,
        Artifact::Layout,
        Artifact::ProjectLibs,
        Artifact::Manifest,
    ];

    /// Classes and layout must be found for a conversion to succeed
    pub fn is_required(self) -> bool {
        matches!(self, Artifact::Classes | Artifact::Layout)
    }

    /// The manifest is the only artifact resolved as a file
    pub fn is_file(self) -> bool {
        matches!(self, Artifact::Manifest)
    }

    /// Ordered source locations, most preferred first
    ///
    /// Different Android Gradle plugin versions put intermediates in
    /// different places, so each artifact has several plausible homes.
    pub fn candidates(self, request: &ConversionRequest) -> Vec<PathBuf> {
        let app = request.app_source_root();
        let variant = request.build_variant();
        let intermediates = app.join("build").join("intermediates");

        match self {
            Artifact::Classes => vec![
                intermediates.join("classes").join(variant),
                app.join("bin").join("classes"),
            ],
            Artifact::Layout => vec![
                intermediates.join("res").join(variant).join("layout"),
                intermediates
                    .join("res")
                    .join("merged")
                    .join(variant)
                    .join("layout"),
                app.join("res").join("layout"),
            ],
            Artifact::ProjectLibs => vec![app.join("libs")],
            Artifact::Manifest => vec![
                intermediates
                    .join("manifests")
                    .join(variant)
                    .join(MANIFEST_FILE),
                intermediates
                    .join("manifests")
                    .join("full")
                    .join(variant)
                    .join(MANIFEST_FILE),
                // Older plugins only ever wrote the debug manifest
                intermediates
                    .join("manifests")
                    .join("debug")
                    .join(MANIFEST_FILE),
            ],
        }
    }

    /// Where the artifact lands under the destination root
    pub fn destination(self, request: &ConversionRequest) -> PathBuf {
        let dest = request.destination_root();
        match self {
            Artifact::Classes => dest.join("bin").join("classes"),
            Artifact::Layout => dest.join("res").join("layout"),
            Artifact::ProjectLibs => dest.join("libs"),
            Artifact::Manifest => dest.join(MANIFEST_FILE),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Artifact::Classes => "classes",
            Artifact::Layout => "layout",
            Artifact::ProjectLibs => "libs",
            Artifact::Manifest => "manifest",
        };
        f.write_str(name)
    }
}

pub const MANIFEST_FILE: &str = "AndroidManifest.xml";

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn request(variant: &str) -> ConversionRequest {
        ConversionRequest::new("/src/app", variant, "/out")
    }

    #[test]
    fn test_classes_candidates_interpolate_variant() {
        let candidates = Artifact::Classes.candidates(&request("release"));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/src/app/build/intermediates/classes/release"),
                PathBuf::from("/src/app/bin/classes"),
            ]
        );
    }

    #[test]
    fn test_layout_candidates_order() {
        let candidates = Artifact::Layout.candidates(&request("debug"));
        assert_eq!(candidates.len(), 3);
        assert_eq!(
            candidates[0],
            Path::new("/src/app/build/intermediates/res/debug/layout")
        );
        assert_eq!(
            candidates[1],
            Path::new("/src/app/build/intermediates/res/merged/debug/layout")
        );
        assert_eq!(candidates[2], Path::new("/src/app/res/layout"));
    }

    #[test]
    fn test_manifest_falls_back_to_debug() {
        let candidates = Artifact::Manifest.candidates(&request("staging"));
        assert_eq!(
            candidates.last().unwrap(),
            Path::new("/src/app/build/intermediates/manifests/debug/AndroidManifest.xml")
        );
        assert_eq!(
            candidates[1],
            Path::new("/src/app/build/intermediates/manifests/full/staging/AndroidManifest.xml")
        );
    }

    #[test]
    fn test_destinations() {
        let req = request("debug");
        let expected = [
            (Artifact::Classes, "/out/bin/classes"),
            (Artifact::Layout, "/out/res/layout"),
            (Artifact::ProjectLibs, "/out/libs"),
            (Artifact::Manifest, "/out/AndroidManifest.xml"),
        ];
        for (artifact, path) in expected {
            assert_eq!(artifact.destination(&req), Path::new(path), "{}", artifact);
        }
    }

    #[test]
    fn test_required_artifacts() {
        let required: Vec<_> = Artifact::ALL.iter().filter(|a| a.is_required()).collect();
        assert_eq!(required, vec![&Artifact::Classes, &Artifact::Layout]);
    }
}
