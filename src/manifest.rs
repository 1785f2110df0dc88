//! Manifest loading helpers.
//!
//! Reads a `ninjacc.yml` file, deserialises it into [`Manifest`] and
//! classifies its targets. Anything malformed, including a library entry that
//! is neither a name nor a list of resolved files, is rejected here, before a
//! single byte of Ninja output is written.

use std::{fs, path::Path};

use thiserror::Error;
use tracing::debug;

use crate::ast::Manifest;
use crate::target::{Target, TargetError};

/// Default manifest file name.
pub const DEFAULT_MANIFEST: &str = "ninjacc.yml";

/// Errors raised while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read {name}")]
    Read {
        /// Display name of the manifest.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The manifest is not valid YAML or does not match the schema.
    #[error("failed to parse {name}: {message}")]
    Parse {
        /// Display name of the manifest.
        name: String,
        /// Parser message, including the offending location.
        message: String,
    },
    /// A target failed validation.
    #[error(transparent)]
    Target(#[from] TargetError),
}

fn from_str_named(yaml: &str, name: &str) -> Result<Manifest, ManifestError> {
    let manifest: Manifest = serde_saphyr::from_str(yaml).map_err(|err| ManifestError::Parse {
        name: name.to_owned(),
        message: err.to_string(),
    })?;
    debug!(
        manifest = name,
        targets = manifest.targets.len(),
        backend = ?manifest.backend,
        "parsed manifest"
    );
    Ok(manifest)
}

/// Parse a manifest from a YAML string.
///
/// # Errors
///
/// Returns [`ManifestError::Parse`] if the YAML is invalid or does not match
/// the manifest schema.
pub fn from_str(yaml: &str) -> Result<Manifest, ManifestError> {
    from_str_named(yaml, DEFAULT_MANIFEST)
}

/// Load a [`Manifest`] from the given file path.
///
/// # Errors
///
/// Returns [`ManifestError::Read`] if the file cannot be read and
/// [`ManifestError::Parse`] if its contents are invalid.
pub fn from_path(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    let path_ref = path.as_ref();
    let name = path_ref.display().to_string();
    let data = fs::read_to_string(path_ref).map_err(|source| ManifestError::Read {
        name: name.clone(),
        source,
    })?;
    from_str_named(&data, &name)
}

/// Classify every target of `manifest`, preserving declaration order.
///
/// # Errors
///
/// Returns [`ManifestError::Target`] for the first invalid target.
pub fn targets(manifest: &Manifest) -> Result<Vec<Target>, ManifestError> {
    manifest
        .targets
        .iter()
        .map(|spec| Target::from_spec(spec).map_err(ManifestError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Backend, LibEntry, TargetKind};
    use rstest::rstest;

    #[rstest]
    fn empty_manifest_uses_defaults() {
        let manifest = from_str("{}").expect("parse");
        assert_eq!(manifest, Manifest::default());
        assert_eq!(manifest.backend, Backend::Ninja);
        assert_eq!(manifest.env.cc, "cc");
        assert_eq!(manifest.env.cxx, "c++");
    }

    #[rstest]
    fn parses_full_manifest() {
        let yaml = r##"
backend: ninja
env:
  cc: gcc
  cxx: g++
  cppflags: [-DUNIX_ENABLED]
  ccflags: [-O2, -fomit-frame-pointer]
  cpppath: ["#platform/wayland"]
  libs:
    - z
    - [build/libfoo.a, build/libbar.a]
targets:
  - kind: static_library
    output: libcore.a
    sources: [foo.cpp, bar.c, baz.o]
  - kind: program
    output: bin/app
    sources: [main.cpp, libcore.a]
defaults: [bin/app]
"##;
        let manifest = from_str(yaml).expect("parse");
        assert_eq!(manifest.env.cc, "gcc");
        assert_eq!(manifest.env.cpppath, ["#platform/wayland"]);
        assert_eq!(
            manifest.env.libs,
            [
                LibEntry::Name("z".into()),
                LibEntry::Resolved(vec!["build/libfoo.a".into(), "build/libbar.a".into()]),
            ]
        );
        let kinds: Vec<_> = manifest.targets.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, [TargetKind::StaticLibrary, TargetKind::Program]);
        assert_eq!(manifest.defaults, ["bin/app"]);
        let resolved = targets(&manifest).expect("valid targets");
        assert_eq!(resolved.len(), 2);
    }

    #[rstest]
    #[case::mapping_library("env:\n  libs:\n    - {name: z}\n")]
    #[case::unknown_backend("backend: make\n")]
    #[case::unknown_field("env:\n  ldflags: [-m32]\n")]
    #[case::unknown_kind("targets:\n  - kind: shared_library\n    output: libx.so\n")]
    #[case::missing_output("targets:\n  - kind: program\n    sources: [a.c]\n")]
    fn rejects_malformed_manifests(#[case] yaml: &str) {
        let err = from_str(yaml).expect_err("malformed manifest");
        assert!(matches!(err, ManifestError::Parse { .. }), "got {err:?}");
    }

    #[rstest]
    fn object_target_with_many_sources_is_rejected() {
        let manifest =
            from_str("targets:\n  - kind: object\n    output: x.o\n    sources: [a.c, b.c]\n")
                .expect("parse");
        let err = targets(&manifest).expect_err("invalid object target");
        assert!(matches!(
            err,
            ManifestError::Target(TargetError::ObjectSourceCount { count: 2, .. })
        ));
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = from_path(dir.path().join("ninjacc.yml")).expect_err("missing manifest");
        assert!(matches!(err, ManifestError::Read { .. }));
    }
}
