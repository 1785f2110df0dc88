//! Classified build targets.
//!
//! A [`TargetSpec`] lists raw paths. Converting it into a [`Target`] tags
//! every source once, by extension, so later stages match on [`Source`]
//! instead of inspecting file names again.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::ast::{TargetKind, TargetSpec};

/// Errors raised while validating a manifest target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    /// Object targets compile exactly one source into their declared output.
    #[error("object target '{output}' needs exactly one source, found {count}")]
    ObjectSourceCount {
        /// Declared output of the offending target.
        output: Utf8PathBuf,
        /// Number of sources listed.
        count: usize,
    },
}

/// A source entry tagged by kind.
///
/// ```
/// use ninjacc::target::Source;
///
/// assert!(matches!(Source::classify("foo.cpp"), Source::Cxx(_)));
/// assert!(matches!(Source::classify("bar.c"), Source::C(_)));
/// assert!(matches!(Source::classify("baz.o"), Source::Object(_)));
/// assert!(matches!(Source::classify("notes.txt"), Source::Unrecognised(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A C translation unit.
    C(Utf8PathBuf),
    /// A C++ translation unit.
    Cxx(Utf8PathBuf),
    /// A prebuilt object file.
    Object(Utf8PathBuf),
    /// Any other extension. Passed through unchanged, exactly like an object.
    Unrecognised(Utf8PathBuf),
}

impl Source {
    /// Tag `path` according to its extension.
    pub fn classify(raw: impl Into<Utf8PathBuf>) -> Self {
        let path = raw.into();
        let tag: fn(Utf8PathBuf) -> Self = match path.extension() {
            Some("c") => Self::C,
            Some("cpp" | "cc" | "cxx") => Self::Cxx,
            Some("o") => Self::Object,
            _ => Self::Unrecognised,
        };
        tag(path)
    }

    /// Path of the source entry as written in the manifest.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::C(path) | Self::Cxx(path) | Self::Object(path) | Self::Unrecognised(path) => {
                path
            }
        }
    }

    /// Whether this entry needs a compile edge.
    #[must_use]
    pub const fn is_compiled(&self) -> bool {
        matches!(self, Self::C(_) | Self::Cxx(_))
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Self::classify(value)
    }
}

impl From<Utf8PathBuf> for Source {
    fn from(value: Utf8PathBuf) -> Self {
        Self::classify(value)
    }
}

/// A target whose sources have been classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Compile one source into the declared object path.
    Object {
        /// Declared object path.
        output: Utf8PathBuf,
        /// The single source compiled into `output`.
        source: Source,
    },
    /// Archive the objects of every source into a static library.
    StaticLibrary {
        /// Library path.
        output: Utf8PathBuf,
        /// Sources in archive order.
        sources: Vec<Source>,
    },
    /// Link the objects of every source into an executable.
    Program {
        /// Executable path.
        output: Utf8PathBuf,
        /// Sources in link order.
        sources: Vec<Source>,
    },
}

impl Target {
    /// Build an object target.
    pub fn object(output: impl Into<Utf8PathBuf>, source: impl Into<Source>) -> Self {
        Self::Object {
            output: output.into(),
            source: source.into(),
        }
    }

    /// Build a static library target.
    pub fn static_library<I, S>(output: impl Into<Utf8PathBuf>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Source>,
    {
        Self::StaticLibrary {
            output: output.into(),
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a program target.
    pub fn program<I, S>(output: impl Into<Utf8PathBuf>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Source>,
    {
        Self::Program {
            output: output.into(),
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }

    /// Classify the sources of a manifest target.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::ObjectSourceCount`] when an object target does
    /// not list exactly one source.
    pub fn from_spec(spec: &TargetSpec) -> Result<Self, TargetError> {
        let output = spec.output.clone();
        let sources = spec.sources.iter().cloned();
        match spec.kind {
            TargetKind::Object => match spec.sources.as_slice() {
                [source] => Ok(Self::object(output, source.clone())),
                other => Err(TargetError::ObjectSourceCount {
                    output,
                    count: other.len(),
                }),
            },
            TargetKind::StaticLibrary => Ok(Self::static_library(output, sources)),
            TargetKind::Program => Ok(Self::program(output, sources)),
        }
    }

    /// The kind of artefact this target produces.
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::Object { .. } => TargetKind::Object,
            Self::StaticLibrary { .. } => TargetKind::StaticLibrary,
            Self::Program { .. } => TargetKind::Program,
        }
    }

    /// Declared output path.
    #[must_use]
    pub fn output(&self) -> &Utf8Path {
        match self {
            Self::Object { output, .. }
            | Self::StaticLibrary { output, .. }
            | Self::Program { output, .. } => output,
        }
    }
}
