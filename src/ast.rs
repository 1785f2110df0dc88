//! Manifest data structures.
//!
//! This module defines the types a `ninjacc.yml` manifest is deserialised
//! into. The manifest carries the resolved toolchain configuration produced by
//! whatever detection layer runs before `ninjacc`, plus the list of targets to
//! emit.
//!
//! ```rust
//! use ninjacc::ast::{LibEntry, Manifest, TargetKind};
//!
//! let yaml = "env:\n  libs: [z, [out/libfoo.a]]\ntargets:\n  - kind: program\n    output: app\n    sources: [main.cpp]";
//! let manifest: Manifest = serde_saphyr::from_str(yaml).expect("parse");
//! assert_eq!(manifest.targets.len(), 1);
//! assert_eq!(manifest.targets.first().map(|t| t.kind), Some(TargetKind::Program));
//! assert_eq!(manifest.env.libs.first(), Some(&LibEntry::Name("z".into())));
//! ```

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Top-level manifest structure parsed from a `ninjacc.yml` file.
///
/// ```yaml
/// backend: ninja
/// env:
///   cxx: clang++
///   cpppath: ["#platform/wayland"]
/// targets:
///   - kind: static_library
///     output: libcore.a
///     sources: [foo.cpp, bar.c]
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Selects whether the Ninja backend is active for this configuration.
    #[serde(default)]
    pub backend: Backend,

    /// Resolved compiler and linker configuration.
    #[serde(default)]
    pub env: BuildEnv,

    /// Targets in the order their edges should be emitted.
    #[serde(default)]
    pub targets: Vec<TargetSpec>,

    /// Outputs built when Ninja is invoked without explicit targets.
    #[serde(default)]
    pub defaults: Vec<Utf8PathBuf>,
}

/// Build backend selector.
///
/// When set to [`Backend::Direct`] the configuration is built by invoking the
/// compilers directly, so no Ninja file is produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Emit a Ninja build file.
    #[default]
    Ninja,
    /// Leave the build to the direct-invocation path.
    Direct,
}

/// Immutable, fully resolved build configuration.
///
/// Every list keeps its declared order because compilers and linkers honour
/// positional flag order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BuildEnv {
    /// C compiler executable.
    #[serde(default = "default_cc")]
    pub cc: String,
    /// C++ compiler executable, also used as the linker driver.
    #[serde(default = "default_cxx")]
    pub cxx: String,
    /// Preprocessor flags.
    #[serde(default)]
    pub cppflags: Vec<String>,
    /// Flags passed to the C compiler only.
    #[serde(default)]
    pub cflags: Vec<String>,
    /// Flags passed to both C and C++ compilers.
    #[serde(default)]
    pub ccflags: Vec<String>,
    /// Flags passed to the C++ compiler.
    #[serde(default)]
    pub cxxflags: Vec<String>,
    /// Include directories; a leading `#` stands for the build root.
    #[serde(default)]
    pub cpppath: Vec<String>,
    /// Libraries linked into every program.
    #[serde(default)]
    pub libs: Vec<LibEntry>,
}

fn default_cc() -> String {
    "cc".to_owned()
}

fn default_cxx() -> String {
    "c++".to_owned()
}

impl Default for BuildEnv {
    fn default() -> Self {
        Self {
            cc: default_cc(),
            cxx: default_cxx(),
            cppflags: Vec::new(),
            cflags: Vec::new(),
            ccflags: Vec::new(),
            cxxflags: Vec::new(),
            cpppath: Vec::new(),
            libs: Vec::new(),
        }
    }
}

/// A single entry of the library list.
///
/// ```yaml
/// libs:
///   - z                      # plain name, linked as -lz
///   - [out/libfoo.a]         # already resolved to concrete files
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LibEntry {
    /// A library name handed to the linker's search path.
    Name(String),
    /// Library files resolved by the configuration layer.
    Resolved(Vec<Utf8PathBuf>),
}

/// The kind of artefact a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A single compiled object file.
    Object,
    /// An `ar` archive of object files.
    StaticLibrary,
    /// A linked executable.
    Program,
}

/// A target as written in the manifest, before its sources are classified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
    /// What the target produces.
    pub kind: TargetKind,
    /// Declared output path.
    pub output: Utf8PathBuf,
    /// Source files and prebuilt objects, in link order.
    #[serde(default)]
    pub sources: Vec<Utf8PathBuf>,
}
