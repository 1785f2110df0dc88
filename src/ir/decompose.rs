//! Lowering of targets into build edges.
//!
//! Composite targets are flattened one level: every C or C++ source becomes a
//! compile edge and contributes its object, prebuilt objects are passed
//! through, and the resulting object list feeds the archive or link edge.
//! Scheduling beyond that is left to Ninja.

use camino::Utf8PathBuf;
use tracing::{debug, trace};

use super::BuildEdge;
use crate::rules::RuleName;
use crate::target::{Source, Target};

/// The compile edges and object list produced for a list of sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    /// Compile edges, one per C or C++ source, in source order.
    pub edges: Vec<BuildEdge>,
    /// Object paths in source order, including pass-through entries.
    pub objects: Vec<Utf8PathBuf>,
}

/// Object path produced by compiling `source`.
fn object_path(source: &Source) -> Utf8PathBuf {
    source.path().with_extension("o")
}

/// Compile edge writing `source` to `output`, or `None` for sources that are
/// already objects.
fn compile_edge(source: &Source, output: Utf8PathBuf) -> Option<BuildEdge> {
    let rule = match source {
        Source::C(_) => RuleName::CompileC,
        Source::Cxx(_) => RuleName::CompileCxx,
        Source::Object(_) => return None,
        Source::Unrecognised(path) => {
            trace!(%path, "passing unrecognised source through as an object");
            return None;
        }
    };
    Some(BuildEdge::compile(rule, output, source.path().to_path_buf()))
}

/// Resolve each source into the object it contributes.
///
/// ```
/// use ninjacc::ir::decompose;
/// use ninjacc::target::Source;
///
/// let sources: Vec<Source> = ["foo.cpp", "bar.c", "baz.o"].map(Source::from).into();
/// let result = decompose(&sources);
/// assert_eq!(result.objects, ["foo.o", "bar.o", "baz.o"]);
/// assert_eq!(result.edges.len(), 2);
/// ```
#[must_use]
pub fn decompose(sources: &[Source]) -> Decomposition {
    let mut result = Decomposition::default();
    for source in sources {
        let object = if source.is_compiled() {
            object_path(source)
        } else {
            source.path().to_path_buf()
        };
        result.edges.extend(compile_edge(source, object.clone()));
        result.objects.push(object);
    }
    result
}

/// Lower `target` into the edges that build it, in emission order.
///
/// Program edges take their libraries from the global `LIBS` variable, so
/// the link edge carries no bindings of its own.
#[must_use]
pub fn plan(target: &Target) -> Vec<BuildEdge> {
    let edges = match target {
        Target::Object { output, source } => {
            compile_edge(source, output.clone()).into_iter().collect()
        }
        Target::StaticLibrary { output, sources } => {
            aggregate(output, sources, RuleName::ArchiveStaticLibrary)
        }
        Target::Program { output, sources } => aggregate(output, sources, RuleName::LinkProgram),
    };
    debug!(
        output = %target.output(),
        kind = ?target.kind(),
        edges = edges.len(),
        "planned target"
    );
    edges
}

fn aggregate(output: &Utf8PathBuf, sources: &[Source], rule: RuleName) -> Vec<BuildEdge> {
    let Decomposition { mut edges, objects } = decompose(sources);
    edges.push(BuildEdge::new(output.clone(), rule, objects));
    edges
}
