//! Intermediate representation of the emitted build graph.
//!
//! Targets are lowered into [`BuildEdge`] values before anything is written.
//! The edge mirrors a Ninja `build` statement without embedding any syntax,
//! leaving escaping and layout to [`crate::ninja_gen`].
//!
//! # Examples
//!
//! ```
//! use ninjacc::ir::BuildEdge;
//! use ninjacc::rules::RuleName;
//!
//! let edge = BuildEdge::compile(RuleName::CompileCxx, "foo.o".into(), "foo.cpp".into());
//! assert_eq!(edge.depfile(), Some("foo.o.d"));
//! ```

mod decompose;

pub use decompose::{Decomposition, decompose, plan};

use camino::Utf8PathBuf;
use indexmap::IndexMap;

use crate::rules::{DEPFILE_VAR, RuleName};

/// A single `build` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEdge {
    /// Files produced by the edge.
    pub outputs: Vec<Utf8PathBuf>,
    /// Rule used to produce them.
    pub rule: RuleName,
    /// Inputs in command-line order.
    pub inputs: Vec<Utf8PathBuf>,
    /// Edge-scoped bindings. Only compile edges carry one, the dependency file.
    pub variables: IndexMap<String, String>,
}

impl BuildEdge {
    /// Create an edge with no edge-scoped bindings.
    #[must_use]
    pub fn new(output: Utf8PathBuf, rule: RuleName, inputs: Vec<Utf8PathBuf>) -> Self {
        Self {
            outputs: vec![output],
            rule,
            inputs,
            variables: IndexMap::new(),
        }
    }

    /// Create a compile edge for `source`.
    ///
    /// The dependency file is always the output path with `.d` appended, so
    /// distinct outputs never share a dependency file.
    #[must_use]
    pub fn compile(rule: RuleName, output: Utf8PathBuf, source: Utf8PathBuf) -> Self {
        let depfile = format!("{output}.d");
        let mut edge = Self::new(output, rule, vec![source]);
        edge.variables.insert(DEPFILE_VAR.to_owned(), depfile);
        edge
    }

    /// The dependency file bound on this edge, if any.
    #[must_use]
    pub fn depfile(&self) -> Option<&str> {
        self.variables.get(DEPFILE_VAR).map(String::as_str)
    }
}
