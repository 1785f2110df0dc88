//! Ninja file writer.
//!
//! [`NinjaWriter`] streams a build file in a single pass: the banner, global
//! variables and rules first, then build edges in the order they are handed
//! over. The phase is tracked in the type, so an edge can only be written once
//! the preamble has been, and the preamble can only be written once.
//!
//! ```
//! use ninjacc::ast::BuildEnv;
//! use ninjacc::ir::BuildEdge;
//! use ninjacc::ninja_gen::NinjaWriter;
//! use ninjacc::rules::{register_rules, RuleName};
//! use ninjacc::variables::emit_variables;
//!
//! # fn main() -> Result<(), ninjacc::ninja_gen::WriterError> {
//! let env = BuildEnv::default();
//! let mut writer = NinjaWriter::new(Vec::new())
//!     .write_preamble(&register_rules(&env), &emit_variables(&env))?;
//! writer.write_edge(&BuildEdge::new("app".into(), RuleName::LinkProgram, vec!["main.o".into()]))?;
//! let text = String::from_utf8(writer.close()?).expect("utf-8");
//! assert!(text.ends_with("build app : link_program main.o\n\n"));
//! # Ok(()) }
//! ```

use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::ir::BuildEdge;
use crate::rules::{Rule, RuleRegistry};
use crate::variables::Variable;

const BANNER: &[&str] = &[
    "This file is generated by ninjacc. Do not edit.",
    "",
    "Regenerate it from the ninjacc manifest instead.",
];

macro_rules! write_kv {
    ($f:expr, $key:expr, $opt:expr) => {
        if let Some(val) = $opt {
            writeln!($f, "  {} = {}", $key, val)?;
        }
    };
}

/// Errors raised while writing a Ninja file.
#[derive(Debug, Error)]
pub enum WriterError {
    /// The output file could not be created.
    #[error("failed to open {} for writing", path.display())]
    Open {
        /// Requested output path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Writing or flushing the output failed.
    #[error("failed to write Ninja output")]
    Write(#[from] io::Error),
}

/// Writer phase before the preamble has been written.
#[derive(Debug)]
pub struct Preamble;

/// Writer phase once the preamble is out and edges may follow.
#[derive(Debug)]
pub struct Edges;

/// Append-only Ninja writer owning its output handle.
#[derive(Debug)]
pub struct NinjaWriter<W: Write, Phase = Preamble> {
    out: W,
    edges: usize,
    phase: PhantomData<Phase>,
}

impl NinjaWriter<BufWriter<File>, Preamble> {
    /// Create (or truncate) `path` and wrap it in a writer.
    ///
    /// Any previous content is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Open`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, WriterError> {
        let file = File::create(path).map_err(|source| WriterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened Ninja output");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> NinjaWriter<W, Preamble> {
    /// Wrap an arbitrary output handle.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            edges: 0,
            phase: PhantomData,
        }
    }

    /// Write the banner, the global variables and the rules.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Write`] if the output cannot be written.
    pub fn write_preamble(
        mut self,
        rules: &RuleRegistry,
        variables: &[Variable],
    ) -> Result<NinjaWriter<W, Edges>, WriterError> {
        write!(self.out, "{}", DisplayBanner)?;
        for variable in variables {
            write!(self.out, "{}", DisplayVariable(variable))?;
        }
        for rule in rules.iter() {
            write!(self.out, "{}", DisplayRule(rule))?;
        }
        debug!(
            variables = variables.len(),
            rules = rules.len(),
            "wrote Ninja preamble"
        );
        Ok(NinjaWriter {
            out: self.out,
            edges: 0,
            phase: PhantomData,
        })
    }
}

impl<W: Write> NinjaWriter<W, Edges> {
    /// Append a build edge.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Write`] if the output cannot be written.
    pub fn write_edge(&mut self, edge: &BuildEdge) -> Result<(), WriterError> {
        write!(self.out, "{}", DisplayEdge(edge))?;
        self.edges += 1;
        Ok(())
    }

    /// Declare the outputs Ninja builds when invoked without targets.
    ///
    /// Writes nothing when `defaults` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Write`] if the output cannot be written.
    pub fn write_defaults(&mut self, defaults: &[Utf8PathBuf]) -> Result<(), WriterError> {
        if !defaults.is_empty() {
            writeln!(self.out, "default {}", join_paths(defaults))?;
        }
        Ok(())
    }

    /// Number of edges written so far.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges
    }

    /// Flush the output and hand the handle back.
    ///
    /// Dropping the returned handle releases it.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Write`] if flushing fails.
    pub fn close(mut self) -> Result<W, WriterError> {
        self.out.flush()?;
        debug!(edges = self.edges, "closed Ninja output");
        Ok(self.out)
    }
}

/// Escape a path for use in a `build` line.
///
/// ```
/// use ninjacc::ninja_gen::escape_path;
///
/// assert_eq!(escape_path("dir with space/c:$x.o"), "dir$ with$ space/c$:$$x.o");
/// ```
#[must_use]
pub fn escape_path(path: &str) -> String {
    path.replace('$', "$$")
        .replace(' ', "$ ")
        .replace(':', "$:")
}

/// Escape a binding value. Only `$` is special there.
fn escape_value(value: &str) -> String {
    value.replace('$', "$$")
}

fn join_paths(paths: &[Utf8PathBuf]) -> String {
    paths.iter().map(|p| escape_path(p.as_str())).join(" ")
}

struct DisplayBanner;

impl Display for DisplayBanner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for line in BANNER {
            if line.is_empty() {
                writeln!(f, "#")?;
            } else {
                writeln!(f, "# {line}")?;
            }
        }
        writeln!(f)
    }
}

struct DisplayVariable<'a>(&'a Variable);

impl Display for DisplayVariable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let value = self.0.value();
        if value.is_empty() {
            writeln!(f, "{} =", self.0.name)?;
        } else {
            writeln!(f, "{} = {value}", self.0.name)?;
        }
        writeln!(f)
    }
}

struct DisplayRule<'a>(&'a Rule);

impl Display for DisplayRule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = self.0;
        writeln!(f, "rule {}", rule.name)?;
        writeln!(f, "  command = {}", rule.command)?;
        writeln!(f, "  description = {}", rule.description)?;
        write_kv!(f, "depfile", rule.depfile);
        write_kv!(f, "deps", rule.deps.map(|deps| deps.as_str()));
        writeln!(f)
    }
}

struct DisplayEdge<'a>(&'a BuildEdge);

impl Display for DisplayEdge<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let edge = self.0;
        write!(f, "build {} : {}", join_paths(&edge.outputs), edge.rule)?;
        if !edge.inputs.is_empty() {
            write!(f, " {}", join_paths(&edge.inputs))?;
        }
        writeln!(f)?;
        for (key, value) in &edge.variables {
            writeln!(f, "  {key} = {}", escape_value(value))?;
        }
        writeln!(f)
    }
}
