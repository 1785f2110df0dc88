//! The fixed set of Ninja rules.
//!
//! Every edge `ninjacc` writes references one of these rules by name. The
//! registry is built once per emission from the resolved toolchain and is
//! never modified afterwards.

use std::fmt::{self, Display, Formatter};

use crate::ast::BuildEnv;

/// Depfile path template shared by the compile rules.
pub const DEPFILE_TEMPLATE: &str = "$out.d";

/// Edge-scoped variable carrying the dependency file of a compile edge.
pub const DEPFILE_VAR: &str = "depfile";

/// Names of the rules in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleName {
    /// Compile a C source into an object.
    CompileC,
    /// Compile a C++ source into an object.
    CompileCxx,
    /// Archive objects into a static library.
    ArchiveStaticLibrary,
    /// Link objects into a program.
    LinkProgram,
    /// Delegate to Ninja's own clean tool.
    Clean,
}

impl RuleName {
    /// Every rule, in registration order.
    pub const ALL: [Self; 5] = [
        Self::CompileC,
        Self::CompileCxx,
        Self::ArchiveStaticLibrary,
        Self::LinkProgram,
        Self::Clean,
    ];

    /// Identifier used in the Ninja file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompileC => "compile_c",
            Self::CompileCxx => "compile_cxx",
            Self::ArchiveStaticLibrary => "archive_static_library",
            Self::LinkProgram => "link_program",
            Self::Clean => "clean",
        }
    }
}

impl Display for RuleName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How Ninja should read header dependencies for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepsFormat {
    /// Makefile-style `.d` files as written by `gcc -MD`.
    Gcc,
}

impl DepsFormat {
    /// Value of the rule's `deps` binding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gcc => "gcc",
        }
    }
}

/// A named command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Identifier referenced by build edges.
    pub name: RuleName,
    /// Shell command; `$in`, `$out` and the global variables are expanded by Ninja.
    pub command: String,
    /// Status line shown while the rule runs.
    pub description: String,
    /// Dependency file template, present for rules that emit one.
    pub depfile: Option<&'static str>,
    /// Format of the dependency file.
    pub deps: Option<DepsFormat>,
}

impl Rule {
    /// Whether edges using this rule must carry a `depfile` binding.
    #[must_use]
    pub const fn tracks_depfile(&self) -> bool {
        self.depfile.is_some()
    }
}

/// The rules available to build edges, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Look up a rule by name.
    #[must_use]
    pub fn get(&self, name: RuleName) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Iterate over the rules in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Number of registered rules.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty. It never is once registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn compile_rule(name: RuleName, command: String, description: &str) -> Rule {
    Rule {
        name,
        command,
        description: description.to_owned(),
        depfile: Some(DEPFILE_TEMPLATE),
        deps: Some(DepsFormat::Gcc),
    }
}

fn plain_rule(name: RuleName, command: String, description: &str) -> Rule {
    Rule {
        name,
        command,
        description: description.to_owned(),
        depfile: None,
        deps: None,
    }
}

/// Build the rule registry for the toolchain in `env`.
///
/// Only the compiler executables are baked into the commands; flags are
/// referenced through the global variables written by
/// [`crate::variables::emit_variables`].
///
/// ```
/// use ninjacc::ast::BuildEnv;
/// use ninjacc::rules::{register_rules, RuleName};
///
/// let rules = register_rules(&BuildEnv::default());
/// assert_eq!(rules.len(), 5);
/// let link = rules.get(RuleName::LinkProgram).expect("link rule");
/// assert_eq!(link.command, "c++ -o $out $LIBS $in");
/// ```
#[must_use]
pub fn register_rules(env: &BuildEnv) -> RuleRegistry {
    let cc = &env.cc;
    let cxx = &env.cxx;
    let rules = vec![
        compile_rule(
            RuleName::CompileC,
            format!("{cc} $CFLAGS $CCFLAGS $CXXFLAGS $CPPFLAGS $CPPPATH -o $out -c $in"),
            "Building C object $out",
        ),
        compile_rule(
            RuleName::CompileCxx,
            format!("{cxx} $CCFLAGS $CXXFLAGS $CPPFLAGS $CPPPATH -o $out -c $in"),
            "Building C++ object $out",
        ),
        plain_rule(
            RuleName::ArchiveStaticLibrary,
            "ar qc $out $in && ranlib $out".to_owned(),
            "Linking static library $out",
        ),
        plain_rule(
            RuleName::LinkProgram,
            format!("{cxx} -o $out $LIBS $in"),
            "Linking program $out",
        ),
        plain_rule(
            RuleName::Clean,
            "ninja -t clean".to_owned(),
            "Cleaning all built files...",
        ),
    ];
    RuleRegistry { rules }
}
