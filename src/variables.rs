//! Global build variables.
//!
//! Converts the resolved [`BuildEnv`] into the variables the rule commands
//! reference. Include paths and libraries are rewritten into compiler
//! arguments; the flag lists are copied as-is.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::ast::{BuildEnv, LibEntry};

/// Placeholder for the build root in include paths.
const BUILD_ROOT: char = '#';

/// Names of the global variables, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarName {
    /// Preprocessor flags.
    CppFlags,
    /// C-only flags.
    CFlags,
    /// Flags shared by C and C++.
    CcFlags,
    /// C++ flags.
    CxxFlags,
    /// `-I` include arguments.
    CppPath,
    /// Linker library arguments.
    Libs,
}

impl VarName {
    /// Identifier used in the Ninja file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CppFlags => "CPPFLAGS",
            Self::CFlags => "CFLAGS",
            Self::CcFlags => "CCFLAGS",
            Self::CxxFlags => "CXXFLAGS",
            Self::CppPath => "CPPPATH",
            Self::Libs => "LIBS",
        }
    }
}

impl Display for VarName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A global variable and its ordered values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Variable name.
    pub name: VarName,
    /// Values in the order they are passed to the tools.
    pub values: Vec<String>,
}

impl Variable {
    /// The values joined by single spaces, skipping empty entries.
    ///
    /// ```
    /// use ninjacc::variables::{Variable, VarName};
    ///
    /// let var = Variable {
    ///     name: VarName::CcFlags,
    ///     values: vec!["-O2".into(), String::new(), "-g".into()],
    /// };
    /// assert_eq!(var.value(), "-O2 -g");
    /// ```
    #[must_use]
    pub fn value(&self) -> String {
        self.values.iter().filter(|v| !v.is_empty()).join(" ")
    }
}

/// Turn include directories into `-I` arguments.
///
/// Every `#` build-root placeholder is rewritten to `./` before prefixing.
///
/// ```
/// use ninjacc::variables::expand_include;
///
/// let paths = vec!["#platform/wayland".to_owned(), "/usr/include/freetype2".to_owned()];
/// assert_eq!(
///     expand_include(&paths),
///     ["-I./platform/wayland", "-I/usr/include/freetype2"]
/// );
/// ```
#[must_use]
pub fn expand_include(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|path| format!("-I{}", path.replace(BUILD_ROOT, "./")))
        .collect()
}

/// Turn library entries into linker arguments.
///
/// Plain names gain a `-l` prefix; resolved library files are listed as-is.
#[must_use]
pub fn expand_libs(libs: &[LibEntry]) -> Vec<String> {
    libs.iter()
        .flat_map(|entry| match entry {
            LibEntry::Name(name) => vec![format!("-l{name}")],
            LibEntry::Resolved(files) => files.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

/// Produce the global variables for `env` in emission order.
#[must_use]
pub fn emit_variables(env: &BuildEnv) -> Vec<Variable> {
    [
        (VarName::CppFlags, env.cppflags.clone()),
        (VarName::CFlags, env.cflags.clone()),
        (VarName::CcFlags, env.ccflags.clone()),
        (VarName::CxxFlags, env.cxxflags.clone()),
        (VarName::CppPath, expand_include(&env.cpppath)),
        (VarName::Libs, expand_libs(&env.libs)),
    ]
    .into_iter()
    .map(|(name, values)| Variable { name, values })
    .collect()
}
