//! Artifact classification
//!
//! Maps an entry point's file extension to the kind of artifact it is and
//! to the external tool that handles it. The table is closed: anything not
//! listed here cannot be packed.

use std::fmt;
use std::path::Path;

/// External language runtime that executes interpreted source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    Python,
    Ruby,
    Lisp,
}

/// External compiler that turns source into a native binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiler {
    Cxx,
    C,
    Fortran,
}

/// What an entry point is, decided from its extension alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Payload is literal source text run by an interpreter
    Interpreted(Runtime),
    /// Payload is a native binary produced ahead of packaging
    Compiled(Compiler),
}

impl ArtifactKind {
    /// Classify a bare extension (without the leading dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "py" => Some(ArtifactKind::Interpreted(Runtime::Python)),
            "rb" => Some(ArtifactKind::Interpreted(Runtime::Ruby)),
            "lisp" => Some(ArtifactKind::Interpreted(Runtime::Lisp)),
            "cpp" => Some(ArtifactKind::Compiled(Compiler::Cxx)),
            "c" => Some(ArtifactKind::Compiled(Compiler::C)),
            "f90" | "f95" => Some(ArtifactKind::Compiled(Compiler::Fortran)),
            _ => None,
        }
    }

    /// Classify a file name or path by its extension
    pub fn from_path(path: &Path) -> Option<Self> {
        file_type(path).and_then(|ext| Self::from_extension(&ext))
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Interpreted(runtime) => write!(f, "interpreted ({})", runtime),
            ArtifactKind::Compiled(compiler) => write!(f, "compiled ({})", compiler),
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Runtime::Python => "Python",
            Runtime::Ruby => "Ruby",
            Runtime::Lisp => "Lisp",
        })
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Compiler::Cxx => "C++",
            Compiler::C => "C",
            Compiler::Fortran => "Fortran",
        })
    }
}

impl Runtime {
    /// Extension given to the transient script file
    pub fn script_extension(&self) -> &'static str {
        match self {
            Runtime::Python => "py",
            Runtime::Ruby => "rb",
            Runtime::Lisp => "lisp",
        }
    }

    /// Arguments placed before the script path
    pub fn leading_args(&self) -> &'static [&'static str] {
        match self {
            Runtime::Lisp => &["--script"],
            Runtime::Python | Runtime::Ruby => &[],
        }
    }
}

/// The extension of a file name, as used for classification and dispatch
///
/// Everything after the last `.` of the final component, so a bare `.py`
/// still has type `py`. An empty extension counts as none.
pub fn file_type(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_string());
    ext.filter(|ext| !ext.is_empty())
}

/// Names of the external executables used to compile and interpret
///
/// Resolved through `PATH` when spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub python: String,
    pub ruby: String,
    pub sbcl: String,
    pub cxx: String,
    pub cc: String,
    pub fortran: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            ruby: "ruby".to_string(),
            sbcl: "sbcl".to_string(),
            cxx: "g++".to_string(),
            cc: "gcc".to_string(),
            fortran: "gfortran".to_string(),
        }
    }
}

impl Toolchain {
    pub fn interpreter(&self, runtime: Runtime) -> &str {
        match runtime {
            Runtime::Python => &self.python,
            Runtime::Ruby => &self.ruby,
            Runtime::Lisp => &self.sbcl,
        }
    }

    pub fn compiler(&self, compiler: Compiler) -> &str {
        match compiler {
            Compiler::Cxx => &self.cxx,
            Compiler::C => &self.cc,
            Compiler::Fortran => &self.fortran,
        }
    }
}
