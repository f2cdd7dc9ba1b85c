//! CLI argument parsing

use clap::{Args, Parser};
use std::path::PathBuf;

use crate::artifact::Toolchain;

/// `cexc <project_directory> <output.cex>`
#[derive(Parser, Debug)]
#[command(name = "cexc")]
#[command(author, version, about = "Pack a project's entry point into a .cex file", long_about = None)]
pub struct PackArgs {
    /// Project directory containing config.toml
    pub project_dir: PathBuf,

    /// Path of the .cex file to create
    pub output: PathBuf,

    #[command(flatten)]
    pub toolchain: ToolchainArgs,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// `cexr <file.cex>`
#[derive(Parser, Debug)]
#[command(name = "cexr")]
#[command(author, version, about = "Run the artifact packed in a .cex file", long_about = None)]
pub struct RunArgs {
    /// The .cex file to run
    pub container: PathBuf,

    /// Describe the container instead of running it
    #[arg(long)]
    pub inspect: bool,

    #[command(flatten)]
    pub toolchain: ToolchainArgs,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Overrides for the external executables
#[derive(Args, Debug, Clone, Default)]
pub struct ToolchainArgs {
    /// Python interpreter
    #[arg(long, env = "CEX_PYTHON", value_name = "PROGRAM")]
    pub python: Option<String>,

    /// Ruby interpreter
    #[arg(long, env = "CEX_RUBY", value_name = "PROGRAM")]
    pub ruby: Option<String>,

    /// Common Lisp runtime (invoked with --script)
    #[arg(long, env = "CEX_SBCL", value_name = "PROGRAM")]
    pub sbcl: Option<String>,

    /// C++ compiler
    #[arg(long, env = "CEX_CXX", value_name = "PROGRAM")]
    pub cxx: Option<String>,

    /// C compiler
    #[arg(long, env = "CEX_CC", value_name = "PROGRAM")]
    pub cc: Option<String>,

    /// Fortran compiler
    #[arg(long, env = "CEX_FORTRAN", value_name = "PROGRAM")]
    pub fortran: Option<String>,
}

impl ToolchainArgs {
    /// Apply overrides on top of the default toolchain
    pub fn resolve(&self) -> Toolchain {
        let defaults = Toolchain::default();
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);
        Toolchain {
            python: pick(&self.python, defaults.python),
            ruby: pick(&self.ruby, defaults.ruby),
            sbcl: pick(&self.sbcl, defaults.sbcl),
            cxx: pick(&self.cxx, defaults.cxx),
            cc: pick(&self.cc, defaults.cc),
            fortran: pick(&self.fortran, defaults.fortran),
        }
    }
}
