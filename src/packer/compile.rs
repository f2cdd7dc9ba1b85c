//! Ahead-of-time compilation of native entry points

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::artifact::{Compiler, Toolchain};
use crate::error::{CexError, Result};
use crate::process::{describe_exit, run_tool};

/// File name of the compiler output inside the scratch directory
const BINARY_NAME: &str = "embedded_binary";

/// Compile `source` and return the resulting binary's bytes
///
/// The compiler writes into a scratch directory unique to this call; the
/// directory and everything in it are removed when this returns, whether
/// compilation succeeded or not.
pub fn compile(source: &Path, compiler: Compiler, toolchain: &Toolchain) -> Result<Vec<u8>> {
    if !source.is_file() {
        return Err(CexError::SourceFileNotFound {
            path: source.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }

    let failure = |reason: String| CexError::CompileFailure {
        path: source.to_path_buf(),
        reason,
    };

    let scratch = tempfile::Builder::new()
        .prefix("cex-build-")
        .tempdir()
        .map_err(|e| failure(format!("cannot create scratch directory: {}", e)))?;
    let output = scratch.path().join(BINARY_NAME);

    let program = toolchain.compiler(compiler);
    tracing::info!(compiler = %compiler, program, source = %source.display(), "compiling");

    let status = run_tool(
        program,
        [source.as_os_str(), OsStr::new("-o"), output.as_os_str()],
    )
    .map_err(|e| failure(format!("cannot run {} compiler `{}`: {}", compiler, program, e)))?;

    if !status.success() {
        return Err(failure(format!("`{}` {}", program, describe_exit(&status))));
    }

    let binary = fs::read(&output)
        .map_err(|e| failure(format!("compiler produced no readable output: {}", e)))?;

    if let Err(e) = scratch.close() {
        tracing::warn!(error = %e, "failed to remove build scratch directory");
    }
    Ok(binary)
}
