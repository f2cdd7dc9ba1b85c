//! Dispatcher: payload + file type to an interpreter invocation

use std::io::Write;

use crate::artifact::{ArtifactKind, Runtime, Toolchain};
use crate::error::{CexError, Result};
use crate::process::{describe_exit, run_tool};

/// Run `payload` with the interpreter matching `file_type`
///
/// The payload is written to a uniquely named transient script with the
/// matching extension, which is removed once the interpreter exits (or
/// fails to start).
pub fn dispatch(payload: &[u8], file_type: &str, toolchain: &Toolchain) -> Result<()> {
    let runtime = match ArtifactKind::from_extension(file_type) {
        Some(ArtifactKind::Interpreted(runtime)) => runtime,
        Some(ArtifactKind::Compiled(compiler)) => {
            return Err(CexError::UnsupportedRuntimeExtension(format!(
                "{} (containers holding a compiled {} binary have no execution path)",
                file_type, compiler
            )));
        }
        None => return Err(CexError::UnsupportedRuntimeExtension(file_type.to_string())),
    };

    run_interpreted(payload, runtime, toolchain)
}

fn run_interpreted(payload: &[u8], runtime: Runtime, toolchain: &Toolchain) -> Result<()> {
    let failure = |reason: String, code: Option<i32>| CexError::ExecutionFailure {
        runtime: runtime.to_string(),
        reason,
        code,
    };

    let mut script = tempfile::Builder::new()
        .prefix("cex-script-")
        .suffix(&format!(".{}", runtime.script_extension()))
        .tempfile()
        .map_err(|e| failure(format!("cannot create temporary script: {}", e), None))?;
    script
        .write_all(payload)
        .and_then(|_| script.flush())
        .map_err(|e| failure(format!("cannot write temporary script: {}", e), None))?;

    let program = toolchain.interpreter(runtime);
    let mut args: Vec<&std::ffi::OsStr> = runtime
        .leading_args()
        .iter()
        .map(std::ffi::OsStr::new)
        .collect();
    args.push(script.path().as_os_str());

    tracing::debug!(runtime = %runtime, program, script = %script.path().display(), "dispatching");
    let result = run_tool(program, args);

    // The script goes away regardless of how the interpreter fared
    if let Err(e) = script.close() {
        tracing::warn!(error = %e, "failed to remove temporary script");
    }

    let status = result.map_err(|e| failure(format!("cannot run `{}`: {}", program, e), None))?;
    if !status.success() {
        return Err(failure(describe_exit(&status), status.code()));
    }
    Ok(())
}
