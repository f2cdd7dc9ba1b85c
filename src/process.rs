//! External process invocation
//!
//! Compilers and interpreters are spawned with an explicit argument vector
//! and the caller's stdio, and waited for without a timeout.

use std::ffi::OsStr;
use std::io;
use std::process::{Command, ExitStatus};

/// Run `program` with `args` and wait for it to finish
pub fn run_tool<I, S>(program: &str, args: I) -> io::Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    tracing::debug!(command = ?cmd, "spawning external process");

    let status = cmd.status()?;
    tracing::debug!(program, %status, "external process finished");
    Ok(status)
}

/// Human-readable description of a non-successful exit
pub fn describe_exit(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by a signal".to_string(),
    }
}
