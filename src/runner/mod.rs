//! Runner: open a `.cex` file and execute its payload
//!
//! Each run walks `opened -> decoded -> dispatched -> done`; the first
//! failing step ends the run and nothing after it happens.

pub mod dispatch;

use std::fmt;
use std::path::Path;

use crate::artifact::{ArtifactKind, Toolchain};
use crate::container::Container;
use crate::error::{CexError, Result};

pub use dispatch::dispatch;

/// Read, decode and execute the container at `path`
pub fn run(path: &Path, toolchain: &Toolchain) -> Result<()> {
    let container = Container::read_from(path)?;
    run_container(&container, toolchain)
}

/// Execute an already decoded container
pub fn run_container(container: &Container, toolchain: &Toolchain) -> Result<()> {
    let file_type = container.metadata.file_type().ok_or_else(|| {
        CexError::UnsupportedRuntimeExtension(container.entry_point().to_string())
    })?;

    dispatch(&container.payload, &file_type, toolchain)?;
    tracing::debug!(entry_point = %container.entry_point(), "run complete");
    Ok(())
}

/// Summary of a container, shown without executing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub entry_point: String,
    pub kind: Option<ArtifactKind>,
    pub payload_len: usize,
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Entry point: {}", self.entry_point)?;
        match &self.kind {
            Some(kind) => writeln!(f, "Kind:        {}", kind)?,
            None => writeln!(f, "Kind:        unknown")?,
        }
        write!(f, "Payload:     {} bytes", self.payload_len)
    }
}

/// Decode the container at `path` and describe it
pub fn inspect(path: &Path) -> Result<Inspection> {
    let container = Container::read_from(path)?;
    Ok(Inspection {
        entry_point: container.entry_point().to_string(),
        kind: container.metadata.kind(),
        payload_len: container.payload.len(),
    })
}
