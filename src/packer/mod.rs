//! Packer: project directory in, `.cex` file out
//!
//! Resolves the entry point named by the project's `config.toml`, turns it
//! into payload bytes (raw source, or a freshly compiled binary) and writes
//! the container.

pub mod compile;
pub mod descriptor;

use std::fs;
use std::path::Path;

use crate::artifact::{ArtifactKind, Toolchain};
use crate::container::{Container, Metadata};
use crate::error::{CexError, Result};

pub use descriptor::{load_entry_point, ProjectDescriptor, DESCRIPTOR_FILE};

/// Build a container from `project_dir` and write it to `output`
///
/// Nothing is written to `output` unless every step succeeds.
pub fn pack(project_dir: &Path, output: &Path, toolchain: &Toolchain) -> Result<Container> {
    if !project_dir.is_dir() {
        return Err(CexError::NotADirectory(project_dir.to_path_buf()));
    }

    let entry_point = load_entry_point(project_dir)?;
    let source = project_dir.join(&entry_point);

    let kind = ArtifactKind::from_path(&source)
        .ok_or_else(|| CexError::UnsupportedExtension(source.clone()))?;
    tracing::debug!(entry_point = %entry_point, kind = %kind, "artifact classified");

    let payload = match kind {
        ArtifactKind::Interpreted(_) => {
            fs::read(&source).map_err(|e| CexError::SourceFileNotFound {
                path: source.clone(),
                source: e,
            })?
        }
        ArtifactKind::Compiled(compiler) => compile::compile(&source, compiler, toolchain)?,
    };

    let container = Container::new(payload, Metadata::new(entry_point));
    container.write_to(output)?;

    tracing::info!(
        output = %output.display(),
        payload_len = container.payload.len(),
        "container created"
    );
    Ok(container)
}
