//! Container struct definition
//!
//! A Container is one packed artifact: the payload bytes plus the metadata
//! record describing where they came from.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::codec;
use crate::artifact::{self, ArtifactKind};
use crate::error::{CexError, Result};

/// Metadata stored alongside the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Original relative file name of the packed artifact
    pub entry_point: String,
    /// Any other fields present in the record, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    pub fn new(entry_point: impl Into<String>) -> Self {
        Self {
            entry_point: entry_point.into(),
            extra: Map::new(),
        }
    }

    /// Extension of the entry point, which drives dispatch
    pub fn file_type(&self) -> Option<String> {
        artifact::file_type(Path::new(&self.entry_point))
    }

    pub fn kind(&self) -> Option<ArtifactKind> {
        ArtifactKind::from_path(Path::new(&self.entry_point))
    }
}

/// A packed artifact
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Source text or native binary bytes
    pub payload: Vec<u8>,
    pub metadata: Metadata,
}

impl Container {
    pub fn new(payload: Vec<u8>, metadata: Metadata) -> Self {
        Self { payload, metadata }
    }

    pub fn entry_point(&self) -> &str {
        &self.metadata.entry_point
    }

    /// Serialize to the on-disk layout
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        codec::encode(&self.payload, &self.metadata)
    }

    /// Parse the on-disk layout
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes)
    }

    /// Read and decode a container file
    pub fn read_from(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| CexError::ContainerReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "container opened");
        Self::from_bytes(&bytes)
    }

    /// Encode and write to `path`
    ///
    /// Bytes go to a temporary file next to the target which is renamed
    /// over it once complete, so a failure leaves no partial file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        let write_err = |source| CexError::ContainerWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(".cex-").suffix(".partial");
        // Same mode a plain create would get; the umask still applies
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder.tempfile_in(dir).map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "container written");
        Ok(())
    }
}
