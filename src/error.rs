//! Error types for cex

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CexError {
    #[error("{0}")]
    Usage(String),

    #[error("The specified folder does not exist or is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Missing config.toml in the folder: {}", .0.display())]
    MissingConfig(PathBuf),

    #[error("Invalid config file {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Missing string field general.entry_point in {}", .0.display())]
    MissingEntryField(PathBuf),

    #[error("Entry point {entry_point:?} in {} must be a relative path inside the project", path.display())]
    InvalidEntryPoint { path: PathBuf, entry_point: String },

    #[error("Unsupported source file type: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("Failed to open source file {}: {source}", path.display())]
    SourceFileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to compile source file {}: {reason}", path.display())]
    CompileFailure { path: PathBuf, reason: String },

    #[error("Failed to write .cex file {}: {source}", path.display())]
    ContainerWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open .cex file {}: {source}", path.display())]
    ContainerReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt container: {0}")]
    CorruptContainer(String),

    #[error("Failed to parse metadata: {0}")]
    MetadataParseError(String),

    #[error("Unsupported file type for execution: {0}")]
    UnsupportedRuntimeExtension(String),

    #[error("Execution failed for {runtime} script: {reason}")]
    ExecutionFailure {
        runtime: String,
        reason: String,
        code: Option<i32>,
    },
}

impl CexError {
    /// Process exit status for this error.
    ///
    /// A failing interpreter's own exit code is passed through; everything
    /// else collapses to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CexError::ExecutionFailure {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_passes_through_interpreter_status() {
        let err = CexError::ExecutionFailure {
            runtime: "Python".to_string(),
            reason: "exited with status 3".to_string(),
            code: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        let signalled = CexError::ExecutionFailure {
            runtime: "Ruby".to_string(),
            reason: "terminated by signal".to_string(),
            code: None,
        };
        assert_eq!(signalled.exit_code(), 1);
        assert_eq!(CexError::CorruptContainer("short".into()).exit_code(), 1);
        assert_eq!(CexError::Usage("missing argument".into()).exit_code(), 1);
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = CexError::MissingConfig(PathBuf::from("/tmp/project"));
        assert!(err.to_string().contains("/tmp/project"));
        assert!(err.to_string().contains("config.toml"));
    }
}
