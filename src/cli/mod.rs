//! Shared plumbing for the `cexc` and `cexr` binaries

pub mod args;

pub use args::{PackArgs, RunArgs, ToolchainArgs};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::CexError;

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "CEX_LOG";

/// Initialize stderr logging
///
/// `CEX_LOG` wins when set; otherwise `--verbose` selects debug output and
/// the default shows warnings only.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "cex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse CLI arguments, turning usage mistakes into `CexError::Usage`
///
/// `--help` and `--version` print and exit 0 as usual.
pub fn parse_args<T: Parser>() -> Result<T, CexError> {
    T::try_parse().map_err(|e| {
        if !e.use_stderr() {
            e.exit();
        }
        let rendered = e.render().to_string();
        CexError::Usage(rendered.trim_start_matches("error: ").trim_end().to_string())
    })
}
