//! Cex - pack a single script or program into a self-contained `.cex` file
//!
//! A `.cex` container holds one artifact (interpreted source, or a native
//! binary compiled at pack time) plus a small JSON metadata record. `cexc`
//! builds containers from a project directory; `cexr` unpacks and runs them.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use cex::{pack, run, Toolchain};
//!
//! let tools = Toolchain::default();
//! pack(Path::new("hello"), Path::new("hello.cex"), &tools).unwrap();
//! run(Path::new("hello.cex"), &tools).unwrap();
//! ```

pub mod artifact;
pub mod cli;
pub mod container;
pub mod error;
pub mod packer;
pub mod process;
pub mod runner;

pub use artifact::{ArtifactKind, Compiler, Runtime, Toolchain};
pub use container::{decode, encode, Container, Metadata};
pub use error::{CexError, Result};
pub use packer::pack;
pub use runner::{inspect, run, Inspection};
