//! Container module: the single-file `.cex` format
//!
//! A container holds exactly one artifact:
//! - the payload (source text or a compiled binary)
//! - a JSON metadata record naming the original entry point

pub mod codec;
mod types;

pub use codec::{decode, encode};
pub use types::{Container, Metadata};
