//! Tooling & Integration Layer
//!
//! The `statics` command line: snapshot generation, inspection, and reading
//! single files back out of a snapshot.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
