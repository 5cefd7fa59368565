//! Snapshot trees
//!
//! Walks a directory on disk into an ordered [`Node`] tree ready to be
//! serialized into a generated artifact.

pub mod builder;
pub mod node;
pub mod path;
pub mod walker;

pub use builder::TreeBuilder;
pub use node::{FileMode, Node};
pub use walker::WalkerConfig;
