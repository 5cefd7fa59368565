//! Integration tests for snapshot generation and the virtual filesystem

mod common;

mod cli_commands;
mod disk_fallback;
mod snapshot_walk;
