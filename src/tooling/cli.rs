//! CLI Tooling
//!
//! Command-line interface for generating and inspecting snapshots. All paths
//! are resolved against the workspace root.

use crate::config::{ConfigLoader, SnapshotConfig, StaticsConfig};
use crate::error::ApiError;
use crate::fs::Files;
use crate::logging::LoggingConfig;
use crate::tooling::format::{format_snapshot_text, node_rows};
use crate::tree::{Node, TreeBuilder};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Statics CLI - embed a directory tree as a compressed snapshot
#[derive(Parser)]
#[command(name = "statics")]
#[command(about = "Snapshot static files into an embeddable artifact and read them back")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold the logging flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk a directory and write its snapshot document
    Snapshot {
        /// Directory to snapshot (default: [snapshot].input)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,
        /// Output file (default: [snapshot].output, else stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
        /// Regex of logical paths to leave out
        #[arg(long)]
        ignore: Option<String>,
        /// Prefix stripped from stored paths
        #[arg(long)]
        prefix: Option<String>,
        /// Write an empty placeholder root instead of walking
        #[arg(long)]
        init: bool,
    },
    /// List every node in a snapshot document
    Inspect {
        /// Snapshot document
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print one file from a snapshot document
    Cat {
        /// Snapshot document
        file: PathBuf,
        /// Logical path inside the snapshot
        path: String,
    },
}

/// CLI context holding the workspace and its resolved configuration
pub struct CliContext {
    workspace_root: PathBuf,
    config: StaticsConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &StaticsConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Snapshot {
                input,
                output,
                ignore,
                prefix,
                init,
            } => {
                let snapshot = SnapshotConfig {
                    input: input.clone().unwrap_or_else(|| self.config.snapshot.input.clone()),
                    output: output.clone().or_else(|| self.config.snapshot.output.clone()),
                    ignore: ignore.clone().or_else(|| self.config.snapshot.ignore.clone()),
                    prefix: prefix.clone().or_else(|| self.config.snapshot.prefix.clone()),
                };
                self.handle_snapshot(&snapshot, *init)
            }
            Commands::Inspect { file, format } => self.handle_inspect(file, format),
            Commands::Cat { file, path } => self.handle_cat(file, path),
        }
    }

    fn handle_snapshot(&self, snapshot: &SnapshotConfig, init: bool) -> Result<String, ApiError> {
        let builder = TreeBuilder::new(snapshot.input.clone())
            .with_base(self.workspace_root.clone())
            .with_walker_config(snapshot.walker_config()?);
        let tree = if init {
            builder.placeholder()?
        } else {
            builder.build()?
        };
        let json = tree.to_json()?;

        let Some(output) = &snapshot.output else {
            return Ok(json);
        };
        let output = self.resolve(output);
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&output, json)?;
        info!(output = %output.display(), nodes = tree.count(), "Wrote snapshot");
        Ok(format!(
            "Wrote snapshot of {} ({} nodes) to {}",
            tree.path,
            tree.count(),
            output.display()
        ))
    }

    fn handle_inspect(&self, file: &Path, format: &str) -> Result<String, ApiError> {
        let tree = self.load_tree(file)?;
        match format {
            "text" => Ok(format_snapshot_text(&file.display().to_string(), &tree)),
            "json" => Ok(serde_json::to_string_pretty(&node_rows(&tree))?),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn handle_cat(&self, file: &Path, path: &str) -> Result<String, ApiError> {
        let tree = self.load_tree(file)?;
        let files = Files::new(&self.config.fs, &tree)?;
        let bytes = files.read_file(path)?;
        String::from_utf8(bytes).map_err(|_| ApiError::NotText(path.to_string()))
    }

    fn load_tree(&self, file: &Path) -> Result<Node, ApiError> {
        let json = std::fs::read_to_string(self.resolve(file))?;
        Ok(Node::from_json(&json)?)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.workspace_root.join(path)
    }
}
