//! Command-line argument parsing for the `tabview` binary
//!
//! Supports:
//! - Rendering a file to sanitized HTML
//! - Printing the detected delimiter
//! - Printing table statistics as JSON
//! - Writing a default config file

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::EngineConfig;
use crate::csv::Delimiter;

/// Render delimited text files as sanitized HTML tables
#[derive(Parser, Debug)]
#[command(
    name = "tabview",
    version,
    about = "Render delimited text files as sanitized HTML tables"
)]
pub struct CliArgs {
    /// Use this config file instead of ~/.config/tabview/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a file as an HTML document
    Render(RenderArgs),
    /// Print the delimiter that would be used for a file
    Detect {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Print row and column counts as JSON
    Stats {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Skip detection and use this delimiter
        #[arg(short, long, value_enum)]
        delimiter: Option<Delimiter>,
    },
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// File to render
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Skip detection and use this delimiter
    #[arg(short, long, value_enum)]
    pub delimiter: Option<Delimiter>,

    /// Write the markup here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep at most N data rows
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Keep at most N columns
    #[arg(long, value_name = "N")]
    pub columns: Option<usize>,

    /// Open the written file in the default browser
    #[arg(long, requires = "output")]
    pub open: bool,
}

impl CliArgs {
    /// Config file location, honoring `--config`
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(crate::config_paths::config_file)
    }

    /// Load the engine config, falling back to defaults
    pub fn load_config(&self) -> EngineConfig {
        match &self.config {
            Some(path) => EngineConfig::load_from(path),
            None => EngineConfig::load(),
        }
    }
}

impl RenderArgs {
    /// Apply `--rows` / `--columns` on top of the configured limits
    pub fn apply_limits(&self, config: &mut EngineConfig) {
        if let Some(rows) = self.rows {
            config.limits.row_limit = Some(rows);
        }
        if let Some(columns) = self.columns {
            config.limits.column_limit = Some(columns);
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}
