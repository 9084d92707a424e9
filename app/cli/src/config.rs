//! FILENAME: app/cli/src/config.rs
// PURPOSE: Command-line arguments and the explicit pipeline configuration.

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};
use treemap_engine::{HierarchyConfig, DEFAULT_BASE_TITLE};

pub const DEFAULT_INPUT_PATH: &str = "CS_rootcause_trunc.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "tickets-treemap.html";
pub const DEFAULT_DEBUG_DIR: &str = "debug_output";

/// Command-line interface
#[derive(Parser, Debug, Clone)]
#[command(name = "treemap", about = "Builds an interactive treemap from a ticket root cause export")]
pub struct Args {
    /// Semicolon-delimited CSV export
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// HTML file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Directory for the intermediate CSV dumps
    #[arg(long, default_value = DEFAULT_DEBUG_DIR)]
    pub debug_dir: PathBuf,

    /// Skip writing the intermediate CSV dumps
    #[arg(long)]
    pub no_debug: bool,

    /// Base chart title; the value column name is appended
    #[arg(long, default_value = DEFAULT_BASE_TITLE)]
    pub title: String,

    /// Also write log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Include debug-level log lines
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything one pipeline run needs. Passed explicitly; there is no
/// process-wide state besides logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub debug_dir: PathBuf,
    pub debug_output: bool,
    pub base_title: String,
    pub hierarchy: HierarchyConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            debug_dir: PathBuf::from(DEFAULT_DEBUG_DIR),
            debug_output: true,
            base_title: DEFAULT_BASE_TITLE.to_string(),
            hierarchy: HierarchyConfig::default(),
        }
    }
}

impl From<&Args> for PipelineConfig {
    fn from(args: &Args) -> Self {
        PipelineConfig {
            input_path: args.input.clone(),
            output_path: args.output.clone(),
            debug_dir: args.debug_dir.clone(),
            debug_output: !args.no_debug,
            base_title: args.title.clone(),
            hierarchy: HierarchyConfig::default(),
        }
    }
}
