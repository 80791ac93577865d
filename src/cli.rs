//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use crate::level::Level;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Log stdin lines in Redis log format
#[derive(Parser, Debug, Default)]
#[command(name = "redlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum level written (overrides config)
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<Level>,

    /// App tag of the root logger (overrides config)
    #[arg(long, value_name = "CHAR")]
    pub app: Option<String>,

    /// Log through a child logger stamping this tag
    #[arg(long, value_name = "CHAR")]
    pub tag: Option<String>,

    /// Parse input as Raft library log lines
    #[arg(long)]
    pub raft: bool,

    /// Drop identical consecutive lines
    #[arg(long)]
    pub dedup: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Color already formatted redlog lines read from stdin
    Colorize,
}

// =============================================================================
// Tests
// =============================================================================
