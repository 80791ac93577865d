//! Configuration for the `redlog` binary
//!
//! The library itself is configured programmatically through
//! [`Options`]; this file format only exists for the command-line tool.
//!
//! ```toml
//! [logger]
//! level = "notice"
//! app = "M"
//! duplicate_suppression = false
//! dedup_window_ms = 1
//! filter = "none"
//!
//! [output]
//! colorize = false
//! ```

use crate::constants::{DEFAULT_APP_TAG, DEFAULT_DEDUP_WINDOW};
use crate::error::{RedlogError, Result};
use crate::filter::Filter;
use crate::level::Level;
use crate::logger::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
    pub output: OutputConfig,
}

/// Which filter raw input lines go through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Lines are logged verbatim at Notice
    #[default]
    None,
    /// Lines are parsed as Raft library output
    Raft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level written
    pub level: Level,
    /// App tag of the root logger (single ASCII character)
    pub app: String,
    /// Drop identical consecutive lines within the window
    pub duplicate_suppression: bool,
    /// Duplicate suppression window in milliseconds
    pub dedup_window_ms: u64,
    /// Input filter
    pub filter: FilterKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Color glyphs of lines on a terminal through the colorizing relay
    pub colorize: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Notice,
            app: (DEFAULT_APP_TAG as char).to_string(),
            duplicate_suppression: false,
            dedup_window_ms: DEFAULT_DEDUP_WINDOW.as_millis() as u64,
            filter: FilterKind::None,
        }
    }
}

impl Config {
    /// Parse and validate TOML text
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| RedlogError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<()> {
        parse_app_tag(&self.logger.app)?;
        Ok(())
    }

    /// Build logger options
    pub fn options(&self) -> Result<Options> {
        let filter = match self.logger.filter {
            FilterKind::None => Filter::Bypass,
            FilterKind::Raft => Filter::raft(),
        };
        Ok(Options {
            level: self.logger.level,
            filter,
            app: parse_app_tag(&self.logger.app)?,
            duplicate_suppression: self.logger.duplicate_suppression,
            dedup_window: Duration::from_millis(self.logger.dedup_window_ms),
        })
    }
}

/// Validate an app tag: exactly one ASCII character
pub fn parse_app_tag(value: &str) -> Result<u8> {
    match value.as_bytes() {
        [tag] if tag.is_ascii() && !tag.is_ascii_whitespace() => Ok(*tag),
        _ => Err(RedlogError::ConfigValidation {
            field: "app",
            reason: format!("'{value}' must be a single ASCII character"),
        }),
    }
}

/// Load config from file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| RedlogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Config::parse(&content, path)
}

// ============================================================================
// Tests
// ============================================================================
