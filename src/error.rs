//! Centralized error types
//!
//! Logging calls never fail; these errors cover configuration loading and
//! the `redlog` binary's setup.
//! Use `Result<T>` as shorthand for `std::result::Result<T, RedlogError>`.

use std::fmt;
use std::path::PathBuf;

/// All redlog setup errors
#[derive(Debug)]
pub enum RedlogError {
    // === IO ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Config ===
    /// Config file is not valid TOML or has unexpected fields
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === Runtime ===
    /// A relay thread could not be started
    Runtime { source: std::io::Error },
}

impl std::error::Error for RedlogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Runtime { source } => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            Self::ConfigValidation { .. } => None,
        }
    }
}

impl fmt::Display for RedlogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
            Self::ConfigParse { path, .. } => {
                write!(f, "Cannot parse config: {}", path.display())
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::Runtime { .. } => write!(f, "Failed to start relay thread"),
        }
    }
}

/// Alias for Result with RedlogError
pub type Result<T> = std::result::Result<T, RedlogError>;
