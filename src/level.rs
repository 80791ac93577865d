//! Severity levels
//!
//! Four ordered severities, each with a fixed glyph and an optional ANSI
//! color. The tables are constant data.

use crate::constants::ANSI_RESET;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug = 0,
    #[serde(alias = "verb")]
    Verbose = 1,
    #[default]
    #[serde(alias = "info")]
    Notice = 2,
    #[serde(alias = "warn")]
    Warning = 3,
}

const GLYPHS: [u8; 4] = [b'.', b'-', b'*', b'#'];
const COLORS: [Option<&str>; 4] = [Some("35"), None, Some("1"), Some("33")];

impl Level {
    /// All levels in ascending order
    pub const ALL: [Level; 4] = [Level::Debug, Level::Verbose, Level::Notice, Level::Warning];

    /// Map any integer into the valid range; out-of-range values saturate
    pub fn clamped(value: i64) -> Self {
        match value {
            i64::MIN..=0 => Level::Debug,
            1 => Level::Verbose,
            2 => Level::Notice,
            _ => Level::Warning,
        }
    }

    /// Single-character glyph written in the level field
    #[inline]
    pub fn glyph(self) -> u8 {
        GLYPHS[self as usize]
    }

    /// ANSI SGR code for terminal output, if the level is colored
    #[inline]
    pub fn color(self) -> Option<&'static str> {
        COLORS[self as usize]
    }

    /// Look up the level rendered as `glyph`
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        match glyph {
            "." => Some(Level::Debug),
            "-" => Some(Level::Verbose),
            "*" => Some(Level::Notice),
            "#" => Some(Level::Warning),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Verbose => "verbose",
            Level::Notice => "notice",
            Level::Warning => "warning",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(Level::Debug),
            "verbose" | "verb" => Ok(Level::Verbose),
            "notice" | "info" => Ok(Level::Notice),
            "warning" | "warn" => Ok(Level::Warning),
            _ => Err(format!(
                "Unknown log level: {s}. Use 'debug', 'verbose', 'notice', or 'warning'"
            )),
        }
    }
}

/// Wrap `text` in the given SGR code and a reset
pub fn paint(code: &str, text: &str) -> String {
    format!("\x1b[{code}m{text}{ANSI_RESET}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_total() {
        assert!(Level::Debug < Level::Verbose);
        assert!(Level::Verbose < Level::Notice);
        assert!(Level::Notice < Level::Warning);
    }

    #[test]
    fn test_glyphs() {
        let glyphs: Vec<char> = Level::ALL.iter().map(|l| l.glyph() as char).collect();
        assert_eq!(glyphs, vec!['.', '-', '*', '#']);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Level::Debug.color(), Some("35"));
        assert_eq!(Level::Verbose.color(), None);
        assert_eq!(Level::Notice.color(), Some("1"));
        assert_eq!(Level::Warning.color(), Some("33"));
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Level::clamped(-7), Level::Debug);
        assert_eq!(Level::clamped(0), Level::Debug);
        assert_eq!(Level::clamped(1), Level::Verbose);
        assert_eq!(Level::clamped(2), Level::Notice);
        assert_eq!(Level::clamped(3), Level::Warning);
        assert_eq!(Level::clamped(4), Level::Warning);
        assert_eq!(Level::clamped(i64::MAX), Level::Warning);
    }

    #[test]
    fn test_from_glyph() {
        for level in Level::ALL {
            let glyph = (level.glyph() as char).to_string();
            assert_eq!(Level::from_glyph(&glyph), Some(level));
        }
        assert_eq!(Level::from_glyph("x"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("DEBUG".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("verb".parse::<Level>(), Ok(Level::Verbose));
        assert_eq!("info".parse::<Level>(), Ok(Level::Notice));
        assert_eq!("warn".parse::<Level>(), Ok(Level::Warning));
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_paint() {
        assert_eq!(paint("33", "#"), "\x1b[33m#\x1b[0m");
    }
}
