//! Line formatting
//!
//! Wire format: `<pid>:<app> <dd> <Mon> <HH:MM:SS.mmm> <glyph> <message>\n`
//! Example: `4242:M 05 Jan 13:04:05.007 * Ready to accept connections`
//!
//! Lines are always composed uncolored. Terminal coloring is applied
//! afterwards as a substitution on the glyph field.

use crate::constants::TIMESTAMP_FORMAT;
use crate::level::{paint, Level};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write as _};

/// A fully composed, uncolored log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    text: String,
    glyph_at: usize,
    level: Level,
}

impl FormattedLine {
    /// Plain text including the trailing newline
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume into the plain text
    pub fn into_plain(self) -> String {
        self.text
    }

    /// Render for a terminal: the glyph is wrapped in the level's color.
    /// Levels without a color come back unchanged.
    pub fn into_colored(self) -> String {
        let Some(code) = self.level.color() else {
            return self.text;
        };
        let glyph_end = self.glyph_at + 1;
        let mut out = String::with_capacity(self.text.len() + 12);
        out.push_str(&self.text[..self.glyph_at]);
        out.push_str(&paint(code, &self.text[self.glyph_at..glyph_end]));
        out.push_str(&self.text[glyph_end..]);
        out
    }

    /// Render plain or colored depending on the sink's terminal capability
    pub fn render(self, tty: bool) -> String {
        if tty {
            self.into_colored()
        } else {
            self.into_plain()
        }
    }
}

/// Strip trailing spaces, tabs, carriage returns and newlines
#[inline]
pub fn trim_trailing(msg: &str) -> &str {
    msg.trim_end_matches([' ', '\t', '\r', '\n'])
}

/// Compose one log line. `message` must already be trimmed.
pub fn format_line<Tz>(pid: u32, app: u8, now: &DateTime<Tz>, level: Level, message: &str) -> FormattedLine
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut text = String::with_capacity(32 + message.len());
    // Writing into a String cannot fail
    let _ = write!(text, "{}:{} {} ", pid, app as char, now.format(TIMESTAMP_FORMAT));
    let glyph_at = text.len();
    text.push(level.glyph() as char);
    text.push(' ');
    text.push_str(message);
    text.push('\n');

    FormattedLine {
        text,
        glyph_at,
        level,
    }
}

/// Color the glyph field (index 4) of an already formatted line.
///
/// Lines with five fields or fewer, or with an unknown glyph, are returned
/// unchanged.
pub fn colorize_formatted(line: &str) -> String {
    let mut parts: Vec<&str> = line.split(' ').collect();
    if parts.len() <= 5 {
        return line.to_string();
    }
    let Some(code) = Level::from_glyph(parts[4]).and_then(Level::color) else {
        return line.to_string();
    };
    let painted = paint(code, parts[4]);
    parts[4] = &painted;
    parts.join(" ")
}
