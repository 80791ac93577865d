//! Raft log line filter
//!
//! Parses lines produced by the Raft consensus library.
//! Format: `<timestamp> [L] message`
//! Example: `2024-01-01T00:00:00 [W] leader lost contact`

use super::Record;
use crate::constants::{ANSI_CYAN, ANSI_GREEN, ANSI_YELLOW};
use crate::level::{paint, Level};

/// Role markers colored on terminals, first occurrence only
const ROLE_COLORS: [(&str, &str); 3] = [
    ("[Leader]", ANSI_GREEN),
    ("[Follower]", ANSI_YELLOW),
    ("[Candidate]", ANSI_CYAN),
];

/// Convert a Raft log line into a record.
///
/// Never fails: lines without a severity tag come back at `Verbose` with
/// the leading token removed.
pub fn raft_filter(line: &str, tty: bool) -> Record {
    // Drop the leading timestamp token
    let rest = match line.find(' ') {
        Some(idx) => &line[idx + 1..],
        None => line,
    };

    let (level, message) = split_tag(rest);
    let message = if tty {
        color_roles(message)
    } else {
        message.to_string()
    };

    Record {
        message,
        app: 0,
        level,
    }
}

/// Split an optional `[X]` tag from the front of `text`
fn split_tag(text: &str) -> (Level, &str) {
    if !text.starts_with('[') {
        return (Level::Verbose, text);
    }
    let Some(close) = text.find(']') else {
        return (Level::Verbose, text);
    };

    let level = match text.as_bytes().get(1) {
        Some(b'D') => Level::Debug,
        Some(b'V') => Level::Verbose,
        Some(b'I') => Level::Notice,
        Some(b'W') | Some(b'E') => Level::Warning,
        _ => Level::Verbose,
    };
    (level, text[close + 1..].trim_start_matches(' '))
}

fn color_roles(message: &str) -> String {
    let mut out = message.to_string();
    for (marker, code) in ROLE_COLORS {
        if out.contains(marker) {
            out = out.replacen(marker, &paint(code, marker), 1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_warning() {
        let record = raft_filter("2024-01-01T00:00:00 [W] leader lost contact", false);
        assert_eq!(record.level, Level::Warning);
        assert_eq!(record.message, "leader lost contact");
    }

    #[test]
    fn test_parse_all_tags() {
        for (tag, level) in [
            ("D", Level::Debug),
            ("V", Level::Verbose),
            ("I", Level::Notice),
            ("W", Level::Warning),
            ("E", Level::Warning),
            ("Q", Level::Verbose),
        ] {
            let record = raft_filter(&format!("ts [{tag}] msg"), false);
            assert_eq!(record.level, level, "tag {tag}");
            assert_eq!(record.message, "msg");
        }
    }

    #[test]
    fn test_parse_trims_all_leading_spaces() {
        let record = raft_filter("ts [I]     spaced  out", false);
        assert_eq!(record.message, "spaced  out");
    }

    #[test]
    fn test_parse_without_tag() {
        let record = raft_filter("ts plain message", false);
        assert_eq!(record.level, Level::Verbose);
        assert_eq!(record.message, "plain message");
    }

    #[test]
    fn test_parse_single_token() {
        let record = raft_filter("lonely", false);
        assert_eq!(record.level, Level::Verbose);
        assert_eq!(record.message, "lonely");
    }

    #[test]
    fn test_parse_unclosed_bracket() {
        let record = raft_filter("ts [W oops", false);
        assert_eq!(record.level, Level::Verbose);
        assert_eq!(record.message, "[W oops");
    }

    #[test]
    fn test_parse_empty_and_degenerate() {
        assert_eq!(raft_filter("", false).message, "");
        assert_eq!(raft_filter("ts ", false).message, "");
        let record = raft_filter("ts []rest", false);
        assert_eq!(record.level, Level::Verbose);
        assert_eq!(record.message, "rest");
    }

    #[test]
    fn test_roles_plain_without_tty() {
        let record = raft_filter("ts [I] [Leader] entering state", false);
        assert_eq!(record.message, "[Leader] entering state");
    }

    #[test]
    fn test_roles_colored_once_with_tty() {
        let record = raft_filter("ts [I] [Leader] heartbeat [Leader]", true);
        assert_eq!(
            record.message,
            "\x1b[32m[Leader]\x1b[0m heartbeat [Leader]"
        );
    }

    #[test]
    fn test_all_roles_colored() {
        let record = raft_filter("ts [I] [Follower] to [Candidate]", true);
        assert_eq!(
            record.message,
            "\x1b[33m[Follower]\x1b[0m to \x1b[36m[Candidate]\x1b[0m"
        );
    }

    #[test]
    fn test_app_tag_unset() {
        assert_eq!(raft_filter("ts [I] x", false).app, 0);
    }
}
