//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

use std::time::Duration;

// =============================================================================
// Logger defaults
// =============================================================================

/// App tag stamped by a root logger when none is configured
pub const DEFAULT_APP_TAG: u8 = b'M';

/// Window within which an identical consecutive message is dropped
pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_millis(1);

/// Timestamp layout: two-digit day, month abbreviation, millisecond clock
pub const TIMESTAMP_FORMAT: &str = "%d %b %H:%M:%S%.3f";

// =============================================================================
// ANSI
// =============================================================================

/// Reset sequence closing every colored span
pub const ANSI_RESET: &str = "\x1b[0m";

/// Role marker colors used by the Raft filter
pub const ANSI_GREEN: &str = "32";
pub const ANSI_YELLOW: &str = "33";
pub const ANSI_CYAN: &str = "36";

// =============================================================================
// Relays
// =============================================================================

/// Thread name of the line-writer relay
pub const LINE_RELAY_THREAD: &str = "redlog-line-relay";

/// Thread name of the colorizing relay
pub const COLORIZE_THREAD: &str = "redlog-colorize";

/// Initial capacity of a relay's line buffer
pub const RELAY_LINE_CAPACITY: usize = 256;

/// Bytes a relay pipe queues before writers block
pub const PIPE_CAPACITY: usize = 64 * 1024;
