//! Redis-style line logger
//!
//! Writes lines of the form
//! `<pid>:<app> <dd> <Mon> <HH:MM:SS.mmm> <glyph> <message>` with:
//! - level filtering (`Debug` `.`, `Verbose` `-`, `Notice` `*`, `Warning` `#`)
//! - glyph coloring when the sink is a terminal
//! - optional suppression of identical back-to-back lines
//! - a root/child hierarchy: children share the root's configuration and
//!   stamp their own app tag
//! - adapters for foreign producers (raw writers, line writers, `tracing`)
//!
//! ```no_run
//! use redlog::{Filter, Level, Logger, Options, Sink};
//!
//! let log = Logger::new(Sink::stdout(), Options::default());
//! log.notice("Server started");
//! redlog::warningf!(log, "{} clients dropped", 3);
//!
//! let raft = log.child(b'R');
//! raft.set_filter(Filter::raft());
//! raft.set_threshold(Level::Verbose);
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dedup;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod format;
pub mod level;
pub mod logger;
pub mod pipe;
pub mod sink;

pub use adapter::{colorize, LineWriter};
pub use error::{RedlogError, Result};
pub use filter::{raft_filter, Filter, FilterFn, Record};
pub use level::Level;
pub use logger::{Logger, Options};
pub use sink::Sink;
