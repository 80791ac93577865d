//! Line filters for foreign log producers
//!
//! A filter turns one raw text line into a [`Record`]. Filters are pure:
//! the only input besides the line is whether the sink is a terminal.
//!
//! # Adding a new filter
//!
//! 1. Create `filter/my_format.rs` with a `fn(&str, bool) -> Record`
//! 2. Add a constructor on [`Filter`] next to [`Filter::raft`]

mod raft;

pub use raft::raft_filter;

use crate::level::Level;
use std::fmt;
use std::sync::Arc;

/// Structured result of filtering one raw line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Cleaned message text
    pub message: String,
    /// App tag suggested by the filter (informational, the emitting node's tag wins)
    pub app: u8,
    /// Severity derived from the line
    pub level: Level,
}

/// Signature of a filter function: `(raw_line, is_tty) -> Record`
pub type FilterFn = Arc<dyn Fn(&str, bool) -> Record + Send + Sync>;

/// Active filter of a logger hierarchy
#[derive(Clone, Default)]
pub enum Filter {
    /// No filter: raw writes go to the sink unmodified
    #[default]
    Bypass,
    /// Raw writes are parsed and re-emitted as formatted lines
    Func(FilterFn),
}

impl Filter {
    /// Wrap any compatible closure or function
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&str, bool) -> Record + Send + Sync + 'static,
    {
        Filter::Func(Arc::new(f))
    }

    /// Filter for the Raft consensus library's log lines
    pub fn raft() -> Self {
        Self::func(raft_filter)
    }

    pub fn is_bypass(&self) -> bool {
        matches!(self, Filter::Bypass)
    }

    /// Run the filter, `None` in bypass mode
    pub fn apply(&self, line: &str, tty: bool) -> Option<Record> {
        match self {
            Filter::Bypass => None,
            Filter::Func(f) => Some(f(line, tty)),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Bypass => f.write_str("Bypass"),
            Filter::Func(_) => f.write_str("Func(..)"),
        }
    }
}
