//! Adapters bridging foreign producers into the logger
//!
//! - `stream` - `io::Write` for [`Logger`](crate::Logger): raw bytes, filtered or passed through
//! - `line_writer` - [`LineWriter`]: a pipe whose lines become Notice messages
//! - `colorize` - [`colorize`]: post-hoc terminal coloring of formatted lines

mod colorize;
mod line_writer;
mod stream;

pub use colorize::colorize;
pub use line_writer::LineWriter;
