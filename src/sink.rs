//! Output sinks
//!
//! A sink is the writer a root logger owns, plus whether that writer is an
//! interactive terminal. Terminal detection happens once, at construction.

use crossterm::tty::IsTty;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};

/// Writer plus terminal capability
pub struct Sink {
    writer: Box<dyn Write + Send>,
    tty: bool,
    discard: bool,
}

impl Sink {
    /// Wrap an arbitrary writer with an explicit terminal flag
    pub fn new<W>(writer: W, tty: bool) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Box::new(writer),
            tty,
            discard: false,
        }
    }

    /// Standard output, terminal flag detected
    pub fn stdout() -> Self {
        let tty = io::stdout().is_tty();
        Self::new(io::stdout(), tty)
    }

    /// Standard error, terminal flag detected
    pub fn stderr() -> Self {
        let tty = io::stderr().is_tty();
        Self::new(io::stderr(), tty)
    }

    /// An open file, terminal flag detected (true for e.g. `/dev/tty`)
    pub fn file(file: File) -> Self {
        let tty = file.is_tty();
        Self::new(file, tty)
    }

    /// Drops everything. Loggers skip formatting entirely for this sink.
    pub fn discard() -> Self {
        Self {
            writer: Box::new(io::sink()),
            tty: false,
            discard: true,
        }
    }

    #[inline]
    pub fn is_tty(&self) -> bool {
        self.tty
    }

    #[inline]
    pub fn is_discard(&self) -> bool {
        self.discard
    }

    pub(crate) fn into_parts(self) -> (Box<dyn Write + Send>, bool) {
        (self.writer, self.tty)
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("tty", &self.tty)
            .field("discard", &self.discard)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_flag() {
        assert!(Sink::new(Vec::new(), true).is_tty());
        assert!(!Sink::new(Vec::new(), false).is_tty());
    }

    #[test]
    fn test_discard() {
        let mut sink = Sink::discard();
        assert!(sink.is_discard());
        assert!(!sink.is_tty());
        assert_eq!(sink.write(b"gone").unwrap(), 4);
    }

    #[test]
    fn test_file_is_not_tty() {
        let path = std::env::temp_dir().join(format!("redlog-sink-{}", std::process::id()));
        let file = File::create(&path).unwrap();
        let sink = Sink::file(file);
        assert!(!sink.is_tty());
        let _ = std::fs::remove_file(&path);
    }
}
