//! Byte-stream adapter
//!
//! Lets any component that expects an `io::Write` log through a logger node.
//! Without a filter the bytes reach the sink untouched. With a filter, each
//! write is treated as one line: trimmed, parsed, then emitted with the
//! node's own app tag.

use crate::filter::Filter;
use crate::logger::Logger;
use std::io::{self, Write};

impl Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Filter::Func(filter) = self.filter() else {
            return self.write_raw(buf);
        };

        let text = String::from_utf8_lossy(buf);
        let record = filter(text.trim(), self.is_tty());
        if self.accepts(record.level) {
            self.emit(self.app(), record.level, &record.message)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_sink()
    }
}

impl Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}
