//! Line-buffered pipe adapter
//!
//! [`LineWriter`] is an `io::Write` for producers that emit whole text
//! lines, such as a `tracing` fmt layer. Bytes go into an in-process pipe;
//! a dedicated thread reads them back line by line and logs each line at
//! Notice through the owning logger node.
//!
//! The relay runs until the pipe closes: on [`LineWriter::close`] or when
//! the last clone is dropped. Writers block while the pipe is full.

use crate::constants::{LINE_RELAY_THREAD, RELAY_LINE_CAPACITY};
use crate::logger::Logger;
use crate::pipe::{pipe, PipeReader, PipeWriter};
use parking_lot::Mutex;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};
use tracing_subscriber::fmt::MakeWriter;

/// Writer whose lines are re-emitted by a logger
#[derive(Clone)]
pub struct LineWriter {
    pipe: PipeWriter,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Logger {
    /// Spawn a relay thread and return a writer feeding it
    pub fn line_writer(&self) -> io::Result<LineWriter> {
        let (writer, reader) = pipe();
        let logger = self.clone();

        let handle = thread::Builder::new()
            .name(LINE_RELAY_THREAD.to_string())
            .spawn(move || run_relay(reader, logger))?;

        Ok(LineWriter {
            pipe: writer,
            worker: Arc::new(Mutex::new(Some(handle))),
        })
    }
}

impl LineWriter {
    /// Close the pipe and wait until every line written so far is logged.
    ///
    /// Affects all clones. Later writes fail with `BrokenPipe`.
    pub fn close(&self) {
        self.pipe.close();
        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }

    fn on_relay_thread(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .is_some_and(|handle| handle.thread().id() == thread::current().id())
    }

    pub fn is_closed(&self) -> bool {
        self.pipe.is_closed()
    }
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pipe.write(buf)
    }

    /// Waits until every complete line written so far has been logged
    fn flush(&mut self) -> io::Result<()> {
        if self.on_relay_thread() {
            return Ok(());
        }
        self.pipe.flush()
    }
}

impl<'a> MakeWriter<'a> for LineWriter {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Relay loop (blocking, runs in thread)
fn run_relay(reader: PipeReader, logger: Logger) {
    debug!(app = %(logger.app() as char), "line relay started");

    let mut reader = BufReader::new(reader);
    let mut line = Vec::with_capacity(RELAY_LINE_CAPACITY);

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            // Pipe closed and drained
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                let text = text.strip_suffix('\n').unwrap_or(&*text);
                let text = text.strip_suffix('\r').unwrap_or(text);
                logger.notice(text);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                trace!(error = %e, "line relay read failed");
                break;
            }
        }
    }

    debug!(app = %(logger.app() as char), "line relay stopped");
}
