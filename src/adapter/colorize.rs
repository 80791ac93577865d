//! Colorizing relay
//!
//! Adds terminal colors to lines that were formatted without them, for
//! producers that cannot see whether their output reaches a terminal.

use crate::constants::{COLORIZE_THREAD, RELAY_LINE_CAPACITY};
use crate::format::colorize_formatted;
use crate::pipe::{pipe, PipeReader, PipeWriter};
use crate::sink::Sink;
use std::io::{self, BufRead, BufReader, Write};
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

/// Wrap a sink so formatted lines written to it get colored glyphs.
///
/// A sink that is not a terminal is returned as is. Otherwise the returned
/// sink feeds a relay thread that colors each line and writes it to the
/// original terminal. The returned sink reports itself as non-terminal so
/// loggers on top of it write plain lines. Dropping it drains and stops the
/// relay.
pub fn colorize(sink: Sink) -> io::Result<Sink> {
    if !sink.is_tty() {
        return Ok(sink);
    }

    let (writer, reader) = pipe();
    let (out, _) = sink.into_parts();
    let handle = thread::Builder::new()
        .name(COLORIZE_THREAD.to_string())
        .spawn(move || run_colorizer(reader, out))?;

    Ok(Sink::new(
        RelayWriter {
            pipe: writer,
            worker: Some(handle),
        },
        false,
    ))
}

/// Write end of the colorizing relay; joins the relay on drop
struct RelayWriter {
    pipe: PipeWriter,
    worker: Option<JoinHandle<()>>,
}

impl Write for RelayWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pipe.write(buf)
    }

    /// Returns once the relay has written and flushed every queued line
    fn flush(&mut self) -> io::Result<()> {
        self.pipe.flush()
    }
}

impl Drop for RelayWriter {
    fn drop(&mut self) {
        self.pipe.close();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

/// Relay loop (blocking, runs in thread)
fn run_colorizer(reader: PipeReader, mut out: Box<dyn Write + Send>) {
    debug!("colorize relay started");

    let mut reader = BufReader::new(reader);
    let mut line = Vec::with_capacity(RELAY_LINE_CAPACITY);

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                let colored = colorize_formatted(&String::from_utf8_lossy(&line));
                if out.write_all(colored.as_bytes()).and_then(|()| out.flush()).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                trace!(error = %e, "colorize relay read failed");
                break;
            }
        }
    }

    debug!("colorize relay stopped");
}
