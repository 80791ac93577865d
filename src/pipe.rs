//! In-process byte pipe
//!
//! Connects the writer side of a relay to its worker thread:
//! - writes queue chunks and block while the queue is full
//! - reads block until data arrives or the pipe is closed
//! - after close, reads drain what is queued, then report end-of-stream
//! - `flush` blocks until the reader has consumed everything and come back
//!   for more
//!
//! The pipe closes when `close()` is called on either end, when the last
//! writer is dropped, or when the reader is dropped.

use crate::constants::PIPE_CAPACITY;
use bytes::{Buf, Bytes};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::Arc;

struct State {
    chunks: VecDeque<Bytes>,
    /// Bytes currently sitting in `chunks`
    queued: usize,
    capacity: usize,
    closed: bool,
    /// Reader found the queue empty and is back in `read`
    idle: bool,
    reader_gone: bool,
}

struct Shared {
    state: Mutex<State>,
    /// Data queued or pipe closed
    ready: Condvar,
    /// Queue space freed or pipe closed
    space: Condvar,
    /// Reader went idle or away
    drained: Condvar,
}

impl Shared {
    fn close(&self) {
        self.state.lock().closed = true;
        self.notify_all();
    }

    fn notify_all(&self) {
        self.ready.notify_all();
        self.space.notify_all();
        self.drained.notify_all();
    }
}

/// Closes the pipe once every writer clone is gone
struct WriterGuard {
    shared: Arc<Shared>,
}

impl Drop for WriterGuard {
    fn drop(&mut self) {
        self.shared.close();
    }
}

/// Create a connected writer/reader pair with the default capacity
pub fn pipe() -> (PipeWriter, PipeReader) {
    pipe_with_capacity(PIPE_CAPACITY)
}

/// Create a pair whose writers block once `capacity` bytes are queued.
///
/// A single write larger than `capacity` is accepted when the queue is
/// empty.
pub fn pipe_with_capacity(capacity: usize) -> (PipeWriter, PipeReader) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State {
            chunks: VecDeque::new(),
            queued: 0,
            capacity: capacity.max(1),
            closed: false,
            idle: false,
            reader_gone: false,
        }),
        ready: Condvar::new(),
        space: Condvar::new(),
        drained: Condvar::new(),
    });
    let writer = PipeWriter {
        guard: Arc::new(WriterGuard {
            shared: shared.clone(),
        }),
    };
    let reader = PipeReader {
        shared,
        current: Bytes::new(),
    };
    (writer, reader)
}

fn broken_pipe() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")
}

/// Writing end, cheap to clone
#[derive(Clone)]
pub struct PipeWriter {
    guard: Arc<WriterGuard>,
}

impl PipeWriter {
    /// Close the pipe for every clone. Idempotent.
    pub fn close(&self) {
        self.guard.shared.close();
    }

    pub fn is_closed(&self) -> bool {
        self.guard.shared.state.lock().closed
    }
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let shared = &self.guard.shared;
        let mut state = shared.state.lock();
        loop {
            if state.closed {
                return Err(broken_pipe());
            }
            if state.queued == 0 || state.queued + buf.len() <= state.capacity {
                break;
            }
            shared.space.wait(&mut state);
        }
        if !buf.is_empty() {
            state.chunks.push_back(Bytes::copy_from_slice(buf));
            state.queued += buf.len();
            state.idle = false;
            shared.ready.notify_one();
        }
        Ok(buf.len())
    }

    /// Wait until the reader has taken every queued byte and asked for more.
    ///
    /// Fails with `BrokenPipe` if the reader went away with data still
    /// queued.
    fn flush(&mut self) -> io::Result<()> {
        let shared = &self.guard.shared;
        let mut state = shared.state.lock();
        loop {
            if state.reader_gone {
                return if state.chunks.is_empty() {
                    Ok(())
                } else {
                    Err(broken_pipe())
                };
            }
            if state.chunks.is_empty() && state.idle {
                return Ok(());
            }
            shared.drained.wait(&mut state);
        }
    }
}

/// Reading end, owned by a single worker
pub struct PipeReader {
    shared: Arc<Shared>,
    current: Bytes,
}

impl PipeReader {
    /// Close from the reading side; pending and future writes fail
    pub fn close(&self) {
        self.shared.close();
    }
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.current.is_empty() {
            let mut state = self.shared.state.lock();
            loop {
                if let Some(chunk) = state.chunks.pop_front() {
                    state.queued -= chunk.len();
                    state.idle = false;
                    self.shared.space.notify_all();
                    self.current = chunk;
                    break;
                }
                // Everything handed out so far has been processed
                state.idle = true;
                self.shared.drained.notify_all();
                if state.closed {
                    return Ok(0);
                }
                self.shared.ready.wait(&mut state);
            }
        }

        let n = buf.len().min(self.current.len());
        buf[..n].copy_from_slice(&self.current[..n]);
        self.current.advance(n);
        Ok(n)
    }
}

impl Drop for PipeReader {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.reader_gone = true;
        state.closed = true;
        drop(state);
        self.shared.notify_all();
    }
}
