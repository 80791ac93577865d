//! Logger hierarchy
//!
//! A [`Logger`] is a cheap, clonable handle onto one node of a tree:
//! - the **root** owns the sink, threshold, filter and duplicate-suppression
//!   state
//! - a **child** owns only its app tag and a handle to its parent
//!
//! Every configuration call on a child resolves to the root through
//! [`Logger::root`]; emission stamps the calling node's own app tag.
//!
//! # Locking
//!
//! The root keeps its settings behind one `RwLock`. Threshold checks take
//! the shared side; configuration changes take the exclusive side. The sink
//! and the duplicate cache sit in a `Mutex` that is only ever taken while
//! the shared settings lock is held, so lines are never interleaved and a
//! configuration change waits for in-flight writes. Children hold no locks.

mod severity;

pub use severity::Concat;

use crate::constants::{DEFAULT_APP_TAG, DEFAULT_DEDUP_WINDOW};
use crate::dedup::Dedup;
use crate::filter::Filter;
use crate::format::{format_line, trim_trailing};
use crate::level::Level;
use crate::sink::Sink;
use chrono::Local;
use parking_lot::{Mutex, RwLock};
use std::fmt::{self, Display};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Construction options for a root logger
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum level written
    pub level: Level,
    /// Filter applied to raw writes
    pub filter: Filter,
    /// App tag of the root
    pub app: u8,
    /// Start with duplicate suppression armed
    pub duplicate_suppression: bool,
    /// Duplicate suppression window
    pub dedup_window: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: Level::Notice,
            filter: Filter::Bypass,
            app: DEFAULT_APP_TAG,
            duplicate_suppression: false,
            dedup_window: DEFAULT_DEDUP_WINDOW,
        }
    }
}

/// Handle onto a root or child logger
#[derive(Clone)]
pub struct Logger {
    node: Arc<Node>,
}

enum Node {
    Root(Root),
    Child(Child),
}

struct Child {
    app: u8,
    parent: Logger,
}

struct Root {
    app: u8,
    pid: u32,
    tty: bool,
    discard: bool,
    settings: RwLock<Settings>,
}

struct Settings {
    threshold: Level,
    filter: Filter,
    output: Mutex<Output>,
}

struct Output {
    writer: Box<dyn Write + Send>,
    dedup: Dedup,
}

impl Logger {
    /// Create a root logger writing to `sink`
    pub fn new(sink: Sink, opts: Options) -> Self {
        let discard = sink.is_discard();
        let (writer, tty) = sink.into_parts();
        let root = Root {
            app: opts.app,
            pid: std::process::id(),
            tty,
            discard,
            settings: RwLock::new(Settings {
                threshold: opts.level,
                filter: opts.filter,
                output: Mutex::new(Output {
                    writer,
                    dedup: Dedup::new(opts.duplicate_suppression, opts.dedup_window),
                }),
            }),
        };
        Self {
            node: Arc::new(Node::Root(root)),
        }
    }

    /// Root logger with default options: Notice, no filter, app tag `M`
    pub fn with_defaults(sink: Sink) -> Self {
        Self::new(sink, Options::default())
    }

    /// Create a child that shares this hierarchy's root but stamps `app`
    pub fn child(&self, app: u8) -> Self {
        Self {
            node: Arc::new(Node::Child(Child {
                app,
                parent: self.clone(),
            })),
        }
    }

    fn root(&self) -> &Root {
        match &*self.node {
            Node::Root(root) => root,
            Node::Child(child) => child.parent.root(),
        }
    }

    // === Identity ===

    /// App tag stamped by this node
    pub fn app(&self) -> u8 {
        match &*self.node {
            Node::Root(root) => root.app,
            Node::Child(child) => child.app,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(&*self.node, Node::Root(_))
    }

    /// Process id written in every line
    pub fn pid(&self) -> u32 {
        self.root().pid
    }

    /// Whether the root's sink is an interactive terminal
    pub fn is_tty(&self) -> bool {
        self.root().tty
    }

    /// Whether two handles belong to the same hierarchy
    pub fn same_root(&self, other: &Logger) -> bool {
        std::ptr::eq(self.root(), other.root())
    }

    // === Configuration (delegated to the root) ===

    pub fn set_threshold(&self, level: Level) {
        self.root().settings.write().threshold = level;
    }

    /// Set the threshold from a raw index; out-of-range values are clamped
    pub fn set_threshold_raw(&self, level: i64) {
        self.set_threshold(Level::clamped(level));
    }

    pub fn threshold(&self) -> Level {
        self.root().settings.read().threshold
    }

    /// Whether a message at `level` would be written
    #[inline]
    pub fn accepts(&self, level: Level) -> bool {
        level >= self.threshold()
    }

    pub fn set_filter(&self, filter: Filter) {
        self.root().settings.write().filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.root().settings.read().filter.clone()
    }

    pub fn set_duplicate_suppression(&self, enabled: bool) {
        let settings = self.root().settings.write();
        settings.output.lock().dedup.set_armed(enabled);
    }

    pub fn duplicate_suppression(&self) -> bool {
        self.root().settings.read().output.lock().dedup.is_armed()
    }

    // === Emission ===

    /// Log a displayable message at `level`
    pub fn log(&self, level: Level, message: impl Display) {
        if self.accepts(level) {
            let _ = self.emit(self.app(), level, &message.to_string());
        }
    }

    /// Log a formatted message at `level`
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.accepts(level) {
            let _ = self.emit(self.app(), level, &fmt::format(args));
        }
    }

    /// Format and write one line. The caller has already checked the
    /// threshold; the check here covers a concurrent threshold change.
    pub(crate) fn emit(&self, app: u8, level: Level, message: &str) -> io::Result<()> {
        let root = self.root();
        if root.discard {
            return Ok(());
        }

        let message = trim_trailing(message);

        let settings = root.settings.read();
        if level < settings.threshold {
            return Ok(());
        }
        let mut output = settings.output.lock();
        if !output.dedup.admit(message, Instant::now()) {
            return Ok(());
        }
        // Stamped under the output lock so timestamps follow write order
        let line = format_line(root.pid, app, &Local::now(), level, message).render(root.tty);
        output.writer.write_all(line.as_bytes())
    }

    /// Write bytes to the sink untouched
    pub(crate) fn write_raw(&self, buf: &[u8]) -> io::Result<usize> {
        let settings = self.root().settings.read();
        let mut output = settings.output.lock();
        output.writer.write(buf)
    }

    pub(crate) fn flush_sink(&self) -> io::Result<()> {
        let settings = self.root().settings.read();
        let mut output = settings.output.lock();
        output.writer.flush()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("app", &(self.app() as char))
            .field("root", &self.is_root())
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Record;

    /// Shared in-memory sink
    #[derive(Clone, Default)]
    struct Buf(Arc<Mutex<Vec<u8>>>);

    impl Buf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }

        fn lines(&self) -> Vec<String> {
            self.text().lines().map(str::to_string).collect()
        }
    }

    impl Write for Buf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logger_with(opts: Options) -> (Logger, Buf) {
        let buf = Buf::default();
        (Logger::new(Sink::new(buf.clone(), false), opts), buf)
    }

    #[test]
    fn test_defaults() {
        let (logger, _) = logger_with(Options::default());
        assert!(logger.is_root());
        assert_eq!(logger.app(), b'M');
        assert_eq!(logger.threshold(), Level::Notice);
        assert!(logger.filter().is_bypass());
        assert!(!logger.duplicate_suppression());
        assert_eq!(logger.pid(), std::process::id());
    }

    #[test]
    fn test_line_shape() {
        let (logger, buf) = logger_with(Options::default());
        logger.notice("hello world\n");
        let lines = buf.lines();
        assert_eq!(lines.len(), 1);
        let prefix = format!("{}:M ", std::process::id());
        assert!(lines[0].starts_with(&prefix));
        assert!(lines[0].ends_with(" * hello world"));
    }

    #[test]
    fn test_threshold_filters() {
        let (logger, buf) = logger_with(Options::default());
        logger.debug("d");
        logger.verb("v");
        logger.notice("n");
        logger.warning("w");
        let lines = buf.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("* n"));
        assert!(lines[1].ends_with("# w"));
    }

    #[test]
    fn test_rejected_message_is_never_rendered() {
        struct Exploding;
        impl Display for Exploding {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("rendered below threshold");
            }
        }

        let (logger, buf) = logger_with(Options::default());
        logger.debug(Exploding);
        logger.debugf(format_args!("{}", Exploding));
        assert!(buf.text().is_empty());
    }

    #[test]
    fn test_set_threshold_raw_clamps() {
        let (logger, _) = logger_with(Options::default());
        logger.set_threshold_raw(-3);
        assert_eq!(logger.threshold(), Level::Debug);
        logger.set_threshold_raw(99);
        assert_eq!(logger.threshold(), Level::Warning);
    }

    #[test]
    fn test_child_delegates_configuration() {
        let (root, buf) = logger_with(Options::default());
        let child = root.child(b'C');
        let grandchild = child.child(b'G');

        assert!(!child.is_root());
        assert!(grandchild.same_root(&root));

        grandchild.set_threshold(Level::Debug);
        assert_eq!(root.threshold(), Level::Debug);
        assert_eq!(child.threshold(), Level::Debug);

        child.set_duplicate_suppression(true);
        assert!(root.duplicate_suppression());

        root.set_filter(Filter::raft());
        assert!(!grandchild.filter().is_bypass());

        grandchild.debug("deep");
        assert!(buf.text().contains(":G "));
    }

    #[test]
    fn test_child_stamps_own_tag() {
        let (root, buf) = logger_with(Options::default());
        let child = root.child(b'R');
        root.notice("from root");
        child.notice("from child");
        let lines = buf.lines();
        let pid = std::process::id();
        assert!(lines[0].starts_with(&format!("{pid}:M ")));
        assert!(lines[1].starts_with(&format!("{pid}:R ")));
    }

    #[test]
    fn test_separate_hierarchies() {
        let (a, _) = logger_with(Options::default());
        let (b, _) = logger_with(Options::default());
        assert!(!a.same_root(&b));
        assert!(a.same_root(&a.child(b'x')));
    }

    #[test]
    fn test_dedup_drops_back_to_back_repeat() {
        let (logger, buf) = logger_with(Options {
            duplicate_suppression: true,
            dedup_window: Duration::from_secs(60),
            ..Default::default()
        });
        logger.notice("same");
        logger.notice("same");
        logger.notice("other");
        logger.notice("same");
        assert_eq!(buf.lines().len(), 3);
    }

    #[test]
    fn test_dedup_compares_trimmed_message() {
        let (logger, buf) = logger_with(Options {
            duplicate_suppression: true,
            dedup_window: Duration::from_secs(60),
            ..Default::default()
        });
        logger.notice("same");
        logger.notice("same \n");
        assert_eq!(buf.lines().len(), 1);
    }

    #[test]
    fn test_dedup_window_elapsed() {
        let (logger, buf) = logger_with(Options {
            duplicate_suppression: true,
            dedup_window: Duration::from_millis(1),
            ..Default::default()
        });
        logger.notice("same");
        std::thread::sleep(Duration::from_millis(5));
        logger.notice("same");
        assert_eq!(buf.lines().len(), 2);
    }

    #[test]
    fn test_dedup_disabled_writes_all() {
        let (logger, buf) = logger_with(Options {
            dedup_window: Duration::from_secs(60),
            ..Default::default()
        });
        logger.notice("same");
        logger.notice("same");
        assert_eq!(buf.lines().len(), 2);
    }

    #[test]
    fn test_tty_sink_colors_glyph() {
        let buf = Buf::default();
        let logger = Logger::with_defaults(Sink::new(buf.clone(), true));
        logger.warning("careful");
        assert!(buf.text().contains(" \x1b[33m#\x1b[0m careful\n"));
        assert!(logger.is_tty());
    }

    #[test]
    fn test_discard_sink_writes_nothing() {
        let logger = Logger::with_defaults(Sink::discard());
        logger.warning("nobody hears this");
        assert!(logger.emit(b'M', Level::Warning, "x").is_ok());
    }

    #[test]
    fn test_write_error_is_swallowed() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("broken"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let logger = Logger::with_defaults(Sink::new(Broken, false));
        logger.warning("does not panic");
        assert!(logger.emit(b'M', Level::Warning, "x").is_err());
    }

    #[test]
    fn test_custom_filter_is_shared() {
        let (root, _) = logger_with(Options {
            filter: Filter::func(|line, _| Record {
                message: line.to_uppercase(),
                app: 0,
                level: Level::Notice,
            }),
            ..Default::default()
        });
        let record = root.child(b'c').filter().apply("abc", false).unwrap();
        assert_eq!(record.message, "ABC");
    }

    #[test]
    fn test_concurrent_lines_not_interleaved() {
        let (root, buf) = logger_with(Options::default());
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let logger = root.child(b'a' + i);
                std::thread::spawn(move || {
                    for n in 0..50 {
                        logger.noticef(format_args!("worker {i} line {n}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = buf.lines();
        assert_eq!(lines.len(), 200);
        assert!(lines.iter().all(|l| l.contains(" * worker ")));
    }

    #[test]
    fn test_concurrent_lines_in_timestamp_order() {
        let (root, buf) = logger_with(Options::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = root.clone();
                std::thread::spawn(move || {
                    for n in 0..100 {
                        logger.noticef(format_args!("{i}/{n}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Field 3 is HH:MM:SS.mmm; fixed width, so string order is time order
        let stamps: Vec<String> = buf
            .lines()
            .iter()
            .map(|l| l.split(' ').nth(3).unwrap().to_string())
            .collect();
        assert_eq!(stamps.len(), 400);
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]), "{stamps:?}");
    }
}
