//! Per-severity convenience methods
//!
//! Each severity has a display variant taking any `Display` value and a
//! template variant taking `fmt::Arguments` (see the `*f!` macros). The
//! `debug!`, `verb!`, `notice!`, `warning!` and `fatal!` macros take several
//! values and write them back to back. None of them render anything unless
//! the level passes the threshold.

use super::Logger;
use crate::level::Level;
use std::fmt::{self, Display};

/// Values written back to back; built by the concatenating macros
#[doc(hidden)]
pub struct Concat<'a>(pub &'a [&'a dyn Display]);

impl Display for Concat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|part| part.fmt(f))
    }
}

impl Logger {
    pub fn debug(&self, message: impl Display) {
        self.log(Level::Debug, message);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Debug, args);
    }

    pub fn verb(&self, message: impl Display) {
        self.log(Level::Verbose, message);
    }

    pub fn verbf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Verbose, args);
    }

    pub fn notice(&self, message: impl Display) {
        self.log(Level::Notice, message);
    }

    pub fn noticef(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Notice, args);
    }

    /// Alias of [`Logger::notice`]
    pub fn print(&self, message: impl Display) {
        self.log(Level::Notice, message);
    }

    /// Alias of [`Logger::noticef`]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Notice, args);
    }

    pub fn warning(&self, message: impl Display) {
        self.log(Level::Warning, message);
    }

    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Warning, args);
    }

    /// Log at Warning, flush the sink, then exit the process with status 1
    pub fn fatal(&self, message: impl Display) -> ! {
        self.log_fatal(&message.to_string());
        std::process::exit(1)
    }

    /// Template variant of [`Logger::fatal`]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log_fatal(&fmt::format(args));
        std::process::exit(1)
    }

    /// Log at Warning, flush the sink, then panic with the message
    pub fn panic(&self, message: impl Display) -> ! {
        let message = message.to_string();
        self.log_fatal(&message);
        panic!("{message}")
    }

    /// Template variant of [`Logger::panic`]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let message = fmt::format(args);
        self.log_fatal(&message);
        panic!("{message}")
    }

    /// Fatal-class lines are Warning lines; the write completes before the
    /// caller terminates.
    fn log_fatal(&self, message: &str) {
        if self.accepts(Level::Warning) {
            let _ = self.emit(self.app(), Level::Warning, message);
        }
        let _ = self.flush_sink();
    }
}

/// `debugf!(logger, "fmt", args..)`
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// `verbf!(logger, "fmt", args..)`
#[macro_export]
macro_rules! verbf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.verbf(::std::format_args!($($arg)+))
    };
}

/// `noticef!(logger, "fmt", args..)`
#[macro_export]
macro_rules! noticef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.noticef(::std::format_args!($($arg)+))
    };
}

/// `printf!(logger, "fmt", args..)`, Notice level
#[macro_export]
macro_rules! printf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.printf(::std::format_args!($($arg)+))
    };
}

/// `warningf!(logger, "fmt", args..)`
#[macro_export]
macro_rules! warningf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warningf(::std::format_args!($($arg)+))
    };
}

/// `fatalf!(logger, "fmt", args..)`, logs at Warning and exits
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

/// `panicf!(logger, "fmt", args..)`, logs at Warning and panics
#[macro_export]
macro_rules! panicf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(::std::format_args!($($arg)+))
    };
}

/// `debug!(logger, a, b, ..)`, Debug
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.debug($crate::logger::Concat(&[$(&$arg as &dyn ::std::fmt::Display),+]))
    };
}

/// `verb!(logger, a, b, ..)`, Verbose
#[macro_export]
macro_rules! verb {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.verb($crate::logger::Concat(&[$(&$arg as &dyn ::std::fmt::Display),+]))
    };
}

/// `notice!(logger, a, b, ..)`, Notice
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.notice($crate::logger::Concat(&[$(&$arg as &dyn ::std::fmt::Display),+]))
    };
}

/// `warning!(logger, a, b, ..)`, Warning
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.warning($crate::logger::Concat(&[$(&$arg as &dyn ::std::fmt::Display),+]))
    };
}

/// `fatal!(logger, a, b, ..)`, Warning, then exits
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.fatal($crate::logger::Concat(&[$(&$arg as &dyn ::std::fmt::Display),+]))
    };
}
