//! Duplicate suppression
//!
//! When armed, an emission whose message equals the previous emission and
//! arrives within the window is dropped. Every admitted emission refreshes the
//! cache, so the window is always measured from the immediately preceding
//! line.

use crate::constants::DEFAULT_DEDUP_WINDOW;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Dedup {
    armed: bool,
    window: Duration,
    last: Option<(String, Instant)>,
}

impl Default for Dedup {
    fn default() -> Self {
        Self::new(false, DEFAULT_DEDUP_WINDOW)
    }
}

impl Dedup {
    pub fn new(armed: bool, window: Duration) -> Self {
        Self {
            armed,
            window,
            last: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Arm or disarm. Disarming forgets the cached message.
    pub fn set_armed(&mut self, armed: bool) {
        self.armed = armed;
        if !armed {
            self.last = None;
        }
    }

    /// Decide whether `message` observed at `now` should be written.
    ///
    /// Returns `false` only when armed and the message repeats the previous
    /// one within the window. Disarmed, the cache is left untouched.
    pub fn admit(&mut self, message: &str, now: Instant) -> bool {
        if !self.armed {
            return true;
        }
        if let Some((last_msg, last_at)) = &self.last {
            if last_msg == message && now.saturating_duration_since(*last_at) < self.window {
                return false;
            }
        }
        match &mut self.last {
            Some((last_msg, last_at)) => {
                last_msg.clear();
                last_msg.push_str(message);
                *last_at = now;
            }
            None => self.last = Some((message.to_string(), now)),
        }
        true
    }
}
