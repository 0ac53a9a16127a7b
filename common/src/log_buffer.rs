//! Diagnostic log ring buffer.
//!
//! The altimeter context records everything worth diagnosing here: rejected
//! readings, sampler reconfigurations and failures, permission degrade. The
//! simulator renders the buffer on its debug page.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = DebugLog::new();
//! log.push(LogLevel::Info, "Sampler started", now_s);
//!
//! for entry in log.iter() {
//!     println!("{} {}", entry.level.prefix(), entry.message);
//! }
//! ```

use core::fmt::{self, Write};

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{Deque, String};

use crate::colors::{DARK_GRAY, GRAY, RED, WHITE, YELLOW};

// =============================================================================
// Log Configuration
// =============================================================================

/// Maximum number of log entries to keep.
pub const LOG_ENTRIES: usize = 16;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 48;

// =============================================================================
// Log Entries
// =============================================================================

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Verbose debugging (dark gray)
    Trace = 0,
    /// Debug information (gray)
    Debug = 1,
    /// Normal operation (white)
    #[default]
    Info = 2,
    /// Warnings (yellow)
    Warn = 3,
    /// Errors (red)
    Error = 4,
}

impl LogLevel {
    /// Get the display color for this log level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Trace => DARK_GRAY,
            Self::Debug => GRAY,
            Self::Info => WHITE,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Get the single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry with level, message, and timestamp.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Truncated to `LOG_MSG_LEN - 1` characters.
    pub message: String<LOG_MSG_LEN>,
    /// Seconds of the event that produced the entry.
    pub timestamp_s: i64,
}

/// Writer that silently drops whatever does not fit.
struct Truncating<'a>(&'a mut String<LOG_MSG_LEN>);

impl Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.len() + c.len_utf8() > LOG_MSG_LEN - 1 {
                break;
            }
            self.0.push(c).ok();
        }
        Ok(())
    }
}

// =============================================================================
// Log Ring Buffer
// =============================================================================

/// Ring buffer of the last `LOG_ENTRIES` messages. Oldest entries are dropped
/// when the buffer is full.
pub struct DebugLog {
    buffer: Deque<LogEntry, LOG_ENTRIES>,
    /// Entries at this level or above are kept.
    min_level: LogLevel,
    /// Entries kept since creation, including those already dropped.
    total: u32,
}

impl DebugLog {
    /// Create a new empty log keeping every level.
    pub const fn new() -> Self { Self::with_min_level(LogLevel::Trace) }

    /// Create a new empty log keeping `min_level` and above.
    pub const fn with_min_level(min_level: LogLevel) -> Self {
        Self {
            buffer: Deque::new(),
            min_level,
            total: 0,
        }
    }

    #[inline]
    pub fn set_min_level(
        &mut self,
        level: LogLevel,
    ) {
        self.min_level = level;
    }

    /// Push a plain message.
    pub fn push(
        &mut self,
        level: LogLevel,
        msg: &str,
        timestamp_s: i64,
    ) {
        self.push_fmt(level, format_args!("{msg}"), timestamp_s);
    }

    /// Push a formatted message without allocating.
    pub fn push_fmt(
        &mut self,
        level: LogLevel,
        args: fmt::Arguments<'_>,
        timestamp_s: i64,
    ) {
        if level < self.min_level {
            return;
        }

        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut message: String<LOG_MSG_LEN> = String::new();
        let _ = Truncating(&mut message).write_fmt(args);

        self.buffer
            .push_back(LogEntry {
                level,
                message,
                timestamp_s,
            })
            .ok();
        self.total = self.total.wrapping_add(1);
    }

    /// Entries newer than a previous [`DebugLog::total`] value, oldest first.
    pub fn since(
        &self,
        seen_total: u32,
    ) -> impl Iterator<Item = &LogEntry> {
        let fresh = (self.total.wrapping_sub(seen_total) as usize).min(self.buffer.len());
        self.buffer.iter().skip(self.buffer.len() - fresh)
    }

    #[inline]
    pub const fn total(&self) -> u32 { self.total }

    /// Iterate over entries (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.buffer.iter() }

    /// Most recent entry.
    #[inline]
    pub fn last(&self) -> Option<&LogEntry> { self.buffer.back() }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for DebugLog {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
