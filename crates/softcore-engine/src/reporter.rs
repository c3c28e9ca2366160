//! Diagnostic reporter
//!
//! One [`Reporter`] is built per run and passed down by reference. It
//! prefixes every message with a fixed tag, filters debug output and hands
//! the result to a [`LogSink`]. Sink failures never reach the caller.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SinkError;
use crate::outcome::{Outcome, Status};

/// Default message prefix
pub const DEFAULT_PREFIX: &str = "[SoftcoreRedux]";

/// Severity of a reporter message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Progress information
    Info,
    /// Something was skipped or failed softly
    Warning,
    /// A section failed
    Error,
    /// A run or section completed
    Success,
    /// Only emitted in debug mode
    Debug,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Success => "success",
            Level::Debug => "debug",
        })
    }
}

/// Destination of reporter output
pub trait LogSink {
    /// Write one already-prefixed message
    ///
    /// # Errors
    /// Whatever the sink fails with; the reporter discards it.
    fn log(&self, level: Level, message: &str) -> Result<(), SinkError>;

    /// Observe a unit outcome
    ///
    /// # Errors
    /// Whatever the sink fails with; the reporter discards it.
    fn record(&self, _outcome: &Outcome) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, level: Level, message: &str) -> Result<(), SinkError> {
        (**self).log(level, message)
    }

    fn record(&self, outcome: &Outcome) -> Result<(), SinkError> {
        (**self).record(outcome)
    }
}

/// Sink forwarding to `tracing`, i.e. the host's logger
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) -> Result<(), SinkError> {
        match level {
            Level::Info | Level::Debug => tracing::info!("{message}"),
            Level::Success => tracing::info!(success = true, "{message}"),
            Level::Warning => tracing::warn!("{message}"),
            Level::Error => tracing::error!("{message}"),
        }
        Ok(())
    }
}

/// One captured message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity
    pub level: Level,
    /// Prefixed message
    pub message: String,
}

/// Sink keeping everything in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
    outcomes: Mutex<Vec<Outcome>>,
}

impl MemorySink {
    /// Create empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured messages, oldest first
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Captured outcomes, in run order
    #[must_use]
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().clone()
    }

    /// Messages logged at `level`
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// Outcome of the named unit, if it was recorded
    #[must_use]
    pub fn outcome(&self, section: &str, unit: &str) -> Option<Outcome> {
        self.outcomes
            .lock()
            .iter()
            .find(|o| o.section == section && o.unit == unit)
            .cloned()
    }

    /// Whether any message contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.lock().iter().any(|entry| entry.message.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) -> Result<(), SinkError> {
        self.entries.lock().push(LogEntry {
            level,
            message: message.to_string(),
        });
        Ok(())
    }

    fn record(&self, outcome: &Outcome) -> Result<(), SinkError> {
        self.outcomes.lock().push(outcome.clone());
        Ok(())
    }
}

/// Prefixing, debug-gated front end to a [`LogSink`]
pub struct Reporter {
    prefix: String,
    debug: bool,
    sink: Box<dyn LogSink>,
    sink_failed: Cell<bool>,
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("prefix", &self.prefix)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl Reporter {
    /// Reporter with the default prefix, debug off
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            debug: false,
            sink: Box::new(sink),
            sink_failed: Cell::new(false),
        }
    }

    /// Replace the message prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Enable or disable debug messages
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable or disable debug messages in place
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Whether debug messages are emitted
    #[inline]
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Message prefix
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Log at `level`
    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        let message = message.as_ref();
        let line = match level {
            Level::Debug if !self.debug => return,
            Level::Debug => format!("{} [DEBUG] {message}", self.prefix),
            _ => format!("{} {message}", self.prefix),
        };
        let result = self.sink.log(level, &line);
        self.swallow(result);
    }

    /// Log at info level
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message);
    }

    /// Log at warning level
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(Level::Warning, message);
    }

    /// Log at error level
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message);
    }

    /// Log at success level
    pub fn success(&self, message: impl AsRef<str>) {
        self.log(Level::Success, message);
    }

    /// Log at debug level; dropped unless debug is enabled
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message);
    }

    /// Record a unit outcome and log it at the matching level
    pub fn record(&self, outcome: &Outcome) {
        let result = self.sink.record(outcome);
        self.swallow(result);

        match outcome.status {
            Status::Applied => self.debug(format!("{}: {} applied", outcome.section, outcome.unit)),
            Status::Skipped => self.debug(format!(
                "{}: {} skipped ({})",
                outcome.section,
                outcome.unit,
                outcome.message.as_deref().unwrap_or("disabled")
            )),
            Status::Failed => self.warning(format!(
                "{}: {} failed gracefully: {}. Send bug report. Continue safely.",
                outcome.section,
                outcome.unit,
                outcome.message.as_deref().unwrap_or("unknown error")
            )),
        }
    }

    fn swallow(&self, result: Result<(), SinkError>) {
        if let Err(err) = result {
            if !self.sink_failed.replace(true) {
                tracing::warn!(error = %err, "reporter sink failed, further sink errors are ignored");
            }
        }
    }
}
