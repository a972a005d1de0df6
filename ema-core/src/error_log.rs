/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Ordered, leveled log of non-fatal configuration diagnostics.
//!
//! Both parsers append to a [`ConfigErrorLog`] instead of failing when they meet
//! input they do not recognize. The log is drained into the active logging sink
//! once one exists; the default sink forwards to `tracing`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Severity attached to a configuration diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Finest-grained tracing output.
    Trace,
    /// Debugging output.
    Debug,
    /// Informational output.
    Info,
    /// Something looks wrong but parsing was unaffected.
    Warning,
    /// Input was rejected or ignored.
    Error,
}

impl Severity {
    /// Returns the canonical upper-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigErrorEntry {
    /// Entry severity.
    pub severity: Severity,
    /// Human-readable text.
    pub message: String,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Destination for drained diagnostics.
pub trait LogSink {
    /// Receives one entry that passed the severity filter.
    fn log(&mut self, severity: Severity, message: &str);
}

/// Sink that forwards each entry to the matching `tracing` macro.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Trace => tracing::trace!(target: "ema::config", "{}", message),
            Severity::Debug => tracing::debug!(target: "ema::config", "{}", message),
            Severity::Info => tracing::info!(target: "ema::config", "{}", message),
            Severity::Warning => tracing::warn!(target: "ema::config", "{}", message),
            Severity::Error => tracing::error!(target: "ema::config", "{}", message),
        }
    }
}

impl<F> LogSink for F
where
    F: FnMut(Severity, &str),
{
    fn log(&mut self, severity: Severity, message: &str) {
        self(severity, message);
    }
}

/// Append-only list of configuration diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigErrorLog {
    entries: Vec<ConfigErrorEntry>,
}

impl ConfigErrorLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a diagnostic.
    ///
    /// # Arguments
    /// * `message` - Text of the diagnostic
    /// * `severity` - Severity of the diagnostic
    pub fn add(&mut self, message: impl Into<String>, severity: Severity) {
        self.entries.push(ConfigErrorEntry {
            severity,
            message: message.into(),
            timestamp: Utc::now(),
        });
    }

    /// Appends an [`Severity::Error`] diagnostic.
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(message, Severity::Error);
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ConfigErrorEntry] {
        &self.entries
    }

    /// Returns an iterator over the entries logged at [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &ConfigErrorEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.severity == Severity::Error)
    }

    /// Forwards every entry at or above `min_severity` to `sink`.
    ///
    /// Entries are not removed; call [`clear`](Self::clear) for that.
    ///
    /// # Arguments
    /// * `sink` - Receiver of the filtered entries
    /// * `min_severity` - Lowest severity that is forwarded
    pub fn drain<S: LogSink + ?Sized>(&self, sink: &mut S, min_severity: Severity) {
        for entry in self
            .entries
            .iter()
            .filter(|entry| entry.severity >= min_severity)
        {
            sink.log(entry.severity, &entry.message);
        }
    }

    /// Renders every entry, one per line, for diagnostic dumps.
    #[must_use]
    pub fn print(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{} [{}] {}",
                entry.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                entry.severity,
                entry.message
            );
        }
        out
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
