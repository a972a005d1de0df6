/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! XML message tracing options shared by consumer and provider roles.

use crate::tag::XmlTraceTag;
use crate::value::ElementValue;
use ema_core::Result;
use serde::{Deserialize, Serialize};

/// Default trace file name.
pub const DEFAULT_TRACE_FILE_NAME: &str = "EmaTrace";
/// Default maximum trace file size in bytes.
pub const DEFAULT_TRACE_MAX_FILE_SIZE: u64 = 100_000_000;

/// Message tracing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlTraceConfig {
    /// Trace to standard output.
    pub to_stdout: bool,
    /// Trace to a file.
    pub to_file: bool,
    /// Maximum size of a trace file in bytes.
    pub max_file_size: u64,
    /// Base name of the trace file.
    pub file_name: String,
    /// Roll over into multiple files.
    pub to_multiple_files: bool,
    /// Trace outgoing messages.
    pub write: bool,
    /// Trace incoming messages.
    pub read: bool,
    /// Trace pings.
    pub ping: bool,
}

impl Default for XmlTraceConfig {
    fn default() -> Self {
        Self {
            to_stdout: false,
            to_file: false,
            max_file_size: DEFAULT_TRACE_MAX_FILE_SIZE,
            file_name: DEFAULT_TRACE_FILE_NAME.to_string(),
            to_multiple_files: false,
            write: true,
            read: true,
            ping: true,
        }
    }
}

impl XmlTraceConfig {
    /// Applies one tracing element.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the value cannot be coerced.
    pub fn apply<V: ElementValue>(&mut self, tag: XmlTraceTag, value: &V) -> Result<()> {
        match tag {
            XmlTraceTag::ToStdout => self.to_stdout = value.boolean()?,
            XmlTraceTag::ToFile => self.to_file = value.boolean()?,
            XmlTraceTag::MaxFileSize => self.max_file_size = value.uint()?,
            XmlTraceTag::FileName => self.file_name = value.ascii()?,
            XmlTraceTag::ToMultipleFiles => self.to_multiple_files = value.boolean()?,
            XmlTraceTag::Write => self.write = value.boolean()?,
            XmlTraceTag::Read => self.read = value.boolean()?,
            XmlTraceTag::Ping => self.ping = value.boolean()?,
        }
        Ok(())
    }
}
