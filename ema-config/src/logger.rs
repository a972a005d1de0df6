/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! API logger configuration.

use crate::record::ConfigRecord;
use crate::tag::LoggerTag;
use crate::value::{ElementValue, saturate_u32};
use ema_core::{LoggerLevel, LoggerType, Result};
use serde::{Deserialize, Serialize};

/// Default log file base name.
pub const DEFAULT_LOG_FILE_NAME: &str = "emaLog";

/// Configuration of a named logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Logger name.
    pub name: String,
    /// Base name of the log file.
    pub file_name: String,
    /// Whether each line carries the date.
    pub include_date_in_logger_output: bool,
    /// Number of rolled files kept; 0 is unlimited.
    pub number_of_log_files: u32,
    /// Size at which a file is rolled; 0 disables rolling.
    pub max_log_file_size: u32,
    /// Minimum severity written.
    pub severity: LoggerLevel,
    /// Destination.
    pub logger_type: LoggerType,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl LoggerConfig {
    /// Creates a logger with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            include_date_in_logger_output: false,
            number_of_log_files: 0,
            max_log_file_size: 0,
            severity: LoggerLevel::Info,
            logger_type: LoggerType::File,
        }
    }

    /// Sets the minimum severity.
    #[must_use]
    pub const fn with_severity(mut self, severity: LoggerLevel) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the destination.
    #[must_use]
    pub const fn with_logger_type(mut self, logger_type: LoggerType) -> Self {
        self.logger_type = logger_type;
        self
    }
}

impl ConfigRecord for LoggerConfig {
    type Tag = LoggerTag;
    const KIND: &'static str = "Logger";

    fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tag(element: &str) -> Option<LoggerTag> {
        LoggerTag::from_name(element)
    }

    fn apply<V: ElementValue>(&mut self, tag: LoggerTag, value: &V) -> Result<()> {
        match tag {
            LoggerTag::FileName => self.file_name = value.ascii()?,
            LoggerTag::IncludeDateInLoggerOutput => {
                self.include_date_in_logger_output = value.boolean()?;
            }
            LoggerTag::NumberOfLogFiles => self.number_of_log_files = saturate_u32(value.uint()?),
            LoggerTag::MaxLogFileSize => self.max_log_file_size = saturate_u32(value.uint()?),
            LoggerTag::LoggerSeverity => self.severity = value.enumeration()?,
            LoggerTag::LoggerType => self.logger_type = value.enumeration()?,
        }
        Ok(())
    }

    fn clear(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::new(name);
    }
}
