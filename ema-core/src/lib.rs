/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # EMA Core
//!
//! Core types, coercion tables, and error definitions for the EMA configuration engine.
//!
//! This crate provides the building blocks used across all EMA crates:
//! - **Error types**: `ConfigError` and the crate-wide `Result`
//! - **Error log**: `ConfigErrorLog`, the ordered list of non-fatal diagnostics
//! - **Enumerations**: `ConfigEnum` and the string/code coercion tables
//! - **Host:port parsing**: `host_port::parse` with defaulting
//! - **Decoded data**: `ConfigMap`, `ElementList`, and `ConfigValue` for programmatic input

pub mod data;
pub mod enums;
pub mod error;
pub mod error_log;
pub mod host_port;

pub use data::{ConfigMap, ConfigValue, DataType, ElementEntry, ElementList, MapEntry};
pub use enums::{
    CompressionType, ConfigEnum, ConnectionType, DataState, DictionaryMode,
    EncryptedProtocolType, LoggerLevel, LoggerType, ServerType, StatusCode, StreamState,
};
pub use error::{ConfigError, Result};
pub use error_log::{ConfigErrorEntry, ConfigErrorLog, LogSink, Severity, TracingSink};
