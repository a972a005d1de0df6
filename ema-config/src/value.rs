/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Source-independent view of a single configuration element.
//!
//! The XML and programmatic parsers present each element to a record through
//! [`ElementValue`]. Every record therefore performs its field coercion once,
//! while each source decides how a raw value is read and how a type mismatch
//! is reported.

use ema_core::{ConfigEnum, Result};

/// A single configuration element as seen by a record.
pub trait ElementValue {
    /// Returns the element name as written in the source.
    fn name(&self) -> &str;

    /// Reads the value as a string.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when the value is absent or not a string.
    fn ascii(&self) -> Result<String>;

    /// Reads the value as an unsigned integer.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when the value is absent or not unsigned.
    fn uint(&self) -> Result<u64>;

    /// Reads the value as a signed integer.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when the value is absent or not signed.
    fn int(&self) -> Result<i64>;

    /// Reads the value as a boolean flag; any nonzero number is true.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when the value is absent or not numeric.
    fn boolean(&self) -> Result<bool>;

    /// Reads the value as an enumeration.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when the value is absent, malformed, or
    /// not one of the accepted tokens or codes.
    fn enumeration<E: ConfigEnum>(&self) -> Result<E>;
}

/// Narrows an unsigned value to `u32`, saturating at `u32::MAX`.
#[must_use]
pub fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Narrows an unsigned value to `i32`, saturating at `i32::MAX`.
#[must_use]
pub fn saturate_u64_i32(value: u64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Narrows an unsigned value to `i64`, saturating at `i64::MAX`.
#[must_use]
pub fn saturate_u64_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Narrows a signed value to `i32`, clamping to its range.
#[must_use]
pub fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Converts a ping timeout given in milliseconds to whole seconds.
///
/// Values below one second fall back to 60 seconds.
#[must_use]
pub fn ping_timeout_secs(millis: u64) -> u32 {
    if millis >= 1000 {
        saturate_u32(millis / 1000)
    } else {
        60
    }
}

/// Splits a comma-separated list, trimming every token and skipping blanks.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|token| !token.is_empty())
}
