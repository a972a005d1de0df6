/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Splitting of `host:port` strings with defaulting.

use crate::error::{ConfigError, Result};
use memchr::memchr_iter;

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Port used when none is configured.
pub const DEFAULT_PORT: &str = "14002";

/// Splits `input` into a host and a port.
///
/// | input          | result                           |
/// |----------------|----------------------------------|
/// | `""`           | `(default_host, default_port)`   |
/// | `"host"`       | `("host", default_port)`         |
/// | `":1234"`      | `(default_host, "1234")`         |
/// | `"host:"`      | `("host", default_port)`         |
/// | `"host:1234"`  | `("host", "1234")`               |
///
/// # Arguments
/// * `input` - The configured string
/// * `default_host` - Host substituted when none is given
/// * `default_port` - Port substituted when none is given
///
/// # Errors
/// Returns `InvalidConfiguration` when more than one `:` is present.
pub fn parse(input: &str, default_host: &str, default_port: &str) -> Result<(String, String)> {
    if input.is_empty() {
        return Ok((default_host.to_string(), default_port.to_string()));
    }

    let mut colons = memchr_iter(b':', input.as_bytes());
    let Some(first) = colons.next() else {
        return Ok((input.to_string(), default_port.to_string()));
    };
    if colons.next().is_some() {
        return Err(malformed(input));
    }

    let (host, port) = (&input[..first], &input[first + 1..]);
    let host = if host.is_empty() { default_host } else { host };
    let port = if port.is_empty() { default_port } else { port };
    Ok((host.to_string(), port.to_string()))
}

/// Splits `input` using [`DEFAULT_HOST`] and [`DEFAULT_PORT`].
///
/// # Errors
/// See [`parse`].
pub fn parse_with_defaults(input: &str) -> Result<(String, String)> {
    parse(input, DEFAULT_HOST, DEFAULT_PORT)
}

fn malformed(input: &str) -> ConfigError {
    ConfigError::invalid(format!(
        "Invalid host string: \"{input}\". The host string is malformed; expected [host][:port]."
    ))
}
