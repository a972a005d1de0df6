/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Common utilities shared across examples.

use std::env;
use std::path::PathBuf;

/// Configuration file shipped with the examples.
pub const EXAMPLE_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/EmaConfig.xml");

/// Returns the configuration file to load, `EMA_CONFIG` first.
#[must_use]
pub fn config_path() -> PathBuf {
    env::var("EMA_CONFIG").map_or_else(|_| PathBuf::from(EXAMPLE_CONFIG), PathBuf::from)
}

/// Returns the `host[:port]` override from `EMA_HOST`, if any.
#[must_use]
pub fn host_override() -> Option<String> {
    env::var("EMA_HOST").ok().filter(|host| !host.is_empty())
}

/// Initialize logging for examples.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}
