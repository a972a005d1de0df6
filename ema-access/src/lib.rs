/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # EMA Access
//!
//! Owning configuration objects for consumer and provider sessions.
//!
//! Each object loads the XML configuration, layers programmatic maps over
//! it, verifies cross references and resolves the active configuration:
//! the deep-copied records one session runs with.
//!
//! ## Example
//!
//! ```
//! use ema_access::{ActiveConfigOptions, OmmNiProviderConfig};
//!
//! let mut config = OmmNiProviderConfig::from_xml_str("<EmaConfig/>").unwrap();
//! let active = config.active_config(ActiveConfigOptions::default()).unwrap();
//! assert!(active.directory.service("NI_PUB").is_some());
//! ```

mod base;
pub mod consumer;
pub mod iprovider;
pub mod ni_provider;
pub mod overrides;
pub mod resolve;

pub use consumer::{ActiveConsumerConfig, ActiveSessionChannel, OmmConsumerConfig};
pub use iprovider::{ActiveIProviderConfig, OmmIProviderConfig};
pub use ni_provider::{ActiveNiProviderConfig, OmmNiProviderConfig};
pub use overrides::ConnectionOverrides;
pub use resolve::{ActiveConfigOptions, default_directory};
