/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # EMA Parser
//!
//! Configuration parsers for the EMA configuration engine.
//!
//! Both parsers merge into the same [`ema_config::ConfigTarget`]. XML is
//! applied first and programmatic input second, so a record named in both
//! keeps every file value the map does not override.
//!
//! ## Features
//!
//! - **XML**: `EmaConfig` documents read with `roxmltree`
//! - **Programmatic**: decoded [`ema_core::ConfigMap`] trees

pub mod programmatic;
pub mod xml;

pub use programmatic::{ProgrammaticConfigParser, ProgrammaticElement};
pub use xml::{DEFAULT_CONFIG_FILE, XmlConfigParser, XmlElement};
