/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # EMA Config
//!
//! Named configuration records for the EMA configuration engine.
//!
//! This crate provides:
//! - **Records**: consumer, provider, channel, server, logger, dictionary,
//!   session channel and directory configuration with their defaults
//! - **Element tags**: closed per-record tag sets tokenized from element names
//! - **Element coercion**: the [`ElementValue`] view both parsers implement
//! - **Parse target**: [`ConfigTarget`], the registries both parsers fill

pub mod channel;
pub mod consumer;
pub mod dictionary;
pub mod directory;
pub mod logger;
pub mod provider;
pub mod record;
pub mod server;
pub mod session_channel;
pub mod tag;
pub mod target;
pub mod trace;
pub mod value;

pub use channel::{ChannelConfig, ChannelId, ChannelSet};
pub use consumer::ConsumerConfig;
pub use dictionary::DictionaryConfig;
pub use directory::{
    DirectoryConfig, Qos, ServiceConfig, ServiceInfo, ServiceLoad, ServiceState, ServiceStatus,
};
pub use logger::LoggerConfig;
pub use provider::{IProviderConfig, NiProviderConfig};
pub use record::ConfigRecord;
pub use server::ServerConfig;
pub use session_channel::SessionChannelConfig;
pub use tag::GroupTag;
pub use target::{ChannelSetPrecedence, ConfigRole, ConfigTarget, Registry, record_entry};
pub use trace::XmlTraceConfig;
pub use value::ElementValue;
