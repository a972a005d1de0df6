/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # EMA
//!
//! Configuration resolution and merge engine for EMA consumer and provider
//! sessions.
//!
//! Built-in defaults, an `EmaConfig.xml` file and programmatic maps are
//! reconciled into one effective record per named Consumer, NiProvider,
//! IProvider, Channel, Server, Logger, Dictionary, Directory and
//! SessionChannel. Later sources override earlier ones field by field.
//!
//! ## Quick Start
//!
//! ```rust
//! use ema::prelude::*;
//!
//! let xml = r#"<EmaConfig>
//!   <ChannelGroup><ChannelList><Channel>
//!     <Name value="Channel_1"/>
//!     <Host value="feed"/>
//!   </Channel></ChannelList></ChannelGroup>
//!   <ConsumerGroup><ConsumerList><Consumer>
//!     <Name value="Consumer_1"/>
//!     <Channel value="Channel_1"/>
//!   </Consumer></ConsumerList></ConsumerGroup>
//! </EmaConfig>"#;
//!
//! let mut config = OmmConsumerConfig::from_xml_str(xml).unwrap();
//! config
//!     .config(&ConfigMap::new().with(
//!         "ChannelGroup",
//!         ElementList::new().with(
//!             "ChannelList",
//!             ConfigMap::new().with("Channel_1", ElementList::new().with_uint("HighWaterMark", 10)),
//!         ),
//!     ))
//!     .unwrap();
//!
//! let active = config.active_config(ActiveConfigOptions::default()).unwrap();
//! assert_eq!(active.channels["Channel_1"].host, "feed");
//! assert_eq!(active.channels["Channel_1"].high_water_mark, 10);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Errors, the error log, enum coercion and decoded containers
//! - [`config`]: Configuration records and the parse target
//! - [`parser`]: XML and programmatic parsers
//! - [`access`]: Owning configuration objects and active-config resolution

pub mod core {
    //! Errors, the error log, enum coercion and decoded containers.
    pub use ema_core::*;
}

pub mod config {
    //! Configuration records and the parse target.
    pub use ema_config::*;
}

pub mod parser {
    //! XML and programmatic parsers.
    pub use ema_parser::*;
}

pub mod access {
    //! Owning configuration objects and active-config resolution.
    pub use ema_access::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ema_core::{
        CompressionType, ConfigError, ConfigErrorLog, ConfigMap, ConfigValue, ConnectionType,
        ElementList, LoggerLevel, Result, Severity,
    };

    // Records
    pub use ema_config::{
        ChannelConfig, ChannelSetPrecedence, ConsumerConfig, DictionaryConfig, DirectoryConfig,
        IProviderConfig, LoggerConfig, NiProviderConfig, ServerConfig, ServiceConfig,
    };

    // Parsers
    pub use ema_parser::{ProgrammaticConfigParser, XmlConfigParser};

    // Configuration objects
    pub use ema_access::{
        ActiveConfigOptions, ActiveConsumerConfig, ActiveIProviderConfig, ActiveNiProviderConfig,
        OmmConsumerConfig, OmmIProviderConfig, OmmNiProviderConfig,
    };
}
