/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Consumer configuration.
//!
//! [`OmmConsumerConfig`] owns everything parsed for a consumer session and
//! resolves it into an [`ActiveConsumerConfig`]: the records one consumer
//! runs with, deep-copied and completed with built-in defaults.
//!
//! # Example
//!
//! ```
//! use ema_access::{ActiveConfigOptions, OmmConsumerConfig};
//!
//! let mut config = OmmConsumerConfig::from_xml_str("<EmaConfig/>").unwrap();
//! config.host("localhost:14002").unwrap();
//! let active = config.active_config(ActiveConfigOptions::default()).unwrap();
//! assert_eq!(active.consumer.name, "DefaultEmaConsumer");
//! ```

use crate::base::ConfigBase;
use crate::resolve::{
    ActiveConfigOptions, ChannelScope, DEFAULT_CONSUMER_NAME, DEFAULT_DICTIONARY_NAME,
    DEFAULT_LOGGER_NAME, first_undefined, instance_name, resolve_channels, resolve_named,
    select_record, undefined_reference, verify_selection,
};
use ema_config::{
    ChannelConfig, ChannelSetPrecedence, ConfigRole, ConfigTarget, ConsumerConfig,
    DictionaryConfig, LoggerConfig, Registry, SessionChannelConfig,
};
use ema_core::{ConfigErrorLog, ConfigMap, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_KIND: &str = "OmmConsumerConfig";

/// A session channel with its channels resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSessionChannel {
    /// The session channel, with unset reconnect values taken from the consumer.
    pub config: SessionChannelConfig,
    /// Channels of the session channel's set, in set order.
    pub channels: Registry<ChannelConfig>,
}

/// The configuration one consumer session runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveConsumerConfig {
    /// Consumer name, suffixed with an instance id when generated.
    pub instance_name: String,
    pub consumer: ConsumerConfig,
    /// Channels of the consumer's channel set, in set order.
    pub channels: Registry<ChannelConfig>,
    pub session_channels: Registry<ActiveSessionChannel>,
    pub logger: LoggerConfig,
    pub dictionary: DictionaryConfig,
}

/// Owning configuration of a consumer session.
#[derive(Debug, Clone, PartialEq)]
pub struct OmmConsumerConfig {
    base: ConfigBase,
    consumer_name: Option<String>,
}

impl OmmConsumerConfig {
    /// Creates a configuration from `EmaConfig.xml` in the working directory.
    ///
    /// A missing default file is not an error; built-in defaults apply.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the file is present but invalid.
    pub fn new() -> Result<Self> {
        Ok(Self::wrap(ConfigBase::load(ConfigRole::Consumer, None)?))
    }

    /// Creates a configuration from an explicit XML file.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the file is missing or invalid.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::wrap(ConfigBase::load(
            ConfigRole::Consumer,
            Some(path.as_ref()),
        )?))
    }

    /// Creates a configuration from in-memory XML text.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the text is not a valid configuration.
    pub fn from_xml_str(text: &str) -> Result<Self> {
        Ok(Self::wrap(ConfigBase::from_xml_str(ConfigRole::Consumer, text)?))
    }

    const fn wrap(base: ConfigBase) -> Self {
        Self {
            base,
            consumer_name: None,
        }
    }

    /// Overrides the host and port of the consumer's channel.
    ///
    /// # Arguments
    /// * `host` - `[host][:port]`, missing parts defaulting to `localhost:14002`
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for a malformed host string.
    pub fn host(&mut self, host: &str) -> Result<&mut Self> {
        self.base.overrides.set_host(host)?;
        Ok(self)
    }

    /// Selects the consumer to resolve.
    pub fn consumer_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.consumer_name = Some(name.into());
        self
    }

    /// Sets the proxy host of every channel.
    pub fn proxy_host_name(&mut self, host: impl Into<String>) -> &mut Self {
        self.base.overrides.proxy_host = Some(host.into());
        self
    }

    /// Sets the proxy port of every channel.
    pub fn proxy_port(&mut self, port: impl Into<String>) -> &mut Self {
        self.base.overrides.proxy_port = Some(port.into());
        self
    }

    /// Layers a programmatic configuration over the XML one.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the map is malformed.
    pub fn config(&mut self, config: &ConfigMap) -> Result<&mut Self> {
        self.base.apply_map(config)?;
        Ok(self)
    }

    /// Changes how `Channel` and `ChannelSet` of one item interact.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if reparsing the inputs fails.
    pub fn channel_set_precedence(
        &mut self,
        precedence: ChannelSetPrecedence,
    ) -> Result<&mut Self> {
        self.base.set_channel_set_precedence(precedence)?;
        Ok(self)
    }

    /// Drops every input, override and diagnostic.
    pub fn clear(&mut self) -> &mut Self {
        self.base.clear();
        self.consumer_name = None;
        self
    }

    /// Returns the parsed records.
    #[must_use]
    pub const fn target(&self) -> &ConfigTarget {
        &self.base.target
    }

    /// Returns the diagnostics collected so far.
    #[must_use]
    pub const fn error_log(&self) -> &ConfigErrorLog {
        self.base.error_log()
    }

    /// Forwards the collected diagnostics to `tracing`.
    pub fn drain_error_log(&self) {
        self.base.drain_error_log();
    }

    /// Checks that every name the configuration refers to is defined.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the first undefined reference.
    pub fn verify(&self) -> Result<()> {
        let target = &self.base.target;

        verify_selection(
            &target.consumers,
            (self.consumer_name.as_deref(), "ConsumerName"),
            (target.default_consumer.as_deref(), "consumer"),
            "Consumer",
            CONFIG_KIND,
        )?;

        for consumer in target.consumers.values() {
            let undefined = |kind: &str, name: &str| {
                undefined_reference(kind, name, "Consumer", &consumer.name, CONFIG_KIND)
            };
            if let Some(name) = first_undefined(&consumer.channel_set, &target.channels) {
                return Err(undefined("Channel", name));
            }
            if let Some(name) =
                first_undefined(&consumer.session_channel_set, &target.session_channels)
            {
                return Err(undefined("SessionChannel", name));
            }
            if !consumer.logger.is_empty() && !target.loggers.contains_key(&consumer.logger) {
                return Err(undefined("Logger", &consumer.logger));
            }
            if !consumer.dictionary.is_empty()
                && !target.dictionaries.contains_key(&consumer.dictionary)
            {
                return Err(undefined("Dictionary", &consumer.dictionary));
            }
        }

        for session in target.session_channels.values() {
            if let Some(name) = first_undefined(&session.channel_set, &target.channels) {
                return Err(undefined_reference(
                    "Channel",
                    name,
                    "SessionChannel",
                    &session.name,
                    CONFIG_KIND,
                ));
            }
        }
        Ok(())
    }

    /// Resolves and deep-copies the configuration one consumer runs with.
    ///
    /// The consumer is the one named by [`consumer_name`](Self::consumer_name),
    /// else the default consumer, else the first configured, else a
    /// defaulted `DefaultEmaConsumer`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when [`verify`](Self::verify) fails.
    pub fn active_config(&mut self, options: ActiveConfigOptions) -> Result<ActiveConsumerConfig> {
        self.verify()?;
        let ordinal = self.base.next_resolution();
        let target = &self.base.target;
        let overrides = &self.base.overrides;

        let mut consumer: ConsumerConfig = select_record(
            &target.consumers,
            [
                self.consumer_name.as_deref(),
                target.default_consumer.as_deref(),
                target.first_configured_consumer.as_deref(),
            ],
            DEFAULT_CONSUMER_NAME,
        );
        let owner = consumer.name.clone();
        let undefined =
            |kind: &str, name: &str| undefined_reference(kind, name, "Consumer", &owner, CONFIG_KIND);

        let session_only =
            consumer.channel_set.is_empty() && !consumer.session_channel_set.is_empty();
        let channels = if session_only {
            Registry::new()
        } else {
            resolve_channels(
                &mut consumer.channel_set,
                &target.channels,
                overrides,
                ChannelScope::Primary,
                |name| undefined("Channel", name),
            )?
        };

        let mut session_channels = Registry::with_capacity(consumer.session_channel_set.len());
        for name in &consumer.session_channel_set {
            let mut config = target
                .session_channels
                .get(name.as_str())
                .cloned()
                .ok_or_else(|| undefined("SessionChannel", name))?;
            inherit_reconnect(&mut config, &consumer);
            let channels = resolve_channels(
                &mut config.channel_set,
                &target.channels,
                overrides,
                ChannelScope::Session,
                |channel| {
                    undefined_reference("Channel", channel, "SessionChannel", name, CONFIG_KIND)
                },
            )?;
            session_channels.insert(name.clone(), ActiveSessionChannel { config, channels });
        }

        let logger = resolve_named(
            &mut consumer.logger,
            &target.loggers,
            DEFAULT_LOGGER_NAME,
            |name| undefined("Logger", name),
        )?;
        let dictionary = resolve_named(
            &mut consumer.dictionary,
            &target.dictionaries,
            DEFAULT_DICTIONARY_NAME,
            |name| undefined("Dictionary", name),
        )?;

        let active = ActiveConsumerConfig {
            instance_name: instance_name(&consumer.name, ordinal, options),
            consumer,
            channels,
            session_channels,
            logger,
            dictionary,
        };
        tracing::debug!(
            instance = %active.instance_name,
            channels = active.channels.len(),
            session_channels = active.session_channels.len(),
            "resolved consumer configuration"
        );
        Ok(active)
    }
}

fn inherit_reconnect(session: &mut SessionChannelConfig, consumer: &ConsumerConfig) {
    if !session.reconnect_attempt_limit_set {
        session.reconnect_attempt_limit = consumer.reconnect_attempt_limit;
    }
    if !session.reconnect_min_delay_set {
        session.reconnect_min_delay = consumer.reconnect_min_delay;
    }
    if !session.reconnect_max_delay_set {
        session.reconnect_max_delay = consumer.reconnect_max_delay;
    }
}
