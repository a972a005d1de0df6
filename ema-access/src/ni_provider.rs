/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Non-interactive provider configuration.

use crate::base::ConfigBase;
use crate::resolve::{
    ActiveConfigOptions, ChannelScope, DEFAULT_LOGGER_NAME, DEFAULT_NI_PROVIDER_NAME,
    first_undefined, instance_name, resolve_channels, resolve_directory,
    resolve_directory_dictionaries, resolve_named, select_record, undefined_reference,
    verify_selection,
};
use ema_config::{
    ChannelConfig, ChannelSetPrecedence, ConfigRole, ConfigTarget, DictionaryConfig,
    DirectoryConfig, LoggerConfig, NiProviderConfig, Registry,
};
use ema_core::{ConfigErrorLog, ConfigMap, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_KIND: &str = "OmmNiProviderConfig";

/// The configuration one non-interactive provider runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveNiProviderConfig {
    /// Provider name, suffixed with an instance id when generated.
    pub instance_name: String,
    pub ni_provider: NiProviderConfig,
    /// Channels of the provider's channel set, in set order.
    pub channels: Registry<ChannelConfig>,
    pub logger: LoggerConfig,
    /// Source directory the provider publishes.
    pub directory: DirectoryConfig,
    /// Whether `directory` holds the built-in default service.
    pub default_directory: bool,
    /// Dictionaries a configured directory's services provide or use;
    /// empty for the default directory.
    pub dictionaries: Registry<DictionaryConfig>,
}

/// Owning configuration of a non-interactive provider session.
#[derive(Debug, Clone, PartialEq)]
pub struct OmmNiProviderConfig {
    base: ConfigBase,
    provider_name: Option<String>,
}

impl OmmNiProviderConfig {
    /// Creates a configuration from `EmaConfig.xml` in the working directory.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the file is present but invalid.
    pub fn new() -> Result<Self> {
        Ok(Self::wrap(ConfigBase::load(ConfigRole::NiProvider, None)?))
    }

    /// Creates a configuration from an explicit XML file.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the file is missing or invalid.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::wrap(ConfigBase::load(
            ConfigRole::NiProvider,
            Some(path.as_ref()),
        )?))
    }

    /// Creates a configuration from in-memory XML text.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the text is not a valid configuration.
    pub fn from_xml_str(text: &str) -> Result<Self> {
        Ok(Self::wrap(ConfigBase::from_xml_str(
            ConfigRole::NiProvider,
            text,
        )?))
    }

    const fn wrap(base: ConfigBase) -> Self {
        Self {
            base,
            provider_name: None,
        }
    }

    /// Overrides the host and port of the provider's channel.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for a malformed host string.
    pub fn host(&mut self, host: &str) -> Result<&mut Self> {
        self.base.overrides.set_host(host)?;
        Ok(self)
    }

    /// Selects the provider to resolve.
    pub fn provider_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.provider_name = Some(name.into());
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
        self.provider_name = None;
        self
    }

    #[must_use]
    pub const fn target(&self) -> &ConfigTarget {
        &self.base.target
    }

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
            &target.ni_providers,
            (self.provider_name.as_deref(), "ProviderName"),
            (target.default_ni_provider.as_deref(), "niprovider"),
            "NiProvider",
            CONFIG_KIND,
        )?;
        verify_selection(
            &target.directories,
            (None, ""),
            (target.default_directory.as_deref(), "directory"),
            "Directory",
            CONFIG_KIND,
        )?;

        for provider in target.ni_providers.values() {
            let undefined = |kind: &str, name: &str| {
                undefined_reference(kind, name, "NiProvider", &provider.name, CONFIG_KIND)
            };
            if let Some(name) = first_undefined(&provider.channel_set, &target.channels) {
                return Err(undefined("Channel", name));
            }
            if !provider.logger.is_empty() && !target.loggers.contains_key(&provider.logger) {
                return Err(undefined("Logger", &provider.logger));
            }
            if !provider.directory.is_empty()
                && !target.directories.contains_key(&provider.directory)
            {
                return Err(undefined("Directory", &provider.directory));
            }
        }
        Ok(())
    }

    /// Resolves and deep-copies the configuration one provider runs with.
    ///
    /// Without any configured directory the provider publishes the default
    /// `NI_PUB` service.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when [`verify`](Self::verify) fails.
    pub fn active_config(
        &mut self,
        options: ActiveConfigOptions,
    ) -> Result<ActiveNiProviderConfig> {
        self.verify()?;
        let ordinal = self.base.next_resolution();
        let base = &mut self.base;
        let target = &base.target;

        let mut ni_provider: NiProviderConfig = select_record(
            &target.ni_providers,
            [
                self.provider_name.as_deref(),
                target.default_ni_provider.as_deref(),
                target.first_configured_ni_provider.as_deref(),
            ],
            DEFAULT_NI_PROVIDER_NAME,
        );
        let owner = ni_provider.name.clone();
        let undefined = |kind: &str, name: &str| {
            undefined_reference(kind, name, "NiProvider", &owner, CONFIG_KIND)
        };

        let channels = resolve_channels(
            &mut ni_provider.channel_set,
            &target.channels,
            &base.overrides,
            ChannelScope::Primary,
            |name| undefined("Channel", name),
        )?;
        let logger = resolve_named(
            &mut ni_provider.logger,
            &target.loggers,
            DEFAULT_LOGGER_NAME,
            |name| undefined("Logger", name),
        )?;
        let (directory, default_directory) =
            resolve_directory(&mut ni_provider.directory, target, |name| {
                undefined("Directory", name)
            })?;

        let dictionaries = if default_directory {
            Registry::new()
        } else {
            resolve_directory_dictionaries(
                &directory,
                &base.target.dictionaries,
                &mut base.target.error_log,
            )
        };

        let active = ActiveNiProviderConfig {
            instance_name: instance_name(&ni_provider.name, ordinal, options),
            ni_provider,
            channels,
            logger,
            directory,
            default_directory,
            dictionaries,
        };
        tracing::debug!(
            instance = %active.instance_name,
            directory = %active.directory.name,
            services = active.directory.services.len(),
            "resolved non-interactive provider configuration"
        );
        Ok(active)
    }
}
