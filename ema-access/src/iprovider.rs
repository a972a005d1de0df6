/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Interactive provider configuration.
//!
//! An interactive provider listens on a server instead of connecting over
//! channels, so only the server port can be overridden.

use crate::base::ConfigBase;
use crate::resolve::{
    ActiveConfigOptions, DEFAULT_IPROVIDER_NAME, DEFAULT_LOGGER_NAME, DEFAULT_SERVER_NAME,
    instance_name, resolve_directory, resolve_directory_dictionaries, resolve_named,
    select_record, undefined_reference, verify_selection,
};
use ema_config::{
    ConfigRole, ConfigTarget, DictionaryConfig, DirectoryConfig, IProviderConfig, LoggerConfig,
    Registry, ServerConfig,
};
use ema_core::{ConfigErrorLog, ConfigMap, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_KIND: &str = "OmmIProviderConfig";

/// The configuration one interactive provider runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveIProviderConfig {
    /// Provider name, suffixed with an instance id when generated.
    pub instance_name: String,
    pub iprovider: IProviderConfig,
    pub server: ServerConfig,
    pub logger: LoggerConfig,
    pub directory: DirectoryConfig,
    /// Whether `directory` holds the built-in default service.
    pub default_directory: bool,
    /// Dictionaries a configured directory's services provide or use.
    pub dictionaries: Registry<DictionaryConfig>,
}

/// Owning configuration of an interactive provider session.
#[derive(Debug, Clone, PartialEq)]
pub struct OmmIProviderConfig {
    base: ConfigBase,
    provider_name: Option<String>,
}

impl OmmIProviderConfig {
    /// Creates a configuration from `EmaConfig.xml` in the working directory.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the file is present but invalid.
    pub fn new() -> Result<Self> {
        Ok(Self::wrap(ConfigBase::load(ConfigRole::IProvider, None)?))
    }

    /// Creates a configuration from an explicit XML file.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the file is missing or invalid.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::wrap(ConfigBase::load(
            ConfigRole::IProvider,
            Some(path.as_ref()),
        )?))
    }

    /// Creates a configuration from in-memory XML text.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the text is not a valid configuration.
    pub fn from_xml_str(text: &str) -> Result<Self> {
        Ok(Self::wrap(ConfigBase::from_xml_str(
            ConfigRole::IProvider,
            text,
        )?))
    }

    const fn wrap(base: ConfigBase) -> Self {
        Self {
            base,
            provider_name: None,
        }
    }

    /// Overrides the port the server listens on.
    pub fn port(&mut self, port: impl Into<String>) -> &mut Self {
        self.base.overrides.port = Some(port.into());
        self
    }

    /// Selects the provider to resolve.
    pub fn provider_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.provider_name = Some(name.into());
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
            &target.iproviders,
            (self.provider_name.as_deref(), "ProviderName"),
            (target.default_iprovider.as_deref(), "iprovider"),
            "IProvider",
            CONFIG_KIND,
        )?;
        verify_selection(
            &target.directories,
            (None, ""),
            (target.default_directory.as_deref(), "directory"),
            "Directory",
            CONFIG_KIND,
        )?;

        for provider in target.iproviders.values() {
            let undefined = |kind: &str, name: &str| {
                undefined_reference(kind, name, "IProvider", &provider.name, CONFIG_KIND)
            };
            if !provider.server.is_empty() && !target.servers.contains_key(&provider.server) {
                return Err(undefined("Server", &provider.server));
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
    /// Without a server reference the provider listens on `DefaultEmaServer`;
    /// without any configured directory it serves `DIRECT_FEED`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when [`verify`](Self::verify) fails.
    pub fn active_config(&mut self, options: ActiveConfigOptions) -> Result<ActiveIProviderConfig> {
        self.verify()?;
        let ordinal = self.base.next_resolution();
        let base = &mut self.base;
        let target = &base.target;

        let mut iprovider: IProviderConfig = select_record(
            &target.iproviders,
            [
                self.provider_name.as_deref(),
                target.default_iprovider.as_deref(),
                target.first_configured_iprovider.as_deref(),
            ],
            DEFAULT_IPROVIDER_NAME,
        );
        let owner = iprovider.name.clone();
        let undefined =
            |kind: &str, name: &str| undefined_reference(kind, name, "IProvider", &owner, CONFIG_KIND);

        let mut server = resolve_named(
            &mut iprovider.server,
            &target.servers,
            DEFAULT_SERVER_NAME,
            |name| undefined("Server", name),
        )?;
        base.overrides.apply_server_port(&mut server);
        let logger = resolve_named(
            &mut iprovider.logger,
            &target.loggers,
            DEFAULT_LOGGER_NAME,
            |name| undefined("Logger", name),
        )?;
        let (directory, default_directory) =
            resolve_directory(&mut iprovider.directory, target, |name| {
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

        let active = ActiveIProviderConfig {
            instance_name: instance_name(&iprovider.name, ordinal, options),
            iprovider,
            server,
            logger,
            directory,
            default_directory,
            dictionaries,
        };
        tracing::debug!(
            instance = %active.instance_name,
            port = %active.server.port,
            directory = %active.directory.name,
            "resolved interactive provider configuration"
        );
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{DEFAULT_DIRECTORY_NAME, DEFAULT_IPROVIDER_SERVICE_NAME};
    use ema_core::{CompressionType, ElementList};

    const FIXED: ActiveConfigOptions = ActiveConfigOptions {
        generate_instance_id: false,
    };

    const PROVIDER_XML: &str = r#"<EmaConfig>
      <IProviderGroup>
        <DefaultIProvider value="Provider_1"/>
        <IProviderList>
          <IProvider>
            <Name value="Provider_1"/>
            <Server value="Server_1"/>
            <Logger value="Logger_1"/>
            <EnumTypeFragmentSize value="64000"/>
          </IProvider>
        </IProviderList>
      </IProviderGroup>
      <ServerGroup>
        <ServerList>
          <Server>
            <Name value="Server_1"/>
            <Port value="14005"/>
            <CompressionType value="CompressionType::ZLib"/>
          </Server>
        </ServerList>
      </ServerGroup>
      <LoggerGroup>
        <LoggerList>
          <Logger><Name value="Logger_1"/><FileName value="provLog"/></Logger>
        </LoggerList>
      </LoggerGroup>
    </EmaConfig>"#;

    #[test]
    fn test_empty_config_listens_on_default_server() {
        let mut config = OmmIProviderConfig::from_xml_str("<EmaConfig/>").unwrap();
        let active = config.active_config(FIXED).unwrap();

        assert_eq!(active.iprovider.name, DEFAULT_IPROVIDER_NAME);
        assert_eq!(active.server.name, DEFAULT_SERVER_NAME);
        assert_eq!(active.server.port, "14002");
        assert_eq!(active.iprovider.server, DEFAULT_SERVER_NAME);
        assert!(active.default_directory);
        assert_eq!(active.directory.name, DEFAULT_DIRECTORY_NAME);
        let service = active.directory.service(DEFAULT_IPROVIDER_SERVICE_NAME).unwrap();
        assert_eq!(service.service_id, Some(1));
        assert_eq!(service.state.accepting_requests, Some(true));
    }

    #[test]
    fn test_configured_provider_resolves() {
        let mut config = OmmIProviderConfig::from_xml_str(PROVIDER_XML).unwrap();
        let active = config.active_config(FIXED).unwrap();

        assert_eq!(active.iprovider.name, "Provider_1");
        assert_eq!(active.iprovider.enum_type_fragment_size, 64000);
        assert_eq!(active.server.port, "14005");
        assert_eq!(active.server.compression_type, CompressionType::ZLib);
        assert_eq!(active.logger.file_name, "provLog");
    }

    #[test]
    fn test_port_override() {
        let mut config = OmmIProviderConfig::from_xml_str(PROVIDER_XML).unwrap();
        config.port("15555");
        let active = config.active_config(FIXED).unwrap();

        assert_eq!(active.server.port, "15555");
        assert_eq!(config.target().servers["Server_1"].port, "14005");
    }

    #[test]
    fn test_programmatic_server_layer() {
        let mut config = OmmIProviderConfig::from_xml_str(PROVIDER_XML).unwrap();
        let map = ConfigMap::new().with(
            "ServerGroup",
            ElementList::new().with(
                "ServerList",
                ConfigMap::new().with("Server_1", ElementList::new().with_uint("HighWaterMark", 6144)),
            ),
        );
        config.config(&map).unwrap();
        let active = config.active_config(FIXED).unwrap();

        assert_eq!(active.server.high_water_mark, 6144);
        assert_eq!(active.server.port, "14005");
    }

    #[test]
    fn test_verify_failures() {
        let mut config = OmmIProviderConfig::from_xml_str(PROVIDER_XML).unwrap();
        config.provider_name("Provider_2");
        assert_eq!(
            config.verify().unwrap_err().message(),
            "IProvider Provider_2 set by OmmIProviderConfig.ProviderName is not defined in this OmmIProviderConfig"
        );

        let xml = r#"<EmaConfig><IProviderGroup><IProviderList><IProvider>
            <Name value="Provider_1"/>
            <Server value="Server_3"/>
        </IProvider></IProviderList></IProviderGroup></EmaConfig>"#;
        let mut config = OmmIProviderConfig::from_xml_str(xml).unwrap();
        assert_eq!(
            config.verify().unwrap_err().message(),
            "Server Server_3 in IProvider Provider_1 is not defined in this OmmIProviderConfig"
        );
        assert!(config.active_config(FIXED).is_err());
    }

    #[test]
    fn test_instance_ids() {
        let mut config = OmmIProviderConfig::from_xml_str(PROVIDER_XML).unwrap();
        let active = config.active_config(ActiveConfigOptions::default()).unwrap();
        assert_eq!(active.instance_name, "Provider_1_1");
    }
}
