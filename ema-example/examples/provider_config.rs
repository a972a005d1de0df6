//! Provider Configuration Example
//!
//! Resolves the non-interactive and interactive provider configurations
//! from the example `EmaConfig.xml` and prints their source directories.

use ema::prelude::*;
use ema_example::{config_path, host_override, init_logging};
use tracing::info;

fn print_directory(directory: &DirectoryConfig) {
    info!("  directory {}", directory.name);
    for service in directory.services.values() {
        info!(
            "    service {} id={:?} capabilities={:?} qos={}",
            service.name,
            service.service_id,
            service.info.capabilities,
            service.info.qos.len()
        );
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let path = config_path();
    let options = ActiveConfigOptions::default();

    let mut ni_config = OmmNiProviderConfig::with_path(&path)?;
    if let Some(host) = host_override() {
        ni_config.host(&host)?;
    }
    let ni = ni_config.active_config(options)?;
    ni_config.drain_error_log();
    info!(
        "NiProvider {} (instance {})",
        ni.ni_provider.name, ni.instance_name
    );
    for channel in ni.channels.values() {
        info!("  channel {} -> {}:{}", channel.name, channel.host, channel.port);
    }
    print_directory(&ni.directory);

    let mut iprovider_config = OmmIProviderConfig::with_path(&path)?;
    if let Ok(port) = std::env::var("EMA_SERVER_PORT") {
        iprovider_config.port(port);
    }
    let iprovider = iprovider_config.active_config(options)?;
    iprovider_config.drain_error_log();
    info!(
        "IProvider {} listening on {} port {}",
        iprovider.iprovider.name, iprovider.server.name, iprovider.server.port
    );
    print_directory(&iprovider.directory);
    for dictionary in iprovider.dictionaries.values() {
        info!(
            "  dictionary {} field={} enum={}",
            dictionary.name,
            dictionary.rdm_field_dictionary_item_name,
            dictionary.enum_type_def_item_name
        );
    }
    Ok(())
}
