//! Consumer Configuration Example
//!
//! Loads the example `EmaConfig.xml`, layers a programmatic channel
//! override on top and prints the active consumer configuration.

use ema::prelude::*;
use ema_example::{config_path, host_override, init_logging};
use tracing::{info, warn};

fn channel_override() -> ConfigMap {
    ConfigMap::new().with(
        "ChannelGroup",
        ElementList::new().with(
            "ChannelList",
            ConfigMap::new().with(
                "Channel_1",
                ElementList::new()
                    .with_uint("HighWaterMark", 10)
                    .with_enum("CompressionType", CompressionType::Lz4 as u16),
            ),
        ),
    )
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let path = config_path();
    info!("Loading consumer configuration from {}", path.display());

    let mut config = OmmConsumerConfig::with_path(&path)?;
    config.config(&channel_override())?;
    if let Some(host) = host_override() {
        config.host(&host)?;
    }
    if let Ok(name) = std::env::var("EMA_CONSUMER") {
        config.consumer_name(name);
    }

    let active = config.active_config(ActiveConfigOptions::default())?;
    config.drain_error_log();
    if !config.error_log().is_empty() {
        warn!("{} configuration diagnostics", config.error_log().count());
    }

    info!(
        "Consumer {} (instance {})",
        active.consumer.name, active.instance_name
    );
    for channel in active.channels.values() {
        info!(
            "  channel {} -> {}:{} {:?} compression={:?} hwm={}",
            channel.name,
            channel.host,
            channel.port,
            channel.connection_type,
            channel.compression_type,
            channel.high_water_mark
        );
    }
    for session in active.session_channels.values() {
        info!(
            "  session channel {} over {} channel(s)",
            session.config.name,
            session.channels.len()
        );
    }
    info!(
        "  logger {} severity={:?}",
        active.logger.name, active.logger.severity
    );
    info!(
        "  dictionary {} local={}",
        active.dictionary.name, active.dictionary.is_local_dictionary
    );
    Ok(())
}
