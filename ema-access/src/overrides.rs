/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Connection settings set directly on a configuration object.
//!
//! These override whatever the XML file or programmatic map configured for
//! the resolved channels and servers.

use ema_config::{ChannelConfig, ServerConfig};
use ema_core::{ConnectionType, Result, host_port};
use serde::{Deserialize, Serialize};

/// Host, port and proxy values set through the configuration object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOverrides {
    /// Host name from `host()`.
    pub host_name: Option<String>,
    /// Port from `host()` or `port()`.
    pub port: Option<String>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<String>,
}

impl ConnectionOverrides {
    /// Stores the host and port of a `host[:port]` string.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for a malformed host string; the
    /// previous values are kept in that case.
    pub fn set_host(&mut self, host: &str) -> Result<()> {
        let (host_name, port) = host_port::parse_with_defaults(host)?;
        self.host_name = Some(host_name);
        self.port = Some(port);
        Ok(())
    }

    /// Returns the host and port when `host()` was called.
    #[must_use]
    pub fn host_port(&self) -> Option<(&str, &str)> {
        match (&self.host_name, &self.port) {
            (Some(host), Some(port)) => Some((host, port)),
            _ => None,
        }
    }

    /// Returns true if any proxy value is set.
    #[must_use]
    pub const fn has_proxy(&self) -> bool {
        self.proxy_host.is_some() || self.proxy_port.is_some()
    }

    /// Points a channel at the overriding host over a plain socket.
    ///
    /// Does nothing unless `host()` was called.
    pub fn pin_channel(&self, channel: &mut ChannelConfig) {
        if let Some((host, port)) = self.host_port() {
            channel.host = host.to_string();
            channel.port = port.to_string();
            channel.connection_type = ConnectionType::Socket;
        }
    }

    /// Applies the proxy values that are set.
    pub fn apply_proxy(&self, channel: &mut ChannelConfig) {
        if let Some(host) = &self.proxy_host {
            channel.proxy_host.clone_from(host);
        }
        if let Some(port) = &self.proxy_port {
            channel.proxy_port.clone_from(port);
        }
    }

    /// Applies an overriding port to a server.
    pub fn apply_server_port(&self, server: &mut ServerConfig) {
        if let Some(port) = &self.port {
            server.port.clone_from(port);
        }
    }

    /// Drops every override.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_host_defaults_missing_parts() {
        let mut overrides = ConnectionOverrides::default();
        overrides.set_host(":15000").unwrap();
        assert_eq!(overrides.host_port(), Some(("localhost", "15000")));

        overrides.set_host("feed.example.com").unwrap();
        assert_eq!(overrides.host_port(), Some(("feed.example.com", "14002")));
    }

    #[test]
    fn test_bad_host_keeps_previous_values() {
        let mut overrides = ConnectionOverrides::default();
        overrides.set_host("alpha:1").unwrap();
        assert!(overrides.set_host("alpha:1:2").is_err());
        assert_eq!(overrides.host_port(), Some(("alpha", "1")));
    }

    #[test]
    fn test_pin_channel_forces_socket() {
        let mut overrides = ConnectionOverrides::default();
        let mut channel =
            ChannelConfig::new("Channel_1").with_connection_type(ConnectionType::Encrypted);

        overrides.pin_channel(&mut channel);
        assert_eq!(channel.connection_type, ConnectionType::Encrypted);

        overrides.set_host("10.0.0.1:14003").unwrap();
        overrides.pin_channel(&mut channel);
        assert_eq!(channel.host, "10.0.0.1");
        assert_eq!(channel.port, "14003");
        assert_eq!(channel.connection_type, ConnectionType::Socket);
    }

    #[test]
    fn test_apply_proxy_only_touches_set_values() {
        let overrides = ConnectionOverrides {
            proxy_host: Some("proxy.local".to_string()),
            ..ConnectionOverrides::default()
        };
        let mut channel = ChannelConfig::new("Channel_1").with_proxy("old", "3128");
        overrides.apply_proxy(&mut channel);
        assert_eq!(channel.proxy_host, "proxy.local");
        assert_eq!(channel.proxy_port, "3128");
        assert!(overrides.has_proxy());
    }
}
