/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Server (interactive provider listen socket) configuration.

use crate::record::ConfigRecord;
use crate::tag::ServerTag;
use crate::value::{ElementValue, ping_timeout_secs, saturate_u32};
use ema_core::enums::{TLS_ALL, cipher_suites_from_str, security_protocol_from_u64};
use ema_core::host_port::DEFAULT_PORT;
use ema_core::{CompressionType, Result, ServerType};
use serde::{Deserialize, Serialize};

/// Configuration of a listening server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name.
    pub name: String,
    /// Transport type.
    pub server_type: ServerType,
    /// Lowest ping timeout a client may negotiate, in seconds.
    pub connection_min_ping_timeout: u32,
    /// Ping timeout offered to clients, in seconds.
    pub connection_ping_timeout: u32,
    /// Minimum payload size that is compressed.
    pub compression_threshold: u32,
    /// Whether `compression_threshold` was configured explicitly.
    pub compression_threshold_set: bool,
    /// Compression offered to clients.
    pub compression_type: CompressionType,
    /// Whether writes bypass the output queue.
    pub direct_write: bool,
    /// Output buffers reserved per client channel.
    pub guaranteed_output_buffers: u32,
    /// Output queue size at which buffers are flushed.
    pub high_water_mark: u32,
    /// Client channel initialization timeout in seconds.
    pub initialization_timeout: u32,
    /// TLS handshake timeout in milliseconds.
    pub authentication_timeout: u32,
    /// Local interface to bind.
    pub interface_name: String,
    /// Largest fragment sent in one buffer.
    pub max_fragment_size: u32,
    /// Number of input buffers.
    pub num_input_buffers: u32,
    /// Listen port or service name.
    pub port: String,
    /// Socket receive buffer size, 0 for the system default.
    pub sys_recv_buf_size: u32,
    /// Socket send buffer size, 0 for the system default.
    pub sys_send_buf_size: u32,
    /// Whether Nagle's algorithm is disabled.
    pub tcp_nodelay: bool,
    /// Path of the server certificate.
    pub server_cert: String,
    /// Path of the server private key.
    pub server_private_key: String,
    /// Allowed TLS protocol flags.
    pub security_protocol: u32,
    /// Allowed cipher suites; empty means the platform default.
    pub cipher_suites: Vec<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl ServerConfig {
    /// Creates a server with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server_type: ServerType::Socket,
            connection_min_ping_timeout: 20,
            connection_ping_timeout: 60,
            compression_threshold: 30,
            compression_threshold_set: false,
            compression_type: CompressionType::None,
            direct_write: false,
            guaranteed_output_buffers: 100,
            high_water_mark: 0,
            initialization_timeout: 5,
            authentication_timeout: 10_000,
            interface_name: String::new(),
            max_fragment_size: 6144,
            num_input_buffers: 10,
            port: DEFAULT_PORT.to_string(),
            sys_recv_buf_size: 0,
            sys_send_buf_size: 0,
            tcp_nodelay: true,
            server_cert: String::new(),
            server_private_key: String::new(),
            security_protocol: TLS_ALL,
            cipher_suites: Vec::new(),
        }
    }

    /// Sets the listen port.
    #[must_use]
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }
}

impl ConfigRecord for ServerConfig {
    type Tag = ServerTag;
    const KIND: &'static str = "Server";

    fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tag(element: &str) -> Option<ServerTag> {
        ServerTag::from_name(element)
    }

    fn apply<V: ElementValue>(&mut self, tag: ServerTag, value: &V) -> Result<()> {
        match tag {
            ServerTag::ServerType => self.server_type = value.enumeration()?,
            ServerTag::ConnectionMinPingTimeout => {
                self.connection_min_ping_timeout = ping_timeout_secs(value.uint()?);
            }
            ServerTag::ConnectionPingTimeout => {
                self.connection_ping_timeout = ping_timeout_secs(value.uint()?);
            }
            ServerTag::CompressionThreshold => {
                self.compression_threshold = saturate_u32(value.uint()?);
                self.compression_threshold_set = true;
            }
            ServerTag::CompressionType => self.compression_type = value.enumeration()?,
            ServerTag::DirectWrite => self.direct_write = value.boolean()?,
            ServerTag::GuaranteedOutputBuffers => {
                self.guaranteed_output_buffers = saturate_u32(value.uint()?);
            }
            ServerTag::HighWaterMark => self.high_water_mark = saturate_u32(value.uint()?),
            ServerTag::InitializationTimeout => {
                self.initialization_timeout = saturate_u32(value.uint()?);
            }
            ServerTag::AuthenticationTimeout => {
                self.authentication_timeout = saturate_u32(value.uint()?);
            }
            ServerTag::InterfaceName => self.interface_name = value.ascii()?,
            ServerTag::MaxFragmentSize => self.max_fragment_size = saturate_u32(value.uint()?),
            ServerTag::NumInputBuffers => self.num_input_buffers = saturate_u32(value.uint()?),
            ServerTag::Port => self.port = value.ascii()?,
            ServerTag::SysRecvBufSize => self.sys_recv_buf_size = saturate_u32(value.uint()?),
            ServerTag::SysSendBufSize => self.sys_send_buf_size = saturate_u32(value.uint()?),
            ServerTag::TcpNodelay => self.tcp_nodelay = value.boolean()?,
            ServerTag::ServerCert => self.server_cert = value.ascii()?,
            ServerTag::ServerPrivateKey => self.server_private_key = value.ascii()?,
            ServerTag::SecurityProtocol => {
                self.security_protocol = security_protocol_from_u64(value.uint()?)?;
            }
            ServerTag::CipherSuite => self.cipher_suites = cipher_suites_from_str(&value.ascii()?)?,
        }
        Ok(())
    }

    fn clear(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::new(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::testing::{number, text};

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::new("Server_1");
        assert_eq!(server.port, "14002");
        assert_eq!(server.connection_min_ping_timeout, 20);
        assert_eq!(server.max_fragment_size, 6144);
        assert!(server.cipher_suites.is_empty());
    }

    #[test]
    fn test_apply_server_elements() {
        let mut server = ServerConfig::new("Server_1");
        server
            .apply(ServerTag::ServerType, &text("ServerType", "ServerType::RSSL_ENCRYPTED"))
            .unwrap();
        server
            .apply(ServerTag::ConnectionMinPingTimeout, &number("ConnectionMinPingTimeout", 10_000))
            .unwrap();
        server
            .apply(
                ServerTag::CipherSuite,
                &text("CipherSuite", "TLS_AES_256_GCM_SHA384, 4865"),
            )
            .unwrap();
        server.apply(ServerTag::Port, &text("Port", "15000")).unwrap();

        assert_eq!(server.server_type, ServerType::Encrypted);
        assert_eq!(server.connection_min_ping_timeout, 10);
        assert_eq!(server.cipher_suites, vec![0x1302, 0x1301]);
        assert_eq!(server.port, "15000");
    }

    #[test]
    fn test_cipher_suite_replaces_previous_list() {
        let mut server = ServerConfig::new("S");
        server
            .apply(ServerTag::CipherSuite, &text("CipherSuite", "4865"))
            .unwrap();
        server
            .apply(ServerTag::CipherSuite, &text("CipherSuite", "4866"))
            .unwrap();
        assert_eq!(server.cipher_suites, vec![4866]);

        let err = server
            .apply(ServerTag::CipherSuite, &text("CipherSuite", "BOGUS_SUITE"))
            .unwrap_err();
        assert!(err.is_invalid_configuration());
        assert_eq!(server.cipher_suites, vec![4866]);
    }

    #[test]
    fn test_clear_and_copy() {
        let mut server = ServerConfig::new("S").with_port("1");
        server.cipher_suites.push(4865);
        let mut copy = ServerConfig::default();
        server.copy_to(&mut copy);
        server.cipher_suites.clear();
        assert_eq!(copy.cipher_suites, vec![4865]);

        copy.clear();
        assert_eq!(copy, ServerConfig::new("S"));
    }
}
