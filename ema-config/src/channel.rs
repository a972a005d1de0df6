/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Client channel (outbound connection) configuration.
//!
//! A channel is referenced from consumer, provider and session-channel
//! records by name. The name doubles as the channel's [`ChannelId`], which
//! downstream connection code uses to find the record again.

use crate::record::ConfigRecord;
use crate::tag::ChannelTag;
use crate::value::{ElementValue, ping_timeout_secs, saturate_u32, split_list};
use ema_core::enums::{TLS_ALL, security_protocol_from_u64};
use ema_core::host_port::{DEFAULT_HOST, DEFAULT_PORT};
use ema_core::{CompressionType, ConnectionType, EncryptedProtocolType, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Ordered list of channel names tried in turn.
pub type ChannelSet = SmallVec<[String; 4]>;

/// Replaces the contents of `set` with the comma-separated names in `list`.
pub fn replace_with_list(set: &mut ChannelSet, list: &str) {
    set.clear();
    set.extend(split_list(list).map(str::to_string));
}

/// Replaces the contents of `set` with a single name.
pub fn replace_with_single(set: &mut ChannelSet, name: impl Into<String>) {
    set.clear();
    set.push(name.into());
}

/// Identifier of a channel record, resolved through a registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Creates an identifier from a channel name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the channel name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default ping timeout in seconds.
pub const DEFAULT_PING_TIMEOUT: u32 = 30;
/// Default compression threshold in bytes.
pub const DEFAULT_COMPRESSION_THRESHOLD: u32 = 30;
/// Default TLS handshake timeout in milliseconds.
pub const DEFAULT_AUTHENTICATION_TIMEOUT: u32 = 10_000;

/// Configuration of a single client channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel name.
    pub name: String,
    /// Transport type.
    pub connection_type: ConnectionType,
    /// Transport carried under TLS when encrypted.
    pub encrypted_protocol_type: EncryptedProtocolType,
    /// Ping timeout in seconds.
    pub connection_ping_timeout: u32,
    /// Whether the session management (cloud) features are enabled.
    pub enable_session_management: bool,
    /// Number of output buffers reserved for the channel.
    pub guaranteed_output_buffers: u32,
    /// Output queue size at which buffers are flushed.
    pub high_water_mark: u32,
    /// Local interface to bind.
    pub interface_name: String,
    /// Cloud location used for service discovery.
    pub location: String,
    /// Number of input buffers.
    pub num_input_buffers: u32,
    /// Service discovery retries before giving up.
    pub service_discovery_retry_count: u32,
    /// Socket receive buffer size, 0 for the system default.
    pub sys_recv_buf_size: u32,
    /// Socket send buffer size, 0 for the system default.
    pub sys_send_buf_size: u32,
    /// Minimum payload size that is compressed.
    pub compression_threshold: u32,
    /// Whether `compression_threshold` was configured explicitly.
    pub compression_threshold_set: bool,
    /// Requested compression.
    pub compression_type: CompressionType,
    /// Remote host.
    pub host: String,
    /// Remote port or service name.
    pub port: String,
    /// Proxy host.
    pub proxy_host: String,
    /// Proxy port.
    pub proxy_port: String,
    /// Whether Nagle's algorithm is disabled.
    pub tcp_nodelay: bool,
    /// Whether writes bypass the output queue.
    pub direct_write: bool,
    /// TLS handshake timeout in milliseconds.
    pub authentication_timeout: u32,
    /// Channel initialization timeout in seconds.
    pub initialization_timeout: u32,
    /// Allowed TLS protocol flags.
    pub security_protocol: u32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl ChannelConfig {
    /// Creates a channel with default settings.
    ///
    /// # Arguments
    /// * `name` - The channel name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connection_type: ConnectionType::Socket,
            encrypted_protocol_type: EncryptedProtocolType::Socket,
            connection_ping_timeout: DEFAULT_PING_TIMEOUT,
            enable_session_management: false,
            guaranteed_output_buffers: 100,
            high_water_mark: 0,
            interface_name: String::new(),
            location: "us-east-1".to_string(),
            num_input_buffers: 10,
            service_discovery_retry_count: 3,
            sys_recv_buf_size: 0,
            sys_send_buf_size: 0,
            compression_threshold: DEFAULT_COMPRESSION_THRESHOLD,
            compression_threshold_set: false,
            compression_type: CompressionType::None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
            proxy_host: String::new(),
            proxy_port: String::new(),
            tcp_nodelay: true,
            direct_write: false,
            authentication_timeout: DEFAULT_AUTHENTICATION_TIMEOUT,
            initialization_timeout: 5,
            security_protocol: TLS_ALL,
        }
    }

    /// Returns the identifier downstream code uses to look this channel up.
    #[must_use]
    pub fn id(&self) -> ChannelId {
        ChannelId::new(self.name.clone())
    }

    /// Sets the remote host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the remote port.
    #[must_use]
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    /// Sets the transport type.
    #[must_use]
    pub const fn with_connection_type(mut self, connection_type: ConnectionType) -> Self {
        self.connection_type = connection_type;
        self
    }

    /// Sets the compression type.
    #[must_use]
    pub const fn with_compression_type(mut self, compression_type: CompressionType) -> Self {
        self.compression_type = compression_type;
        self
    }

    /// Sets the proxy host and port.
    #[must_use]
    pub fn with_proxy(mut self, host: impl Into<String>, port: impl Into<String>) -> Self {
        self.proxy_host = host.into();
        self.proxy_port = port.into();
        self
    }
}

impl ConfigRecord for ChannelConfig {
    type Tag = ChannelTag;
    const KIND: &'static str = "Channel";

    fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tag(element: &str) -> Option<ChannelTag> {
        ChannelTag::from_name(element)
    }

    fn apply<V: ElementValue>(&mut self, tag: ChannelTag, value: &V) -> Result<()> {
        match tag {
            ChannelTag::ChannelType => self.connection_type = value.enumeration()?,
            ChannelTag::EncryptedProtocolType => {
                self.encrypted_protocol_type = value.enumeration()?;
            }
            ChannelTag::ConnectionPingTimeout => {
                self.connection_ping_timeout = ping_timeout_secs(value.uint()?);
            }
            ChannelTag::EnableSessionManagement => {
                self.enable_session_management = value.boolean()?;
            }
            ChannelTag::GuaranteedOutputBuffers => {
                self.guaranteed_output_buffers = saturate_u32(value.uint()?);
            }
            ChannelTag::HighWaterMark => self.high_water_mark = saturate_u32(value.uint()?),
            ChannelTag::InterfaceName => self.interface_name = value.ascii()?,
            ChannelTag::Location => self.location = value.ascii()?,
            ChannelTag::NumInputBuffers => self.num_input_buffers = saturate_u32(value.uint()?),
            ChannelTag::ServiceDiscoveryRetryCount => {
                self.service_discovery_retry_count = saturate_u32(value.uint()?);
            }
            ChannelTag::SysRecvBufSize => self.sys_recv_buf_size = saturate_u32(value.uint()?),
            ChannelTag::SysSendBufSize => self.sys_send_buf_size = saturate_u32(value.uint()?),
            ChannelTag::CompressionThreshold => {
                self.compression_threshold = saturate_u32(value.uint()?);
                self.compression_threshold_set = true;
            }
            ChannelTag::CompressionType => self.compression_type = value.enumeration()?,
            ChannelTag::Host => self.host = value.ascii()?,
            ChannelTag::Port => self.port = value.ascii()?,
            ChannelTag::ProxyHost => self.proxy_host = value.ascii()?,
            ChannelTag::ProxyPort => self.proxy_port = value.ascii()?,
            ChannelTag::TcpNodelay => self.tcp_nodelay = value.boolean()?,
            ChannelTag::DirectWrite => self.direct_write = value.boolean()?,
            ChannelTag::AuthenticationTimeout => {
                let timeout = saturate_u32(value.uint()?);
                if timeout > 0 {
                    self.authentication_timeout = timeout;
                }
            }
            ChannelTag::InitializationTimeout => {
                self.initialization_timeout = saturate_u32(value.uint()?);
            }
            ChannelTag::SecurityProtocol => {
                self.security_protocol = security_protocol_from_u64(value.uint()?)?;
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::new(name);
    }
}
