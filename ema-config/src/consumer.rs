/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Consumer session configuration.
//!
//! A consumer names the channels it connects through, the logger and
//! dictionary it uses, and a set of request, dispatch and reconnection
//! tuning parameters.

use crate::channel::{ChannelSet, replace_with_list, replace_with_single};
use crate::record::ConfigRecord;
use crate::tag::ConsumerTag;
use crate::trace::XmlTraceConfig;
use crate::value::{ElementValue, clamp_i32, saturate_u32};
use ema_core::Result;
use serde::{Deserialize, Serialize};

/// Item count hint used when zero is configured.
pub const ZERO_ITEM_COUNT_HINT: u32 = 1024;
/// Service count hint, also used when zero is configured.
pub const DEFAULT_SERVICE_COUNT_HINT: u32 = 513;

/// Configuration of a named consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// Consumer name.
    pub name: String,
    /// Channels tried in order.
    pub channel_set: ChannelSet,
    /// Session channels for multi-connection mode.
    pub session_channel_set: ChannelSet,
    /// Dictionary name.
    pub dictionary: String,
    /// Logger name.
    pub logger: String,
    /// Dictionary request timeout in milliseconds.
    pub dictionary_request_timeout: u32,
    /// Directory request timeout in milliseconds.
    pub directory_request_timeout: u32,
    /// Login request timeout in milliseconds.
    pub login_request_timeout: u32,
    /// API thread dispatch timeout in microseconds; -1 blocks.
    pub dispatch_timeout_api_thread: i32,
    /// Whether round-trip latency monitoring is enabled.
    pub enable_rtt: bool,
    /// Expected number of items.
    pub item_count_hint: u32,
    /// Messages dispatched per API thread cycle.
    pub max_dispatch_count_api_thread: u32,
    /// Messages dispatched per user dispatch call.
    pub max_dispatch_count_user_thread: u32,
    /// Outstanding posts awaiting acknowledgement.
    pub max_outstanding_posts: u32,
    /// Whether updates carry the message key.
    pub msg_key_in_updates: bool,
    /// Whether the provider open window is respected.
    pub obey_open_window: bool,
    /// Post acknowledgement timeout in milliseconds.
    pub post_ack_timeout: u32,
    /// Reconnection attempts before giving up; -1 retries forever.
    pub reconnect_attempt_limit: i32,
    /// Longest delay between attempts in milliseconds.
    pub reconnect_max_delay: i32,
    /// Shortest delay between attempts in milliseconds.
    pub reconnect_min_delay: i32,
    /// Item request timeout in milliseconds.
    pub request_timeout: u32,
    /// Expected number of services.
    pub service_count_hint: u32,
    /// REST interaction log file.
    pub rest_log_file_name: String,
    /// REST request timeout in milliseconds.
    pub rest_request_timeout: u32,
    /// Proxy host used for REST requests.
    pub rest_proxy_host_name: String,
    /// Proxy port used for REST requests.
    pub rest_proxy_port: String,
    /// Whether REST interactions are logged.
    pub rest_enable_log: bool,
    /// Whether REST interactions are reported through a callback.
    pub rest_enable_log_via_callback: bool,
    /// Whether item recovery is enhanced in session mode.
    pub session_enhanced_item_recovery: bool,
    /// Message tracing.
    pub xml_trace: XmlTraceConfig,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl ConsumerConfig {
    /// Creates a consumer with default settings.
    ///
    /// # Arguments
    /// * `name` - The consumer name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channel_set: ChannelSet::new(),
            session_channel_set: ChannelSet::new(),
            dictionary: String::new(),
            logger: String::new(),
            dictionary_request_timeout: 45_000,
            directory_request_timeout: 45_000,
            login_request_timeout: 45_000,
            dispatch_timeout_api_thread: -1,
            enable_rtt: false,
            item_count_hint: 100_000,
            max_dispatch_count_api_thread: 100,
            max_dispatch_count_user_thread: 100,
            max_outstanding_posts: 100_000,
            msg_key_in_updates: true,
            obey_open_window: true,
            post_ack_timeout: 15_000,
            reconnect_attempt_limit: -1,
            reconnect_max_delay: 5000,
            reconnect_min_delay: 1000,
            request_timeout: 15_000,
            service_count_hint: DEFAULT_SERVICE_COUNT_HINT,
            rest_log_file_name: String::new(),
            rest_request_timeout: 15_000,
            rest_proxy_host_name: String::new(),
            rest_proxy_port: String::new(),
            rest_enable_log: false,
            rest_enable_log_via_callback: false,
            session_enhanced_item_recovery: true,
            xml_trace: XmlTraceConfig::default(),
        }
    }

    /// Sets the channel set from a comma-separated list.
    #[must_use]
    pub fn with_channel_set(mut self, channels: &str) -> Self {
        replace_with_list(&mut self.channel_set, channels);
        self
    }

    /// Sets the logger name.
    #[must_use]
    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = logger.into();
        self
    }

    /// Sets the dictionary name.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: impl Into<String>) -> Self {
        self.dictionary = dictionary.into();
        self
    }
}

impl ConfigRecord for ConsumerConfig {
    type Tag = ConsumerTag;
    const KIND: &'static str = "Consumer";

    fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tag(element: &str) -> Option<ConsumerTag> {
        ConsumerTag::from_name(element)
    }

    fn apply<V: ElementValue>(&mut self, tag: ConsumerTag, value: &V) -> Result<()> {
        match tag {
            ConsumerTag::Channel => replace_with_single(&mut self.channel_set, value.ascii()?),
            ConsumerTag::ChannelSet => replace_with_list(&mut self.channel_set, &value.ascii()?),
            ConsumerTag::SessionChannelSet => {
                replace_with_list(&mut self.session_channel_set, &value.ascii()?);
            }
            ConsumerTag::Dictionary => self.dictionary = value.ascii()?,
            ConsumerTag::Logger => self.logger = value.ascii()?,
            ConsumerTag::DictionaryRequestTimeOut => {
                self.dictionary_request_timeout = saturate_u32(value.uint()?);
            }
            ConsumerTag::DirectoryRequestTimeOut => {
                self.directory_request_timeout = saturate_u32(value.uint()?);
            }
            ConsumerTag::LoginRequestTimeOut => {
                self.login_request_timeout = saturate_u32(value.uint()?);
            }
            ConsumerTag::DispatchTimeoutApiThread => {
                self.dispatch_timeout_api_thread = clamp_i32(value.int()?);
            }
            ConsumerTag::EnableRtt => self.enable_rtt = value.boolean()?,
            ConsumerTag::ItemCountHint => {
                self.item_count_hint = match saturate_u32(value.uint()?) {
                    0 => ZERO_ITEM_COUNT_HINT,
                    hint => hint,
                };
            }
            ConsumerTag::MaxDispatchCountApiThread => {
                self.max_dispatch_count_api_thread = saturate_u32(value.uint()?);
            }
            ConsumerTag::MaxDispatchCountUserThread => {
                self.max_dispatch_count_user_thread = saturate_u32(value.uint()?);
            }
            ConsumerTag::MaxOutstandingPosts => {
                self.max_outstanding_posts = saturate_u32(value.uint()?);
            }
            ConsumerTag::MsgKeyInUpdates => self.msg_key_in_updates = value.boolean()?,
            ConsumerTag::ObeyOpenWindow => self.obey_open_window = value.boolean()?,
            ConsumerTag::PostAckTimeout => self.post_ack_timeout = saturate_u32(value.uint()?),
            ConsumerTag::ReconnectAttemptLimit => {
                self.reconnect_attempt_limit = clamp_i32(value.int()?);
            }
            ConsumerTag::ReconnectMaxDelay => {
                let delay = clamp_i32(value.int()?);
                if delay > 0 {
                    self.reconnect_max_delay = delay;
                }
            }
            ConsumerTag::ReconnectMinDelay => {
                let delay = clamp_i32(value.int()?);
                if delay > 0 {
                    self.reconnect_min_delay = delay;
                }
            }
            ConsumerTag::RequestTimeout => {
                let timeout = saturate_u32(value.uint()?);
                if timeout > 0 {
                    self.request_timeout = timeout;
                }
            }
            ConsumerTag::ServiceCountHint => {
                self.service_count_hint = match saturate_u32(value.uint()?) {
                    0 => DEFAULT_SERVICE_COUNT_HINT,
                    hint => hint,
                };
            }
            ConsumerTag::RestLogFileName => self.rest_log_file_name = value.ascii()?,
            ConsumerTag::RestRequestTimeOut => {
                self.rest_request_timeout = saturate_u32(value.uint()?);
            }
            ConsumerTag::RestProxyHostName => self.rest_proxy_host_name = value.ascii()?,
            ConsumerTag::RestProxyPort => self.rest_proxy_port = value.ascii()?,
            ConsumerTag::RestEnableLog => self.rest_enable_log = value.boolean()?,
            ConsumerTag::RestEnableLogViaCallback => {
                self.rest_enable_log_via_callback = value.boolean()?;
            }
            ConsumerTag::SessionEnhancedItemRecovery => {
                self.session_enhanced_item_recovery = value.boolean()?;
            }
            ConsumerTag::XmlTrace(trace) => self.xml_trace.apply(trace, value)?,
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
    use crate::tag::XmlTraceTag;
    use crate::value::testing::{number, signed, text};

    fn populated() -> ConsumerConfig {
        let mut consumer = ConsumerConfig::new("Consumer_1")
            .with_channel_set("Channel_1, Channel_2")
            .with_logger("Logger_1")
            .with_dictionary("Dictionary_1");
        consumer.item_count_hint = 5000;
        consumer.xml_trace.to_file = true;
        consumer
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut consumer = populated();
        consumer.clear();
        let once = consumer.clone();
        consumer.clear();

        assert_eq!(consumer, once);
        assert_eq!(consumer, ConsumerConfig::new("Consumer_1"));
    }

    #[test]
    fn test_copy_to_is_deep() {
        let mut source = populated();
        let mut dest = ConsumerConfig::default();
        source.copy_to(&mut dest);
        assert_eq!(dest, source);

        source.channel_set.push("Channel_3".to_string());
        assert_eq!(dest.channel_set.len(), 2);

        dest.channel_set.clear();
        assert_eq!(source.channel_set.len(), 3);
    }

    #[test]
    fn test_hint_transforms() {
        let mut consumer = ConsumerConfig::new("C");
        consumer
            .apply(ConsumerTag::ItemCountHint, &number("ItemCountHint", 0))
            .unwrap();
        consumer
            .apply(ConsumerTag::ServiceCountHint, &number("ServiceCountHint", 0))
            .unwrap();
        assert_eq!(consumer.item_count_hint, 1024);
        assert_eq!(consumer.service_count_hint, 513);

        consumer
            .apply(ConsumerTag::ItemCountHint, &number("ItemCountHint", 5000))
            .unwrap();
        assert_eq!(consumer.item_count_hint, 5000);
    }

    #[test]
    fn test_non_positive_delays_are_ignored() {
        let mut consumer = ConsumerConfig::new("C");
        consumer
            .apply(ConsumerTag::ReconnectMinDelay, &signed("ReconnectMinDelay", 0))
            .unwrap();
        consumer
            .apply(ConsumerTag::ReconnectMaxDelay, &signed("ReconnectMaxDelay", -10))
            .unwrap();
        consumer
            .apply(ConsumerTag::RequestTimeout, &number("RequestTimeout", 0))
            .unwrap();
        assert_eq!(consumer.reconnect_min_delay, 1000);
        assert_eq!(consumer.reconnect_max_delay, 5000);
        assert_eq!(consumer.request_timeout, 15_000);

        consumer
            .apply(ConsumerTag::ReconnectMaxDelay, &signed("ReconnectMaxDelay", 8000))
            .unwrap();
        assert_eq!(consumer.reconnect_max_delay, 8000);
    }

    #[test]
    fn test_channel_elements() {
        let mut consumer = ConsumerConfig::new("C");
        consumer
            .apply(ConsumerTag::ChannelSet, &text("ChannelSet", "A, B"))
            .unwrap();
        consumer.apply(ConsumerTag::Channel, &text("Channel", "C")).unwrap();
        assert_eq!(consumer.channel_set.as_slice(), ["C"]);

        consumer
            .apply(ConsumerTag::SessionChannelSet, &text("SessionChannelSet", "S1,S2"))
            .unwrap();
        assert_eq!(consumer.session_channel_set.as_slice(), ["S1", "S2"]);
    }

    #[test]
    fn test_xml_trace_elements() {
        let mut consumer = ConsumerConfig::new("C");
        consumer
            .apply(
                ConsumerTag::XmlTrace(XmlTraceTag::ToStdout),
                &number("XmlTraceToStdout", 1),
            )
            .unwrap();
        consumer
            .apply(
                ConsumerTag::XmlTrace(XmlTraceTag::FileName),
                &text("XmlTraceFileName", "trace"),
            )
            .unwrap();
        assert!(consumer.xml_trace.to_stdout);
        assert_eq!(consumer.xml_trace.file_name, "trace");
    }

    #[test]
    fn test_failed_coercion_leaves_field_unchanged() {
        let mut consumer = ConsumerConfig::new("C");
        assert!(
            consumer
                .apply(ConsumerTag::ItemCountHint, &text("ItemCountHint", "abc"))
                .is_err()
        );
        assert_eq!(consumer.item_count_hint, 100_000);
    }
}
