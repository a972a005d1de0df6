/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Provider session configuration.
//!
//! Non-interactive providers publish through client channels, interactive
//! providers accept connections on a server. Both name the source directory
//! they publish and the logger they use.

use crate::channel::{ChannelSet, replace_with_list, replace_with_single};
use crate::consumer::{DEFAULT_SERVICE_COUNT_HINT, ZERO_ITEM_COUNT_HINT};
use crate::record::ConfigRecord;
use crate::tag::{IProviderTag, NiProviderTag};
use crate::trace::XmlTraceConfig;
use crate::value::{ElementValue, clamp_i32, saturate_u32};
use ema_core::Result;
use serde::{Deserialize, Serialize};

fn count_hint(value: u64, zero: u32) -> u32 {
    match saturate_u32(value) {
        0 => zero,
        hint => hint,
    }
}

/// Configuration of a named non-interactive provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiProviderConfig {
    /// Provider name.
    pub name: String,
    /// Channels tried in order.
    pub channel_set: ChannelSet,
    /// Source directory name.
    pub directory: String,
    /// Logger name.
    pub logger: String,
    /// API thread dispatch timeout in microseconds; -1 blocks.
    pub dispatch_timeout_api_thread: i32,
    /// Expected number of items.
    pub item_count_hint: u32,
    /// Login request timeout in milliseconds.
    pub login_request_timeout: u32,
    /// Messages dispatched per API thread cycle.
    pub max_dispatch_count_api_thread: u32,
    /// Messages dispatched per user dispatch call.
    pub max_dispatch_count_user_thread: u32,
    /// Event pool size; -1 is unbounded.
    pub max_events_in_pool: i32,
    /// Whether source directory streams are merged.
    pub merge_source_directory_streams: bool,
    /// Reconnection attempts before giving up; -1 retries forever.
    pub reconnect_attempt_limit: i32,
    /// Longest delay between attempts in milliseconds.
    pub reconnect_max_delay: i32,
    /// Shortest delay between attempts in milliseconds.
    pub reconnect_min_delay: i32,
    /// Whether a user-submitted directory is resent after reconnection.
    pub recover_user_submit_source_directory: bool,
    /// Whether a refresh must precede updates.
    pub refresh_first_required: bool,
    /// Whether published items are dropped on disconnect.
    pub remove_items_on_disconnect: bool,
    /// Request timeout in milliseconds.
    pub request_timeout: u32,
    /// Expected number of services.
    pub service_count_hint: u32,
    /// Message tracing.
    pub xml_trace: XmlTraceConfig,
}

impl Default for NiProviderConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl NiProviderConfig {
    /// Creates a non-interactive provider with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channel_set: ChannelSet::new(),
            directory: String::new(),
            logger: String::new(),
            dispatch_timeout_api_thread: -1,
            item_count_hint: 100_000,
            login_request_timeout: 45_000,
            max_dispatch_count_api_thread: 100,
            max_dispatch_count_user_thread: 100,
            max_events_in_pool: -1,
            merge_source_directory_streams: true,
            reconnect_attempt_limit: -1,
            reconnect_max_delay: 5000,
            reconnect_min_delay: 1000,
            recover_user_submit_source_directory: true,
            refresh_first_required: true,
            remove_items_on_disconnect: false,
            request_timeout: 15_000,
            service_count_hint: DEFAULT_SERVICE_COUNT_HINT,
            xml_trace: XmlTraceConfig::default(),
        }
    }

    /// Sets the channel set from a comma-separated list.
    #[must_use]
    pub fn with_channel_set(mut self, channels: &str) -> Self {
        replace_with_list(&mut self.channel_set, channels);
        self
    }

    /// Sets the source directory name.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }
}

impl ConfigRecord for NiProviderConfig {
    type Tag = NiProviderTag;
    const KIND: &'static str = "NiProvider";

    fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tag(element: &str) -> Option<NiProviderTag> {
        NiProviderTag::from_name(element)
    }

    fn apply<V: ElementValue>(&mut self, tag: NiProviderTag, value: &V) -> Result<()> {
        match tag {
            NiProviderTag::Channel => replace_with_single(&mut self.channel_set, value.ascii()?),
            NiProviderTag::ChannelSet => replace_with_list(&mut self.channel_set, &value.ascii()?),
            NiProviderTag::Directory => self.directory = value.ascii()?,
            NiProviderTag::Logger => self.logger = value.ascii()?,
            NiProviderTag::DispatchTimeoutApiThread => {
                self.dispatch_timeout_api_thread = clamp_i32(value.int()?);
            }
            NiProviderTag::ItemCountHint => {
                self.item_count_hint = count_hint(value.uint()?, ZERO_ITEM_COUNT_HINT);
            }
            NiProviderTag::LoginRequestTimeOut => {
                self.login_request_timeout = saturate_u32(value.uint()?);
            }
            NiProviderTag::MaxDispatchCountApiThread => {
                self.max_dispatch_count_api_thread = saturate_u32(value.uint()?);
            }
            NiProviderTag::MaxDispatchCountUserThread => {
                self.max_dispatch_count_user_thread = saturate_u32(value.uint()?);
            }
            NiProviderTag::MaxEventsInPool => self.max_events_in_pool = clamp_i32(value.int()?),
            NiProviderTag::MergeSourceDirectoryStreams => {
                self.merge_source_directory_streams = value.boolean()?;
            }
            NiProviderTag::ReconnectAttemptLimit => {
                self.reconnect_attempt_limit = clamp_i32(value.int()?);
            }
            NiProviderTag::ReconnectMaxDelay => {
                let delay = clamp_i32(value.int()?);
                if delay > 0 {
                    self.reconnect_max_delay = delay;
                }
            }
            NiProviderTag::ReconnectMinDelay => {
                let delay = clamp_i32(value.int()?);
                if delay > 0 {
                    self.reconnect_min_delay = delay;
                }
            }
            NiProviderTag::RecoverUserSubmitSourceDirectory => {
                self.recover_user_submit_source_directory = value.boolean()?;
            }
            NiProviderTag::RefreshFirstRequired => self.refresh_first_required = value.boolean()?,
            NiProviderTag::RemoveItemsOnDisconnect => {
                self.remove_items_on_disconnect = value.boolean()?;
            }
            NiProviderTag::RequestTimeout => self.request_timeout = saturate_u32(value.uint()?),
            NiProviderTag::ServiceCountHint => {
                self.service_count_hint = count_hint(value.uint()?, DEFAULT_SERVICE_COUNT_HINT);
            }
            NiProviderTag::XmlTrace(trace) => self.xml_trace.apply(trace, value)?,
        }
        Ok(())
    }

    fn clear(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::new(name);
    }
}

/// Default enumeration dictionary fragment size.
pub const DEFAULT_ENUM_TYPE_FRAGMENT_SIZE: u32 = 128_000;
/// Default field dictionary fragment size.
pub const DEFAULT_FIELD_DICTIONARY_FRAGMENT_SIZE: u32 = 8192;

/// Configuration of a named interactive provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IProviderConfig {
    /// Provider name.
    pub name: String,
    /// Server name.
    pub server: String,
    /// Source directory name.
    pub directory: String,
    /// Logger name.
    pub logger: String,
    /// API thread dispatch timeout in microseconds; -1 blocks.
    pub dispatch_timeout_api_thread: i32,
    /// Expected number of items.
    pub item_count_hint: u32,
    /// Messages dispatched per API thread cycle.
    pub max_dispatch_count_api_thread: u32,
    /// Messages dispatched per user dispatch call.
    pub max_dispatch_count_user_thread: u32,
    /// Event pool size; -1 is unbounded.
    pub max_events_in_pool: i32,
    /// Whether a refresh must precede updates.
    pub refresh_first_required: bool,
    /// Request timeout in milliseconds.
    pub request_timeout: u32,
    /// Expected number of services.
    pub service_count_hint: u32,
    pub accept_dir_message_without_min_filters: bool,
    pub accept_message_same_key_but_diff_stream: bool,
    pub accept_message_that_changes_service: bool,
    pub accept_message_without_accepting_requests: bool,
    pub accept_message_without_being_login: bool,
    pub accept_message_without_qos_in_range: bool,
    /// Whether post ack ids are validated.
    pub enforce_ack_id_validation: bool,
    /// Fragment size used when sending the enumeration dictionary.
    pub enum_type_fragment_size: u32,
    /// Fragment size used when sending the field dictionary.
    pub field_dictionary_fragment_size: u32,
    /// Message tracing.
    pub xml_trace: XmlTraceConfig,
}

impl Default for IProviderConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl IProviderConfig {
    /// Creates an interactive provider with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: String::new(),
            directory: String::new(),
            logger: String::new(),
            dispatch_timeout_api_thread: -1,
            item_count_hint: 100_000,
            max_dispatch_count_api_thread: 100,
            max_dispatch_count_user_thread: 100,
            max_events_in_pool: -1,
            refresh_first_required: true,
            request_timeout: 15_000,
            service_count_hint: DEFAULT_SERVICE_COUNT_HINT,
            accept_dir_message_without_min_filters: false,
            accept_message_same_key_but_diff_stream: false,
            accept_message_that_changes_service: false,
            accept_message_without_accepting_requests: false,
            accept_message_without_being_login: false,
            accept_message_without_qos_in_range: false,
            enforce_ack_id_validation: false,
            enum_type_fragment_size: DEFAULT_ENUM_TYPE_FRAGMENT_SIZE,
            field_dictionary_fragment_size: DEFAULT_FIELD_DICTIONARY_FRAGMENT_SIZE,
            xml_trace: XmlTraceConfig::default(),
        }
    }

    /// Sets the server name.
    #[must_use]
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Sets the source directory name.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }
}

impl ConfigRecord for IProviderConfig {
    type Tag = IProviderTag;
    const KIND: &'static str = "IProvider";

    fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tag(element: &str) -> Option<IProviderTag> {
        IProviderTag::from_name(element)
    }

    fn apply<V: ElementValue>(&mut self, tag: IProviderTag, value: &V) -> Result<()> {
        match tag {
            IProviderTag::Server => self.server = value.ascii()?,
            IProviderTag::Directory => self.directory = value.ascii()?,
            IProviderTag::Logger => self.logger = value.ascii()?,
            IProviderTag::DispatchTimeoutApiThread => {
                self.dispatch_timeout_api_thread = clamp_i32(value.int()?);
            }
            IProviderTag::ItemCountHint => {
                self.item_count_hint = count_hint(value.uint()?, ZERO_ITEM_COUNT_HINT);
            }
            IProviderTag::MaxDispatchCountApiThread => {
                self.max_dispatch_count_api_thread = saturate_u32(value.uint()?);
            }
            IProviderTag::MaxDispatchCountUserThread => {
                self.max_dispatch_count_user_thread = saturate_u32(value.uint()?);
            }
            IProviderTag::MaxEventsInPool => self.max_events_in_pool = clamp_i32(value.int()?),
            IProviderTag::RefreshFirstRequired => self.refresh_first_required = value.boolean()?,
            IProviderTag::RequestTimeout => self.request_timeout = saturate_u32(value.uint()?),
            IProviderTag::ServiceCountHint => {
                self.service_count_hint = count_hint(value.uint()?, DEFAULT_SERVICE_COUNT_HINT);
            }
            IProviderTag::AcceptDirMessageWithoutMinFilters => {
                self.accept_dir_message_without_min_filters = value.boolean()?;
            }
            IProviderTag::AcceptMessageSameKeyButDiffStream => {
                self.accept_message_same_key_but_diff_stream = value.boolean()?;
            }
            IProviderTag::AcceptMessageThatChangesService => {
                self.accept_message_that_changes_service = value.boolean()?;
            }
            IProviderTag::AcceptMessageWithoutAcceptingRequests => {
                self.accept_message_without_accepting_requests = value.boolean()?;
            }
            IProviderTag::AcceptMessageWithoutBeingLogin => {
                self.accept_message_without_being_login = value.boolean()?;
            }
            IProviderTag::AcceptMessageWithoutQosInRange => {
                self.accept_message_without_qos_in_range = value.boolean()?;
            }
            IProviderTag::EnforceAckIdValidation => {
                self.enforce_ack_id_validation = value.boolean()?;
            }
            IProviderTag::EnumTypeFragmentSize => {
                self.enum_type_fragment_size = saturate_u32(value.uint()?);
            }
            IProviderTag::FieldDictionaryFragmentSize => {
                self.field_dictionary_fragment_size = saturate_u32(value.uint()?);
            }
            IProviderTag::XmlTrace(trace) => self.xml_trace.apply(trace, value)?,
        }
        Ok(())
    }

    fn clear(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::new(name);
    }
}
