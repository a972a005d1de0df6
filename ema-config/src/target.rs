/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! The parse target shared by both configuration parsers.
//!
//! [`ConfigTarget`] owns one name-keyed registry per record kind, the
//! default and first-configured names of each role list, and the
//! non-fatal diagnostics collected while parsing. XML input is applied
//! first, programmatic input second, both mutating the same target.

use crate::channel::ChannelConfig;
use crate::consumer::ConsumerConfig;
use crate::dictionary::DictionaryConfig;
use crate::directory::DirectoryConfig;
use crate::logger::LoggerConfig;
use crate::provider::{IProviderConfig, NiProviderConfig};
use crate::record::ConfigRecord;
use crate::server::ServerConfig;
use crate::session_channel::SessionChannelConfig;
use crate::tag::GroupTag;
use ema_core::{ConfigErrorLog, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name-keyed records in configuration order.
pub type Registry<R> = IndexMap<String, R>;

/// Returns the named record, inserting a defaulted one when absent.
///
/// # Arguments
/// * `registry` - The registry to search
/// * `name` - The record name
pub fn record_entry<'a, R: ConfigRecord>(registry: &'a mut Registry<R>, name: &str) -> &'a mut R {
    registry
        .entry(name.to_string())
        .or_insert_with(|| R::named(name))
}

/// The session role a configuration is parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigRole {
    /// An OMM consumer.
    Consumer,
    /// A non-interactive provider.
    NiProvider,
    /// An interactive provider.
    IProvider,
}

impl ConfigRole {
    /// Returns the groups this role reads.
    #[must_use]
    pub const fn groups(&self) -> &'static [GroupTag] {
        match self {
            Self::Consumer => &[
                GroupTag::ConsumerGroup,
                GroupTag::ChannelGroup,
                GroupTag::LoggerGroup,
                GroupTag::DictionaryGroup,
                GroupTag::SessionChannelGroup,
            ],
            Self::NiProvider => &[
                GroupTag::NiProviderGroup,
                GroupTag::ChannelGroup,
                GroupTag::LoggerGroup,
                GroupTag::DictionaryGroup,
                GroupTag::DirectoryGroup,
            ],
            Self::IProvider => &[
                GroupTag::IProviderGroup,
                GroupTag::ServerGroup,
                GroupTag::LoggerGroup,
                GroupTag::DictionaryGroup,
                GroupTag::DirectoryGroup,
            ],
        }
    }

    /// Returns true if this role reads `group`.
    #[must_use]
    pub fn accepts(&self, group: GroupTag) -> bool {
        self.groups().contains(&group)
    }

    /// Returns the role's item label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Consumer => "Consumer",
            Self::NiProvider => "NiProvider",
            Self::IProvider => "IProvider",
        }
    }
}

impl fmt::Display for ConfigRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How `Channel` and `ChannelSet` elements of one item interact.
///
/// Both elements always replace the whole set. They differ only when an
/// item carries both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelSetPrecedence {
    /// A `ChannelSet` element decides the set regardless of position; any
    /// `Channel` element in the same item is ignored.
    #[default]
    ChannelSetWins,
    /// Elements apply in document order and the last one wins.
    Legacy,
}

impl ChannelSetPrecedence {
    /// Returns true if `element` must be skipped for an item.
    ///
    /// # Arguments
    /// * `element` - The element name
    /// * `item_has_channel_set` - Whether the item carries a `ChannelSet`
    #[must_use]
    pub fn skip_element(self, element: &str, item_has_channel_set: bool) -> bool {
        self == Self::ChannelSetWins && item_has_channel_set && element == "Channel"
    }
}

/// Everything both parsers populate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigTarget {
    /// Role being configured.
    pub role: ConfigRole,
    /// Channel / ChannelSet resolution.
    pub channel_set_precedence: ChannelSetPrecedence,
    pub consumers: Registry<ConsumerConfig>,
    pub ni_providers: Registry<NiProviderConfig>,
    pub iproviders: Registry<IProviderConfig>,
    pub channels: Registry<ChannelConfig>,
    pub servers: Registry<ServerConfig>,
    pub loggers: Registry<LoggerConfig>,
    pub dictionaries: Registry<DictionaryConfig>,
    pub directories: Registry<DirectoryConfig>,
    pub session_channels: Registry<SessionChannelConfig>,
    pub default_consumer: Option<String>,
    pub default_ni_provider: Option<String>,
    pub default_iprovider: Option<String>,
    pub default_directory: Option<String>,
    pub first_configured_consumer: Option<String>,
    pub first_configured_ni_provider: Option<String>,
    pub first_configured_iprovider: Option<String>,
    pub first_configured_directory: Option<String>,
    /// Non-fatal diagnostics in the order they were raised.
    pub error_log: ConfigErrorLog,
}

impl ConfigTarget {
    /// Creates an empty target for a role.
    #[must_use]
    pub fn new(role: ConfigRole) -> Self {
        Self {
            role,
            channel_set_precedence: ChannelSetPrecedence::default(),
            consumers: Registry::new(),
            ni_providers: Registry::new(),
            iproviders: Registry::new(),
            channels: Registry::new(),
            servers: Registry::new(),
            loggers: Registry::new(),
            dictionaries: Registry::new(),
            directories: Registry::new(),
            session_channels: Registry::new(),
            default_consumer: None,
            default_ni_provider: None,
            default_iprovider: None,
            default_directory: None,
            first_configured_consumer: None,
            first_configured_ni_provider: None,
            first_configured_iprovider: None,
            first_configured_directory: None,
            error_log: ConfigErrorLog::new(),
        }
    }

    /// Sets the Channel / ChannelSet resolution.
    #[must_use]
    pub const fn with_channel_set_precedence(mut self, precedence: ChannelSetPrecedence) -> Self {
        self.channel_set_precedence = precedence;
        self
    }

    /// Returns the default name slot of the role list group.
    ///
    /// `None` for groups without a default.
    pub fn default_slot(&mut self, group: GroupTag) -> Option<&mut Option<String>> {
        match group {
            GroupTag::ConsumerGroup => Some(&mut self.default_consumer),
            GroupTag::NiProviderGroup => Some(&mut self.default_ni_provider),
            GroupTag::IProviderGroup => Some(&mut self.default_iprovider),
            GroupTag::DirectoryGroup => Some(&mut self.default_directory),
            _ => None,
        }
    }

    /// Returns the first-configured name slot of the role list group.
    ///
    /// `None` for groups that do not track one.
    pub fn first_configured_slot(&mut self, group: GroupTag) -> Option<&mut Option<String>> {
        match group {
            GroupTag::ConsumerGroup => Some(&mut self.first_configured_consumer),
            GroupTag::NiProviderGroup => Some(&mut self.first_configured_ni_provider),
            GroupTag::IProviderGroup => Some(&mut self.first_configured_iprovider),
            GroupTag::DirectoryGroup => Some(&mut self.first_configured_directory),
            _ => None,
        }
    }

    /// Remembers `name` as first configured for `group` unless one is set.
    pub fn note_configured(&mut self, group: GroupTag, name: &str) {
        if let Some(slot) = self.first_configured_slot(group)
            && slot.is_none()
        {
            *slot = Some(name.to_string());
        }
    }

    /// Settles service ids in every directory.
    ///
    /// # Errors
    /// Returns the first id conflict or exhaustion found.
    pub fn finalize_directories(&mut self) -> Result<()> {
        for directory in self.directories.values_mut() {
            directory.finalize_service_ids()?;
        }
        Ok(())
    }

    /// Drops every record, name and diagnostic, keeping role and precedence.
    pub fn clear(&mut self) {
        *self = Self::new(self.role).with_channel_set_precedence(self.channel_set_precedence);
    }
}
