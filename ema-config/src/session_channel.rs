/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session channel configuration for multi-connection consumers.
//!
//! A session channel groups a channel set under its own reconnection policy.
//! The reconnect fields carry an is-set flag so that an unset value can
//! inherit the consumer-level setting when the session is built.

use crate::channel::{ChannelSet, replace_with_list, replace_with_single};
use crate::record::ConfigRecord;
use crate::tag::SessionChannelTag;
use crate::value::{ElementValue, clamp_i32};
use ema_core::Result;
use serde::{Deserialize, Serialize};

/// Configuration of one session channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionChannelConfig {
    /// Session channel name.
    pub name: String,
    /// Channels tried in order.
    pub channel_set: ChannelSet,
    /// Reconnection attempts before giving up; -1 retries forever.
    pub reconnect_attempt_limit: i32,
    /// Whether `reconnect_attempt_limit` was configured.
    pub reconnect_attempt_limit_set: bool,
    /// Longest delay between attempts in milliseconds.
    pub reconnect_max_delay: i32,
    /// Whether `reconnect_max_delay` was configured.
    pub reconnect_max_delay_set: bool,
    /// Shortest delay between attempts in milliseconds.
    pub reconnect_min_delay: i32,
    /// Whether `reconnect_min_delay` was configured.
    pub reconnect_min_delay_set: bool,
}

impl Default for SessionChannelConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl SessionChannelConfig {
    /// Creates a session channel with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channel_set: ChannelSet::new(),
            reconnect_attempt_limit: -1,
            reconnect_attempt_limit_set: false,
            reconnect_max_delay: 5000,
            reconnect_max_delay_set: false,
            reconnect_min_delay: 1000,
            reconnect_min_delay_set: false,
        }
    }
}

impl ConfigRecord for SessionChannelConfig {
    type Tag = SessionChannelTag;
    const KIND: &'static str = "SessionChannel";

    fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tag(element: &str) -> Option<SessionChannelTag> {
        SessionChannelTag::from_name(element)
    }

    fn apply<V: ElementValue>(&mut self, tag: SessionChannelTag, value: &V) -> Result<()> {
        match tag {
            SessionChannelTag::Channel => {
                replace_with_single(&mut self.channel_set, value.ascii()?);
            }
            SessionChannelTag::ChannelSet => {
                replace_with_list(&mut self.channel_set, &value.ascii()?);
            }
            SessionChannelTag::ReconnectAttemptLimit => {
                self.reconnect_attempt_limit = clamp_i32(value.int()?);
                self.reconnect_attempt_limit_set = true;
            }
            SessionChannelTag::ReconnectMaxDelay => {
                let delay = clamp_i32(value.int()?);
                if delay > 0 {
                    self.reconnect_max_delay = delay;
                    self.reconnect_max_delay_set = true;
                }
            }
            SessionChannelTag::ReconnectMinDelay => {
                let delay = clamp_i32(value.int()?);
                if delay > 0 {
                    self.reconnect_min_delay = delay;
                    self.reconnect_min_delay_set = true;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::new(name);
    }
}
