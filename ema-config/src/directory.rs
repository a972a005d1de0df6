/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Source directory configuration.
//!
//! A directory is an ordered set of services a provider publishes. Each
//! service carries the three directory filters: info, state and load. Every
//! optional filter member is an `Option`, `None` meaning the member is not
//! advertised.
//!
//! Service ids are settled per directory by
//! [`DirectoryConfig::finalize_service_ids`] once a source has been parsed:
//! explicit ids must be unique, and services without one receive the lowest
//! unused id.

use crate::tag::{InfoFilterTag, LoadFilterTag, StateFilterTag, StatusTag};
use crate::value::{ElementValue, saturate_u32, saturate_u64_i64};
use ema_core::enums::{
    capability_from_str, rate_from_token, split_prefixed, timeliness_from_token,
};
use ema_core::{ConfigError, DataState, Result, StatusCode, StreamState};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Largest assignable service id.
pub const MAX_SERVICE_ID: u64 = u16::MAX as u64;

const TIMELINESS_FORMAT: &str = "Invalid QoS Timeliness string format. Correct format is \"Timeliness::<RealTime or InexactDelayed>\".";
const RATE_FORMAT: &str =
    "Invalid QoS Rate string format. Correct format is \"Rate::<TickByTick or JustInTimeConflated>\".";

/// A quality of service advertised by a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qos {
    /// Timeliness: 0 real-time, `u32::MAX` inexact delayed, else delay in seconds.
    pub timeliness: u32,
    /// Rate: 0 tick-by-tick, `0xFFFF_FF00` just-in-time conflated, else interval.
    pub rate: u32,
}

impl Default for Qos {
    fn default() -> Self {
        Self {
            timeliness: ema_core::enums::TIMELINESS_REALTIME,
            rate: ema_core::enums::RATE_TICK_BY_TICK,
        }
    }
}

impl Qos {
    /// Creates a QoS from raw timeliness and rate values.
    #[must_use]
    pub const fn new(timeliness: u32, rate: u32) -> Self {
        Self { timeliness, rate }
    }
}

/// Parses a QoS timeliness given as a number or as `Timeliness::<token>`.
///
/// # Errors
/// Returns `InvalidConfiguration` for any other form or token.
pub fn parse_timeliness(value: &str) -> Result<u32> {
    if let Ok(number) = value.trim().parse::<u64>() {
        return Ok(saturate_u32(number));
    }
    split_prefixed(value, "Timeliness")
        .ok_or_else(|| ConfigError::invalid(TIMELINESS_FORMAT))
        .and_then(timeliness_from_token)
}

/// Parses a QoS rate given as a number or as `Rate::<token>`.
///
/// # Errors
/// Returns `InvalidConfiguration` for any other form or token.
pub fn parse_rate(value: &str) -> Result<u32> {
    if let Ok(number) = value.trim().parse::<u64>() {
        return Ok(saturate_u32(number));
    }
    split_prefixed(value, "Rate")
        .ok_or_else(|| ConfigError::invalid(RATE_FORMAT))
        .and_then(rate_from_token)
}

/// Members of the info filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub vendor: Option<String>,
    pub is_source: Option<bool>,
    /// Supported message model types, without duplicates.
    pub capabilities: SmallVec<[u64; 8]>,
    pub accepting_consumer_status: Option<bool>,
    pub item_list: Option<String>,
    /// Dictionaries this service provides, without duplicates.
    pub dictionaries_provided: SmallVec<[String; 2]>,
    /// Dictionaries this service uses, without duplicates.
    pub dictionaries_used: SmallVec<[String; 2]>,
    pub qos: SmallVec<[Qos; 2]>,
    pub supports_qos_range: Option<bool>,
    pub supports_out_of_band_snapshots: Option<bool>,
}

/// Status advertised in the state filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub stream_state: StreamState,
    pub data_state: DataState,
    pub code: StatusCode,
    pub text: String,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self {
            stream_state: StreamState::Open,
            data_state: DataState::Ok,
            code: StatusCode::None,
            text: String::new(),
        }
    }
}

/// Members of the state filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceState {
    /// Whether the service is up.
    pub service_state: bool,
    pub accepting_requests: Option<bool>,
    pub status: Option<ServiceStatus>,
}

impl Default for ServiceState {
    fn default() -> Self {
        Self {
            service_state: true,
            accepting_requests: None,
            status: None,
        }
    }
}

/// Members of the load filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLoad {
    pub open_limit: Option<i64>,
    pub open_window: Option<i64>,
    pub load_factor: Option<i64>,
}

/// Configuration of one service within a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name.
    pub name: String,
    /// Service id, `None` until configured or assigned.
    pub service_id: Option<u16>,
    /// Whether `service_id` was assigned rather than configured.
    pub service_id_generated: bool,
    /// Info filter.
    pub info: ServiceInfo,
    /// State filter.
    pub state: ServiceState,
    /// Load filter.
    pub load: ServiceLoad,
}

impl ServiceConfig {
    /// Creates a service with nothing advertised beyond its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit service id.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when the id exceeds [`MAX_SERVICE_ID`].
    pub fn set_service_id(&mut self, id: u64) -> Result<()> {
        let id = u16::try_from(id).map_err(|_| {
            ConfigError::invalid(format!(
                "service[{}] specifies out of range ServiceId ({id}).",
                self.name
            ))
        })?;
        self.service_id = Some(id);
        self.service_id_generated = false;
        Ok(())
    }

    /// Applies one scalar info filter element.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the value cannot be coerced or the
    /// service id is out of range.
    pub fn apply_info<V: ElementValue>(&mut self, tag: InfoFilterTag, value: &V) -> Result<()> {
        match tag {
            InfoFilterTag::ServiceId => return self.set_service_id(value.uint()?),
            InfoFilterTag::Vendor => self.info.vendor = Some(value.ascii()?),
            InfoFilterTag::IsSource => self.info.is_source = Some(value.boolean()?),
            InfoFilterTag::AcceptingConsumerStatus => {
                self.info.accepting_consumer_status = Some(value.boolean()?);
            }
            InfoFilterTag::ItemList => self.info.item_list = Some(value.ascii()?),
            InfoFilterTag::SupportsQosRange => {
                self.info.supports_qos_range = Some(value.boolean()?);
            }
            InfoFilterTag::SupportsOutOfBandSnapshots => {
                self.info.supports_out_of_band_snapshots = Some(value.boolean()?);
            }
        }
        Ok(())
    }

    /// Applies one scalar state filter element.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the value cannot be coerced.
    pub fn apply_state<V: ElementValue>(&mut self, tag: StateFilterTag, value: &V) -> Result<()> {
        match tag {
            StateFilterTag::ServiceState => self.state.service_state = value.boolean()?,
            StateFilterTag::AcceptingRequests => {
                self.state.accepting_requests = Some(value.boolean()?);
            }
        }
        Ok(())
    }

    /// Applies one status element, creating the status when first touched.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the value cannot be coerced.
    pub fn apply_status<V: ElementValue>(&mut self, tag: StatusTag, value: &V) -> Result<()> {
        match tag {
            StatusTag::StreamState => {
                let state = value.enumeration()?;
                self.status_mut().stream_state = state;
            }
            StatusTag::DataState => {
                let state = value.enumeration()?;
                self.status_mut().data_state = state;
            }
            StatusTag::StatusCode => {
                let code = value.enumeration()?;
                self.status_mut().code = code;
            }
            StatusTag::StatusText => {
                let text = value.ascii()?;
                self.status_mut().text = text;
            }
        }
        Ok(())
    }

    /// Applies one load filter element.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the value cannot be coerced.
    pub fn apply_load<V: ElementValue>(&mut self, tag: LoadFilterTag, value: &V) -> Result<()> {
        let number = saturate_u64_i64(value.uint()?);
        match tag {
            LoadFilterTag::OpenLimit => self.load.open_limit = Some(number),
            LoadFilterTag::OpenWindow => self.load.open_window = Some(number),
            LoadFilterTag::LoadFactor => self.load.load_factor = Some(number),
        }
        Ok(())
    }

    fn status_mut(&mut self) -> &mut ServiceStatus {
        self.state.status.get_or_insert_with(ServiceStatus::default)
    }

    /// Adds a capability unless already present.
    pub fn add_capability(&mut self, capability: u64) {
        if !self.info.capabilities.contains(&capability) {
            self.info.capabilities.push(capability);
        }
    }

    /// Adds a capability given as a number or a message model type name.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for an unknown name or an out-of-range number.
    pub fn add_capability_str(&mut self, value: &str) -> Result<()> {
        let capability = capability_from_str(value)?;
        self.add_capability(capability);
        Ok(())
    }

    /// Adds a provided dictionary unless already present.
    pub fn add_dictionary_provided(&mut self, name: impl Into<String>) {
        push_unique(&mut self.info.dictionaries_provided, name.into());
    }

    /// Adds a used dictionary unless already present.
    pub fn add_dictionary_used(&mut self, name: impl Into<String>) {
        push_unique(&mut self.info.dictionaries_used, name.into());
    }

    /// Appends a QoS.
    pub fn add_qos(&mut self, qos: Qos) {
        self.info.qos.push(qos);
    }
}

fn push_unique(list: &mut SmallVec<[String; 2]>, name: String) {
    if !list.contains(&name) {
        list.push(name);
    }
}

/// Configuration of a named source directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory name.
    pub name: String,
    /// Services in configuration order.
    pub services: IndexMap<String, ServiceConfig>,
}

impl DirectoryConfig {
    /// Creates an empty directory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            services: IndexMap::new(),
        }
    }

    /// Returns the named service, creating it when absent.
    pub fn service_entry(&mut self, name: &str) -> &mut ServiceConfig {
        self.services
            .entry(name.to_string())
            .or_insert_with(|| ServiceConfig::new(name))
    }

    /// Looks up a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.get(name)
    }

    /// Looks up a service by id.
    #[must_use]
    pub fn service_by_id(&self, id: u16) -> Option<&ServiceConfig> {
        self.services.values().find(|s| s.service_id == Some(id))
    }

    /// Validates configured service ids and assigns the missing ones.
    ///
    /// Previously assigned ids are released first so that an id configured
    /// later always wins over an assigned one.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when two services configure the same
    /// id, or when no id is left to assign.
    pub fn finalize_service_ids(&mut self) -> Result<()> {
        let mut used = HashSet::with_capacity(self.services.len());
        for service in self.services.values_mut() {
            if service.service_id_generated {
                service.service_id = None;
                service.service_id_generated = false;
            }
            if let Some(id) = service.service_id
                && !used.insert(id)
            {
                return Err(ConfigError::invalid(format!(
                    "service[{}] specifies the same ServiceId (value of {id}) as already specified by another service.",
                    service.name
                )));
            }
        }

        let mut next: u32 = 0;
        for service in self.services.values_mut() {
            if service.service_id.is_some() {
                continue;
            }
            while u16::try_from(next).is_ok_and(|id| used.contains(&id)) {
                next += 1;
            }
            let id = u16::try_from(next)
                .map_err(|_| ConfigError::invalid("EMA ran out of assignable service ids."))?;
            used.insert(id);
            tracing::debug!(directory = %self.name, service = %service.name, id, "assigned service id");
            service.service_id = Some(id);
            service.service_id_generated = true;
            next += 1;
        }
        Ok(())
    }

    /// Removes every service, keeping the name.
    pub fn clear(&mut self) {
        self.services.clear();
    }

    /// Removes every service and the name.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Overwrites `dest` with a deep copy of this directory.
    pub fn copy_to(&self, dest: &mut Self) {
        dest.clone_from(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::testing::{number, text};
    use ema_core::enums::{RATE_JUST_IN_TIME_CONFLATED, TIMELINESS_INEXACT_DELAYED};

    #[test]
    fn test_parse_timeliness_and_rate() {
        assert_eq!(parse_timeliness("Timeliness::RealTime").unwrap(), 0);
        assert_eq!(
            parse_timeliness("Timeliness::InexactDelayed").unwrap(),
            TIMELINESS_INEXACT_DELAYED
        );
        assert_eq!(parse_timeliness("300").unwrap(), 300);
        assert_eq!(
            parse_rate("Rate::JustInTimeConflated").unwrap(),
            RATE_JUST_IN_TIME_CONFLATED
        );

        let err = parse_timeliness("RealTime").unwrap_err();
        assert_eq!(err.message(), TIMELINESS_FORMAT);
        let err = parse_rate("Speed::TickByTick").unwrap_err();
        assert_eq!(err.message(), RATE_FORMAT);
        assert!(parse_rate("Rate::Fast").is_err());
    }

    #[test]
    fn test_service_id_out_of_range() {
        let mut service = ServiceConfig::new("DIRECT_FEED");
        let err = service
            .apply_info(InfoFilterTag::ServiceId, &number("ServiceId", 70_000))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "service[DIRECT_FEED] specifies out of range ServiceId (70000)."
        );
        assert_eq!(service.service_id, None);

        service
            .apply_info(InfoFilterTag::ServiceId, &number("ServiceId", 11))
            .unwrap();
        assert_eq!(service.service_id, Some(11));
        assert!(!service.service_id_generated);
    }

    #[test]
    fn test_auto_assignment_skips_configured_ids() {
        let mut directory = DirectoryConfig::new("Directory_1");
        directory.service_entry("A");
        directory.service_entry("B").set_service_id(0).unwrap();
        directory.service_entry("C");
        directory.finalize_service_ids().unwrap();

        assert_eq!(directory.service("A").unwrap().service_id, Some(1));
        assert_eq!(directory.service("B").unwrap().service_id, Some(0));
        assert_eq!(directory.service("C").unwrap().service_id, Some(2));
        assert!(directory.service("A").unwrap().service_id_generated);
        assert_eq!(directory.service_by_id(2).unwrap().name, "C");
    }

    #[test]
    fn test_configured_id_wins_over_assigned() {
        let mut directory = DirectoryConfig::new("D");
        directory.service_entry("A");
        directory.finalize_service_ids().unwrap();
        assert_eq!(directory.service("A").unwrap().service_id, Some(0));

        directory.service_entry("B").set_service_id(0).unwrap();
        directory.finalize_service_ids().unwrap();
        assert_eq!(directory.service("A").unwrap().service_id, Some(1));
        assert_eq!(directory.service("B").unwrap().service_id, Some(0));
    }

    #[test]
    fn test_duplicate_service_id_rejected() {
        let mut directory = DirectoryConfig::new("D");
        directory.service_entry("A").set_service_id(7).unwrap();
        directory.service_entry("B").set_service_id(7).unwrap();
        let err = directory.finalize_service_ids().unwrap_err();
        assert_eq!(
            err.message(),
            "service[B] specifies the same ServiceId (value of 7) as already specified by another service."
        );
    }

    #[test]
    fn test_lists_are_deduplicated() {
        let mut service = ServiceConfig::new("S");
        service.add_capability_str("MMT_MARKET_PRICE").unwrap();
        service.add_capability_str("6").unwrap();
        service.add_capability(7);
        service.add_dictionary_provided("Dictionary_1");
        service.add_dictionary_provided("Dictionary_1");
        service.add_dictionary_used("Dictionary_2");

        assert_eq!(service.info.capabilities.as_slice(), [6, 7]);
        assert_eq!(service.info.dictionaries_provided.len(), 1);
        assert_eq!(service.info.dictionaries_used.as_slice(), ["Dictionary_2"]);
        assert!(service.add_capability_str("256").is_err());
    }

    #[test]
    fn test_state_status_and_load() {
        let mut service = ServiceConfig::new("S");
        assert!(service.state.service_state);
        assert!(service.state.status.is_none());

        service
            .apply_status(StatusTag::StreamState, &text("StreamState", "StreamState::ClosedRecover"))
            .unwrap();
        service
            .apply_status(StatusTag::StatusText, &text("StatusText", "down"))
            .unwrap();
        service
            .apply_state(StateFilterTag::AcceptingRequests, &number("AcceptingRequests", 0))
            .unwrap();
        service
            .apply_load(LoadFilterTag::OpenWindow, &number("OpenWindow", u64::MAX))
            .unwrap();

        let status = service.state.status.as_ref().unwrap();
        assert_eq!(status.stream_state, StreamState::ClosedRecover);
        assert_eq!(status.data_state, DataState::Ok);
        assert_eq!(status.text, "down");
        assert_eq!(service.state.accepting_requests, Some(false));
        assert_eq!(service.load.open_window, Some(i64::MAX));
        assert_eq!(service.load.open_limit, None);
    }

    #[test]
    fn test_directory_copy_is_deep() {
        let mut directory = DirectoryConfig::new("D");
        directory.service_entry("A").add_capability(6);
        let mut copy = DirectoryConfig::default();
        directory.copy_to(&mut copy);

        directory.service_entry("A").add_capability(7);
        assert_eq!(copy.service("A").unwrap().info.capabilities.as_slice(), [6]);

        copy.clear();
        assert!(copy.services.is_empty());
        assert_eq!(copy.name, "D");
    }
}
