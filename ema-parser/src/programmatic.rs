/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Programmatic configuration parser.
//!
//! Walks a decoded [`ConfigMap`] with the same group, list and element
//! vocabulary as the XML form and merges it into a [`ConfigTarget`].
//! Records already seeded by XML are updated in place, so every element
//! given here overrides the file.
//!
//! Values are typed: strings are ASCII, unsigned fields and booleans are
//! UInt, signed fields are Int and enumerations are Enum codes (the
//! `Prefix::Token` text form is accepted as ASCII as well).

use ema_config::directory::{Qos, ServiceConfig, parse_rate, parse_timeliness};
use ema_config::tag::{InfoFilterTag, LoadFilterTag, StateFilterTag, StatusTag};
use ema_config::value::saturate_u32;
use ema_config::{
    ChannelSetPrecedence, ConfigRecord, ConfigTarget, DirectoryConfig, ElementValue, GroupTag,
    Registry, record_entry,
};
use ema_core::{
    ConfigEnum, ConfigError, ConfigErrorLog, ConfigMap, ConfigValue, DataType, ElementList,
    Result, Severity,
};

const CAPABILITY_ENTRY: &str = "Invalid array entry payload for Source Directory InfoFilter element Capabilities array. The array entries must contain either an UINT or ASCII string, and cannot be greater than 65535.";

/// Merges a decoded configuration map into a [`ConfigTarget`].
#[derive(Debug, Clone, Copy)]
pub struct ProgrammaticConfigParser<'a> {
    config: &'a ConfigMap,
}

impl<'a> ProgrammaticConfigParser<'a> {
    /// Creates a parser over `config`.
    #[must_use]
    pub const fn new(config: &'a ConfigMap) -> Self {
        Self { config }
    }

    /// Merges the map into `target`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for a wrong container or payload type,
    /// a blank mandatory value, or a service id conflict.
    pub fn parse_into(&self, target: &mut ConfigTarget) -> Result<()> {
        if self.config.key_type() != DataType::Ascii {
            return Err(ConfigError::invalid(
                "Invalid key type for Programmatic Configuration. KeyType must be ASCII_STRING",
            ));
        }
        let role = target.role;

        for entry in self.config {
            let Some(list) = entry.value.as_element_list() else {
                return Err(ConfigError::invalid(
                    "Invalid entry payload type for Programmatic Configuration. Top map's entries must contain ELEMENT_LIST",
                ));
            };
            let name = entry_key(&entry.key, "Programmatic Configuration")?;
            let Some(group) = GroupTag::from_name(name) else {
                target
                    .error_log
                    .add(format!("Unknown Group element: {name}"), Severity::Error);
                continue;
            };
            if !role.accepts(group) {
                tracing::debug!(%group, %role, "skipping group of another role");
                continue;
            }
            tracing::debug!(%group, "applying programmatic group");
            parse_group(list, group, target)?;
        }

        target.finalize_directories()
    }
}

fn parse_group(group_list: &ElementList, group: GroupTag, target: &mut ConfigTarget) -> Result<()> {
    let precedence = target.channel_set_precedence;
    match group {
        GroupTag::ConsumerGroup => {
            let slots = GroupSlots {
                default: &mut target.default_consumer,
                log: &mut target.error_log,
            };
            let first = parse_role_group(
                group_list,
                group,
                "Consumer",
                precedence,
                &mut target.consumers,
                slots,
            )?;
            note_first(target, group, first);
        }
        GroupTag::NiProviderGroup => {
            let slots = GroupSlots {
                default: &mut target.default_ni_provider,
                log: &mut target.error_log,
            };
            let first = parse_role_group(
                group_list,
                group,
                "NiProvider",
                precedence,
                &mut target.ni_providers,
                slots,
            )?;
            note_first(target, group, first);
        }
        GroupTag::IProviderGroup => {
            let slots = GroupSlots {
                default: &mut target.default_iprovider,
                log: &mut target.error_log,
            };
            let first = parse_role_group(
                group_list,
                group,
                "IProvider",
                precedence,
                &mut target.iproviders,
                slots,
            )?;
            note_first(target, group, first);
        }
        GroupTag::ChannelGroup => {
            let log = &mut target.error_log;
            parse_plain_group(group_list, "Channel", precedence, &mut target.channels, log)?;
        }
        GroupTag::ServerGroup => {
            let log = &mut target.error_log;
            parse_plain_group(group_list, "Server", precedence, &mut target.servers, log)?;
        }
        GroupTag::LoggerGroup => {
            let log = &mut target.error_log;
            parse_plain_group(group_list, "Logger", precedence, &mut target.loggers, log)?;
        }
        GroupTag::DictionaryGroup => {
            let log = &mut target.error_log;
            parse_plain_group(group_list, "Dictionary", precedence, &mut target.dictionaries, log)?;
        }
        GroupTag::SessionChannelGroup => {
            let log = &mut target.error_log;
            let registry = &mut target.session_channels;
            parse_plain_group(group_list, "SessionChannel", precedence, registry, log)?;
        }
        GroupTag::DirectoryGroup => parse_directory_group(group_list, target)?,
    }
    Ok(())
}

/// Default-name slot and error log of a role group, borrowed together.
struct GroupSlots<'t> {
    default: &'t mut Option<String>,
    log: &'t mut ConfigErrorLog,
}

fn note_first(target: &mut ConfigTarget, group: GroupTag, first: Option<String>) {
    if let Some(name) = first {
        target.note_configured(group, &name);
    }
}

fn default_name(value: &ConfigValue, kind: &str) -> Result<String> {
    value.as_ascii().map(str::to_string).ok_or_else(|| {
        ConfigError::invalid(format!(
            "Missing or invalid Default{kind}. Default{kind} must be an ASCII_STRING and cannot be blank"
        ))
    })
}

fn list_map<'m>(value: &'m ConfigValue, kind: &str, key_context: &str) -> Result<&'m ConfigMap> {
    let map = value.as_map().ok_or_else(|| {
        ConfigError::invalid(format!("Invalid {kind}List. {kind}List must be a Map"))
    })?;
    if map.key_type() != DataType::Ascii {
        return Err(ConfigError::invalid(format!(
            "Invalid key type for {key_context}{kind}List. KeyType must be ASCII_STRING"
        )));
    }
    Ok(map)
}

fn parse_role_group<R: ConfigRecord>(
    group_list: &ElementList,
    group: GroupTag,
    kind: &str,
    precedence: ChannelSetPrecedence,
    registry: &mut Registry<R>,
    slots: GroupSlots<'_>,
) -> Result<Option<String>> {
    let default_element = format!("Default{kind}");
    let list_element = format!("{kind}List");
    let mut first = None;

    for entry in group_list {
        if entry.name == default_element {
            *slots.default = Some(default_name(&entry.value, kind)?);
        } else if entry.name == list_element {
            let map = list_map(&entry.value, kind, "")?;
            let name = parse_items(map, kind, precedence, registry, slots.log)?;
            if first.is_none() {
                first = name;
            }
        } else {
            slots.log.add(format!("Unknown {kind} element: {}", entry.name), Severity::Error);
        }
    }
    tracing::trace!(%group, ?first, "role group merged");
    Ok(first)
}

fn parse_plain_group<R: ConfigRecord>(
    group_list: &ElementList,
    kind: &str,
    precedence: ChannelSetPrecedence,
    registry: &mut Registry<R>,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    let list_element = format!("{kind}List");
    for entry in group_list {
        if entry.name == list_element {
            let map = list_map(&entry.value, kind, "")?;
            parse_items(map, kind, precedence, registry, log)?;
        } else {
            log.add(format!("Unknown {kind} element: {}", entry.name), Severity::Error);
        }
    }
    Ok(())
}

/// Returns the non-blank ASCII key of a list entry.
fn entry_key<'m>(key: &'m ConfigValue, list: &str) -> Result<&'m str> {
    key.as_ascii().ok_or_else(|| {
        ConfigError::invalid(format!(
            "Invalid entry key type for {list} Map Entry. The Key must not be blank"
        ))
    })
}

fn parse_items<R: ConfigRecord>(
    map: &ConfigMap,
    kind: &str,
    precedence: ChannelSetPrecedence,
    registry: &mut Registry<R>,
    log: &mut ConfigErrorLog,
) -> Result<Option<String>> {
    let list_name = format!("{kind}List");
    let mut first = None;

    for item in map {
        let Some(elements) = item.value.as_element_list() else {
            return Err(ConfigError::invalid(format!(
                "Invalid entry payload type for {list_name} Map Entry. These map entries must contain ELEMENT_LIST"
            )));
        };
        let name = entry_key(&item.key, &list_name)?;
        if !registry.contains_key(name) {
            tracing::debug!(kind = R::KIND, name, "creating record");
        }
        let record = record_entry(registry, name);
        apply_elements(elements, precedence, record, log)?;
        first.get_or_insert_with(|| name.to_string());
    }
    Ok(first)
}

fn apply_elements<R: ConfigRecord>(
    elements: &ElementList,
    precedence: ChannelSetPrecedence,
    record: &mut R,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    let has_channel_set = elements.iter().any(|e| e.name == "ChannelSet");
    for element in elements {
        if precedence.skip_element(&element.name, has_channel_set) {
            continue;
        }
        match R::tag(&element.name) {
            Some(tag) => {
                tracing::trace!(kind = R::KIND, element = %element.name, "applying element");
                let value = ProgrammaticElement::new(R::KIND, &element.name, &element.value);
                record.apply(tag, &value)?;
            }
            None => log.add(
                format!("Unknown {} entry element: {}", R::KIND, element.name),
                Severity::Error,
            ),
        }
    }
    Ok(())
}

fn parse_directory_group(group_list: &ElementList, target: &mut ConfigTarget) -> Result<()> {
    for entry in group_list {
        match entry.name.as_str() {
            "DefaultDirectory" => {
                target.default_directory = Some(default_name(&entry.value, "Directory")?);
            }
            "DirectoryList" => {
                let list = list_map(&entry.value, "Directory", "Programmatic Configuration ")?;
                parse_directory_list(list, target)?;
            }
            other => target
                .error_log
                .add(format!("Unknown Directory element: {other}"), Severity::Error),
        }
    }
    Ok(())
}

fn parse_directory_list(list: &ConfigMap, target: &mut ConfigTarget) -> Result<()> {
    for item in list {
        let Some(services) = item.value.as_map() else {
            return Err(ConfigError::invalid(
                "Invalid entry payload type for DirectoryList Map Entry. These map entries must contain a Map",
            ));
        };
        let name = entry_key(&item.key, "DirectoryList")?;
        if services.key_type() != DataType::Ascii {
            return Err(ConfigError::invalid(
                "Invalid key type for Programmatic Configuration DirectoryList Map KeyType. KeyType must be ASCII_STRING",
            ));
        }
        target.note_configured(GroupTag::DirectoryGroup, name);
        let directory = target
            .directories
            .entry(name.to_string())
            .or_insert_with(|| DirectoryConfig::new(name));

        for service_entry in services {
            let Some(filters) = service_entry.value.as_element_list() else {
                return Err(ConfigError::invalid(
                    "Invalid entry payload type for Directory service Map Entry. These map entries must contain ELEMENT_LIST",
                ));
            };
            let service_name = entry_key(&service_entry.key, "Directory service")?;
            let service = directory.service_entry(service_name);
            parse_service(filters, service, &mut target.error_log)?;
        }
    }
    Ok(())
}

fn filter_list<'m>(value: &'m ConfigValue, filter: &str) -> Result<&'m ElementList> {
    value.as_element_list().ok_or_else(|| {
        ConfigError::invalid(format!(
            "Invalid entry payload type for Source Directory element {filter}. This element entry must contain an Element List and cannot be blank"
        ))
    })
}

fn parse_service(
    filters: &ElementList,
    service: &mut ServiceConfig,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    for filter in filters {
        match filter.name.as_str() {
            "InfoFilter" => {
                parse_info_filter(filter_list(&filter.value, "InfoFilter")?, service, log)?;
            }
            "StateFilter" => {
                parse_state_filter(filter_list(&filter.value, "StateFilter")?, service, log)?;
            }
            "LoadFilter" => {
                for element in filter_list(&filter.value, "LoadFilter")? {
                    match LoadFilterTag::from_name(&element.name) {
                        Some(tag) => {
                            let value = ProgrammaticElement::new(
                                "Source Directory LoadFilter",
                                &element.name,
                                &element.value,
                            );
                            service.apply_load(tag, &value)?;
                        }
                        None => log.add(
                            format!("Unknown Directory LoadFilter element: {}", element.name),
                            Severity::Error,
                        ),
                    }
                }
            }
            other => log.add(format!("Unknown Directory entry element: {other}"), Severity::Error),
        }
    }
    Ok(())
}

fn info_array<'m>(value: &'m ConfigValue, element: &str) -> Result<&'m [ConfigValue]> {
    value.as_array().ok_or_else(|| {
        ConfigError::invalid(format!(
            "Invalid entry payload type for Source Directory InfoFilter element {element}. This element entry must contain an ARRAY and cannot be blank"
        ))
    })
}

fn dictionary_names<'m>(
    items: &'m [ConfigValue],
    element: &'m str,
) -> impl Iterator<Item = Result<&'m str>> {
    items.iter().map(move |item| {
        item.as_ascii().ok_or_else(|| {
            ConfigError::invalid(format!(
                "Invalid array entry payload type for Source Directory InfoFilter element {element} array. The array entries must contain an ASCII string."
            ))
        })
    })
}

fn parse_info_filter(
    info: &ElementList,
    service: &mut ServiceConfig,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    for element in info {
        match element.name.as_str() {
            "Capabilities" => {
                let items = info_array(&element.value, "Capabilities")?;
                service.info.capabilities.clear();
                for item in items {
                    match item {
                        ConfigValue::UInt(code) if *code <= u64::from(u16::MAX) => {
                            service.add_capability(*code);
                        }
                        ConfigValue::Ascii(name) => service
                            .add_capability_str(name)
                            .map_err(|_| ConfigError::invalid(CAPABILITY_ENTRY))?,
                        _ => return Err(ConfigError::invalid(CAPABILITY_ENTRY)),
                    }
                }
            }
            "DictionariesProvided" => {
                let items = info_array(&element.value, "DictionariesProvided")?;
                service.info.dictionaries_provided.clear();
                for name in dictionary_names(items, "DictionariesProvided") {
                    service.add_dictionary_provided(name?);
                }
            }
            "DictionariesUsed" => {
                let items = info_array(&element.value, "DictionariesUsed")?;
                service.info.dictionaries_used.clear();
                for name in dictionary_names(items, "DictionariesUsed") {
                    service.add_dictionary_used(name?);
                }
            }
            "QoS" => {
                let rows = element.value.as_series().ok_or_else(|| {
                    ConfigError::invalid(
                        "Invalid entry payload type for Source Directory InfoFilter element QoS. This element entry must contain a Series and cannot be blank",
                    )
                })?;
                service.info.qos.clear();
                for row in rows {
                    service.add_qos(parse_qos_row(row, log)?);
                }
            }
            name => match InfoFilterTag::from_name(name) {
                Some(tag) => service.apply_info(
                    tag,
                    &ProgrammaticElement::new("Source Directory InfoFilter", name, &element.value),
                )?,
                None => log.add(
                    format!("Unknown Directory service info filter element: {name}"),
                    Severity::Error,
                ),
            },
        }
    }
    Ok(())
}

fn parse_qos_row(row: &ElementList, log: &mut ConfigErrorLog) -> Result<Qos> {
    let mut qos = Qos::default();
    for element in row {
        let parse: fn(&str) -> Result<u32> = match element.name.as_str() {
            "Timeliness" => parse_timeliness,
            "Rate" => parse_rate,
            other => {
                log.add(format!("Unknown QoS element: {other}"), Severity::Error);
                continue;
            }
        };
        let value = match &element.value {
            ConfigValue::UInt(number) => saturate_u32(*number),
            ConfigValue::Ascii(text) => parse(text)?,
            _ => {
                return Err(ConfigError::invalid(format!(
                    "Invalid entry payload type for Source Directory InfoFilter QoS {} element. This element entry must contain either an ASCII string or unsigned integer and cannot be blank",
                    element.name
                )));
            }
        };
        if element.name == "Timeliness" {
            qos.timeliness = value;
        } else {
            qos.rate = value;
        }
    }
    Ok(qos)
}

fn parse_state_filter(
    state: &ElementList,
    service: &mut ServiceConfig,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    for element in state {
        if element.name == "Status" {
            let status = element.value.as_element_list().ok_or_else(|| {
                ConfigError::invalid(
                    "Invalid entry payload type for Source Directory StateFilter element Status. This element entry must contain an Element List.",
                )
            })?;
            for entry in status {
                match StatusTag::from_name(&entry.name) {
                    Some(tag) => {
                        let value = ProgrammaticElement::new(
                            "Source Directory StateFilter Status",
                            &entry.name,
                            &entry.value,
                        );
                        service.apply_status(tag, &value)?;
                    }
                    None => log.add(
                        format!("Unknown Directory service status element: {}", entry.name),
                        Severity::Error,
                    ),
                }
            }
            continue;
        }
        match StateFilterTag::from_name(&element.name) {
            Some(tag) => {
                let value = ProgrammaticElement::new(
                    "Source Directory StateFilter",
                    &element.name,
                    &element.value,
                );
                service.apply_state(tag, &value)?;
            }
            None => log.add(
                format!("Unknown Directory service state filter element: {}", element.name),
                Severity::Error,
            ),
        }
    }
    Ok(())
}

/// A decoded element entry presented to a record.
#[derive(Debug, Clone, Copy)]
pub struct ProgrammaticElement<'a> {
    kind: &'a str,
    name: &'a str,
    value: &'a ConfigValue,
}

impl<'a> ProgrammaticElement<'a> {
    /// Wraps an entry, labelling diagnostics with `kind`.
    #[must_use]
    pub const fn new(kind: &'a str, name: &'a str, value: &'a ConfigValue) -> Self {
        Self { kind, name, value }
    }

    fn wrong_payload(&self, expected: &str, addition: Option<&str>) -> ConfigError {
        let tail = addition.map_or_else(
            || " and cannot be blank".to_string(),
            |extra| format!(", cannot be blank, {extra}"),
        );
        ConfigError::invalid(format!(
            "Invalid entry payload type for {} element {}. This element entry must contain {expected}{tail}",
            self.kind, self.name
        ))
    }
}

impl ElementValue for ProgrammaticElement<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn ascii(&self) -> Result<String> {
        match self.value {
            ConfigValue::Ascii(text) => Ok(text.clone()),
            _ => Err(self.wrong_payload("an ASCII string", None)),
        }
    }

    fn uint(&self) -> Result<u64> {
        self.value
            .as_u64()
            .ok_or_else(|| self.wrong_payload("an UINT", None))
    }

    fn int(&self) -> Result<i64> {
        match self.value {
            ConfigValue::Int(number) => Ok(*number),
            ConfigValue::UInt(number) => Ok(i64::try_from(*number).unwrap_or(i64::MAX)),
            _ => Err(self.wrong_payload("an INT", None)),
        }
    }

    fn boolean(&self) -> Result<bool> {
        self.value
            .as_u64()
            .map(|number| number != 0)
            .ok_or_else(|| {
                self.wrong_payload("an UINT", Some("and have a value of \"0\" or \"1\""))
            })
    }

    fn enumeration<E: ConfigEnum>(&self) -> Result<E> {
        match self.value {
            ConfigValue::Enum(code) => E::from_code(*code).ok_or_else(|| {
                ConfigError::invalid(format!(
                    "Invalid value for {} element {}. This must be an ENUM type, with one of the values of {}.",
                    self.kind,
                    self.name,
                    E::accepted()
                ))
            }),
            ConfigValue::Ascii(text) => {
                E::from_prefixed(text).unwrap_or_else(|| E::from_token(text))
            }
            _ => Err(self.wrong_payload(
                "an ENUM",
                Some(&format!("with one of the values of {}", E::accepted())),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlConfigParser;
    use ema_config::ConfigRole;
    use ema_core::{CompressionType, DataState, LoggerLevel};
    use std::str::FromStr;

    fn parse(role: ConfigRole, config: &ConfigMap) -> Result<ConfigTarget> {
        let mut target = ConfigTarget::new(role);
        ProgrammaticConfigParser::new(config).parse_into(&mut target)?;
        Ok(target)
    }

    fn group(name: &str, list: ElementList) -> ConfigMap {
        ConfigMap::new().with(name, list)
    }

    fn channel_group(channels: ConfigMap) -> ConfigMap {
        group("ChannelGroup", ElementList::new().with("ChannelList", channels))
    }

    #[test]
    fn test_consumer_group() {
        let config = group(
            "ConsumerGroup",
            ElementList::new().with("DefaultConsumer", "Consumer_2").with(
                "ConsumerList",
                ConfigMap::new()
                    .with(
                        "Consumer_1",
                        ElementList::new()
                            .with("Channel", "Channel_1")
                            .with_uint("ItemCountHint", 0)
                            .with_int("DispatchTimeoutApiThread", 500)
                            .with_uint("XmlTraceToFile", 1),
                    )
                    .with("Consumer_2", ElementList::new().with("Logger", "Logger_2")),
            ),
        );
        let target = parse(ConfigRole::Consumer, &config).unwrap();

        assert_eq!(target.default_consumer.as_deref(), Some("Consumer_2"));
        assert_eq!(target.first_configured_consumer.as_deref(), Some("Consumer_1"));
        let consumer = &target.consumers["Consumer_1"];
        assert_eq!(consumer.channel_set.as_slice(), ["Channel_1"]);
        assert_eq!(consumer.item_count_hint, 1024);
        assert_eq!(consumer.dispatch_timeout_api_thread, 500);
        assert!(consumer.xml_trace.to_file);
        assert_eq!(target.consumers["Consumer_2"].logger, "Logger_2");
    }

    #[test]
    fn test_container_errors() {
        let bad_key = ConfigMap::with_key_type(DataType::UInt);
        assert_eq!(
            parse(ConfigRole::Consumer, &bad_key).unwrap_err().message(),
            "Invalid key type for Programmatic Configuration. KeyType must be ASCII_STRING"
        );

        let bad_top = ConfigMap::new().with("ConsumerGroup", "x");
        assert!(
            parse(ConfigRole::Consumer, &bad_top)
                .unwrap_err()
                .message()
                .ends_with("Top map's entries must contain ELEMENT_LIST")
        );

        let list_not_map = group("ConsumerGroup", ElementList::new().with("ConsumerList", "x"));
        assert_eq!(
            parse(ConfigRole::Consumer, &list_not_map).unwrap_err().message(),
            "Invalid ConsumerList. ConsumerList must be a Map"
        );

        let blank_default = group(
            "ConsumerGroup",
            ElementList::new().with("DefaultConsumer", ConfigValue::Blank(DataType::Ascii)),
        );
        assert_eq!(
            parse(ConfigRole::Consumer, &blank_default).unwrap_err().message(),
            "Missing or invalid DefaultConsumer. DefaultConsumer must be an ASCII_STRING and cannot be blank"
        );

        let blank_group_key = ConfigMap::new().with_entry(
            ConfigValue::Blank(DataType::Ascii),
            ElementList::new().with("ChannelList", ConfigMap::new()),
        );
        assert_eq!(
            parse(ConfigRole::Consumer, &blank_group_key).unwrap_err().message(),
            "Invalid entry key type for Programmatic Configuration Map Entry. The Key must not be blank"
        );

        let blank_key = channel_group(
            ConfigMap::new().with_entry(ConfigValue::Blank(DataType::Ascii), ElementList::new()),
        );
        assert_eq!(
            parse(ConfigRole::Consumer, &blank_key).unwrap_err().message(),
            "Invalid entry key type for ChannelList Map Entry. The Key must not be blank"
        );
    }

    #[test]
    fn test_payload_type_errors() {
        let wrong_type = channel_group(
            ConfigMap::new().with("Channel_1", ElementList::new().with("HighWaterMark", "10")),
        );
        assert_eq!(
            parse(ConfigRole::Consumer, &wrong_type).unwrap_err().message(),
            "Invalid entry payload type for Channel element HighWaterMark. This element entry must contain an UINT and cannot be blank"
        );

        let blank = channel_group(ConfigMap::new().with(
            "Channel_1",
            ElementList::new().with("Host", ConfigValue::Blank(DataType::Ascii)),
        ));
        assert_eq!(
            parse(ConfigRole::Consumer, &blank).unwrap_err().message(),
            "Invalid entry payload type for Channel element Host. This element entry must contain an ASCII string and cannot be blank"
        );

        let bad_code = channel_group(
            ConfigMap::new().with("Channel_1", ElementList::new().with_enum("CompressionType", 9)),
        );
        assert!(
            parse(ConfigRole::Consumer, &bad_code)
                .unwrap_err()
                .message()
                .starts_with("Invalid value for Channel element CompressionType.")
        );
    }

    #[test]
    fn test_unknown_entries_are_logged() {
        let mut config = channel_group(ConfigMap::new().with(
            "Channel_1",
            ElementList::new().with_uint("Bogus", 1).with_uint("HighWaterMark", 4),
        ));
        config.push(ConfigValue::Ascii("NoSuchGroup".into()), ElementList::new());
        let target = parse(ConfigRole::Consumer, &config).unwrap();

        let messages: Vec<_> = target.error_log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            ["Unknown Channel entry element: Bogus", "Unknown Group element: NoSuchGroup"]
        );
        assert_eq!(target.channels["Channel_1"].high_water_mark, 4);
    }

    #[test]
    fn test_programmatic_overrides_xml() {
        let xml = r#"<EmaConfig>
          <ChannelGroup><ChannelList><Channel>
            <Name value="Channel_1"/>
            <Host value="xml-host"/>
            <HighWaterMark value="3"/>
          </Channel></ChannelList></ChannelGroup>
          <LoggerGroup><LoggerList><Logger>
            <Name value="Logger_1"/>
            <LoggerSeverity value="LoggerSeverity::Error"/>
          </Logger></LoggerList></LoggerGroup>
        </EmaConfig>"#;
        let mut target = ConfigTarget::new(ConfigRole::Consumer);
        XmlConfigParser::from_str(xml).unwrap().parse_into(&mut target).unwrap();

        let mut config = channel_group(ConfigMap::new().with(
            "Channel_1",
            ElementList::new()
                .with_uint("HighWaterMark", 10)
                .with_enum("CompressionType", CompressionType::Lz4 as u16),
        ));
        config.push(
            ConfigValue::Ascii("LoggerGroup".into()),
            ElementList::new().with(
                "LoggerList",
                ConfigMap::new().with(
                    "Logger_1",
                    ElementList::new().with("LoggerSeverity", "LoggerSeverity::Warning"),
                ),
            ),
        );
        ProgrammaticConfigParser::new(&config).parse_into(&mut target).unwrap();

        let channel = &target.channels["Channel_1"];
        assert_eq!(channel.high_water_mark, 10);
        assert_eq!(channel.compression_type, CompressionType::Lz4);
        assert_eq!(channel.host, "xml-host");
        assert_eq!(target.loggers["Logger_1"].severity, LoggerLevel::Warning);
        assert_eq!(target.channels.len(), 1);
    }

    #[test]
    fn test_channel_set_precedence() {
        let config = group(
            "ConsumerGroup",
            ElementList::new().with(
                "ConsumerList",
                ConfigMap::new().with(
                    "Consumer_1",
                    ElementList::new()
                        .with("ChannelSet", "Channel_1,Channel_2")
                        .with("Channel", "Channel_3"),
                ),
            ),
        );
        let wins = parse(ConfigRole::Consumer, &config).unwrap();
        assert_eq!(
            wins.consumers["Consumer_1"].channel_set.as_slice(),
            ["Channel_1", "Channel_2"]
        );

        let mut legacy = ConfigTarget::new(ConfigRole::Consumer)
            .with_channel_set_precedence(ChannelSetPrecedence::Legacy);
        ProgrammaticConfigParser::new(&config).parse_into(&mut legacy).unwrap();
        assert_eq!(legacy.consumers["Consumer_1"].channel_set.as_slice(), ["Channel_3"]);
    }

    #[test]
    fn test_directory_group() {
        let service = ElementList::new()
            .with(
                "InfoFilter",
                ElementList::new()
                    .with_uint("ServiceId", 12)
                    .with("Vendor", "vendor")
                    .with(
                        "Capabilities",
                        ConfigValue::Array(vec![
                            ConfigValue::Ascii("MMT_MARKET_PRICE".into()),
                            ConfigValue::UInt(7),
                        ]),
                    )
                    .with(
                        "DictionariesUsed",
                        ConfigValue::Array(vec![ConfigValue::Ascii("Dictionary_1".into())]),
                    )
                    .with(
                        "QoS",
                        ConfigValue::Series(vec![
                            ElementList::new()
                                .with("Timeliness", "Timeliness::RealTime")
                                .with_uint("Rate", 500),
                        ]),
                    ),
            )
            .with(
                "StateFilter",
                ElementList::new().with_uint("ServiceState", 0).with(
                    "Status",
                    ElementList::new().with("DataState", "DataState::Suspect"),
                ),
            )
            .with("LoadFilter", ElementList::new().with_uint("LoadFactor", 50));
        let config = group(
            "DirectoryGroup",
            ElementList::new().with("DefaultDirectory", "Directory_2").with(
                "DirectoryList",
                ConfigMap::new().with(
                    "Directory_2",
                    ConfigMap::new()
                        .with("DIRECT_FEED", service)
                        .with("OTHER", ElementList::new()),
                ),
            ),
        );
        let target = parse(ConfigRole::IProvider, &config).unwrap();

        assert_eq!(target.default_directory.as_deref(), Some("Directory_2"));
        let directory = &target.directories["Directory_2"];
        let feed = directory.service("DIRECT_FEED").unwrap();
        assert_eq!(feed.service_id, Some(12));
        assert_eq!(feed.info.capabilities.as_slice(), [6, 7]);
        assert_eq!(feed.info.dictionaries_used.as_slice(), ["Dictionary_1"]);
        assert_eq!(feed.info.qos.as_slice(), [Qos::new(0, 500)]);
        assert!(!feed.state.service_state);
        assert_eq!(feed.state.status.as_ref().unwrap().data_state, DataState::Suspect);
        assert_eq!(feed.load.load_factor, Some(50));
        assert_eq!(directory.service("OTHER").unwrap().service_id, Some(0));
    }

    #[test]
    fn test_directory_errors() {
        let not_map = group(
            "DirectoryGroup",
            ElementList::new().with(
                "DirectoryList",
                ConfigMap::new().with("Directory_1", ElementList::new()),
            ),
        );
        assert_eq!(
            parse(ConfigRole::NiProvider, &not_map).unwrap_err().message(),
            "Invalid entry payload type for DirectoryList Map Entry. These map entries must contain a Map"
        );

        let bad_capability = group(
            "DirectoryGroup",
            ElementList::new().with(
                "DirectoryList",
                ConfigMap::new().with(
                    "Directory_1",
                    ConfigMap::new().with(
                        "S",
                        ElementList::new().with(
                            "InfoFilter",
                            ElementList::new()
                                .with("Capabilities", ConfigValue::Array(vec![ConfigValue::Int(-1)])),
                        ),
                    ),
                ),
            ),
        );
        assert_eq!(
            parse(ConfigRole::NiProvider, &bad_capability).unwrap_err().message(),
            CAPABILITY_ENTRY
        );
    }

    #[test]
    fn test_foreign_role_groups_are_skipped() {
        let config = group(
            "ServerGroup",
            ElementList::new().with("ServerList", ConfigMap::new().with("Server_1", ElementList::new())),
        );
        let consumer = parse(ConfigRole::Consumer, &config).unwrap();
        assert!(consumer.servers.is_empty());
        assert!(consumer.error_log.is_empty());

        let provider = parse(ConfigRole::IProvider, &config).unwrap();
        assert!(provider.servers.contains_key("Server_1"));
    }
}
