/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! XML configuration parser.
//!
//! Reads an `EmaConfig` document and merges its groups into a
//! [`ConfigTarget`]. Every configuration value is carried in a `value`
//! attribute:
//!
//! ```xml
//! <EmaConfig>
//!   <ChannelGroup>
//!     <ChannelList>
//!       <Channel>
//!         <Name value="Channel_1"/>
//!         <ChannelType value="ChannelType::RSSL_SOCKET"/>
//!         <Port value="14002"/>
//!       </Channel>
//!     </ChannelList>
//!   </ChannelGroup>
//! </EmaConfig>
//! ```
//!
//! Structural problems and values that cannot be coerced are fatal.
//! Unknown elements are recorded in the target's error log and skipped.

use ema_config::directory::{Qos, ServiceConfig, parse_rate, parse_timeliness};
use ema_config::tag::{InfoFilterTag, LoadFilterTag, StateFilterTag, StatusTag};
use ema_config::{
    ChannelSetPrecedence, ConfigRecord, ConfigTarget, DirectoryConfig, ElementValue, GroupTag,
    Registry, record_entry,
};
use ema_core::{ConfigEnum, ConfigError, ConfigErrorLog, Result, Severity};
use roxmltree::{Document, Node};
use std::path::Path;
use std::str::FromStr;

/// File read when no path is configured.
pub const DEFAULT_CONFIG_FILE: &str = "EmaConfig.xml";

/// Name of the required document root.
pub const ROOT_ELEMENT: &str = "EmaConfig";

const BOOLEAN_HINT: &str = "Correct values are: \"0\" or \"1\".";
const UNSIGNED_HINT: &str = "Correct format is an unsigned numeric string.";

/// A validated XML configuration document.
///
/// An instance without text stands for the optional default file being
/// absent; parsing it changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlConfigParser {
    text: Option<String>,
}

impl XmlConfigParser {
    /// Loads and validates a configuration file.
    ///
    /// With no path, [`DEFAULT_CONFIG_FILE`] in the working directory is
    /// read if it exists.
    ///
    /// # Arguments
    /// * `path` - Explicit file path, or `None` for the default file
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when an explicit file is missing or
    /// unreadable, or when the document is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        match std::fs::read_to_string(file) {
            Ok(text) => Self::from_str(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && path.is_none() => {
                tracing::debug!(file = %file.display(), "default configuration file not present");
                Ok(Self::default())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::invalid(
                format!("Could not load the configured XML file. {err}: {}", file.display()),
            )),
            Err(err) => Err(ConfigError::invalid(format!(
                "Error loading XML file. Exception text: {err}"
            ))),
        }
    }

    /// Returns true if no document was loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none()
    }

    /// Merges the document into `target`.
    ///
    /// Only the groups of the target's role are read; groups of other roles
    /// are skipped.
    ///
    /// # Errors
    /// Returns the first structural or coercion error met.
    pub fn parse_into(&self, target: &mut ConfigTarget) -> Result<()> {
        let Some(text) = self.text.as_deref() else {
            return Ok(());
        };
        let document = parse_document(text)?;
        let role = target.role;

        for group_node in element_children(document.root_element()) {
            let name = group_node.tag_name().name();
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
            tracing::debug!(%group, "parsing XML group");
            parse_group(group_node, group, target)?;
        }

        target.finalize_directories()
    }
}

impl FromStr for XmlConfigParser {
    type Err = ConfigError;

    /// Validates in-memory XML text.
    fn from_str(text: &str) -> Result<Self> {
        parse_document(text)?;
        Ok(Self {
            text: Some(text.to_string()),
        })
    }
}

fn parse_document(text: &str) -> Result<Document<'_>> {
    let document = Document::parse(text).map_err(|err| match err {
        roxmltree::Error::NoRootNode => ConfigError::invalid("XML Parsing failed."),
        other => ConfigError::invalid(format!(
            "Error parsing XML file. XmlException text: {other}"
        )),
    })?;
    if !document.root_element().has_tag_name(ROOT_ELEMENT) {
        return Err(ConfigError::invalid(
            "Error parsing XML file. Root element is not \"EmaConfig\"",
        ));
    }
    Ok(document)
}

fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    element_children(node).find(|n| n.has_tag_name(name))
}

fn required_value<'a>(node: Node<'a, '_>, message: impl FnOnce() -> String) -> Result<&'a str> {
    node.attribute("value")
        .ok_or_else(|| ConfigError::invalid(message()))
}

/// Returns the `value` of an item's required `Name` child.
fn item_name(item: Node<'_, '_>, kind: &str) -> Result<String> {
    let name = child(item, "Name").ok_or_else(|| {
        ConfigError::invalid(format!("Missing Name element in the {kind} Name"))
    })?;
    required_value(name, || format!("Missing value attribute in the {kind} Name element"))
        .map(str::to_string)
}

fn parse_group(node: Node<'_, '_>, group: GroupTag, target: &mut ConfigTarget) -> Result<()> {
    let precedence = target.channel_set_precedence;
    match group {
        GroupTag::ConsumerGroup => {
            read_default(node, "Consumer", target.default_slot(group))?;
            let log = &mut target.error_log;
            let first = parse_list(node, "Consumer", precedence, &mut target.consumers, log)?;
            target.note_configured(group, &first);
        }
        GroupTag::NiProviderGroup => {
            read_default(node, "NiProvider", target.default_slot(group))?;
            let log = &mut target.error_log;
            let first = parse_list(node, "NiProvider", precedence, &mut target.ni_providers, log)?;
            target.note_configured(group, &first);
        }
        GroupTag::IProviderGroup => {
            read_default(node, "IProvider", target.default_slot(group))?;
            let log = &mut target.error_log;
            let first = parse_list(node, "IProvider", precedence, &mut target.iproviders, log)?;
            target.note_configured(group, &first);
        }
        GroupTag::ChannelGroup => {
            let log = &mut target.error_log;
            parse_list(node, "Channel", precedence, &mut target.channels, log)?;
        }
        GroupTag::ServerGroup => {
            let log = &mut target.error_log;
            parse_list(node, "Server", precedence, &mut target.servers, log)?;
        }
        GroupTag::LoggerGroup => {
            let log = &mut target.error_log;
            parse_list(node, "Logger", precedence, &mut target.loggers, log)?;
        }
        GroupTag::DictionaryGroup => {
            let log = &mut target.error_log;
            parse_list(node, "Dictionary", precedence, &mut target.dictionaries, log)?;
        }
        GroupTag::SessionChannelGroup => {
            parse_list_items(
                node,
                "SessionChannel",
                "SessionChannelInfo",
                precedence,
                &mut target.session_channels,
                &mut target.error_log,
            )?;
        }
        GroupTag::DirectoryGroup => parse_directory_group(node, target)?,
    }
    Ok(())
}

/// Reads the optional `Default<kind>` child of a group.
fn read_default(node: Node<'_, '_>, kind: &str, slot: Option<&mut Option<String>>) -> Result<()> {
    let Some(default) = child(node, &format!("Default{kind}")) else {
        return Ok(());
    };
    let value = required_value(default, || format!("Missing Default {kind} Value attribute"))?;
    if let Some(slot) = slot {
        *slot = Some(value.to_string());
    }
    Ok(())
}

fn parse_list<R: ConfigRecord>(
    node: Node<'_, '_>,
    kind: &str,
    precedence: ChannelSetPrecedence,
    registry: &mut Registry<R>,
    log: &mut ConfigErrorLog,
) -> Result<String> {
    parse_list_items(node, kind, kind, precedence, registry, log)
}

/// Diagnostic for a `<kind>List` holding no `<item>` node.
fn missing_items(kind: &str, item: &str) -> ConfigError {
    ConfigError::invalid(match kind {
        "Consumer" | "NiProvider" | "IProvider" => format!("Missing {kind}s in the {kind}List"),
        "Channel" | "Server" => format!("Missing {kind} element(s)."),
        _ => format!("Missing {item} element"),
    })
}

/// Merges every `<item>` of the group's `<kind>List` into `registry`.
///
/// Returns the name of the first item in document order.
fn parse_list_items<R: ConfigRecord>(
    node: Node<'_, '_>,
    kind: &str,
    item: &str,
    precedence: ChannelSetPrecedence,
    registry: &mut Registry<R>,
    log: &mut ConfigErrorLog,
) -> Result<String> {
    let list = child(node, &format!("{kind}List"))
        .ok_or_else(|| ConfigError::invalid(format!("Missing {kind}List node")))?;

    let mut first = None;
    for item_node in element_children(list).filter(|n| n.has_tag_name(item)) {
        let name = item_name(item_node, kind)?;
        if !registry.contains_key(&name) {
            tracing::debug!(kind = R::KIND, name = %name, "creating record");
        }
        let record = record_entry(registry, &name);
        apply_elements(item_node, precedence, record, log)?;
        first.get_or_insert(name);
    }
    first.ok_or_else(|| missing_items(kind, item))
}

fn apply_elements<R: ConfigRecord>(
    item: Node<'_, '_>,
    precedence: ChannelSetPrecedence,
    record: &mut R,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    let has_channel_set = child(item, "ChannelSet").is_some();
    for element in element_children(item) {
        let name = element.tag_name().name();
        if name == "Name" || precedence.skip_element(name, has_channel_set) {
            continue;
        }
        match R::tag(name) {
            Some(tag) => {
                tracing::trace!(kind = R::KIND, element = name, "applying element");
                record.apply(tag, &XmlElement::new(R::KIND, element))?;
            }
            None => log.add(
                format!("Unknown {} entry element: {name}", R::KIND),
                Severity::Error,
            ),
        }
    }
    Ok(())
}

fn parse_directory_group(node: Node<'_, '_>, target: &mut ConfigTarget) -> Result<()> {
    let list = child(node, "DirectoryList")
        .ok_or_else(|| ConfigError::invalid("Missing DirectoryList node"))?;

    // Older files carry the default inside the list.
    read_default(list, "Directory", target.default_slot(GroupTag::DirectoryGroup))?;
    read_default(node, "Directory", target.default_slot(GroupTag::DirectoryGroup))?;

    let mut directory_nodes = element_children(list)
        .filter(|n| n.has_tag_name("Directory"))
        .peekable();
    if directory_nodes.peek().is_none() {
        return Err(missing_items("Directory", "Directory"));
    }

    for directory_node in directory_nodes {
        let name = item_name(directory_node, "Directory")?;
        target.note_configured(GroupTag::DirectoryGroup, &name);
        if !target.directories.contains_key(&name) {
            tracing::debug!(kind = "Directory", name = %name, "creating record");
        }
        let directory = target
            .directories
            .entry(name.clone())
            .or_insert_with(|| DirectoryConfig::new(name));

        let services = element_children(directory_node).filter(|n| n.has_tag_name("Service"));
        for service_node in services {
            let service_name = item_name(service_node, "Service")?;
            let service = directory.service_entry(&service_name);
            parse_service(service_node, service, &mut target.error_log)?;
        }
    }
    Ok(())
}

fn parse_service(
    node: Node<'_, '_>,
    service: &mut ServiceConfig,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    for filter in element_children(node) {
        match filter.tag_name().name() {
            "Name" => {}
            "InfoFilter" => parse_info_filter(filter, service, log)?,
            "StateFilter" => parse_state_filter(filter, service, log)?,
            "LoadFilter" => {
                for element in element_children(filter) {
                    let name = element.tag_name().name();
                    match LoadFilterTag::from_name(name) {
                        Some(tag) => {
                            service.apply_load(tag, &XmlElement::new(SERVICE_KIND, element))?;
                        }
                        None => log.add(
                            format!("Unknown Directory service load filter element: {name}"),
                            Severity::Error,
                        ),
                    }
                }
            }
            other => log.add(format!("Unknown Service entry element: {other}"), Severity::Error),
        }
    }
    Ok(())
}

const SERVICE_KIND: &str = "Directory Service";

fn entry_values<'a>(node: Node<'a, '_>, entry: &'a str) -> impl Iterator<Item = Result<&'a str>> {
    element_children(node)
        .filter(move |n| n.has_tag_name(entry))
        .map(move |n| {
            required_value(n, || format!("Missing value attribute in the Service {entry} element"))
        })
}

fn parse_info_filter(
    node: Node<'_, '_>,
    service: &mut ServiceConfig,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    for element in element_children(node) {
        match element.tag_name().name() {
            "Capabilities" => {
                service.info.capabilities.clear();
                for value in entry_values(element, "CapabilitiesEntry") {
                    service.add_capability_str(value?)?;
                }
            }
            "DictionariesProvided" => {
                service.info.dictionaries_provided.clear();
                for value in entry_values(element, "DictionariesProvidedEntry") {
                    service.add_dictionary_provided(value?);
                }
            }
            "DictionariesUsed" => {
                service.info.dictionaries_used.clear();
                for value in entry_values(element, "DictionariesUsedEntry") {
                    service.add_dictionary_used(value?);
                }
            }
            "QoS" => {
                service.info.qos.clear();
                for entry in element_children(element).filter(|n| n.has_tag_name("QoSEntry")) {
                    service.add_qos(parse_qos_entry(entry)?);
                }
            }
            name => match InfoFilterTag::from_name(name) {
                Some(tag) => service.apply_info(tag, &XmlElement::new(SERVICE_KIND, element))?,
                None => log.add(
                    format!("Unknown Directory service info filter element: {name}"),
                    Severity::Error,
                ),
            },
        }
    }
    Ok(())
}

fn parse_qos_entry(entry: Node<'_, '_>) -> Result<Qos> {
    let mut qos = Qos::default();
    if let Some(node) = child(entry, "Timeliness") {
        let value = required_value(node, || {
            "Missing value attribute in the Service QoS Timeliness element".to_string()
        })?;
        qos.timeliness = parse_timeliness(value)?;
    }
    if let Some(node) = child(entry, "Rate") {
        let value = required_value(node, || {
            "Missing value attribute in the Service QoS Rate element".to_string()
        })?;
        qos.rate = parse_rate(value)?;
    }
    Ok(qos)
}

fn parse_state_filter(
    node: Node<'_, '_>,
    service: &mut ServiceConfig,
    log: &mut ConfigErrorLog,
) -> Result<()> {
    for element in element_children(node) {
        let name = element.tag_name().name();
        if name == "Status" {
            for status in element_children(element) {
                let status_name = status.tag_name().name();
                match StatusTag::from_name(status_name) {
                    Some(tag) => service.apply_status(tag, &XmlElement::new(SERVICE_KIND, status))?,
                    None => log.add(
                        format!("Unknown Directory service status element: {status_name}"),
                        Severity::Error,
                    ),
                }
            }
            continue;
        }
        match StateFilterTag::from_name(name) {
            Some(tag) => service.apply_state(tag, &XmlElement::new(SERVICE_KIND, element))?,
            None => log.add(
                format!("Unknown Directory service state filter element: {name}"),
                Severity::Error,
            ),
        }
    }
    Ok(())
}

/// An XML element presented to a record.
#[derive(Debug, Clone, Copy)]
pub struct XmlElement<'a, 'input> {
    kind: &'a str,
    node: Node<'a, 'input>,
}

impl<'a, 'input> XmlElement<'a, 'input> {
    /// Wraps `node`, labelling diagnostics with `kind`.
    #[must_use]
    pub const fn new(kind: &'a str, node: Node<'a, 'input>) -> Self {
        Self { kind, node }
    }

    fn raw(&self) -> Result<&'a str> {
        required_value(self.node, || {
            format!("Missing value attribute in the {} {} element", self.kind, self.name())
        })
    }

    fn malformed(&self, hint: &str) -> ConfigError {
        ConfigError::invalid(format!(
            "The value attribute in the {} {} element is incorrectly formatted. {hint}",
            self.kind,
            self.name()
        ))
    }
}

impl ElementValue for XmlElement<'_, '_> {
    fn name(&self) -> &str {
        self.node.tag_name().name()
    }

    fn ascii(&self) -> Result<String> {
        self.raw().map(str::to_string)
    }

    fn uint(&self) -> Result<u64> {
        self.raw()?
            .trim()
            .parse()
            .map_err(|_| self.malformed(UNSIGNED_HINT))
    }

    fn int(&self) -> Result<i64> {
        self.raw()?
            .trim()
            .parse()
            .map_err(|_| self.malformed(UNSIGNED_HINT))
    }

    fn boolean(&self) -> Result<bool> {
        self.raw()?
            .trim()
            .parse::<u64>()
            .map(|v| v != 0)
            .map_err(|_| self.malformed(BOOLEAN_HINT))
    }

    fn enumeration<E: ConfigEnum>(&self) -> Result<E> {
        let raw = self.raw()?;
        E::from_prefixed(raw).unwrap_or_else(|| Err(self.malformed(E::accepted())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ema_config::ConfigRole;
    use ema_core::{CompressionType, ConnectionType, LoggerLevel};
    use proptest::prelude::*;

    fn parse(role: ConfigRole, xml: &str) -> Result<ConfigTarget> {
        let mut target = ConfigTarget::new(role);
        XmlConfigParser::from_str(xml)?.parse_into(&mut target)?;
        Ok(target)
    }

    const CONSUMER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<EmaConfig>
  <ConsumerGroup>
    <DefaultConsumer value="Consumer_2"/>
    <ConsumerList>
      <Consumer>
        <Name value="Consumer_1"/>
        <Channel value="Channel_1"/>
        <Logger value="Logger_1"/>
        <Dictionary value="Dictionary_1"/>
        <ItemCountHint value="5000"/>
        <XmlTraceToStdout value="1"/>
      </Consumer>
      <Consumer>
        <Name value="Consumer_2"/>
        <ChannelSet value="Channel_1, Channel_2"/>
      </Consumer>
    </ConsumerList>
  </ConsumerGroup>
  <ChannelGroup>
    <ChannelList>
      <Channel>
        <Name value="Channel_1"/>
        <ChannelType value="ChannelType::RSSL_SOCKET"/>
        <CompressionType value="CompressionType::LZ4"/>
        <HighWaterMark value="10"/>
        <ConnectionPingTimeout value="45000"/>
      </Channel>
      <Channel>
        <Name value="Channel_2"/>
        <Host value="backup"/>
      </Channel>
    </ChannelList>
  </ChannelGroup>
  <LoggerGroup>
    <LoggerList>
      <Logger>
        <Name value="Logger_1"/>
        <LoggerSeverity value="LoggerSeverity::Verbose"/>
      </Logger>
    </LoggerList>
  </LoggerGroup>
  <DictionaryGroup>
    <DictionaryList>
      <Dictionary>
        <Name value="Dictionary_1"/>
        <DictionaryType value="DictionaryType::FileDictionary"/>
      </Dictionary>
    </DictionaryList>
  </DictionaryGroup>
</EmaConfig>"#;

    #[test]
    fn test_consumer_document() {
        let target = parse(ConfigRole::Consumer, CONSUMER_XML).unwrap();

        assert_eq!(target.default_consumer.as_deref(), Some("Consumer_2"));
        assert_eq!(target.first_configured_consumer.as_deref(), Some("Consumer_1"));

        let consumer = &target.consumers["Consumer_1"];
        assert_eq!(consumer.channel_set.as_slice(), ["Channel_1"]);
        assert_eq!(consumer.item_count_hint, 5000);
        assert!(consumer.xml_trace.to_stdout);
        assert_eq!(
            target.consumers["Consumer_2"].channel_set.as_slice(),
            ["Channel_1", "Channel_2"]
        );

        let channel = &target.channels["Channel_1"];
        assert_eq!(channel.connection_type, ConnectionType::Socket);
        assert_eq!(channel.compression_type, CompressionType::Lz4);
        assert_eq!(channel.high_water_mark, 10);
        assert_eq!(channel.connection_ping_timeout, 45);
        assert_eq!(target.channels["Channel_2"].host, "backup");

        assert_eq!(target.loggers["Logger_1"].severity, LoggerLevel::Trace);
        assert!(target.dictionaries["Dictionary_1"].is_local_dictionary);
        assert!(target.error_log.is_empty());
    }

    #[test]
    fn test_unknown_element_logs_one_error() {
        let xml = r#"<EmaConfig><ConsumerGroup><ConsumerList><Consumer>
            <Name value="Consumer_1"/>
            <NotARealElement value="1"/>
            <ItemCountHint value="7"/>
        </Consumer></ConsumerList></ConsumerGroup></EmaConfig>"#;
        let target = parse(ConfigRole::Consumer, xml).unwrap();

        assert_eq!(target.error_log.count(), 1);
        let entry = &target.error_log.entries()[0];
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.message, "Unknown Consumer entry element: NotARealElement");
        assert_eq!(target.consumers["Consumer_1"].item_count_hint, 7);
    }

    #[test]
    fn test_unknown_and_foreign_groups() {
        let xml = r#"<EmaConfig>
            <BogusGroup/>
            <ServerGroup><ServerList/></ServerGroup>
        </EmaConfig>"#;
        let target = parse(ConfigRole::Consumer, xml).unwrap();

        assert_eq!(target.error_log.count(), 1);
        assert_eq!(target.error_log.entries()[0].message, "Unknown Group element: BogusGroup");
        assert!(target.servers.is_empty());
    }

    #[test]
    fn test_channel_set_precedence_modes() {
        let xml = r#"<EmaConfig><ConsumerGroup><ConsumerList><Consumer>
            <Name value="Consumer_1"/>
            <ChannelSet value="Channel_1, Channel_2"/>
            <Channel value="Channel_3"/>
        </Consumer></ConsumerList></ConsumerGroup></EmaConfig>"#;

        let wins = parse(ConfigRole::Consumer, xml).unwrap();
        assert_eq!(
            wins.consumers["Consumer_1"].channel_set.as_slice(),
            ["Channel_1", "Channel_2"]
        );

        let mut legacy = ConfigTarget::new(ConfigRole::Consumer)
            .with_channel_set_precedence(ChannelSetPrecedence::Legacy);
        XmlConfigParser::from_str(xml).unwrap().parse_into(&mut legacy).unwrap();
        assert_eq!(legacy.consumers["Consumer_1"].channel_set.as_slice(), ["Channel_3"]);
    }

    #[test]
    fn test_document_errors() {
        assert_eq!(
            XmlConfigParser::from_str("").unwrap_err().message(),
            "XML Parsing failed."
        );
        assert!(
            XmlConfigParser::from_str("<EmaConfig>")
                .unwrap_err()
                .message()
                .starts_with("Error parsing XML file.")
        );
        assert_eq!(
            XmlConfigParser::from_str("<Config/>").unwrap_err().message(),
            "Error parsing XML file. Root element is not \"EmaConfig\""
        );
    }

    #[derive(Clone, Default)]
    struct CapturedOutput(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_emits_tracing_events() {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let xml = r#"<EmaConfig><ChannelGroup><ChannelList><Channel>
            <Name value="Channel_1"/>
            <Port value="14010"/>
        </Channel></ChannelList></ChannelGroup></EmaConfig>"#;

        tracing::subscriber::with_default(subscriber, || {
            parse(ConfigRole::Consumer, xml).unwrap();
        });

        let text = String::from_utf8(output.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("parsing XML group"));
        assert!(text.contains("creating record"));
        assert!(text.contains("applying element"));
        assert!(text.contains("Port"));
    }

    #[test]
    fn test_structural_errors() {
        let missing_list = "<EmaConfig><ConsumerGroup/></EmaConfig>";
        assert_eq!(
            parse(ConfigRole::Consumer, missing_list).unwrap_err().message(),
            "Missing ConsumerList node"
        );

        let empty_lists = [
            (
                ConfigRole::Consumer,
                "<ConsumerGroup><ConsumerList/></ConsumerGroup>",
                "Missing Consumers in the ConsumerList",
            ),
            (
                ConfigRole::NiProvider,
                "<NiProviderGroup><NiProviderList/></NiProviderGroup>",
                "Missing NiProviders in the NiProviderList",
            ),
            (
                ConfigRole::Consumer,
                "<ChannelGroup><ChannelList><Name value=\"C\"/></ChannelList></ChannelGroup>",
                "Missing Channel element(s).",
            ),
            (
                ConfigRole::IProvider,
                "<ServerGroup><ServerList/></ServerGroup>",
                "Missing Server element(s).",
            ),
            (
                ConfigRole::Consumer,
                "<LoggerGroup><LoggerList/></LoggerGroup>",
                "Missing Logger element",
            ),
            (
                ConfigRole::Consumer,
                "<SessionChannelGroup><SessionChannelList/></SessionChannelGroup>",
                "Missing SessionChannelInfo element",
            ),
            (
                ConfigRole::NiProvider,
                "<DirectoryGroup><DirectoryList/></DirectoryGroup>",
                "Missing Directory element",
            ),
        ];
        for (role, group, message) in empty_lists {
            let xml = format!("<EmaConfig>{group}</EmaConfig>");
            assert_eq!(parse(role, &xml).unwrap_err().message(), message);
        }

        let missing_default_value =
            "<EmaConfig><ConsumerGroup><DefaultConsumer/><ConsumerList/></ConsumerGroup></EmaConfig>";
        assert_eq!(
            parse(ConfigRole::Consumer, missing_default_value).unwrap_err().message(),
            "Missing Default Consumer Value attribute"
        );

        let missing_name = "<EmaConfig><ChannelGroup><ChannelList><Channel><Port value=\"1\"/></Channel></ChannelList></ChannelGroup></EmaConfig>";
        assert_eq!(
            parse(ConfigRole::Consumer, missing_name).unwrap_err().message(),
            "Missing Name element in the Channel Name"
        );

        let missing_name_value = "<EmaConfig><LoggerGroup><LoggerList><Logger><Name/></Logger></LoggerList></LoggerGroup></EmaConfig>";
        assert_eq!(
            parse(ConfigRole::Consumer, missing_name_value).unwrap_err().message(),
            "Missing value attribute in the Logger Name element"
        );
    }

    #[test]
    fn test_value_errors() {
        let missing_value = "<EmaConfig><ChannelGroup><ChannelList><Channel><Name value=\"C\"/><Port/></Channel></ChannelList></ChannelGroup></EmaConfig>";
        assert_eq!(
            parse(ConfigRole::Consumer, missing_value).unwrap_err().message(),
            "Missing value attribute in the Channel Port element"
        );

        let bad_number = "<EmaConfig><ChannelGroup><ChannelList><Channel><Name value=\"C\"/><HighWaterMark value=\"-4\"/></Channel></ChannelList></ChannelGroup></EmaConfig>";
        assert_eq!(
            parse(ConfigRole::Consumer, bad_number).unwrap_err().message(),
            "The value attribute in the Channel HighWaterMark element is incorrectly formatted. Correct format is an unsigned numeric string."
        );

        let bad_bool = "<EmaConfig><ChannelGroup><ChannelList><Channel><Name value=\"C\"/><TcpNodelay value=\"yes\"/></Channel></ChannelList></ChannelGroup></EmaConfig>";
        assert_eq!(
            parse(ConfigRole::Consumer, bad_bool).unwrap_err().message(),
            "The value attribute in the Channel TcpNodelay element is incorrectly formatted. Correct values are: \"0\" or \"1\"."
        );

        let bad_enum_form = "<EmaConfig><ChannelGroup><ChannelList><Channel><Name value=\"C\"/><CompressionType value=\"LZ4\"/></Channel></ChannelList></ChannelGroup></EmaConfig>";
        let err = parse(ConfigRole::Consumer, bad_enum_form).unwrap_err();
        assert!(err.message().starts_with(
            "The value attribute in the Channel CompressionType element is incorrectly formatted."
        ));
    }

    #[test]
    fn test_directory_group() {
        let xml = r#"<EmaConfig>
          <DirectoryGroup>
            <DefaultDirectory value="Directory_1"/>
            <DirectoryList>
              <Directory>
                <Name value="Directory_1"/>
                <Service>
                  <Name value="TEST_NI_PUB"/>
                  <InfoFilter>
                    <Vendor value="company name"/>
                    <IsSource value="0"/>
                    <Capabilities>
                      <CapabilitiesEntry value="MMT_MARKET_PRICE"/>
                      <CapabilitiesEntry value="7"/>
                      <CapabilitiesEntry value="6"/>
                    </Capabilities>
                    <DictionariesProvided>
                      <DictionariesProvidedEntry value="Dictionary_3"/>
                    </DictionariesProvided>
                    <QoS>
                      <QoSEntry>
                        <Timeliness value="Timeliness::RealTime"/>
                        <Rate value="Rate::TickByTick"/>
                      </QoSEntry>
                      <QoSEntry>
                        <Timeliness value="100"/>
                        <Rate value="Rate::JustInTimeConflated"/>
                      </QoSEntry>
                    </QoS>
                  </InfoFilter>
                  <StateFilter>
                    <ServiceState value="1"/>
                    <AcceptingRequests value="1"/>
                    <Status>
                      <StreamState value="StreamState::Open"/>
                      <DataState value="DataState::Suspect"/>
                      <StatusCode value="StatusCode::None"/>
                      <StatusText value=""/>
                    </Status>
                  </StateFilter>
                  <LoadFilter>
                    <OpenLimit value="5000"/>
                  </LoadFilter>
                </Service>
                <Service>
                  <Name value="NI_PUB"/>
                  <InfoFilter>
                    <ServiceId value="0"/>
                  </InfoFilter>
                </Service>
              </Directory>
            </DirectoryList>
          </DirectoryGroup>
        </EmaConfig>"#;
        let target = parse(ConfigRole::NiProvider, xml).unwrap();

        assert_eq!(target.default_directory.as_deref(), Some("Directory_1"));
        assert_eq!(target.first_configured_directory.as_deref(), Some("Directory_1"));

        let directory = &target.directories["Directory_1"];
        let service = directory.service("TEST_NI_PUB").unwrap();
        assert_eq!(service.service_id, Some(1));
        assert_eq!(service.info.vendor.as_deref(), Some("company name"));
        assert_eq!(service.info.is_source, Some(false));
        assert_eq!(service.info.capabilities.as_slice(), [6, 7]);
        assert_eq!(service.info.dictionaries_provided.as_slice(), ["Dictionary_3"]);
        assert_eq!(service.info.qos.len(), 2);
        assert_eq!(service.info.qos[1].timeliness, 100);
        assert_eq!(service.state.accepting_requests, Some(true));
        assert_eq!(
            service.state.status.as_ref().unwrap().data_state,
            ema_core::DataState::Suspect
        );
        assert_eq!(service.load.open_limit, Some(5000));
        assert_eq!(service.load.load_factor, None);
        assert_eq!(directory.service("NI_PUB").unwrap().service_id, Some(0));
    }

    #[test]
    fn test_duplicate_service_ids() {
        let xml = r#"<EmaConfig><DirectoryGroup><DirectoryList><Directory>
            <Name value="D"/>
            <Service><Name value="A"/><InfoFilter><ServiceId value="3"/></InfoFilter></Service>
            <Service><Name value="B"/><InfoFilter><ServiceId value="3"/></InfoFilter></Service>
        </Directory></DirectoryList></DirectoryGroup></EmaConfig>"#;
        let err = parse(ConfigRole::IProvider, xml).unwrap_err();
        assert_eq!(
            err.message(),
            "service[B] specifies the same ServiceId (value of 3) as already specified by another service."
        );
    }

    #[test]
    fn test_bad_qos_text() {
        let xml = r#"<EmaConfig><DirectoryGroup><DirectoryList><Directory>
            <Name value="D"/>
            <Service><Name value="A"/><InfoFilter><QoS><QoSEntry>
                <Timeliness value="RealTime"/>
            </QoSEntry></QoS></InfoFilter></Service>
        </Directory></DirectoryList></DirectoryGroup></EmaConfig>"#;
        let err = parse(ConfigRole::IProvider, xml).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid QoS Timeliness string format. Correct format is \"Timeliness::<RealTime or InexactDelayed>\"."
        );
    }

    #[test]
    fn test_missing_default_file_is_empty() {
        let parser = XmlConfigParser::load(Some(Path::new("/nonexistent/EmaConfig.xml")));
        assert!(
            parser
                .unwrap_err()
                .message()
                .starts_with("Could not load the configured XML file.")
        );

        let empty = XmlConfigParser::default();
        assert!(empty.is_empty());
        let mut target = ConfigTarget::new(ConfigRole::Consumer);
        empty.parse_into(&mut target).unwrap();
        assert!(target.consumers.is_empty());
    }

    proptest! {
        #[test]
        fn prop_unsigned_values_parse(mark in any::<u32>(), padded in any::<bool>()) {
            let value = if padded { format!(" {mark} ") } else { mark.to_string() };
            let xml = format!(
                "<EmaConfig><ChannelGroup><ChannelList><Channel><Name value=\"C\"/><HighWaterMark value=\"{value}\"/></Channel></ChannelList></ChannelGroup></EmaConfig>"
            );
            let target = parse(ConfigRole::Consumer, &xml).unwrap();
            prop_assert_eq!(target.channels["C"].high_water_mark, mark);
        }
    }
}
