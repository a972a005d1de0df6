/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Active-configuration resolution shared by every configuration object.
//!
//! Resolution picks the records one session will run with, deep-copies
//! them out of the parse target and substitutes built-in defaults for
//! anything that was never configured.

use crate::overrides::ConnectionOverrides;
use ema_config::{
    ChannelConfig, ChannelSet, ConfigRecord, ConfigRole, ConfigTarget, DictionaryConfig,
    DirectoryConfig, Qos, Registry,
};
use ema_core::{ConfigError, ConfigErrorLog, Result, Severity};
use indexmap::IndexSet;

/// Consumer used when none is configured.
pub const DEFAULT_CONSUMER_NAME: &str = "DefaultEmaConsumer";
/// Non-interactive provider used when none is configured.
pub const DEFAULT_NI_PROVIDER_NAME: &str = "DefaultEmaNiProvider";
/// Interactive provider used when none is configured.
pub const DEFAULT_IPROVIDER_NAME: &str = "DefaultEmaIProvider";
/// Channel created when a channel set is empty.
pub const DEFAULT_CHANNEL_NAME: &str = "DefaultEmaChannel";
/// Server used when an interactive provider names none.
pub const DEFAULT_SERVER_NAME: &str = "DefaultEmaServer";
/// Logger used when none is referenced.
pub const DEFAULT_LOGGER_NAME: &str = "DefaultEmaLogger";
/// Dictionary used when none is referenced.
pub const DEFAULT_DICTIONARY_NAME: &str = "DefaultEmaDictionary";
/// Directory generated when a provider has none.
pub const DEFAULT_DIRECTORY_NAME: &str = "DefaultEmaDirectory";

/// Service advertised by the generated non-interactive directory.
pub const DEFAULT_NI_SERVICE_NAME: &str = "NI_PUB";
/// Service advertised by the generated interactive directory.
pub const DEFAULT_IPROVIDER_SERVICE_NAME: &str = "DIRECT_FEED";

// MARKET_PRICE, MARKET_BY_ORDER, MARKET_BY_PRICE, MARKET_MAKER
const DEFAULT_CAPABILITIES: [u64; 4] = [6, 7, 8, 9];
const MMT_DICTIONARY: u64 = 5;
const DEFAULT_DICTIONARY_ITEMS: [&str; 2] = ["RWFFld", "RWFEnum"];

/// Options for one active-configuration resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveConfigOptions {
    /// Suffix the instance name with a per-object counter.
    pub generate_instance_id: bool,
}

impl Default for ActiveConfigOptions {
    fn default() -> Self {
        Self {
            generate_instance_id: true,
        }
    }
}

/// Which channel set of a session is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChannelScope {
    /// The role's own channel set: host override and default channel apply.
    Primary,
    /// A session channel's set: only proxy overrides apply.
    Session,
}

/// Error for a reference one record makes to a record that does not exist.
pub(crate) fn undefined_reference(
    kind: &str,
    name: &str,
    owner_kind: &str,
    owner: &str,
    config: &str,
) -> ConfigError {
    ConfigError::invalid(format!(
        "{kind} {name} in {owner_kind} {owner} is not defined in this {config}"
    ))
}

/// Checks that the explicitly selected and the default item exist.
///
/// # Arguments
/// * `registry` - Records of the role
/// * `selected` - Name set on the configuration object and its setter
/// * `default` - Name from the group's `Default{kind}` and its label
/// * `kind` - Item label, e.g. `"Consumer"`
/// * `config` - Owning object label, e.g. `"OmmConsumerConfig"`
pub(crate) fn verify_selection<R>(
    registry: &Registry<R>,
    selected: (Option<&str>, &str),
    default: (Option<&str>, &str),
    kind: &str,
    config: &str,
) -> Result<()> {
    if let (Some(name), setter) = selected
        && !registry.contains_key(name)
    {
        return Err(ConfigError::invalid(format!(
            "{kind} {name} set by {config}.{setter} is not defined in this {config}"
        )));
    }
    if let (Some(name), label) = default
        && !registry.contains_key(name)
    {
        return Err(ConfigError::invalid(format!(
            "Default {label} {name} is not defined in this {config}"
        )));
    }
    Ok(())
}

/// Returns the first name of `set` with no record in `registry`.
pub(crate) fn first_undefined<'a, R>(
    set: &'a ChannelSet,
    registry: &Registry<R>,
) -> Option<&'a str> {
    set.iter()
        .map(String::as_str)
        .find(|name| !registry.contains_key(*name))
}

/// Returns the first candidate present in `registry`, or a defaulted
/// record named `fallback`.
pub(crate) fn select_record<R: ConfigRecord>(
    registry: &Registry<R>,
    candidates: [Option<&str>; 3],
    fallback: &str,
) -> R {
    candidates
        .into_iter()
        .flatten()
        .find_map(|name| registry.get(name))
        .cloned()
        .unwrap_or_else(|| R::named(fallback))
}

/// Copies the record `reference` names, defaulting an empty reference.
///
/// An empty reference is rewritten to `fallback`; a fallback missing from
/// the registry resolves to a defaulted record.
pub(crate) fn resolve_named<R: ConfigRecord>(
    reference: &mut String,
    registry: &Registry<R>,
    fallback: &str,
    undefined: impl FnOnce(&str) -> ConfigError,
) -> Result<R> {
    if reference.is_empty() {
        *reference = fallback.to_string();
    }
    match registry.get(reference.as_str()) {
        Some(record) => Ok(record.clone()),
        None if reference.as_str() == fallback => Ok(R::named(fallback)),
        None => Err(undefined(reference)),
    }
}

/// Copies the channels of a channel set in set order.
///
/// For the primary scope an overriding host truncates the set to its
/// first channel and an empty set gains [`DEFAULT_CHANNEL_NAME`].
pub(crate) fn resolve_channels(
    set: &mut ChannelSet,
    registry: &Registry<ChannelConfig>,
    overrides: &ConnectionOverrides,
    scope: ChannelScope,
    undefined: impl Fn(&str) -> ConfigError,
) -> Result<Registry<ChannelConfig>> {
    if scope == ChannelScope::Primary {
        if overrides.host_port().is_some() {
            set.truncate(1);
        }
        if set.is_empty() {
            set.push(DEFAULT_CHANNEL_NAME.to_string());
        }
    }

    let mut resolved = Registry::with_capacity(set.len());
    for name in set.iter() {
        let mut channel = match registry.get(name) {
            Some(channel) => channel.clone(),
            None if name == DEFAULT_CHANNEL_NAME => ChannelConfig::new(DEFAULT_CHANNEL_NAME),
            None => return Err(undefined(name)),
        };
        if scope == ChannelScope::Primary {
            overrides.pin_channel(&mut channel);
        }
        overrides.apply_proxy(&mut channel);
        resolved.insert(name.clone(), channel);
    }
    Ok(resolved)
}

/// Copies the directory a provider runs with.
///
/// The provider's own reference wins, then the default directory, then
/// the first configured one. With none of them a directory holding the
/// role's default service is generated.
pub(crate) fn resolve_directory(
    reference: &mut String,
    target: &ConfigTarget,
    undefined: impl FnOnce(&str) -> ConfigError,
) -> Result<(DirectoryConfig, bool)> {
    if !reference.is_empty() {
        return target
            .directories
            .get(reference.as_str())
            .cloned()
            .map(|directory| (directory, false))
            .ok_or_else(|| undefined(reference));
    }

    let configured = [
        target.default_directory.as_deref(),
        target.first_configured_directory.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(|name| target.directories.get(name));

    let (directory, generated) = match configured {
        Some(directory) => (directory.clone(), false),
        None => (default_directory(target.role), true),
    };
    reference.clone_from(&directory.name);
    Ok((directory, generated))
}

/// Copies every dictionary the directory's services provide or use.
///
/// Names with no matching record resolve to defaulted dictionaries and
/// leave a warning in `log`.
pub(crate) fn resolve_directory_dictionaries(
    directory: &DirectoryConfig,
    registry: &Registry<DictionaryConfig>,
    log: &mut ConfigErrorLog,
) -> Registry<DictionaryConfig> {
    let names: IndexSet<&str> = directory
        .services
        .values()
        .flat_map(|service| {
            service
                .info
                .dictionaries_provided
                .iter()
                .chain(service.info.dictionaries_used.iter())
        })
        .map(String::as_str)
        .collect();

    let mut resolved = Registry::with_capacity(names.len());
    for name in names {
        let dictionary = registry.get(name).cloned().unwrap_or_else(|| {
            log.add(
                format!(
                    "no configuration exists for dictionary [{name}] in directory [{}]. Will use dictionary defaults",
                    directory.name
                ),
                Severity::Warning,
            );
            DictionaryConfig::new(name)
        });
        resolved.insert(name.to_string(), dictionary);
    }
    resolved
}

/// Builds the directory a provider advertises when none is configured.
#[must_use]
pub fn default_directory(role: ConfigRole) -> DirectoryConfig {
    let interactive = role == ConfigRole::IProvider;
    let (name, id) = if interactive {
        (DEFAULT_IPROVIDER_SERVICE_NAME, 1)
    } else {
        (DEFAULT_NI_SERVICE_NAME, 0)
    };

    let mut directory = DirectoryConfig::new(DEFAULT_DIRECTORY_NAME);
    let service = directory.service_entry(name);
    service.service_id = Some(id);
    service.state.accepting_requests = Some(interactive);
    service.info.vendor = Some(String::new());
    service.info.item_list = Some(String::new());
    service.info.is_source = Some(false);
    service.info.accepting_consumer_status = Some(false);
    service.info.supports_qos_range = Some(interactive);
    service.info.supports_out_of_band_snapshots = Some(false);
    if interactive {
        service.add_capability(MMT_DICTIONARY);
        for item in DEFAULT_DICTIONARY_ITEMS {
            service.add_dictionary_provided(item);
        }
    }
    for capability in DEFAULT_CAPABILITIES {
        service.add_capability(capability);
    }
    for item in DEFAULT_DICTIONARY_ITEMS {
        service.add_dictionary_used(item);
    }
    service.add_qos(Qos::default());
    directory
}

/// Returns the instance name of the `ordinal`th resolution.
pub(crate) fn instance_name(name: &str, ordinal: u32, options: ActiveConfigOptions) -> String {
    if options.generate_instance_id {
        format!("{name}_{ordinal}")
    } else {
        name.to_string()
    }
}
