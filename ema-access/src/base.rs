/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! State shared by the consumer and provider configuration objects.

use crate::overrides::ConnectionOverrides;
use ema_config::{ChannelSetPrecedence, ConfigRole, ConfigTarget};
use ema_core::{ConfigErrorLog, ConfigMap, Result, Severity, TracingSink};
use ema_parser::{ProgrammaticConfigParser, XmlConfigParser};
use std::path::Path;

/// Parsed input plus the overrides set on the owning object.
///
/// The XML source and every applied programmatic map are kept so the
/// target can be rebuilt when parse-time settings change.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConfigBase {
    pub(crate) target: ConfigTarget,
    pub(crate) overrides: ConnectionOverrides,
    xml: XmlConfigParser,
    programmatic: Vec<ConfigMap>,
    resolutions: u32,
}

impl ConfigBase {
    /// Loads the default file, or `path` when given, and parses it.
    pub(crate) fn load(role: ConfigRole, path: Option<&Path>) -> Result<Self> {
        Self::from_parser(role, XmlConfigParser::load(path)?)
    }

    /// Parses in-memory XML text.
    pub(crate) fn from_xml_str(role: ConfigRole, text: &str) -> Result<Self> {
        Self::from_parser(role, text.parse()?)
    }

    fn from_parser(role: ConfigRole, xml: XmlConfigParser) -> Result<Self> {
        let mut base = Self {
            target: ConfigTarget::new(role),
            overrides: ConnectionOverrides::default(),
            xml,
            programmatic: Vec::new(),
            resolutions: 0,
        };
        base.xml.parse_into(&mut base.target)?;
        Ok(base)
    }

    /// Layers a programmatic map over what is already parsed.
    ///
    /// The map is merged into a copy of the target, so a map that fails
    /// partway leaves the target unchanged.
    pub(crate) fn apply_map(&mut self, config: &ConfigMap) -> Result<()> {
        let mut merged = self.target.clone();
        ProgrammaticConfigParser::new(config).parse_into(&mut merged)?;
        self.target = merged;
        self.programmatic.push(config.clone());
        Ok(())
    }

    /// Changes the Channel / ChannelSet resolution and reparses every input.
    pub(crate) fn set_channel_set_precedence(
        &mut self,
        precedence: ChannelSetPrecedence,
    ) -> Result<()> {
        if self.target.channel_set_precedence == precedence {
            return Ok(());
        }
        self.target.channel_set_precedence = precedence;
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<()> {
        self.target.clear();
        self.xml.parse_into(&mut self.target)?;
        for config in &self.programmatic {
            ProgrammaticConfigParser::new(config).parse_into(&mut self.target)?;
        }
        tracing::debug!(
            role = %self.target.role,
            maps = self.programmatic.len(),
            "reparsed configuration"
        );
        Ok(())
    }

    /// Returns the ordinal of the next active-config resolution.
    pub(crate) fn next_resolution(&mut self) -> u32 {
        self.resolutions += 1;
        self.resolutions
    }

    pub(crate) const fn error_log(&self) -> &ConfigErrorLog {
        &self.target.error_log
    }

    /// Forwards every logged diagnostic to `tracing`.
    pub(crate) fn drain_error_log(&self) {
        self.target.error_log.drain(&mut TracingSink, Severity::Trace);
    }

    /// Drops every input, record and override.
    pub(crate) fn clear(&mut self) {
        self.target.clear();
        self.target.channel_set_precedence = ChannelSetPrecedence::default();
        self.overrides.clear();
        self.xml = XmlConfigParser::default();
        self.programmatic.clear();
        self.resolutions = 0;
    }
}
