/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field and enumeration dictionary configuration.

use crate::record::ConfigRecord;
use crate::tag::DictionaryTag;
use crate::value::ElementValue;
use ema_core::{DictionaryMode, Result};
use serde::{Deserialize, Serialize};

/// Configuration of a named dictionary source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Dictionary name.
    pub name: String,
    /// Where the dictionary is loaded from.
    pub dictionary_type: DictionaryMode,
    /// True when `dictionary_type` is [`DictionaryMode::File`].
    pub is_local_dictionary: bool,
    /// Enumeration table file.
    pub enum_type_def_file_name: String,
    /// Enumeration table item requested over the channel.
    pub enum_type_def_item_name: String,
    /// Field dictionary file.
    pub rdm_field_dictionary_file_name: String,
    /// Field dictionary item requested over the channel.
    pub rdm_field_dictionary_item_name: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl DictionaryConfig {
    /// Creates a dictionary with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dictionary_type: DictionaryMode::Channel,
            is_local_dictionary: false,
            enum_type_def_file_name: "./enumtype.def".to_string(),
            enum_type_def_item_name: "RWFEnum".to_string(),
            rdm_field_dictionary_file_name: "./RDMFieldDictionary".to_string(),
            rdm_field_dictionary_item_name: "RWFFld".to_string(),
        }
    }

    /// Sets the dictionary source, keeping `is_local_dictionary` in step.
    pub fn set_dictionary_type(&mut self, mode: DictionaryMode) {
        self.dictionary_type = mode;
        self.is_local_dictionary = mode == DictionaryMode::File;
    }
}

impl ConfigRecord for DictionaryConfig {
    type Tag = DictionaryTag;
    const KIND: &'static str = "Dictionary";

    fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tag(element: &str) -> Option<DictionaryTag> {
        DictionaryTag::from_name(element)
    }

    fn apply<V: ElementValue>(&mut self, tag: DictionaryTag, value: &V) -> Result<()> {
        match tag {
            DictionaryTag::DictionaryType => self.set_dictionary_type(value.enumeration()?),
            DictionaryTag::EnumTypeDefFileName => self.enum_type_def_file_name = value.ascii()?,
            DictionaryTag::EnumTypeDefItemName => self.enum_type_def_item_name = value.ascii()?,
            DictionaryTag::RdmFieldDictionaryFileName => {
                self.rdm_field_dictionary_file_name = value.ascii()?;
            }
            DictionaryTag::RdmFieldDictionaryItemName => {
                self.rdm_field_dictionary_item_name = value.ascii()?;
            }
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
    use crate::value::testing::text;

    #[test]
    fn test_dictionary_type_sets_local_flag() {
        let mut dictionary = DictionaryConfig::new("Dictionary_1");
        assert!(!dictionary.is_local_dictionary);

        dictionary
            .apply(
                DictionaryTag::DictionaryType,
                &text("DictionaryType", "DictionaryType::FileDictionary"),
            )
            .unwrap();
        assert_eq!(dictionary.dictionary_type, DictionaryMode::File);
        assert!(dictionary.is_local_dictionary);

        dictionary
            .apply(
                DictionaryTag::DictionaryType,
                &text("DictionaryType", "DictionaryType::ChannelDictionary"),
            )
            .unwrap();
        assert!(!dictionary.is_local_dictionary);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut dictionary = DictionaryConfig::new("D");
        dictionary.set_dictionary_type(DictionaryMode::File);
        dictionary.rdm_field_dictionary_file_name = "/tmp/fields".to_string();

        dictionary.clear();
        let first = dictionary.clone();
        dictionary.clear();
        assert_eq!(dictionary, first);
        assert_eq!(dictionary.rdm_field_dictionary_item_name, "RWFFld");
    }
}
