/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Decoded container model for programmatic configuration.
//!
//! Programmatic configuration arrives as an already-decoded tree of maps,
//! element lists, arrays and series. This module models that tree:
//! - [`ConfigMap`]: keyed container whose entries carry a payload
//! - [`ElementList`]: ordered list of named entries
//! - [`ConfigValue`]: every primitive and container payload, including blank
//!
//! The builders here are how applications (and tests) assemble the tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire data type of a value or map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// ASCII string.
    Ascii,
    /// Unsigned integer.
    UInt,
    /// Signed integer.
    Int,
    /// Enumeration code.
    Enum,
    /// Map container.
    Map,
    /// Element list container.
    ElementList,
    /// Array of primitives.
    Array,
    /// Series of element lists.
    Series,
}

impl DataType {
    /// Returns the canonical wire type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascii => "ASCII_STRING",
            Self::UInt => "UINT",
            Self::Int => "INT",
            Self::Enum => "ENUM",
            Self::Map => "MAP",
            Self::ElementList => "ELEMENT_LIST",
            Self::Array => "ARRAY",
            Self::Series => "SERIES",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigValue {
    /// ASCII string.
    Ascii(String),
    /// Unsigned integer.
    UInt(u64),
    /// Signed integer.
    Int(i64),
    /// Enumeration code.
    Enum(u16),
    /// Nested map.
    Map(ConfigMap),
    /// Nested element list.
    ElementList(ElementList),
    /// Array of primitives.
    Array(Vec<ConfigValue>),
    /// Series of element lists.
    Series(Vec<ElementList>),
    /// Present but carrying no value.
    Blank(DataType),
}

impl ConfigValue {
    /// Returns the wire type of this value.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Ascii(_) => DataType::Ascii,
            Self::UInt(_) => DataType::UInt,
            Self::Int(_) => DataType::Int,
            Self::Enum(_) => DataType::Enum,
            Self::Map(_) => DataType::Map,
            Self::ElementList(_) => DataType::ElementList,
            Self::Array(_) => DataType::Array,
            Self::Series(_) => DataType::Series,
            Self::Blank(ty) => *ty,
        }
    }

    /// Returns true if this is the blank marker.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    /// Returns the string, if this is a non-blank ASCII value.
    #[must_use]
    pub fn as_ascii(&self) -> Option<&str> {
        match self {
            Self::Ascii(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a u64, if this is a UInt variant.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an i64, if this is an Int variant.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the code, if this is an Enum variant.
    #[must_use]
    pub const fn as_enum(&self) -> Option<u16> {
        match self {
            Self::Enum(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the nested map, if this is a Map variant.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the nested element list, if this is an ElementList variant.
    #[must_use]
    pub const fn as_element_list(&self) -> Option<&ElementList> {
        match self {
            Self::ElementList(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the items, if this is an Array variant.
    #[must_use]
    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the rows, if this is a Series variant.
    #[must_use]
    pub fn as_series(&self) -> Option<&[ElementList]> {
        match self {
            Self::Series(rows) => Some(rows),
            _ => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::Ascii(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::Ascii(s)
    }
}

impl From<u64> for ConfigValue {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(m: ConfigMap) -> Self {
        Self::Map(m)
    }
}

impl From<ElementList> for ConfigValue {
    fn from(l: ElementList) -> Self {
        Self::ElementList(l)
    }
}

/// A named entry of an [`ElementList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementEntry {
    /// Entry name.
    pub name: String,
    /// Entry payload.
    pub value: ConfigValue,
}

/// Ordered list of named entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementList {
    entries: Vec<ElementEntry>,
}

impl ElementList {
    /// Creates an empty element list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends an unsigned integer entry.
    #[must_use]
    pub fn with_uint(self, name: impl Into<String>, value: u64) -> Self {
        self.with(name, ConfigValue::UInt(value))
    }

    /// Appends a signed integer entry.
    #[must_use]
    pub fn with_int(self, name: impl Into<String>, value: i64) -> Self {
        self.with(name, ConfigValue::Int(value))
    }

    /// Appends an enumeration entry.
    #[must_use]
    pub fn with_enum(self, name: impl Into<String>, code: u16) -> Self {
        self.with(name, ConfigValue::Enum(code))
    }

    /// Appends an entry in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.push(ElementEntry {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Returns an iterator over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ElementEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ElementList {
    type Item = &'a ElementEntry;
    type IntoIter = std::slice::Iter<'a, ElementEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A keyed entry of a [`ConfigMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    /// Entry key.
    pub key: ConfigValue,
    /// Entry payload.
    pub value: ConfigValue,
}

impl MapEntry {
    /// Returns the key text when the key is a non-blank ASCII string.
    #[must_use]
    pub fn ascii_key(&self) -> Option<&str> {
        self.key.as_ascii()
    }
}

/// Keyed container with a declared key type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMap {
    key_type: DataType,
    entries: Vec<MapEntry>,
}

impl Default for ConfigMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigMap {
    /// Creates an empty map with ASCII keys.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_key_type(DataType::Ascii)
    }

    /// Creates an empty map with the given key type.
    #[must_use]
    pub const fn with_key_type(key_type: DataType) -> Self {
        Self {
            key_type,
            entries: Vec::new(),
        }
    }

    /// Appends an entry keyed by an ASCII string.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.push(ConfigValue::Ascii(key.into()), value);
        self
    }

    /// Appends an entry with an arbitrary key.
    #[must_use]
    pub fn with_entry(mut self, key: ConfigValue, value: impl Into<ConfigValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends an entry in place.
    pub fn push(&mut self, key: ConfigValue, value: impl Into<ConfigValue>) {
        self.entries.push(MapEntry {
            key,
            value: value.into(),
        });
    }

    /// Returns the declared key type.
    #[must_use]
    pub const fn key_type(&self) -> DataType {
        self.key_type
    }

    /// Returns an iterator over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, MapEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConfigMap {
    type Item = &'a MapEntry;
    type IntoIter = std::slice::Iter<'a, MapEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
