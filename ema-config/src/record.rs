/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! The contract shared by every named configuration record.

use crate::value::ElementValue;
use ema_core::Result;
use std::fmt::Debug;

/// A named, defaultable record populated element by element.
///
/// Parsers look a record up by name, create it with [`ConfigRecord::named`]
/// when absent, then feed each recognized element through
/// [`ConfigRecord::apply`]. Fields the source does not mention are left
/// untouched, which is what makes layering XML and programmatic input work.
pub trait ConfigRecord: Clone + Debug + Default + PartialEq {
    /// Closed set of element tags this record accepts.
    type Tag: Copy + Debug;

    /// Item label used in diagnostics, e.g. `"Consumer"`.
    const KIND: &'static str;

    /// Creates a record with default field values and the given name.
    fn named(name: impl Into<String>) -> Self;

    /// Returns the record name.
    fn name(&self) -> &str;

    /// Tokenizes an element name into this record's tag set.
    fn tag(element: &str) -> Option<Self::Tag>;

    /// Applies one element to the record.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the value cannot be coerced; the
    /// field is left unchanged in that case.
    fn apply<V: ElementValue>(&mut self, tag: Self::Tag, value: &V) -> Result<()>;

    /// Resets every field except the name to its default.
    fn clear(&mut self);

    /// Resets every field, including the name.
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Overwrites `dest` with a deep copy of this record.
    fn copy_to(&self, dest: &mut Self) {
        dest.clone_from(self);
    }
}
