//! `serde` support for field values and records.

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::fields::FieldValue;
use crate::record::{Extraction, Record, SkippedRow};

/// Serializes the source text of the value, or `null` for `NULL`.
impl Serialize for FieldValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_none(),
        }
    }
}

/// Serializes as a map from column name to decoded text, in column order.
impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.entries() {
            match value.text(self.policy()) {
                Some(text) => map.serialize_entry(name, text.as_ref())?,
                None => map.serialize_entry(name, &())?,
            }
        }
        map.end()
    }
}

impl Serialize for SkippedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("SkippedRow", 4)?;
        row.serialize_field("index", &self.index)?;
        row.serialize_field("offset", &self.offset)?;
        row.serialize_field("error", &alloc::format!("{}", self.error))?;
        row.serialize_field("context", &self.context)?;
        row.end()
    }
}

impl Serialize for Extraction<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut extraction = serializer.serialize_struct("Extraction", 2)?;
        extraction.serialize_field("records", &self.records)?;
        extraction.serialize_field("skipped", &self.skipped)?;
        extraction.end()
    }
}
