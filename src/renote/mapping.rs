//! # Note Mapping
//!
//! The ordered `old identifier → new identifier` table that drives every
//! substitution. Order is the order in which identifiers were first found in the
//! definition document, and that order survives a round trip through the
//! persisted JSON file.
//!
//! The table is a plain vector of pairs. Lookups are linear, which is fine for
//! the few hundred notes a document carries, and there is no hash map whose
//! iteration order could leak into the output.

use crate::error::Result;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMapping {
    entries: Vec<(String, String)>,
}

impl NoteMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns `false` and leaves the table untouched if the
    /// key is already present.
    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) -> bool {
        let old = old.into();
        if self.contains(&old) {
            return false;
        }
        self.entries.push((old, new.into()));
        true
    }

    pub fn get(&self, old: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == old)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, old: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == old)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when every key maps to itself.
    pub fn is_identity(&self) -> bool {
        self.entries.iter().all(|(k, v)| k == v)
    }

    /// Entries whose key differs from its value, in mapping order.
    pub fn drifted(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(k, v)| k != v)
    }

    /// Pretty JSON: four-space indent, insertion order, non-ASCII verbatim.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NoteMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = NoteMapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl Serialize for NoteMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for NoteMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor)
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = NoteMapping;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping old note identifiers to new ones")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut mapping = NoteMapping::new();
        while let Some((old, new)) = access.next_entry::<String, String>()? {
            if !mapping.insert(old.clone(), new) {
                return Err(de::Error::custom(format!("duplicate identifier '{}'", old)));
            }
        }
        Ok(mapping)
    }
}
