//! Ordered per-port constraint attributes.

use crate::io_types::{IoStandardKind, DEFAULT_IO_TYPE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attributes attached to a physical port, in the order they were supplied.
///
/// Every pair is emitted verbatim on the port's `IOBUF` directive. The
/// `IO_TYPE` key additionally selects the electrical standard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attrs(IndexMap<String, String>);

impl Attrs {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builds an attribute set from key/value pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Sets an attribute; a replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates over key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the `IO_TYPE`, or [`DEFAULT_IO_TYPE`] if it is not set.
    pub fn io_type(&self) -> &str {
        self.get("IO_TYPE").unwrap_or(DEFAULT_IO_TYPE)
    }

    /// Classifies the effective `IO_TYPE`; `None` if it is not a known standard.
    pub fn io_standard_kind(&self) -> Option<IoStandardKind> {
        IoStandardKind::of(self.io_type())
    }
}

impl From<IndexMap<String, String>> for Attrs {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let attrs = Attrs::from_pairs([("SLEWRATE", "FAST"), ("IO_TYPE", "LVCMOS33"), ("DRIVE", "4")]);
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["SLEWRATE", "IO_TYPE", "DRIVE"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut attrs = Attrs::from_pairs([("IO_TYPE", "LVCMOS33"), ("DRIVE", "4")]);
        attrs.insert("IO_TYPE", "LVCMOS18");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("IO_TYPE", "LVCMOS18"), ("DRIVE", "4")]);
    }

    #[test]
    fn io_type_defaults() {
        assert_eq!(Attrs::new().io_type(), "LVCMOS25");
        assert_eq!(Attrs::new().io_standard_kind(), Some(IoStandardKind::SingleEnded));
        let attrs = Attrs::from_pairs([("IO_TYPE", "SUBLVDS")]);
        assert_eq!(attrs.io_standard_kind(), Some(IoStandardKind::Differential));
        let attrs = Attrs::from_pairs([("IO_TYPE", "LVDS33")]);
        assert_eq!(attrs.io_standard_kind(), None);
    }

    #[test]
    fn serde_is_a_plain_map() {
        let attrs: Attrs = serde_json::from_str(r#"{"IO_TYPE":"LVDS","DIFFRESISTOR":"100"}"#).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("DIFFRESISTOR"), Some("100"));
        assert_eq!(
            serde_json::to_string(&attrs).unwrap(),
            r#"{"IO_TYPE":"LVDS","DIFFRESISTOR":"100"}"#
        );
    }
}
