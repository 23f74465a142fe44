//! Building sections from a JSON document.
//!
//! Screens usually receive their list content as a JSON document from a
//! server. [`SectionLoader`] turns such a document into sections whose type
//! tags are derived from integer kinds, so a [`TypeMap`](crate::handler::TypeMap)
//! like `{ "h1": "HeaderView", "r1": "TextRow", "r2": "ButtonRow" }` can
//! resolve them.
//!
//! # Document Shape
//!
//! ```json
//! {
//!     "payload": [
//!         {
//!             "type": 1,
//!             "title": "Settings",
//!             "records": [
//!                 { "type": 1, "text": "Wi-Fi" },
//!                 { "type": 2, "text": "Bluetooth", "on": true }
//!             ]
//!         }
//!     ]
//! }
//! ```
//!
//! With the default loader this yields one section with header `h1` and
//! rows `r1` and `r2`. Each row's data is its whole record object; the
//! header's data is the whole section object.
//!
//! # Example
//!
//! ```
//! use trellis::payload::SectionLoader;
//!
//! let sections = SectionLoader::default()
//!     .load_str(r#"{ "payload": [ { "type": 2, "records": [ { "type": 1 } ] } ] }"#)
//!     .unwrap();
//!
//! assert_eq!(sections[0].header_type(), Some("h2"));
//! assert_eq!(sections[0].footer_type(), Some("f2"));
//! assert_eq!(sections[0].records()[0].type_tag(), "r1");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_core::logging::targets;
use trellis_core::{Error, Result};

use crate::model::{CellData, Record, Section};

/// Converts JSON documents into sections.
///
/// Every field has a default, so a loader deserializes from an empty table
/// and configuration only needs to name what differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLoader {
    /// Key of the array of section objects in the document.
    pub payload_key: String,
    /// Key of the array of record objects in a section object.
    pub records_key: String,
    /// Key of the integer kind in section and record objects.
    pub kind_key: String,
    /// Prefix of derived row tags.
    pub record_prefix: String,
    /// Prefix of derived header tags.
    pub header_prefix: String,
    /// Prefix of derived footer tags.
    pub footer_prefix: String,
    /// Section kinds that get a header.
    pub header_kinds: Vec<i64>,
    /// Section kinds that get a footer.
    pub footer_kinds: Vec<i64>,
}

impl Default for SectionLoader {
    fn default() -> Self {
        Self {
            payload_key: "payload".to_string(),
            records_key: "records".to_string(),
            kind_key: "type".to_string(),
            record_prefix: "r".to_string(),
            header_prefix: "h".to_string(),
            footer_prefix: "f".to_string(),
            header_kinds: vec![1, 2],
            footer_kinds: vec![2],
        }
    }
}

impl SectionLoader {
    /// Parses `text` as JSON and loads it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed text, otherwise see
    /// [`load`](Self::load).
    pub fn load_str(&self, text: &str) -> Result<Vec<Section>> {
        let document: Value = serde_json::from_str(text)?;
        self.load(&document)
    }

    /// Loads sections from a parsed document.
    ///
    /// Section objects without a records array and records without an
    /// integer kind are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Payload`] if the document is not an object or its
    /// payload is missing or not an array.
    pub fn load(&self, document: &Value) -> Result<Vec<Section>> {
        let Some(object) = document.as_object() else {
            return Err(Error::payload("document is not a JSON object"));
        };
        let Some(payload) = object.get(&self.payload_key) else {
            return Err(Error::payload(format!("missing '{}' array", self.payload_key)));
        };
        let Some(entries) = payload.as_array() else {
            return Err(Error::payload(format!("'{}' is not an array", self.payload_key)));
        };

        let sections: Vec<Section> = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| self.section(index, entry))
            .collect();

        tracing::debug!(
            target: targets::PAYLOAD,
            entries = entries.len(),
            sections = sections.len(),
            "payload loaded"
        );
        Ok(sections)
    }

    fn section(&self, index: usize, entry: &Value) -> Option<Section> {
        let Some(records) = entry.get(&self.records_key).and_then(Value::as_array) else {
            tracing::debug!(target: targets::PAYLOAD, index, "skipping section without records");
            return None;
        };

        let kind = self.kind(entry).unwrap_or(0);
        let mut builder = Section::builder();
        if self.header_kinds.contains(&kind) {
            builder = builder.header(format!("{}{kind}", self.header_prefix), entry.clone());
        }
        if self.footer_kinds.contains(&kind) {
            builder = builder.footer(format!("{}{kind}", self.footer_prefix), entry.clone());
        }

        let rows = records.iter().enumerate().filter_map(|(row, record)| {
            let Some(kind) = self.kind(record) else {
                tracing::debug!(
                    target: targets::PAYLOAD,
                    index,
                    row,
                    "skipping record without kind"
                );
                return None;
            };
            Some(Record::new(
                format!("{}{kind}", self.record_prefix),
                CellData::Json(record.clone()),
            ))
        });
        Some(builder.records(rows).build())
    }

    fn kind(&self, value: &Value) -> Option<i64> {
        value.get(&self.kind_key).and_then(Value::as_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_loader_derives_tags() {
        let document = json!({
            "payload": [
                { "type": 0, "records": [ { "type": 1, "text": "a" } ] },
                { "type": 1, "title": "B", "records": [ { "type": 2 } ] },
                { "type": 2, "records": [] }
            ]
        });

        let sections = SectionLoader::default().load(&document).unwrap();
        assert_eq!(sections.len(), 3);

        assert_eq!(sections[0].header_type(), None);
        assert_eq!(sections[0].footer_type(), None);
        assert_eq!(sections[0].records()[0].type_tag(), "r1");
        assert_eq!(sections[0].records()[0].data().str_field("text"), Some("a"));

        assert_eq!(sections[1].header_type(), Some("h1"));
        assert_eq!(sections[1].header_data().str_field("title"), Some("B"));
        assert_eq!(sections[1].footer_type(), None);

        assert_eq!(sections[2].header_type(), Some("h2"));
        assert_eq!(sections[2].footer_type(), Some("f2"));
        assert!(sections[2].records().is_empty());
    }

    #[test]
    fn test_skips_malformed_entries() {
        let document = json!({
            "payload": [
                { "type": 1 },
                "not a section",
                { "records": [ { "type": "x" }, { "text": "no kind" }, { "type": 3 } ] }
            ]
        });

        let sections = SectionLoader::default().load(&document).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].header_type(), None);
        assert_eq!(sections[0].records().len(), 1);
        assert_eq!(sections[0].records()[0].type_tag(), "r3");
    }

    #[test]
    fn test_rejects_bad_documents() {
        let loader = SectionLoader::default();
        assert!(matches!(loader.load(&json!([1, 2])), Err(Error::Payload { .. })));
        assert!(matches!(loader.load(&json!({ "items": [] })), Err(Error::Payload { .. })));
        assert!(matches!(
            loader.load(&json!({ "payload": { "records": [] } })),
            Err(Error::Payload { .. })
        ));
        assert!(matches!(loader.load_str("{ payload"), Err(Error::Json(_))));
    }

    #[test]
    fn test_custom_keys_and_prefixes() {
        let loader = SectionLoader {
            payload_key: "sections".to_string(),
            records_key: "rows".to_string(),
            kind_key: "kind".to_string(),
            record_prefix: "row".to_string(),
            header_kinds: vec![5],
            footer_kinds: Vec::new(),
            ..SectionLoader::default()
        };
        let sections = loader
            .load_str(r#"{ "sections": [ { "kind": 5, "rows": [ { "kind": 7 } ] } ] }"#)
            .unwrap();

        assert_eq!(sections[0].header_type(), Some("h5"));
        assert_eq!(sections[0].footer_type(), None);
        assert_eq!(sections[0].records()[0].type_tag(), "row7");
    }

    #[test]
    fn test_loader_deserializes_partial_config() {
        let loader: SectionLoader = serde_json::from_str(r#"{ "record_prefix": "cell" }"#).unwrap();
        assert_eq!(loader.record_prefix, "cell");
        assert_eq!(loader.payload_key, "payload");
        assert_eq!(loader.header_kinds, vec![1, 2]);
    }
}
