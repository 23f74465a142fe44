//! Type tag to cell identifier mapping.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use trellis_core::{Error, Result};

use crate::cell::CellRegistry;

/// Maps the type tags used in sections to cell identifiers.
///
/// Several tags may map to the same identifier, for example two header
/// flavours rendered by one header cell. A handler registers each distinct
/// identifier with its widget once.
///
/// # Example
///
/// ```
/// use trellis::handler::TypeMap;
///
/// let types = TypeMap::from([("h1", "HeaderView"), ("h2", "HeaderView"), ("r1", "TextRow")]);
/// assert_eq!(types.get("h2"), Some("HeaderView"));
/// assert_eq!(types.identifiers().len(), 2);
/// assert_eq!(types.get("r9"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMap {
    entries: BTreeMap<String, String>,
}

impl TypeMap {
    /// Creates an empty type map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `type_tag` to `identifier`, returning the previous identifier.
    pub fn insert(
        &mut self,
        type_tag: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(type_tag.into(), identifier.into())
    }

    /// Maps `type_tag` to `identifier`, builder style.
    pub fn with(mut self, type_tag: impl Into<String>, identifier: impl Into<String>) -> Self {
        self.insert(type_tag, identifier);
        self
    }

    /// Returns the identifier for `type_tag`.
    ///
    /// Empty tags and empty identifiers never resolve.
    pub fn get(&self, type_tag: &str) -> Option<&str> {
        if type_tag.is_empty() {
            return None;
        }
        self.entries
            .get(type_tag)
            .map(String::as_str)
            .filter(|identifier| !identifier.is_empty())
    }

    /// Returns `true` if `type_tag` resolves to an identifier.
    pub fn contains_type(&self, type_tag: &str) -> bool {
        self.get(type_tag).is_some()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(type_tag, identifier)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(tag, id)| (tag.as_str(), id.as_str()))
    }

    /// Returns the distinct, non-empty identifiers in sorted order.
    pub fn identifiers(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .map(String::as_str)
            .filter(|identifier| !identifier.is_empty())
            .collect()
    }

    /// Checks every entry against a cell registry.
    ///
    /// Handlers tolerate bad entries by collapsing the affected rows. Call
    /// this at startup to surface them as errors instead.
    ///
    /// # Errors
    ///
    /// Returns the first entry (in tag order) whose tag or identifier is
    /// empty, or whose identifier has no registered class.
    pub fn validate(&self, cells: &CellRegistry) -> Result<()> {
        for (type_tag, identifier) in self.iter() {
            if type_tag.is_empty() {
                return Err(Error::invalid_type_map(type_tag, "type tag is empty"));
            }
            if identifier.is_empty() {
                return Err(Error::invalid_type_map(type_tag, "identifier is empty"));
            }
            if !cells.contains(identifier) {
                return Err(Error::unresolved_identifier(type_tag, identifier));
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(tag, id)| (tag.into(), id.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for TypeMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
