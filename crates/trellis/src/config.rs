//! Declarative handler configuration.
//!
//! A screen's list setup (its handler identifier, type map and payload
//! layout) is plain data and can live in a configuration file next to the
//! screen instead of in code.
//!
//! # Example
//!
//! ```
//! use trellis::config::HandlerConfig;
//!
//! let config = HandlerConfig::from_toml_str(r#"
//! identifier = "settings"
//!
//! [types]
//! h1 = "HeaderView"
//! r1 = "TextRow"
//! r2 = "ButtonRow"
//!
//! [loader]
//! payload_key = "items"
//! "#).unwrap();
//!
//! assert_eq!(config.identifier, "settings");
//! assert_eq!(config.types.get("r2"), Some("ButtonRow"));
//! assert_eq!(config.loader.payload_key, "items");
//! assert_eq!(config.loader.records_key, "records");
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use trellis_core::logging::targets;
use trellis_core::Result;

use crate::cell::CellRegistry;
use crate::handler::{ListHandler, ListWidget, TypeMap};
use crate::payload::SectionLoader;

/// Configuration of one list handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Identifier sent with every delegate notification.
    pub identifier: String,
    /// Type tag to cell identifier mapping.
    #[serde(default)]
    pub types: TypeMap,
    /// Layout of the JSON documents this handler's sections come from.
    #[serde(default)]
    pub loader: SectionLoader,
}

impl HandlerConfig {
    /// Creates a configuration with an empty type map and the default loader.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            types: TypeMap::new(),
            loader: SectionLoader::default(),
        }
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`](trellis_core::Error::Toml) if the text is not
    /// valid TOML or lacks an identifier.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](trellis_core::Error::Json) if the text is not
    /// valid JSON or lacks an identifier.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Checks the type map against a cell registry.
    ///
    /// # Errors
    ///
    /// See [`TypeMap::validate`].
    pub fn validate(&self, cells: &CellRegistry) -> Result<()> {
        self.types.validate(cells).inspect_err(|error| {
            tracing::warn!(
                target: targets::HANDLER,
                handler = %self.identifier,
                %error,
                "handler configuration rejected"
            );
        })
    }

    /// Calls [`ListHandler::standby`] with this configuration.
    pub fn standby<W: ListWidget + 'static>(&self, handler: &ListHandler, widget: &Arc<W>) {
        handler.standby(self.identifier.clone(), self.types.clone(), widget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{CellType, ListCell};
    use crate::model::CellData;
    use trellis_core::Error;

    struct TextRow;

    impl ListCell for TextRow {
        fn set_data(&mut self, _data: &CellData, _extra: &CellData) {}
    }

    impl CellType for TextRow {
        fn instantiate() -> Option<Self> {
            Some(TextRow)
        }

        fn height_for_data(_data: &CellData, _extra: &CellData) -> f32 {
            44.0
        }
    }

    #[test]
    fn test_json_config_uses_defaults() {
        let config = HandlerConfig::from_json_str(r#"{ "identifier": "feed" }"#).unwrap();
        assert_eq!(config, HandlerConfig::new("feed"));
    }

    #[test]
    fn test_missing_identifier_is_an_error() {
        assert!(matches!(
            HandlerConfig::from_toml_str("[types]\nr1 = \"TextRow\""),
            Err(Error::Toml(_))
        ));
        assert!(matches!(HandlerConfig::from_json_str("{}"), Err(Error::Json(_))));
    }

    #[test]
    fn test_validate_reports_unresolved_identifier() {
        let cells = CellRegistry::new().with::<TextRow>();
        let config = HandlerConfig::from_toml_str(
            "identifier = \"list\"\n[types]\nr1 = \"TextRow\"\nr2 = \"ButtonRow\"\n",
        )
        .unwrap();

        match config.validate(&cells) {
            Err(Error::UnresolvedIdentifier { type_tag, identifier }) => {
                assert_eq!(type_tag, "r2");
                assert_eq!(identifier, "ButtonRow");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_reports_empty_identifier() {
        let cells = CellRegistry::new().with::<TextRow>();
        let mut config = HandlerConfig::new("list");
        config.types.insert("r1", "");

        assert!(matches!(config.validate(&cells), Err(Error::InvalidTypeMap { .. })));

        config.types.insert("r1", "TextRow");
        assert!(config.validate(&cells).is_ok());
    }
}
