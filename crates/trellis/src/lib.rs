//! Trellis - declarative sectioned lists with type-driven cells.
//!
//! Describe a list as data: sections with optional headers and footers and
//! an ordered sequence of records, each tagged with a type string. A
//! [`ListHandler`](handler::ListHandler) resolves every tag to a cell class
//! through a [`TypeMap`](handler::TypeMap) and a shared
//! [`CellRegistry`](cell::CellRegistry), answers the host widget's layout
//! queries, and routes selection and cell events to registered callbacks or
//! a [`HandlerDelegate`](handler::HandlerDelegate).
//!
//! # Modules
//!
//! - [`model`]: index paths, payloads, records and sections
//! - [`cell`]: the cell contract and the class registry
//! - [`handler`]: the handler, its widget protocol and its delegate
//! - [`payload`]: building sections from JSON documents
//! - [`config`]: handler configuration from TOML or JSON
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trellis::prelude::*;
//!
//! #[derive(Default)]
//! struct TextRow;
//!
//! impl ListCell for TextRow {
//!     fn set_data(&mut self, _data: &CellData, _extra: &CellData) {}
//! }
//!
//! impl CellType for TextRow {
//!     fn instantiate() -> Option<Self> {
//!         Some(TextRow)
//!     }
//!
//!     fn height_for_data(_data: &CellData, _extra: &CellData) -> f32 {
//!         44.0
//!     }
//! }
//!
//! let handler = ListHandler::new(Arc::new(CellRegistry::new().with::<TextRow>()));
//! let sections = SectionLoader::default()
//!     .load_str(r#"{ "payload": [ { "records": [ { "type": 1 } ] } ] }"#)
//!     .unwrap();
//! handler.set_sections(sections);
//!
//! // Without a type map every row collapses.
//! assert_eq!(handler.height_for_row(IndexPath::new(0, 0)), 0.0);
//! ```

pub use trellis_core::{Error, Point, Result, Size};
pub use trellis_core::{logging, thread_check};

pub mod cell;
pub mod config;
pub mod handler;
pub mod model;
pub mod payload;
pub mod prelude;
