//! Pluggable cells and the class registry that resolves them.
//!
//! A *cell* is any view a sectioned list shows: a row, a section header or a
//! section footer. The contract is split in two halves:
//!
//! - **Class level** ([`CellType`] / [`CellClass`]): a stable identifier,
//!   instantiation and height computation from a payload
//! - **Instance level** ([`ListCell`]): payload binding, event sink binding
//!   and index path binding
//!
//! A [`CellRegistry`] maps identifiers to classes. The application fills it
//! once at startup; handlers resolve type tags through it at render time.
//!
//! # Example
//!
//! ```
//! use trellis::cell::{CellRegistry, CellType, ListCell};
//! use trellis::model::CellData;
//!
//! #[derive(Default)]
//! struct TextRow {
//!     text: String,
//! }
//!
//! impl ListCell for TextRow {
//!     fn set_data(&mut self, data: &CellData, _extra: &CellData) {
//!         self.text = data.str_field("text").unwrap_or_default().to_string();
//!     }
//! }
//!
//! impl CellType for TextRow {
//!     fn instantiate() -> Option<Self> {
//!         Some(Self::default())
//!     }
//!
//!     fn height_for_data(data: &CellData, _extra: &CellData) -> f32 {
//!         if data.int_field("type") == Some(1) { 44.0 } else { 0.0 }
//!     }
//! }
//!
//! let mut registry = CellRegistry::new();
//! let identifier = registry.register::<TextRow>();
//! assert_eq!(identifier, "TextRow");
//! assert!(registry.resolve("TextRow").is_some());
//! ```

mod contract;
mod registry;

pub use contract::{type_identifier, CellClass, CellEventSink, CellType, EventSinkRef, ListCell};
pub use registry::CellRegistry;
