//! Data model for sectioned lists.
//!
//! A list is described declaratively as an ordered sequence of [`Section`]s.
//! Each section carries an optional header and footer and an ordered sequence
//! of [`Record`]s. Every header, footer and record is tagged with a *type*
//! string that the handler later resolves to a cell class.
//!
//! # Core Types
//!
//! - [`IndexPath`]: Locates a row as `(section, row)`
//! - [`CellData`]: Type-erased payload handed to cells
//! - [`Record`]: One row
//! - [`Section`]: One section with its decorations and rows
//!
//! # Example
//!
//! ```
//! use trellis::model::{CellData, Record, Section};
//! use serde_json::json;
//!
//! let section = Section::builder()
//!     .header("h1", json!({ "title": "A" }))
//!     .record(Record::new("r1", json!({ "text": "x" })))
//!     .record(Record::new("r2", json!({ "flag": true })).with_extra(true))
//!     .build();
//!
//! assert_eq!(section.header_type(), Some("h1"));
//! assert_eq!(section.records().len(), 2);
//! assert_eq!(section.records()[1].extra(), &CellData::Bool(true));
//! ```

mod data;
mod index;
mod section;

pub use data::CellData;
pub use index::IndexPath;
pub use section::{Record, Section, SectionBuilder};
