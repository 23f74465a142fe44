//! Core systems for Trellis.
//!
//! This crate provides the pieces of the Trellis list-binding layer that do
//! not depend on any particular list model:
//!
//! - **Errors**: [`Error`] and [`Result`] for the loading and configuration paths
//! - **Thread Affinity**: [`ThreadAffinity`] for UI-thread-only objects
//! - **Logging**: tracing targets and a text tree formatter for debug dumps
//! - **Geometry**: [`Point`] and [`Size`] as reported by scroll notifications
//!
//! # Logging Example
//!
//! ```
//! use trellis_core::logging::{targets, TextTree, TreeFormatOptions};
//!
//! tracing::debug!(target: targets::HANDLER, "handler ready");
//!
//! let mut tree = TextTree::new("sections");
//! let first = tree.push_root("section 0");
//! tree.push_child(first, "row 0 (TextRow)");
//!
//! let output = tree.format(&TreeFormatOptions::default());
//! assert!(output.contains("row 0 (TextRow)"));
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod thread_check;

pub use error::{Error, Result};
pub use geometry::{Point, Size};
pub use logging::{TextTree, TreeFormatOptions, TreeStyle};
pub use thread_check::ThreadAffinity;
