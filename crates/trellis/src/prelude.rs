//! Prelude module for Trellis.
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{CellData, IndexPath, Record, Section};

// ============================================================================
// Cells
// ============================================================================

pub use crate::cell::{CellEventSink, CellRegistry, CellType, EventSinkRef, ListCell};

// ============================================================================
// Handler and Widget Protocol
// ============================================================================

pub use crate::handler::{
    HandlerDelegate, ListDataSource, ListHandler, ListViewDelegate, ListWidget, ScrollMetrics,
    ScrollViewDelegate, TypeMap,
};

// ============================================================================
// Loading and Configuration
// ============================================================================

pub use crate::config::HandlerConfig;
pub use crate::payload::SectionLoader;
pub use crate::{Error, Point, Result, Size};
