//! The protocol between a list handler and its host widget.
//!
//! A host widget is the scrolling list that actually lays out and draws
//! cells. It asks its data source for counts, heights and views, tells its
//! delegate about selection, display lifecycle and scrolling, and keeps a
//! pool of reusable cells per identifier.

use std::sync::Weak;

use trellis_core::{Point, Size};

use crate::cell::ListCell;
use crate::model::IndexPath;

/// Scroll state reported with every scroll notification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Total size of the scrollable content.
    pub content_size: Size,
    /// Offset of the visible region within the content.
    pub content_offset: Point,
}

impl ScrollMetrics {
    /// Creates scroll metrics.
    pub fn new(content_size: Size, content_offset: Point) -> Self {
        Self {
            content_size,
            content_offset,
        }
    }
}

/// A scrolling list widget that hosts a data source and a delegate.
pub trait ListWidget: Send + Sync {
    /// Registers an identifier with the widget's reuse pool.
    fn register_reusable_cell(&self, identifier: &str);

    /// Takes a reusable cell for `identifier` from the pool.
    ///
    /// The default has no pool; callers then instantiate a fresh cell.
    fn dequeue_reusable_cell(
        &self,
        _identifier: &str,
        _index_path: IndexPath,
    ) -> Option<Box<dyn ListCell>> {
        None
    }

    /// Sets the object the widget queries for counts, heights and views.
    fn set_data_source(&self, source: Weak<dyn ListDataSource>);

    /// Sets the object the widget reports interaction and scrolling to.
    fn set_delegate(&self, delegate: Weak<dyn ListViewDelegate>);
}

/// Answers a widget's layout queries.
///
/// Implementations must never fail: out-of-range positions get zero counts,
/// zero heights and no view.
pub trait ListDataSource: Send + Sync {
    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of rows in `section`.
    fn row_count(&self, section: usize) -> usize;

    /// Height of the header of `section`. Zero collapses it.
    fn height_for_header(&self, section: usize) -> f32;

    /// Height of the footer of `section`. Zero collapses it.
    fn height_for_footer(&self, section: usize) -> f32;

    /// Height of the row at `index_path`. Zero collapses it.
    fn height_for_row(&self, index_path: IndexPath) -> f32;

    /// Bound header view for `section`, if it has one.
    fn view_for_header(&self, section: usize) -> Option<Box<dyn ListCell>>;

    /// Bound footer view for `section`, if it has one.
    fn view_for_footer(&self, section: usize) -> Option<Box<dyn ListCell>>;

    /// Bound row cell for `index_path`.
    fn cell_for_row(&self, index_path: IndexPath) -> Option<Box<dyn ListCell>>;
}

/// Receives a widget's scroll notifications.
///
/// Every method is optional.
pub trait ScrollViewDelegate: Send + Sync {
    /// The user started dragging the content.
    fn will_begin_dragging(&self, _metrics: ScrollMetrics) {}

    /// The content offset changed.
    fn did_scroll(&self, _metrics: ScrollMetrics) {}

    /// The user lifted their finger. `will_decelerate` tells whether the
    /// content keeps moving.
    fn did_end_dragging(&self, _metrics: ScrollMetrics, _will_decelerate: bool) {}

    /// The content stopped moving after a deceleration.
    fn did_end_decelerating(&self, _metrics: ScrollMetrics) {}
}

/// Receives a widget's selection and display lifecycle notifications.
///
/// Every method is optional.
pub trait ListViewDelegate: ScrollViewDelegate {
    /// The row at `index_path` was selected.
    fn did_select_row(&self, _index_path: IndexPath) {}

    /// A row cell is about to appear.
    fn will_display_cell(&self, _cell: &dyn ListCell, _index_path: IndexPath) {}

    /// A header view is about to appear.
    fn will_display_header_view(&self, _view: &dyn ListCell, _section: usize) {}

    /// A footer view is about to appear.
    fn will_display_footer_view(&self, _view: &dyn ListCell, _section: usize) {}

    /// A row cell left the visible region.
    fn did_end_displaying_cell(&self, _cell: &dyn ListCell, _index_path: IndexPath) {}

    /// A header view left the visible region.
    fn did_end_displaying_header_view(&self, _view: &dyn ListCell, _section: usize) {}

    /// A footer view left the visible region.
    fn did_end_displaying_footer_view(&self, _view: &dyn ListCell, _section: usize) {}
}
