//! Application-facing notifications of a list handler.

use crate::cell::ListCell;
use crate::model::{CellData, IndexPath};

use super::widget::ScrollMetrics;

/// Receives everything a handler does not route to a registered callback.
///
/// Every method is optional and receives the identifier of the handler that
/// sent it, so one delegate can serve several handlers.
///
/// Handlers hold their delegate weakly; keep it alive elsewhere.
///
/// # Example
///
/// ```
/// use trellis::handler::HandlerDelegate;
/// use trellis::model::{CellData, IndexPath};
///
/// struct Screen;
///
/// impl HandlerDelegate for Screen {
///     fn cell_did_select(
///         &self,
///         handler_identifier: &str,
///         cell_identifier: &str,
///         index_path: IndexPath,
///         _data: &CellData,
///         _extra: &CellData,
///     ) {
///         println!("{handler_identifier}: {cell_identifier} selected at {index_path}");
///     }
/// }
/// ```
pub trait HandlerDelegate: Send + Sync {
    /// The user started dragging the list.
    fn will_begin_dragging(&self, _handler_identifier: &str, _metrics: ScrollMetrics) {}

    /// The list scrolled.
    fn did_scroll(&self, _handler_identifier: &str, _metrics: ScrollMetrics) {}

    /// The list came to rest.
    ///
    /// Sent once per scroll gesture: when a drag ends without deceleration,
    /// or when the deceleration ends.
    fn did_end_scroll(&self, _handler_identifier: &str, _metrics: ScrollMetrics) {}

    /// A row cell is about to appear.
    fn will_display_cell(
        &self,
        _handler_identifier: &str,
        _cell: &dyn ListCell,
        _index_path: IndexPath,
    ) {
    }

    /// A header view is about to appear.
    fn will_display_header_view(
        &self,
        _handler_identifier: &str,
        _view: &dyn ListCell,
        _section: usize,
    ) {
    }

    /// A footer view is about to appear.
    fn will_display_footer_view(
        &self,
        _handler_identifier: &str,
        _view: &dyn ListCell,
        _section: usize,
    ) {
    }

    /// A row cell left the visible region.
    fn did_end_displaying_cell(
        &self,
        _handler_identifier: &str,
        _cell: &dyn ListCell,
        _index_path: IndexPath,
    ) {
    }

    /// A header view left the visible region.
    fn did_end_displaying_header_view(
        &self,
        _handler_identifier: &str,
        _view: &dyn ListCell,
        _section: usize,
    ) {
    }

    /// A footer view left the visible region.
    fn did_end_displaying_footer_view(
        &self,
        _handler_identifier: &str,
        _view: &dyn ListCell,
        _section: usize,
    ) {
    }

    /// A row with no registered selection callback was selected.
    fn cell_did_select(
        &self,
        _handler_identifier: &str,
        _cell_identifier: &str,
        _index_path: IndexPath,
        _data: &CellData,
        _extra: &CellData,
    ) {
    }

    /// A cell raised an event with no registered callback.
    fn cell_event(
        &self,
        _handler_identifier: &str,
        _cell_identifier: &str,
        _event_identifier: Option<&str>,
        _index_path: Option<IndexPath>,
        _data: &CellData,
        _extra: &CellData,
    ) {
    }
}
