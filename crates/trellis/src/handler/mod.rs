//! Binding sections to a host widget.
//!
//! A [`ListHandler`] sits between a scrolling list widget and the
//! application. The widget queries it through [`ListDataSource`] and
//! notifies it through [`ListViewDelegate`]; the handler answers from its
//! sections, its [`TypeMap`] and the shared cell registry, and forwards what
//! the application cares about to registered callbacks or a
//! [`HandlerDelegate`].
//!
//! # Routing
//!
//! | Input | Callback key | Fallback |
//! |-------|--------------|----------|
//! | Row selection | `(identifier, None)` | [`HandlerDelegate::cell_did_select`] |
//! | Cell event `e` | `(identifier, Some(e))` | [`HandlerDelegate::cell_event`] |
//! | Cell event without name | never consulted | [`HandlerDelegate::cell_event`] |
//! | Scroll and display | none | matching delegate method |

mod callbacks;
mod delegate;
mod list_handler;
mod type_map;
mod widget;

pub use callbacks::{CallbackKey, CallbackRegistry, CellCallback};
pub use delegate::HandlerDelegate;
pub use list_handler::{COLLAPSED_HEIGHT, HandlerState, ListHandler};
pub use type_map::TypeMap;
pub use widget::{ListDataSource, ListViewDelegate, ListWidget, ScrollMetrics, ScrollViewDelegate};
