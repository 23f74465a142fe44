//! The list handler: resolution and dispatch core.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use trellis_core::logging::{TextTree, targets};
use trellis_core::thread_check::ThreadAffinity;

use crate::cell::{CellClass, CellEventSink, CellRegistry, EventSinkRef, ListCell};
use crate::model::{CellData, IndexPath, Record, Section};

use super::callbacks::{CallbackRegistry, CellCallback};
use super::delegate::HandlerDelegate;
use super::type_map::TypeMap;
use super::widget::{
    ListDataSource, ListViewDelegate, ListWidget, ScrollMetrics, ScrollViewDelegate,
};

/// Height reported for anything that should not be visible.
pub const COLLAPSED_HEIGHT: f32 = 0.0;

/// Lifecycle state of a [`ListHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    /// `standby` has not been called yet.
    Unconfigured,
    /// A type map and a widget are bound.
    Ready,
}

/// Setup applied by [`ListHandler::standby`].
struct Setup {
    identifier: String,
    type_map: TypeMap,
    widget: Option<Weak<dyn ListWidget>>,
}

/// Which decoration of a section a query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoration {
    Header,
    Footer,
}

impl Decoration {
    fn name(self) -> &'static str {
        match self {
            Decoration::Header => "header",
            Decoration::Footer => "footer",
        }
    }
}

/// A header, footer or row located in a section snapshot.
struct Target<'a> {
    type_tag: &'a str,
    data: &'a CellData,
    extra: &'a CellData,
    index_path: IndexPath,
}

/// Binds a host widget to a declarative list of sections.
///
/// The handler answers the widget's data source queries by resolving each
/// header, footer and row type tag through its [`TypeMap`] and the shared
/// [`CellRegistry`], then binding the payload, itself as event sink and the
/// index path to the produced cell. Selection and cell events are routed to
/// a callback registered for the cell (and event), or else to the
/// [`HandlerDelegate`].
///
/// Misconfiguration and out-of-range queries degrade to collapsed rows and
/// missing views. Nothing a widget asks can make the handler fail.
///
/// # Lifecycle
///
/// A handler starts [`Unconfigured`](HandlerState::Unconfigured).
/// [`standby`](Self::standby) binds the type map and the widget and makes it
/// [`Ready`](HandlerState::Ready). Calling `standby` again replaces the
/// previous setup. [`set_sections`](Self::set_sections) replaces the content
/// at any time; refresh the widget afterwards.
///
/// # Threading
///
/// The handler is `Send + Sync`, but it belongs to the UI thread that created
/// it. Debug builds assert this on every widget-facing call and on every
/// mutation (setup, sections, callbacks, delegate). Callbacks and
/// delegate notifications run without any internal lock held, so they may
/// call back into the handler.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use trellis::cell::CellRegistry;
/// use trellis::handler::{ListHandler, TypeMap};
///
/// let cells = Arc::new(CellRegistry::new().with::<TextRow>().with::<ButtonRow>());
/// let handler = ListHandler::new(cells);
///
/// handler.set_delegate(&screen);
/// handler.standby("list", TypeMap::from([("r1", "TextRow"), ("r2", "ButtonRow")]), &table);
/// handler.register_callback("ButtonRow", Some("switchOnOff"), |index_path, _data, extra| {
///     println!("switch at {index_path:?}: {:?}", extra.as_bool());
/// });
///
/// handler.set_sections(sections);
/// table.reload_data();
/// ```
pub struct ListHandler {
    this: Weak<ListHandler>,
    cells: Arc<CellRegistry>,
    affinity: ThreadAffinity,
    setup: RwLock<Setup>,
    sections: RwLock<Arc<[Section]>>,
    callbacks: RwLock<CallbackRegistry>,
    delegate: RwLock<Option<Weak<dyn HandlerDelegate>>>,
}

static_assertions::assert_impl_all!(ListHandler: Send, Sync);

impl ListHandler {
    /// Creates an unconfigured handler resolving cells through `cells`.
    pub fn new(cells: Arc<CellRegistry>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            cells,
            affinity: ThreadAffinity::current(),
            setup: RwLock::new(Setup {
                identifier: String::new(),
                type_map: TypeMap::new(),
                widget: None,
            }),
            sections: RwLock::new(Arc::from(Vec::new())),
            callbacks: RwLock::new(CallbackRegistry::new()),
            delegate: RwLock::new(None),
        })
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Binds the handler to `widget`.
    ///
    /// Stores `identifier` (sent with every delegate notification) and
    /// `type_map`, registers each distinct identifier of the map with the
    /// widget's reuse pool, and installs the handler as the widget's data
    /// source and delegate. A second call replaces the previous setup
    /// completely.
    pub fn standby<W: ListWidget + 'static>(
        &self,
        identifier: impl Into<String>,
        type_map: TypeMap,
        widget: &Arc<W>,
    ) {
        self.affinity.debug_assert_same_thread();
        let identifier = identifier.into();
        let widget_ref: Arc<dyn ListWidget> = widget.clone();

        let reuse_identifiers: Vec<String> =
            type_map.identifiers().into_iter().map(str::to_string).collect();
        tracing::debug!(
            target: targets::HANDLER,
            handler = %identifier,
            types = type_map.len(),
            identifiers = reuse_identifiers.len(),
            "standby"
        );

        {
            let mut setup = self.setup.write();
            setup.identifier = identifier;
            setup.type_map = type_map;
            setup.widget = Some(Arc::downgrade(&widget_ref));
        }

        for reuse_identifier in &reuse_identifiers {
            widget.register_reusable_cell(reuse_identifier);
        }

        let source: Weak<dyn ListDataSource> = self.this.clone();
        let delegate: Weak<dyn ListViewDelegate> = self.this.clone();
        widget.set_data_source(source);
        widget.set_delegate(delegate);
    }

    /// Replaces all sections.
    ///
    /// Queries reflect only the new sections from now on. The widget is not
    /// refreshed; trigger its reload separately.
    pub fn set_sections(&self, sections: Vec<Section>) {
        self.affinity.debug_assert_same_thread();
        tracing::debug!(
            target: targets::HANDLER,
            handler = %self.identifier(),
            sections = sections.len(),
            "sections replaced"
        );
        *self.sections.write() = Arc::from(sections);
    }

    /// Sets the delegate. The handler keeps only a weak reference.
    pub fn set_delegate<D: HandlerDelegate + 'static>(&self, delegate: &Arc<D>) {
        self.affinity.debug_assert_same_thread();
        let delegate: Arc<dyn HandlerDelegate> = delegate.clone();
        *self.delegate.write() = Some(Arc::downgrade(&delegate));
    }

    /// Removes the delegate.
    pub fn clear_delegate(&self) {
        self.affinity.debug_assert_same_thread();
        *self.delegate.write() = None;
    }

    /// Returns `true` if a delegate is set and still alive.
    pub fn has_delegate(&self) -> bool {
        self.delegate().is_some()
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Registers a callback for a cell identifier.
    ///
    /// With `event_identifier` set to `None` the callback handles selection
    /// of rows resolving to that identifier. Otherwise it handles events of
    /// that name raised by such cells. The last registration for a key wins.
    pub fn register_callback<F>(
        &self,
        cell_identifier: impl Into<String>,
        event_identifier: Option<&str>,
        callback: F,
    ) where
        F: Fn(Option<IndexPath>, &CellData, &CellData) + Send + Sync + 'static,
    {
        self.affinity.debug_assert_same_thread();
        let cell_identifier = cell_identifier.into();
        tracing::trace!(
            target: targets::REGISTRY,
            cell = %cell_identifier,
            event = event_identifier.unwrap_or(""),
            "callback registered"
        );
        self.callbacks
            .write()
            .register(cell_identifier, event_identifier, callback);
    }

    /// Removes the callback under exactly this key, if any.
    pub fn unregister_callback(
        &self,
        cell_identifier: &str,
        event_identifier: Option<&str>,
    ) -> bool {
        self.affinity.debug_assert_same_thread();
        self.callbacks.write().unregister(cell_identifier, event_identifier)
    }

    /// Removes every callback.
    pub fn clear_callbacks(&self) {
        self.affinity.debug_assert_same_thread();
        self.callbacks.write().clear();
    }

    /// Returns the number of registered callbacks.
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Returns the lifecycle state.
    pub fn state(&self) -> HandlerState {
        if self.setup.read().widget.is_some() {
            HandlerState::Ready
        } else {
            HandlerState::Unconfigured
        }
    }

    /// Returns the identifier given to [`standby`](Self::standby).
    pub fn identifier(&self) -> String {
        self.setup.read().identifier.clone()
    }

    /// Returns a copy of the current type map.
    pub fn type_map(&self) -> TypeMap {
        self.setup.read().type_map.clone()
    }

    /// Returns the cell identifier a type tag maps to.
    pub fn cell_identifier(&self, type_tag: &str) -> Option<String> {
        self.setup.read().type_map.get(type_tag).map(str::to_string)
    }

    /// Returns the cell registry this handler resolves through.
    pub fn cells(&self) -> &Arc<CellRegistry> {
        &self.cells
    }

    /// Returns the current sections.
    pub fn sections(&self) -> Arc<[Section]> {
        self.sections.read().clone()
    }

    /// Returns a copy of one section.
    pub fn section(&self, section: usize) -> Option<Section> {
        self.sections.read().get(section).cloned()
    }

    /// Returns a copy of one record.
    pub fn record(&self, index_path: IndexPath) -> Option<Record> {
        self.sections
            .read()
            .get(index_path.section())
            .and_then(|section| section.record(index_path.row()))
            .cloned()
    }

    /// Describes the current sections and how each type tag resolves.
    pub fn debug_tree(&self) -> TextTree {
        let sections = self.sections();
        let mut tree = TextTree::new(format!("ListHandler '{}'", self.identifier()));

        for (index, section) in sections.iter().enumerate() {
            let node = tree.push_root(format!("section {index}"));
            if let Some(type_tag) = section.header_type() {
                tree.push_child(node, format!("header: {}", self.describe(type_tag)));
            }
            for (row, record) in section.records().iter().enumerate() {
                tree.push_child(node, format!("row {row}: {}", self.describe(record.type_tag())));
            }
            if let Some(type_tag) = section.footer_type() {
                tree.push_child(node, format!("footer: {}", self.describe(type_tag)));
            }
        }
        tree
    }

    fn describe(&self, type_tag: &str) -> String {
        match self.cell_identifier(type_tag) {
            Some(identifier) if self.cells.contains(&identifier) => {
                format!("{type_tag} -> {identifier}")
            }
            Some(identifier) => format!("{type_tag} -> {identifier} (unresolved)"),
            None => format!("{type_tag} (unmapped)"),
        }
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    fn snapshot(&self) -> Arc<[Section]> {
        self.sections.read().clone()
    }

    fn widget(&self) -> Option<Arc<dyn ListWidget>> {
        self.setup.read().widget.as_ref().and_then(Weak::upgrade)
    }

    fn delegate(&self) -> Option<Arc<dyn HandlerDelegate>> {
        self.delegate.read().as_ref().and_then(Weak::upgrade)
    }

    fn event_sink(&self) -> EventSinkRef {
        let sink: Weak<dyn CellEventSink> = self.this.clone();
        EventSinkRef::new(sink)
    }

    fn decoration_target(
        sections: &[Section],
        section: usize,
        decoration: Decoration,
    ) -> Option<Target<'_>> {
        let Some(entry) = sections.get(section) else {
            tracing::trace!(
                target: targets::HANDLER,
                section,
                sections = sections.len(),
                kind = decoration.name(),
                "section out of bounds"
            );
            return None;
        };

        let (type_tag, data) = match decoration {
            Decoration::Header => (entry.header_type()?, entry.header_data()),
            Decoration::Footer => (entry.footer_type()?, entry.footer_data()),
        };
        Some(Target {
            type_tag,
            data,
            extra: entry.extra(),
            index_path: IndexPath::for_section(section),
        })
    }

    fn row_target(sections: &[Section], index_path: IndexPath) -> Option<Target<'_>> {
        let record = sections
            .get(index_path.section())
            .and_then(|section| section.record(index_path.row()));
        let Some(record) = record else {
            tracing::trace!(
                target: targets::HANDLER,
                %index_path,
                sections = sections.len(),
                "row out of bounds"
            );
            return None;
        };

        Some(Target {
            type_tag: record.type_tag(),
            data: record.data(),
            extra: record.extra(),
            index_path,
        })
    }

    /// Resolves a type tag to its identifier and class.
    fn resolve(&self, type_tag: &str) -> Option<(String, Arc<dyn CellClass>)> {
        let Some(identifier) = self.cell_identifier(type_tag) else {
            tracing::debug!(target: targets::HANDLER, type_tag, "type tag not in type map");
            return None;
        };
        let Some(class) = self.cells.resolve(&identifier) else {
            tracing::debug!(
                target: targets::HANDLER,
                type_tag,
                %identifier,
                "identifier has no registered cell class"
            );
            return None;
        };
        Some((identifier, class))
    }

    fn height_for(&self, target: Option<Target<'_>>) -> f32 {
        let Some(target) = target else {
            return COLLAPSED_HEIGHT;
        };
        match self.resolve(target.type_tag) {
            Some((_, class)) => class.height_for_data(target.data, target.extra),
            None => COLLAPSED_HEIGHT,
        }
    }

    fn view_for(&self, target: Option<Target<'_>>, reuse: bool) -> Option<Box<dyn ListCell>> {
        let target = target?;
        let (identifier, class) = self.resolve(target.type_tag)?;

        let pooled = if reuse {
            self.widget()
                .and_then(|widget| widget.dequeue_reusable_cell(&identifier, target.index_path))
        } else {
            None
        };
        let Some(mut cell) = pooled.or_else(|| class.instantiate()) else {
            tracing::debug!(
                target: targets::HANDLER,
                %identifier,
                index_path = %target.index_path,
                "cell class produced no instance"
            );
            return None;
        };

        cell.set_data(target.data, target.extra);
        cell.set_event_sink(self.event_sink());
        cell.set_index_path(target.index_path);
        Some(cell)
    }

    fn relay(&self, notify: impl FnOnce(&dyn HandlerDelegate, &str)) {
        if let Some(delegate) = self.delegate() {
            let identifier = self.identifier();
            notify(delegate.as_ref(), &identifier);
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Routes a selection to the `(identifier, None)` callback or the delegate.
    ///
    /// A row whose type tag is missing from the type map is routed under the
    /// raw type tag, so it can still be handled.
    fn dispatch_selection(&self, index_path: IndexPath) {
        let sections = self.snapshot();
        let Some(target) = Self::row_target(&sections, index_path) else {
            return;
        };

        let cell_identifier = self.cell_identifier(target.type_tag).unwrap_or_else(|| {
            tracing::debug!(
                target: targets::DISPATCH,
                type_tag = target.type_tag,
                %index_path,
                "selected row has unmapped type, routing under raw tag"
            );
            target.type_tag.to_string()
        });

        let callback = self.callbacks.read().lookup(&cell_identifier, None);
        if let Some(callback) = callback {
            tracing::trace!(
                target: targets::DISPATCH,
                cell = %cell_identifier,
                %index_path,
                "selection to callback"
            );
            callback(Some(index_path), target.data, target.extra);
            return;
        }

        tracing::trace!(
            target: targets::DISPATCH,
            cell = %cell_identifier,
            %index_path,
            "selection to delegate"
        );
        self.relay(|delegate, handler| {
            delegate.cell_did_select(
                handler,
                &cell_identifier,
                index_path,
                target.data,
                target.extra,
            );
        });
    }

    /// Routes a cell event to the `(identifier, event)` callback or the delegate.
    ///
    /// Events without an event identifier always go to the delegate.
    fn dispatch_event(
        &self,
        cell_identifier: &str,
        event_identifier: Option<&str>,
        index_path: Option<IndexPath>,
        data: &CellData,
        extra: &CellData,
    ) {
        let callback: Option<CellCallback> = match event_identifier {
            Some(event) => self.callbacks.read().lookup(cell_identifier, Some(event)),
            None => None,
        };
        if let Some(callback) = callback {
            tracing::trace!(
                target: targets::DISPATCH,
                cell = cell_identifier,
                event = event_identifier.unwrap_or(""),
                "event to callback"
            );
            callback(index_path, data, extra);
            return;
        }

        tracing::trace!(
            target: targets::DISPATCH,
            cell = cell_identifier,
            event = event_identifier.unwrap_or(""),
            "event to delegate"
        );
        self.relay(|delegate, handler| {
            delegate.cell_event(
                handler,
                cell_identifier,
                event_identifier,
                index_path,
                data,
                extra,
            );
        });
    }
}

impl ListDataSource for ListHandler {
    fn section_count(&self) -> usize {
        self.affinity.debug_assert_same_thread();
        self.sections.read().len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.affinity.debug_assert_same_thread();
        self.sections
            .read()
            .get(section)
            .map_or(0, |section| section.records().len())
    }

    fn height_for_header(&self, section: usize) -> f32 {
        self.affinity.debug_assert_same_thread();
        let sections = self.snapshot();
        self.height_for(Self::decoration_target(&sections, section, Decoration::Header))
    }

    fn height_for_footer(&self, section: usize) -> f32 {
        self.affinity.debug_assert_same_thread();
        let sections = self.snapshot();
        self.height_for(Self::decoration_target(&sections, section, Decoration::Footer))
    }

    fn height_for_row(&self, index_path: IndexPath) -> f32 {
        self.affinity.debug_assert_same_thread();
        let sections = self.snapshot();
        self.height_for(Self::row_target(&sections, index_path))
    }

    fn view_for_header(&self, section: usize) -> Option<Box<dyn ListCell>> {
        self.affinity.debug_assert_same_thread();
        let sections = self.snapshot();
        self.view_for(Self::decoration_target(&sections, section, Decoration::Header), false)
    }

    fn view_for_footer(&self, section: usize) -> Option<Box<dyn ListCell>> {
        self.affinity.debug_assert_same_thread();
        let sections = self.snapshot();
        self.view_for(Self::decoration_target(&sections, section, Decoration::Footer), false)
    }

    fn cell_for_row(&self, index_path: IndexPath) -> Option<Box<dyn ListCell>> {
        self.affinity.debug_assert_same_thread();
        let sections = self.snapshot();
        self.view_for(Self::row_target(&sections, index_path), true)
    }
}

impl ScrollViewDelegate for ListHandler {
    fn will_begin_dragging(&self, metrics: ScrollMetrics) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| delegate.will_begin_dragging(handler, metrics));
    }

    fn did_scroll(&self, metrics: ScrollMetrics) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| delegate.did_scroll(handler, metrics));
    }

    fn did_end_dragging(&self, metrics: ScrollMetrics, will_decelerate: bool) {
        self.affinity.debug_assert_same_thread();
        if !will_decelerate {
            self.relay(|delegate, handler| delegate.did_end_scroll(handler, metrics));
        }
    }

    fn did_end_decelerating(&self, metrics: ScrollMetrics) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| delegate.did_end_scroll(handler, metrics));
    }
}

impl ListViewDelegate for ListHandler {
    fn did_select_row(&self, index_path: IndexPath) {
        self.affinity.debug_assert_same_thread();
        self.dispatch_selection(index_path);
    }

    fn will_display_cell(&self, cell: &dyn ListCell, index_path: IndexPath) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| delegate.will_display_cell(handler, cell, index_path));
    }

    fn will_display_header_view(&self, view: &dyn ListCell, section: usize) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| delegate.will_display_header_view(handler, view, section));
    }

    fn will_display_footer_view(&self, view: &dyn ListCell, section: usize) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| delegate.will_display_footer_view(handler, view, section));
    }

    fn did_end_displaying_cell(&self, cell: &dyn ListCell, index_path: IndexPath) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| delegate.did_end_displaying_cell(handler, cell, index_path));
    }

    fn did_end_displaying_header_view(&self, view: &dyn ListCell, section: usize) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| {
            delegate.did_end_displaying_header_view(handler, view, section)
        });
    }

    fn did_end_displaying_footer_view(&self, view: &dyn ListCell, section: usize) {
        self.affinity.debug_assert_same_thread();
        self.relay(|delegate, handler| {
            delegate.did_end_displaying_footer_view(handler, view, section)
        });
    }
}

impl CellEventSink for ListHandler {
    fn cell_event(
        &self,
        cell_identifier: &str,
        event_identifier: Option<&str>,
        index_path: Option<IndexPath>,
        data: &CellData,
        extra: &CellData,
    ) {
        self.affinity.debug_assert_same_thread();
        self.dispatch_event(cell_identifier, event_identifier, index_path, data, extra);
    }
}

impl fmt::Debug for ListHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHandler")
            .field("identifier", &self.identifier())
            .field("state", &self.state())
            .field("sections", &self.sections.read().len())
            .field("callbacks", &self.callback_count())
            .field("has_delegate", &self.has_delegate())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellType;
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct Plain;

    impl ListCell for Plain {
        fn set_data(&mut self, _data: &CellData, _extra: &CellData) {}
    }

    impl CellType for Plain {
        fn instantiate() -> Option<Self> {
            Some(Plain)
        }

        fn height_for_data(data: &CellData, _extra: &CellData) -> f32 {
            data.float_field("height").unwrap_or(20.0) as f32
        }
    }

    #[derive(Default)]
    struct NullWidget {
        registered: Mutex<Vec<String>>,
    }

    impl ListWidget for NullWidget {
        fn register_reusable_cell(&self, identifier: &str) {
            self.registered.lock().push(identifier.to_string());
        }

        fn set_data_source(&self, _source: Weak<dyn ListDataSource>) {}

        fn set_delegate(&self, _delegate: Weak<dyn ListViewDelegate>) {}
    }

    fn handler() -> Arc<ListHandler> {
        ListHandler::new(Arc::new(CellRegistry::new().with::<Plain>()))
    }

    #[test]
    fn test_new_handler_is_unconfigured_and_empty() {
        let handler = handler();
        assert_eq!(handler.state(), HandlerState::Unconfigured);
        assert_eq!(handler.section_count(), 0);
        assert_eq!(handler.row_count(0), 0);
        assert_eq!(handler.height_for_header(0), COLLAPSED_HEIGHT);
        assert!(handler.cell_for_row(IndexPath::new(0, 0)).is_none());
    }

    #[test]
    fn test_standby_registers_distinct_identifiers() {
        let handler = handler();
        let widget = Arc::new(NullWidget::default());
        let types = TypeMap::from([
            ("h1", "Plain"),
            ("h2", "Plain"),
            ("r1", "Plain"),
            ("r2", "Other"),
        ]);

        handler.standby("list", types, &widget);
        assert_eq!(handler.state(), HandlerState::Ready);
        assert_eq!(handler.identifier(), "list");
        assert_eq!(*widget.registered.lock(), vec!["Other".to_string(), "Plain".to_string()]);
    }

    #[test]
    fn test_standby_replaces_type_map() {
        let handler = handler();
        let widget = Arc::new(NullWidget::default());
        handler.standby("list", TypeMap::from([("r1", "Plain")]), &widget);
        handler.standby("list", TypeMap::from([("r2", "Plain")]), &widget);

        assert_eq!(handler.cell_identifier("r1"), None);
        assert_eq!(handler.cell_identifier("r2"), Some("Plain".to_string()));
    }

    #[test]
    fn test_unresolvable_identifier_collapses() {
        let handler = handler();
        let widget = Arc::new(NullWidget::default());
        handler.standby("list", TypeMap::from([("r1", "Plain"), ("r2", "Missing")]), &widget);
        handler.set_sections(vec![Section::new(vec![
            Record::new("r1", json!({ "height": 30.0 })),
            Record::new("r2", json!({ "height": 30.0 })),
            Record::new("r3", json!({ "height": 30.0 })),
        ])]);

        assert_eq!(handler.height_for_row(IndexPath::new(0, 0)), 30.0);
        assert_eq!(handler.height_for_row(IndexPath::new(0, 1)), COLLAPSED_HEIGHT);
        assert_eq!(handler.height_for_row(IndexPath::new(0, 2)), COLLAPSED_HEIGHT);
        assert!(handler.cell_for_row(IndexPath::new(0, 1)).is_none());
        assert!(handler.cell_for_row(IndexPath::new(0, 2)).is_none());
    }

    #[test]
    fn test_debug_tree_marks_resolution() {
        let handler = handler();
        let widget = Arc::new(NullWidget::default());
        handler.standby("list", TypeMap::from([("h1", "Plain"), ("r2", "Missing")]), &widget);
        handler.set_sections(vec![
            Section::builder()
                .header("h1", CellData::None)
                .record(Record::new("r2", CellData::None))
                .record(Record::new("r9", CellData::None))
                .build(),
        ]);

        let output = handler.debug_tree().to_string();
        assert!(output.contains("ListHandler 'list'"));
        assert!(output.contains("header: h1 -> Plain"));
        assert!(output.contains("row 0: r2 -> Missing (unresolved)"));
        assert!(output.contains("row 1: r9 (unmapped)"));
    }

    #[test]
    fn test_dropped_widget_keeps_state() {
        let handler = handler();
        let widget = Arc::new(NullWidget::default());
        handler.standby("list", TypeMap::from([("r1", "Plain")]), &widget);
        drop(widget);

        handler.set_sections(vec![Section::new(vec![Record::new("r1", CellData::None)])]);
        assert_eq!(handler.state(), HandlerState::Ready);
        // No pool to dequeue from, so the class instantiates directly
        assert!(handler.cell_for_row(IndexPath::new(0, 0)).is_some());
    }

    #[test]
    #[cfg(debug_assertions)]
    fn test_mutation_from_other_thread_panics() {
        let handler = handler();

        let registering = handler.clone();
        let result = std::thread::spawn(move || {
            registering.register_callback("Plain", None, |_, _, _| {});
        })
        .join();
        assert!(result.is_err());
        assert_eq!(handler.callback_count(), 0);

        let clearing = handler.clone();
        let result = std::thread::spawn(move || clearing.clear_delegate()).join();
        assert!(result.is_err());
    }
}
