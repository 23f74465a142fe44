//! The contract every pluggable cell implements.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use crate::model::{CellData, IndexPath};

/// Receives user-generated events from bound cells.
///
/// A cell raises an event when one of its interactive parts fires, for
/// example a toggle switch or a touch on a thumbnail. Row cells pass the
/// index path they were bound with; section headers and footers usually
/// pass `None`.
pub trait CellEventSink: Send + Sync {
    /// Called by a cell when a custom interaction fires.
    fn cell_event(
        &self,
        cell_identifier: &str,
        event_identifier: Option<&str>,
        index_path: Option<IndexPath>,
        data: &CellData,
        extra: &CellData,
    );
}

/// A non-owning reference from a cell to its event sink.
///
/// The default value is disconnected. Events sent through a disconnected
/// reference, or after the sink has been dropped, are discarded.
#[derive(Clone, Default)]
pub struct EventSinkRef {
    sink: Option<Weak<dyn CellEventSink>>,
}

impl EventSinkRef {
    /// Wraps a weak sink reference.
    pub fn new(sink: Weak<dyn CellEventSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a reference to `sink` without taking ownership.
    pub fn to<S: CellEventSink + 'static>(sink: &Arc<S>) -> Self {
        let sink: Arc<dyn CellEventSink> = sink.clone();
        Self::new(Arc::downgrade(&sink))
    }

    /// Returns `true` while the sink is alive.
    pub fn is_connected(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| sink.strong_count() > 0)
    }

    /// Forwards an event to the sink.
    ///
    /// Returns `false` if the sink is gone and the event was discarded.
    pub fn send(
        &self,
        cell_identifier: &str,
        event_identifier: Option<&str>,
        index_path: Option<IndexPath>,
        data: &CellData,
        extra: &CellData,
    ) -> bool {
        match self.sink.as_ref().and_then(Weak::upgrade) {
            Some(sink) => {
                sink.cell_event(cell_identifier, event_identifier, index_path, data, extra);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for EventSinkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSinkRef")
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Instance-level half of the cell contract.
///
/// Only [`set_data`](ListCell::set_data) is required. Cells without
/// interactive parts can ignore the event sink, and cells that never report
/// their position can ignore the index path.
pub trait ListCell: Any + Send + Sync {
    /// Stores the payload on this cell instance.
    fn set_data(&mut self, data: &CellData, extra: &CellData);

    /// Stores the event sink this cell reports interactions to.
    fn set_event_sink(&mut self, _sink: EventSinkRef) {}

    /// Stores the index path this cell was bound at.
    fn set_index_path(&mut self, _index_path: IndexPath) {}
}

impl dyn ListCell {
    /// Attempts to downcast to a concrete cell type.
    pub fn downcast_ref<T: ListCell>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Attempts to mutably downcast to a concrete cell type.
    pub fn downcast_mut<T: ListCell>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn ListCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCell").finish_non_exhaustive()
    }
}

/// Class-level half of the cell contract, for concrete cell types.
///
/// Register implementors with
/// [`CellRegistry::register`](crate::cell::CellRegistry::register).
pub trait CellType: ListCell + Sized {
    /// Stable name used as type map value and reuse identifier.
    ///
    /// Defaults to the type's own name without its module path.
    fn identifier() -> String {
        type_identifier::<Self>()
    }

    /// Produces a fresh instance.
    ///
    /// Return `None` if a resource the cell needs is missing; the handler
    /// then shows nothing for this position instead of failing.
    fn instantiate() -> Option<Self>;

    /// Computes the height for a payload.
    ///
    /// Must be pure and non-negative. Zero collapses the row, header or
    /// footer. Implementations usually check a discriminant inside `data`
    /// first and return zero when it does not match this cell.
    fn height_for_data(data: &CellData, extra: &CellData) -> f32;
}

/// Returns the name of `T` without module path or generic arguments.
///
/// # Example
///
/// ```
/// use trellis::cell::type_identifier;
///
/// struct ButtonRow;
/// assert_eq!(type_identifier::<ButtonRow>(), "ButtonRow");
/// assert_eq!(type_identifier::<Vec<u8>>(), "Vec");
/// ```
pub fn type_identifier<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .to_string()
}

/// Object-safe class-level cell contract.
///
/// This is what the registry stores and what handlers resolve type tags to.
/// [`CellType`] implementors get one automatically; implement it by hand
/// for classes that are not backed by a single Rust type.
pub trait CellClass: Send + Sync {
    /// Stable name of the class.
    fn identifier(&self) -> &str;

    /// Produces a fresh instance, or `None` if that is impossible.
    fn instantiate(&self) -> Option<Box<dyn ListCell>>;

    /// Computes the height for a payload. Zero collapses.
    fn height_for_data(&self, data: &CellData, extra: &CellData) -> f32;
}

/// Adapts a [`CellType`] to [`CellClass`].
pub(crate) struct TypedCellClass<T> {
    identifier: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: CellType> TypedCellClass<T> {
    pub(crate) fn new() -> Self {
        Self {
            identifier: T::identifier(),
            _marker: PhantomData,
        }
    }
}

impl<T: CellType> CellClass for TypedCellClass<T> {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn instantiate(&self) -> Option<Box<dyn ListCell>> {
        T::instantiate().map(|cell| Box::new(cell) as Box<dyn ListCell>)
    }

    fn height_for_data(&self, data: &CellData, extra: &CellData) -> f32 {
        T::height_for_data(data, extra)
    }
}

/// A class assembled from closures.
pub(crate) struct FnCellClass<I, H> {
    pub(crate) identifier: String,
    pub(crate) instantiate: I,
    pub(crate) height: H,
}

impl<I, H> CellClass for FnCellClass<I, H>
where
    I: Fn() -> Option<Box<dyn ListCell>> + Send + Sync,
    H: Fn(&CellData, &CellData) -> f32 + Send + Sync,
{
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn instantiate(&self) -> Option<Box<dyn ListCell>> {
        (self.instantiate)()
    }

    fn height_for_data(&self, data: &CellData, extra: &CellData) -> f32 {
        (self.height)(data, extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Probe {
        bound: Option<CellData>,
    }

    impl ListCell for Probe {
        fn set_data(&mut self, data: &CellData, _extra: &CellData) {
            self.bound = Some(data.clone());
        }
    }

    impl CellType for Probe {
        fn instantiate() -> Option<Self> {
            Some(Self::default())
        }

        fn height_for_data(_data: &CellData, _extra: &CellData) -> f32 {
            12.0
        }
    }

    struct RecordingSink {
        events: Mutex<Vec<(String, Option<String>, Option<IndexPath>)>>,
    }

    impl CellEventSink for RecordingSink {
        fn cell_event(
            &self,
            cell_identifier: &str,
            event_identifier: Option<&str>,
            index_path: Option<IndexPath>,
            _data: &CellData,
            _extra: &CellData,
        ) {
            self.events.lock().push((
                cell_identifier.to_string(),
                event_identifier.map(str::to_string),
                index_path,
            ));
        }
    }

    #[test]
    fn test_default_identifier_is_short_type_name() {
        assert_eq!(Probe::identifier(), "Probe");
    }

    #[test]
    fn test_typed_class_instantiates_and_downcasts() {
        let class = TypedCellClass::<Probe>::new();
        assert_eq!(class.identifier(), "Probe");
        assert_eq!(class.height_for_data(&CellData::None, &CellData::None), 12.0);

        let mut cell = class.instantiate().unwrap();
        cell.set_data(&CellData::from(5), &CellData::None);
        let probe = cell.downcast_ref::<Probe>().unwrap();
        assert_eq!(probe.bound, Some(CellData::Int(5)));
    }

    #[test]
    fn test_event_sink_ref_forwards_while_alive() {
        let sink = Arc::new(RecordingSink {
            events: Mutex::new(Vec::new()),
        });
        let sink_ref = EventSinkRef::to(&sink);
        assert!(sink_ref.is_connected());

        let sent = sink_ref.send(
            "ButtonRow",
            Some("switchOnOff"),
            Some(IndexPath::new(0, 1)),
            &CellData::None,
            &CellData::Bool(true),
        );
        assert!(sent);
        assert_eq!(
            sink.events.lock().as_slice(),
            &[(
                "ButtonRow".to_string(),
                Some("switchOnOff".to_string()),
                Some(IndexPath::new(0, 1)),
            )]
        );

        drop(sink);
        assert!(!sink_ref.is_connected());
        assert!(!sink_ref.send("ButtonRow", None, None, &CellData::None, &CellData::None));
    }

    #[test]
    fn test_default_event_sink_ref_is_disconnected() {
        let sink_ref = EventSinkRef::default();
        assert!(!sink_ref.is_connected());
        assert!(!sink_ref.send("Any", None, None, &CellData::None, &CellData::None));
    }
}
