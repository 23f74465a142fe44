//! Callbacks keyed by cell identifier and event identifier.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::{CellData, IndexPath};

/// A registered callback.
///
/// Receives the index path (absent for most header and footer events), the
/// payload and the secondary payload.
pub type CellCallback = Arc<dyn Fn(Option<IndexPath>, &CellData, &CellData) + Send + Sync>;

/// Composite key of a callback.
///
/// Selection callbacks have no event identifier. Event callbacks have one.
/// Both kinds share one keyspace but never match each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackKey {
    cell_identifier: String,
    event_identifier: Option<String>,
}

impl CallbackKey {
    /// Creates a key.
    pub fn new(cell_identifier: impl Into<String>, event_identifier: Option<&str>) -> Self {
        Self {
            cell_identifier: cell_identifier.into(),
            event_identifier: event_identifier.map(str::to_string),
        }
    }

    /// Creates the selection key of a cell.
    pub fn selection(cell_identifier: impl Into<String>) -> Self {
        Self::new(cell_identifier, None)
    }

    /// Returns the cell identifier.
    pub fn cell_identifier(&self) -> &str {
        &self.cell_identifier
    }

    /// Returns the event identifier, `None` for selection keys.
    pub fn event_identifier(&self) -> Option<&str> {
        self.event_identifier.as_deref()
    }

    /// Returns `true` for selection keys.
    pub fn is_selection(&self) -> bool {
        self.event_identifier.is_none()
    }
}

impl fmt::Display for CallbackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.cell_identifier, self.event_identifier.as_deref().unwrap_or(""))
    }
}

/// Registry of callbacks by [`CallbackKey`].
///
/// The last registration for a key wins. Lookups match keys exactly; there
/// is no fallback from an event key to the selection key of the same cell.
///
/// # Example
///
/// ```
/// use trellis::handler::CallbackRegistry;
///
/// let mut callbacks = CallbackRegistry::new();
/// callbacks.register("ButtonRow", Some("switchOnOff"), |index_path, _data, extra| {
///     println!("switch at {index_path:?} is now {:?}", extra.as_bool());
/// });
///
/// assert!(callbacks.lookup("ButtonRow", Some("switchOnOff")).is_some());
/// assert!(callbacks.lookup("ButtonRow", None).is_none());
/// ```
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<CallbackKey, CellCallback>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback, returning the one it replaced.
    pub fn register<F>(
        &mut self,
        cell_identifier: impl Into<String>,
        event_identifier: Option<&str>,
        callback: F,
    ) -> Option<CellCallback>
    where
        F: Fn(Option<IndexPath>, &CellData, &CellData) + Send + Sync + 'static,
    {
        self.insert(CallbackKey::new(cell_identifier, event_identifier), Arc::new(callback))
    }

    /// Registers an already shared callback under `key`.
    pub fn insert(&mut self, key: CallbackKey, callback: CellCallback) -> Option<CellCallback> {
        self.callbacks.insert(key, callback)
    }

    /// Removes the callback under exactly this key.
    ///
    /// Returns `false` if nothing was registered there.
    pub fn unregister(&mut self, cell_identifier: &str, event_identifier: Option<&str>) -> bool {
        self.callbacks
            .remove(&CallbackKey::new(cell_identifier, event_identifier))
            .is_some()
    }

    /// Removes every callback.
    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    /// Looks up the callback under exactly this key.
    pub fn lookup(
        &self,
        cell_identifier: &str,
        event_identifier: Option<&str>,
    ) -> Option<CellCallback> {
        self.callbacks
            .get(&CallbackKey::new(cell_identifier, event_identifier))
            .cloned()
    }

    /// Returns `true` if a callback is registered under this key.
    pub fn contains(&self, cell_identifier: &str, event_identifier: Option<&str>) -> bool {
        self.callbacks
            .contains_key(&CallbackKey::new(cell_identifier, event_identifier))
    }

    /// Returns the number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns `true` if no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Returns all keys in sorted order.
    pub fn keys(&self) -> Vec<&CallbackKey> {
        let mut keys: Vec<&CallbackKey> = self.callbacks.keys().collect();
        keys.sort();
        keys
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_register_lookup_unregister() {
        let mut callbacks = CallbackRegistry::new();
        callbacks.register("ButtonRow", Some("switchOnOff"), |_, _, _| {});

        assert!(callbacks.lookup("ButtonRow", Some("switchOnOff")).is_some());
        assert!(callbacks.unregister("ButtonRow", Some("switchOnOff")));
        assert!(callbacks.lookup("ButtonRow", Some("switchOnOff")).is_none());
        assert!(!callbacks.unregister("ButtonRow", Some("switchOnOff")));
    }

    #[test]
    fn test_namespaces_do_not_fall_back() {
        let mut callbacks = CallbackRegistry::new();
        callbacks.register("ButtonRow", None, |_, _, _| {});

        assert!(callbacks.contains("ButtonRow", None));
        assert!(callbacks.lookup("ButtonRow", Some("thumbnailTouch")).is_none());
        assert!(callbacks.lookup("TextRow", None).is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut callbacks = CallbackRegistry::new();

        callbacks.register("TextRow", None, |_, _, _| panic!("replaced callback must not run"));
        let hits_clone = hits.clone();
        let replaced = callbacks.register("TextRow", None, move |_, _, _| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert!(replaced.is_some());
        assert_eq!(callbacks.len(), 1);

        let callback = callbacks.lookup("TextRow", None).unwrap();
        callback(Some(IndexPath::new(0, 0)), &CellData::None, &CellData::None);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear() {
        let mut callbacks = CallbackRegistry::new();
        callbacks.register("TextRow", None, |_, _, _| {});
        callbacks.register("ButtonRow", Some("switchOnOff"), |_, _, _| {});
        callbacks.clear();

        assert!(callbacks.is_empty());
        assert!(callbacks.lookup("TextRow", None).is_none());
        assert!(callbacks.lookup("ButtonRow", Some("switchOnOff")).is_none());
    }

    #[test]
    fn test_key_display_and_order() {
        let mut callbacks = CallbackRegistry::new();
        callbacks.register("ButtonRow", Some("thumbnailTouch"), |_, _, _| {});
        callbacks.register("ButtonRow", None, |_, _, _| {});

        let keys: Vec<String> = callbacks.keys().iter().map(|key| key.to_string()).collect();
        assert_eq!(keys, vec!["ButtonRow:", "ButtonRow:thumbnailTouch"]);
        assert!(CallbackKey::selection("ButtonRow").is_selection());
    }
}
