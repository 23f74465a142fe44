//! Identifier-to-class registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use trellis_core::logging::targets;

use super::contract::{CellClass, CellType, FnCellClass, ListCell, TypedCellClass};
use crate::model::CellData;

/// Maps cell identifiers to cell classes.
///
/// The type map of a handler is data: it names identifiers as strings. The
/// registry turns those strings into classes without reflection. Fill it once
/// at startup, wrap it in an `Arc` and share it with every handler.
///
/// Registering an identifier twice replaces the earlier class.
#[derive(Clone, Default)]
pub struct CellRegistry {
    classes: HashMap<String, Arc<dyn CellClass>>,
}

impl CellRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a concrete cell type and returns its identifier.
    pub fn register<T: CellType>(&mut self) -> String {
        let class = Arc::new(TypedCellClass::<T>::new());
        let identifier = class.identifier().to_string();
        self.register_class(class);
        identifier
    }

    /// Registers a concrete cell type, builder style.
    pub fn with<T: CellType>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Registers a class, returning the class it replaced.
    pub fn register_class(&mut self, class: Arc<dyn CellClass>) -> Option<Arc<dyn CellClass>> {
        let identifier = class.identifier().to_string();
        let previous = self.classes.insert(identifier.clone(), class);
        if previous.is_some() {
            tracing::debug!(target: targets::REGISTRY, %identifier, "replaced cell class");
        } else {
            tracing::trace!(target: targets::REGISTRY, %identifier, "registered cell class");
        }
        previous
    }

    /// Registers a class assembled from an instantiation and a height closure.
    pub fn register_fn<I, H>(&mut self, identifier: impl Into<String>, instantiate: I, height: H)
    where
        I: Fn() -> Option<Box<dyn ListCell>> + Send + Sync + 'static,
        H: Fn(&CellData, &CellData) -> f32 + Send + Sync + 'static,
    {
        self.register_class(Arc::new(FnCellClass {
            identifier: identifier.into(),
            instantiate,
            height,
        }));
    }

    /// Removes a class, returning it if it was registered.
    pub fn unregister(&mut self, identifier: &str) -> Option<Arc<dyn CellClass>> {
        self.classes.remove(identifier)
    }

    /// Resolves an identifier to its class.
    pub fn resolve(&self, identifier: &str) -> Option<Arc<dyn CellClass>> {
        self.classes.get(identifier).cloned()
    }

    /// Returns `true` if a class is registered under `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.classes.contains_key(identifier)
    }

    /// Returns the number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no class is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns all registered identifiers in sorted order.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        identifiers
    }
}

impl fmt::Debug for CellRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}
