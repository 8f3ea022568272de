//! Hand-off to the schema visualizer.
//!
//! The visualizer renders itself; all this crate does is give it somewhere to
//! render and something to ask for the schema.

use crate::IntrospectionProvider;
use std::fmt;
use std::sync::Arc;

/// Identifier of the element the visualizer renders into.
pub const DEFAULT_CONTAINER: &str = "voyager";

/// The element the visualizer mounts into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Container(String);

impl Container {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER)
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options passed to the visualizer on initialization.
#[derive(Clone)]
pub struct VoyagerOptions {
    /// Called whenever the visualizer needs the schema.
    pub introspection: Arc<dyn IntrospectionProvider>,
}

impl VoyagerOptions {
    #[must_use]
    pub fn new(introspection: impl IntrospectionProvider + 'static) -> Self {
        Self {
            introspection: Arc::new(introspection),
        }
    }
}

impl fmt::Debug for VoyagerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoyagerOptions").finish_non_exhaustive()
    }
}

/// An external schema visualizer.
pub trait Widget {
    type Handle;

    /// Renders into `container`, pulling the schema through `options.introspection`.
    fn mount(&mut self, container: &Container, options: VoyagerOptions) -> Self::Handle;
}

/// Initializes `widget` inside `container`.
#[tracing::instrument(skip(widget, options), fields(container = %container))]
pub fn init<W: Widget>(widget: &mut W, container: &Container, options: VoyagerOptions) -> W::Handle {
    tracing::debug!("Mounting visualizer");
    widget.mount(container, options)
}
