//! The annotation surface, represented as data.
//!
//! Markers are what a model author attaches to properties (or to the whole
//! model) to request notification behavior. The `notify_model!` generator
//! in `propnotify-engine` produces these from its field grammar; hand-built
//! descriptors attach them through [`PropertySpec`](crate::PropertySpec)
//! and [`ModelBuilder`](crate::ModelBuilder).

/// A notification marker on a single property.
///
/// A marker without an explicit name publishes under the property's own
/// name. A property may carry several markers; each qualifying write then
/// publishes every name, in marker declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifyMarker {
    name: Option<String>,
}

impl NotifyMarker {
    /// Marker publishing under the property's own name.
    #[must_use]
    pub fn own_name() -> Self {
        Self { name: None }
    }

    /// Marker publishing under an explicit name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The explicit name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Model-level mode implying a [`NotifyMarker`] on every property that has
/// no explicit marker and is not suppressed.
///
/// `error_on_fixed` controls what happens when the implied marker lands on
/// a non-interceptable property: `true` makes it a hard validation error,
/// `false` silently leaves the property un-intercepted. An *explicit*
/// marker on a non-interceptable property is always an error regardless of
/// this flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotifyAllMode {
    /// Reject non-interceptable properties instead of skipping them.
    pub error_on_fixed: bool,
}

impl NotifyAllMode {
    /// Notify-all that silently skips non-interceptable properties.
    #[must_use]
    pub fn skipping() -> Self {
        Self {
            error_on_fixed: false,
        }
    }

    /// Notify-all that rejects non-interceptable properties.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            error_on_fixed: true,
        }
    }
}
