//! Behavior synthesis: one interceptor per marked property.
//!
//! [`synthesize`] turns a [`ValidatedModel`] into a [`SynthesizedBehavior`],
//! the name-keyed table of [`Interceptor`]s the write path consults.
//! Plain and suppressed properties get no interceptor; their writes pass
//! straight through and publish nothing. Synthesis is pure and
//! deterministic; the cache (see [`cache`](crate::cache)) guarantees it
//! runs at most once per model type.

use std::sync::Arc;

use ahash::AHashMap;
use propnotify_schema::{ValidatedModel, ValueKind};

/// The write plan for one marked property: gate on equality, write, then
/// publish each name in declaration order.
#[derive(Clone, Debug)]
pub struct Interceptor {
    property: Arc<str>,
    kind: ValueKind,
    notify_names: Vec<Arc<str>>,
}

impl Interceptor {
    /// The intercepted property's name.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The property's value kind (selects the equality policy).
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Names published on a qualifying write, declaration order.
    pub fn notify_names(&self) -> impl Iterator<Item = &str> {
        self.notify_names.iter().map(AsRef::as_ref)
    }
}

/// The generated override set for one model type.
///
/// Created exactly once per type for the process lifetime; all instances
/// of the type share one `Arc` of it.
#[derive(Debug)]
pub struct SynthesizedBehavior {
    type_name: Arc<str>,
    interceptors: AHashMap<Arc<str>, Interceptor>,
}

impl SynthesizedBehavior {
    /// The model type this behavior was synthesized for.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The interceptor for `property`, if the property is marked.
    #[must_use]
    pub fn intercept(&self, property: &str) -> Option<&Interceptor> {
        self.interceptors.get(property)
    }

    /// Number of intercepted properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether no property is intercepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

/// Build the behavior for a validated model.
pub fn synthesize(model: &ValidatedModel) -> SynthesizedBehavior {
    let mut interceptors = AHashMap::with_capacity(model.properties().len());
    for prop in model.properties() {
        if !prop.is_marked() {
            continue;
        }
        let name: Arc<str> = Arc::from(prop.name());
        interceptors.insert(
            Arc::clone(&name),
            Interceptor {
                property: name,
                kind: prop.kind(),
                notify_names: prop.notify_names().iter().map(|n| Arc::from(n.as_str())).collect(),
            },
        );
    }
    tracing::trace!(
        model = model.type_name(),
        intercepted = interceptors.len(),
        "synthesized behavior"
    );
    SynthesizedBehavior {
        type_name: Arc::from(model.type_name()),
        interceptors,
    }
}
