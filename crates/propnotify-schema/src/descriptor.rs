//! Declarative model descriptions.
//!
//! A [`ModelDescriptor`] is the schema form of a model type: its name, its
//! properties ([`PropertySpec`]), its invocator candidates
//! ([`InvocatorSpec`]), an optional notify-all mode, and an optional parent
//! descriptor whose markers it inherits. Descriptors are plain data; they
//! carry no accessors and perform no dispatch. The engine's generator macro
//! builds one per model type, once, and hand-written `Model` impls build
//! theirs the same way.
//!
//! # Invariants
//!
//! 1. A descriptor is immutable after [`ModelBuilder::build`].
//! 2. Marker resolution walks the parent chain root → leaf; at each level
//!    an explicit marker set or suppression replaces the inherited state
//!    for that property, and a re-declaration with neither keeps it.
//! 3. Notification names resolve in marker declaration order; duplicates
//!    collapse to their first position.

use std::fmt;
use std::sync::Arc;

use crate::marker::{NotifyAllMode, NotifyMarker};

/// The kind of value a property holds, as far as the equality policy is
/// concerned.
///
/// Enumerated properties are described as `Int` (their discriminant);
/// reference-identity properties as `Uint` (an identity handle). Both get
/// exact equality, like every non-floating kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Signed integral.
    Int,
    /// Unsigned integral.
    Uint,
    /// Boolean.
    Bool,
    /// String.
    Str,
    /// Single-precision floating point (tolerance-compared).
    F32,
    /// Double-precision floating point (tolerance-compared).
    F64,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Bool => "bool",
            Self::Str => "str",
            Self::F32 => "f32",
            Self::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// Reachability of an accessor or invocator from generated-behavior
/// context.
///
/// Only `Public` members are reachable from the synthesized write path;
/// `Crate` and `Private` model the original's internal/private accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Reachable from anywhere, including the generated behavior.
    Public,
    /// Reachable only within the declaring crate.
    Crate,
    /// Reachable only within the declaring type.
    Private,
}

/// Whether a member matches the "publish a named change" shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocatorShape {
    /// Takes a property name, publishes a change notification.
    NamedChange,
    /// Anything else; never a candidate.
    Other,
}

/// One member considered as an invocator candidate.
///
/// Candidates are matched by shape, not by name. A member with the wrong
/// shape or non-public access is simply not a candidate; a well-shaped
/// public member that is declared but unimplemented is a candidate that
/// fails validation with `AbstractInvocator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvocatorSpec {
    shape: InvocatorShape,
    access: Access,
    implemented: bool,
}

impl InvocatorSpec {
    /// A public, implemented, correctly shaped invocator: what the
    /// generator emits for every macro-built model.
    #[must_use]
    pub fn published() -> Self {
        Self {
            shape: InvocatorShape::NamedChange,
            access: Access::Public,
            implemented: true,
        }
    }

    /// A correctly shaped candidate that is declared but unimplemented.
    #[must_use]
    pub fn unimplemented() -> Self {
        Self {
            implemented: false,
            ..Self::published()
        }
    }

    /// A member with the given shape and access.
    #[must_use]
    pub fn new(shape: InvocatorShape, access: Access, implemented: bool) -> Self {
        Self {
            shape,
            access,
            implemented,
        }
    }

    /// Whether this member counts as an invocator candidate.
    #[must_use]
    pub fn is_candidate(&self) -> bool {
        self.shape == InvocatorShape::NamedChange && self.access == Access::Public
    }

    /// Whether the member has an implementation.
    #[must_use]
    pub fn is_implemented(&self) -> bool {
        self.implemented
    }
}

/// Description of one property: kind, accessor reachability,
/// interceptability, and markers.
#[derive(Clone, Debug)]
pub struct PropertySpec {
    name: String,
    kind: ValueKind,
    interceptable: bool,
    read_access: Access,
    write_access: Access,
    markers: Vec<NotifyMarker>,
    suppressed: bool,
}

impl PropertySpec {
    /// A plain, interceptable, public property with no markers.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            interceptable: true,
            read_access: Access::Public,
            write_access: Access::Public,
            markers: Vec::new(),
            suppressed: false,
        }
    }

    /// Attach a marker publishing under the property's own name.
    #[must_use]
    pub fn notify(mut self) -> Self {
        self.markers.push(NotifyMarker::own_name());
        self
    }

    /// Attach a marker publishing under an explicit name.
    #[must_use]
    pub fn notify_as(mut self, name: impl Into<String>) -> Self {
        self.markers.push(NotifyMarker::named(name));
        self
    }

    /// Suppress notification, cancelling any inherited markers.
    #[must_use]
    pub fn suppress(mut self) -> Self {
        self.suppressed = true;
        self
    }

    /// Mark the property as non-interceptable (the original's non-virtual
    /// property: its accessors cannot be routed through the behavior).
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.interceptable = false;
        self
    }

    /// Restrict the read accessor's reachability.
    #[must_use]
    pub fn read_access(mut self, access: Access) -> Self {
        self.read_access = access;
        self
    }

    /// Restrict the write accessor's reachability.
    #[must_use]
    pub fn write_access(mut self, access: Access) -> Self {
        self.write_access = access;
        self
    }

    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property's value kind.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

/// Immutable schema description of one model type.
#[derive(Clone, Debug)]
pub struct ModelDescriptor {
    type_name: String,
    properties: Vec<PropertySpec>,
    invocators: Vec<InvocatorSpec>,
    notify_all: Option<NotifyAllMode>,
    parent: Option<Arc<ModelDescriptor>>,
}

impl ModelDescriptor {
    /// Start building a descriptor for the named model type.
    #[must_use]
    pub fn builder(type_name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            inner: Self {
                type_name: type_name.into(),
                properties: Vec::new(),
                invocators: Vec::new(),
                notify_all: None,
                parent: None,
            },
        }
    }

    /// The model type's name, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Properties declared directly on this descriptor (not inherited).
    #[must_use]
    pub fn declared_properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    /// The parent chain, root ancestor first, `self` last.
    fn chain(&self) -> Vec<&ModelDescriptor> {
        let mut chain = Vec::new();
        let mut cursor = Some(self);
        while let Some(desc) = cursor {
            chain.push(desc);
            cursor = desc.parent.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Invocator entries across the whole chain, root first.
    pub(crate) fn all_invocators(&self) -> Vec<InvocatorSpec> {
        self.chain()
            .into_iter()
            .flat_map(|d| d.invocators.iter().copied())
            .collect()
    }

    /// Total member count across the chain (properties + invocator
    /// entries). Zero models the universal-root type.
    pub(crate) fn member_count(&self) -> usize {
        let props = self.effective_properties().len();
        props + self.all_invocators().len()
    }

    /// Resolve the chain into effective per-property state.
    ///
    /// Order: properties in first-declaration order (root ancestor first).
    /// At each level a suppression clears inherited names, an explicit
    /// marker set replaces them (re-activating a suppressed property), and
    /// a bare re-declaration keeps them. Notify-all on the leaf descriptor
    /// then implies an own-name marker on every still-unmarked,
    /// unsuppressed property.
    pub(crate) fn effective_properties(&self) -> Vec<EffectiveProperty> {
        let mut out: Vec<EffectiveProperty> = Vec::new();
        for level in self.chain() {
            for spec in &level.properties {
                let resolved_names = resolve_names(spec);
                match out.iter_mut().find(|p| p.name == spec.name) {
                    Some(existing) => {
                        existing.kind = spec.kind;
                        existing.interceptable = spec.interceptable;
                        existing.read_access = spec.read_access;
                        existing.write_access = spec.write_access;
                        if spec.suppressed {
                            existing.suppressed = true;
                            existing.notify_names.clear();
                        } else if !spec.markers.is_empty() {
                            existing.suppressed = false;
                            existing.notify_names = resolved_names;
                        }
                    }
                    None => out.push(EffectiveProperty {
                        name: spec.name.clone(),
                        kind: spec.kind,
                        interceptable: spec.interceptable,
                        read_access: spec.read_access,
                        write_access: spec.write_access,
                        suppressed: spec.suppressed,
                        implied: false,
                        notify_names: if spec.suppressed {
                            Vec::new()
                        } else {
                            resolved_names
                        },
                    }),
                }
            }
        }
        // The mode's strictness flag only matters during validation; here
        // it just implies the markers.
        if self.notify_all.is_some() {
            for prop in &mut out {
                if prop.notify_names.is_empty() && !prop.suppressed {
                    prop.notify_names = vec![prop.name.clone()];
                    prop.implied = true;
                }
            }
        }
        out
    }

    /// The notify-all mode, if any (leaf level only; not inherited).
    #[must_use]
    pub fn notify_all(&self) -> Option<NotifyAllMode> {
        self.notify_all
    }
}

/// Per-property state after walking the descriptor chain.
#[derive(Clone, Debug)]
pub(crate) struct EffectiveProperty {
    pub(crate) name: String,
    pub(crate) kind: ValueKind,
    pub(crate) interceptable: bool,
    pub(crate) read_access: Access,
    pub(crate) write_access: Access,
    pub(crate) notify_names: Vec<String>,
    pub(crate) suppressed: bool,
    /// Names were implied by notify-all rather than explicit markers.
    pub(crate) implied: bool,
}

/// Marker names in declaration order, duplicates collapsed to their first
/// position, own-name markers resolved to the property name.
fn resolve_names(spec: &PropertySpec) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(spec.markers.len());
    for marker in &spec.markers {
        let name = marker.name().unwrap_or(&spec.name);
        if !names.iter().any(|n| n == name) {
            names.push(name.to_owned());
        }
    }
    names
}

/// Builder for [`ModelDescriptor`].
#[derive(Debug)]
pub struct ModelBuilder {
    inner: ModelDescriptor,
}

impl ModelBuilder {
    /// Add a property.
    #[must_use]
    pub fn property(mut self, spec: PropertySpec) -> Self {
        self.inner.properties.push(spec);
        self
    }

    /// Add an invocator entry.
    #[must_use]
    pub fn invocator(mut self, spec: InvocatorSpec) -> Self {
        self.inner.invocators.push(spec);
        self
    }

    /// Enable notify-all mode.
    #[must_use]
    pub fn notify_all(mut self, mode: NotifyAllMode) -> Self {
        self.inner.notify_all = Some(mode);
        self
    }

    /// Inherit markers and members from a parent descriptor.
    #[must_use]
    pub fn inherit(mut self, parent: &ModelDescriptor) -> Self {
        self.inner.parent = Some(Arc::new(parent.clone()));
        self
    }

    /// Finish the descriptor.
    #[must_use]
    pub fn build(self) -> ModelDescriptor {
        self.inner
    }
}
