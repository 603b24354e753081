#![forbid(unsafe_code)]

//! Model descriptions and shape validation for propnotify.
//!
//! A model is described declaratively: a [`ModelDescriptor`] lists the
//! model's properties (each plain, marked for notification, or suppressed),
//! its invocator candidates, and optionally a parent descriptor whose
//! markers it inherits. The [`validate`] function checks a descriptor
//! against the shape rules and resolves it into a [`ValidatedModel`],
//! the ordered set of properties with their effective notification names.
//!
//! This crate is pure data and inspection; the behavior synthesis and the
//! runtime notification machinery live in `propnotify-engine`.
//!
//! # Invariants
//!
//! 1. Validation is a pure function: same descriptor in, same result out,
//!    no side effects.
//! 2. Resolution preserves declaration order: properties in the order
//!    first declared (root ancestor first), notification names in marker
//!    declaration order with duplicates collapsed (first position wins).
//! 3. A suppressed property resolves to zero notification names even if an
//!    ancestor marked it.

pub mod descriptor;
pub mod error;
pub mod marker;
pub mod validate;

pub use descriptor::{
    Access, InvocatorShape, InvocatorSpec, ModelBuilder, ModelDescriptor, PropertySpec, ValueKind,
};
pub use error::{ErrorClass, ModelError};
pub use marker::{NotifyAllMode, NotifyMarker};
pub use validate::{ResolvedProperty, ValidatedModel, validate};
